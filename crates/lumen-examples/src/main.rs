use std::process::ExitCode;

use lumen_engine::device::GpuInit;
use lumen_engine::harness::{Dispatcher, LaunchOptions};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::window::{Runtime, RuntimeConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let options = match LaunchOptions::parse(std::env::args_os().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            log::error!("usage: lumen [-name <ExampleName>]");
            return ExitCode::FAILURE;
        }
    };

    let registry = lumen_examples::registry();
    let dispatcher = match Dispatcher::new(registry, &options) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let assets = lumen_examples::asset_loader();
    match Runtime::run(RuntimeConfig::default(), GpuInit::default(), assets, dispatcher) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
