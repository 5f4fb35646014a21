use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::AssetLoader;
use crate::device::{Gpu, GpuInit};
use crate::harness::{Dispatcher, LifecycleEvent, LifecycleQueue};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};

#[cfg(feature = "gamepad")]
use crate::input::platform::gilrs::GamepadSource;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Base window title; the active example's name is appended.
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `dispatcher` until the window closes or a
    /// lifecycle call fails.
    ///
    /// A lifecycle failure is returned as the error after the event loop exits.
    pub fn run(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        assets: AssetLoader,
        dispatcher: Dispatcher<Gpu>,
    ) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, assets, dispatcher);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    assets: AssetLoader,
    dispatcher: Dispatcher<Gpu>,
    lifecycle: LifecycleQueue,

    gpu: Option<Gpu>,
    input_state: InputState,
    input_frame: InputFrame,

    #[cfg(feature = "gamepad")]
    gamepad: Option<GamepadSource>,

    /// Example name currently shown in the title bar.
    titled: Option<&'static str>,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl AppState {
    fn new(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        assets: AssetLoader,
        dispatcher: Dispatcher<Gpu>,
    ) -> Self {
        let lifecycle = dispatcher.lifecycle();
        Self {
            config,
            gpu_init,
            assets,
            dispatcher,
            lifecycle,
            gpu: None,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            #[cfg(feature = "gamepad")]
            gamepad: open_gamepad(),
            titled: None,
            failure: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    /// Stores `err` for `Runtime::run` to return and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.failure = Some(err);
        self.request_exit(event_loop);
    }

    fn create_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu = pollster::block_on(Gpu::new(Arc::new(window), self.gpu_init.clone()))
            .context("GPU initialization failed")?;

        let gpu = self.gpu.insert(gpu);
        self.dispatcher.start(gpu, &self.assets)?;
        self.sync_title();
        gpu_window_redraw(&self.gpu);
        Ok(())
    }

    fn sync_title(&mut self) {
        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        let name = self.dispatcher.active_name();
        if name == self.titled {
            return;
        }
        self.titled = name;
        match name {
            Some(name) => gpu.window().set_title(&format!("{} - {name}", self.config.title)),
            None => gpu.window().set_title(&self.config.title),
        }
    }

    #[cfg(feature = "gamepad")]
    fn poll_gamepad(&mut self) {
        let Some(source) = self.gamepad.as_mut() else {
            return;
        };
        let mut events = Vec::new();
        source.poll(&mut events);
        for ev in events {
            self.input_state.apply_event(&mut self.input_frame, ev);
        }
    }

    #[cfg(not(feature = "gamepad"))]
    fn poll_gamepad(&mut self) {}

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_gamepad();

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let result = self.dispatcher.frame(gpu, &self.assets, &self.input_frame);

        // Clear per-frame deltas after the frame is consumed.
        self.input_frame.clear();

        if let Err(err) = result {
            self.fail(event_loop, err);
            return;
        }
        self.sync_title();
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(gpu) = self.gpu.as_mut() {
            self.dispatcher.shutdown(gpu, &self.assets);
        }
        self.request_exit(event_loop);
    }
}

#[cfg(feature = "gamepad")]
fn open_gamepad() -> Option<GamepadSource> {
    match GamepadSource::new() {
        Ok(source) => Some(source),
        Err(e) => {
            log::warn!("gamepad input unavailable: {e:#}");
            None
        }
    }
}

fn gpu_window_redraw(gpu: &Option<Gpu>) {
    if let Some(gpu) = gpu {
        gpu.window().request_redraw();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            self.lifecycle.push(LifecycleEvent::EnteredForeground);
            gpu_window_redraw(&self.gpu);
            return;
        }

        if let Err(e) = self.create_gpu(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.lifecycle.push(LifecycleEvent::EnteredBackground);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; examples animate every frame.
        gpu_window_redraw(&self.gpu);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            self.input_state.apply_event(&mut self.input_frame, ev);
        }

        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(*new_size);
                    gpu.window().request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(gpu) = self.gpu.as_mut() {
                    let new_size = gpu.window().inner_size();
                    gpu.resize(new_size);
                    gpu.window().request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
