use std::fmt;
use std::time::Instant;

use anyhow::Result;

use crate::assets::AssetLoader;
use crate::core::{Context, Example};
use crate::input::{self, Directions, InputFrame, Navigation};
use crate::time::{FrameClock, FrameTime};

use super::{HarnessError, LaunchOptions, LifecycleEvent, LifecycleQueue, Registry, SuspendHook};

/// Dispatcher state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// Constructed, no example initialized yet.
    Uninitialized,
    /// The example at this registry index is active.
    Running(usize),
    /// Shut down or failed; every further call is a no-op.
    Terminated,
}

/// Lifecycle call that can fail.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Init,
    Update,
    Draw,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Init => "Init",
            Stage::Update => "Update",
            Stage::Draw => "Draw",
        };
        f.write_str(s)
    }
}

/// Owns the active example and sequences its lifecycle.
///
/// Per frame: drain lifecycle notifications, translate input, perform a
/// pending switch (Quit the old example, then Init the new one), tick the
/// clock, Update, and Draw unless the app is in the background.
///
/// Any lifecycle error terminates the dispatcher. The failing example is
/// dropped without its `quit` running.
pub struct Dispatcher<G: 'static> {
    registry: Registry<G>,
    start: usize,
    phase: Phase,
    active: Option<Box<dyn Example<G>>>,
    clock: FrameClock,
    lifecycle: LifecycleQueue,
    backgrounded: bool,
    suspend: Option<Box<dyn SuspendHook<G>>>,
}

impl<G: 'static> Dispatcher<G> {
    /// Creates a dispatcher starting at the example selected by `options`.
    ///
    /// Fails on an empty registry or an unknown example name; nothing has been
    /// initialized at that point.
    pub fn new(registry: Registry<G>, options: &LaunchOptions) -> Result<Self, HarnessError> {
        let start = options.start_index(&registry)?;
        Ok(Self {
            registry,
            start,
            phase: Phase::Uninitialized,
            active: None,
            clock: FrameClock::new(),
            lifecycle: LifecycleQueue::default(),
            backgrounded: false,
            suspend: None,
        })
    }

    /// Installs a platform suspend/resume capability.
    pub fn with_suspend_hook(mut self, hook: impl SuspendHook<G> + 'static) -> Self {
        self.suspend = Some(Box::new(hook));
        self
    }

    /// Handle for platform code to post lifecycle notifications.
    pub fn lifecycle(&self) -> LifecycleQueue {
        self.lifecycle.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Name of the active example, if any.
    pub fn active_name(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Running(i) => self.registry.get(i).map(|e| e.name()),
            _ => None,
        }
    }

    /// False while the app is in the background.
    pub fn can_draw(&self) -> bool {
        !self.backgrounded
    }

    /// Initializes the starting example.
    pub fn start(&mut self, gpu: &mut G, assets: &AssetLoader) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Ok(());
        }
        self.enter(self.start, gpu, assets)
    }

    /// Runs one frame.
    pub fn frame(&mut self, gpu: &mut G, assets: &AssetLoader, input: &InputFrame) -> Result<()> {
        if !matches!(self.phase, Phase::Running(_)) {
            return Ok(());
        }

        self.apply_lifecycle(gpu);

        let signals = input::translate(input);
        let mut directions = signals.directions;
        if let Some(nav) = signals.navigation {
            self.switch(nav, gpu, assets)?;
            // The incoming example starts with cleared input.
            directions = Directions::default();
        }

        let Phase::Running(index) = self.phase else {
            return Ok(());
        };
        let name = self.name_at(index);
        let time = self.clock.tick();

        let Some(example) = self.active.as_mut() else {
            return Ok(());
        };

        let mut ctx = Context {
            example: name,
            gpu,
            assets,
            input: directions,
            time,
        };

        if let Err(err) = example.update(&mut ctx) {
            return Err(self.fail(Stage::Update, name, err));
        }

        if !self.backgrounded {
            if let Err(err) = example.draw(&mut ctx) {
                return Err(self.fail(Stage::Draw, name, err));
            }
        }

        Ok(())
    }

    /// Quits the active example and terminates. Safe to call more than once.
    pub fn shutdown(&mut self, gpu: &mut G, assets: &AssetLoader) {
        if let Phase::Running(_) = self.phase {
            self.quit_active(gpu, assets);
        }
        self.phase = Phase::Terminated;
    }

    fn name_at(&self, index: usize) -> &'static str {
        self.registry.get(index).map(|e| e.name()).unwrap_or("<unregistered>")
    }

    fn switch(&mut self, nav: Navigation, gpu: &mut G, assets: &AssetLoader) -> Result<()> {
        let Phase::Running(current) = self.phase else {
            return Ok(());
        };

        let count = self.registry.len();
        let next = match nav {
            Navigation::Next => (current + 1) % count,
            Navigation::Previous => (current + count - 1) % count,
        };

        log::info!("switching example: {} -> {}", self.name_at(current), self.name_at(next));

        self.quit_active(gpu, assets);
        self.enter(next, gpu, assets)
    }

    fn enter(&mut self, index: usize, gpu: &mut G, assets: &AssetLoader) -> Result<()> {
        let Some(entry) = self.registry.get(index) else {
            self.phase = Phase::Terminated;
            anyhow::bail!("example index {index} is out of range");
        };
        let (name, init) = (entry.name(), entry.init_fn());

        self.clock.reset();
        log::info!("starting example: {name}");

        let mut ctx = idle_context(name, gpu, assets);
        match init(&mut ctx) {
            Ok(example) => {
                self.active = Some(example);
                self.phase = Phase::Running(index);
                Ok(())
            }
            Err(err) => Err(self.fail(Stage::Init, name, err)),
        }
    }

    fn quit_active(&mut self, gpu: &mut G, assets: &AssetLoader) {
        let Some(example) = self.active.take() else {
            return;
        };
        let name = match self.phase {
            Phase::Running(i) => self.name_at(i),
            _ => "<inactive>",
        };

        let mut ctx = idle_context(name, gpu, assets);
        example.quit(&mut ctx);
        log::debug!("quit example: {name}");
    }

    fn apply_lifecycle(&mut self, gpu: &mut G) {
        for event in self.lifecycle.drain() {
            match event {
                LifecycleEvent::EnteredBackground if !self.backgrounded => {
                    self.backgrounded = true;
                    log::info!("entered background, drawing suspended");
                    if let Some(hook) = self.suspend.as_mut() {
                        hook.suspend(gpu);
                    }
                }
                LifecycleEvent::EnteredForeground if self.backgrounded => {
                    self.backgrounded = false;
                    log::info!("entered foreground, drawing resumed");
                    if let Some(hook) = self.suspend.as_mut() {
                        hook.resume(gpu);
                    }
                }
                _ => {}
            }
        }
    }

    fn fail(&mut self, stage: Stage, name: &'static str, err: anyhow::Error) -> anyhow::Error {
        self.phase = Phase::Terminated;
        self.active = None;
        err.context(format!("{stage} failed for example '{name}'"))
    }
}

fn idle_context<'a, G>(
    name: &'static str,
    gpu: &'a mut G,
    assets: &'a AssetLoader,
) -> Context<'a, G> {
    Context {
        example: name,
        gpu,
        assets,
        input: Directions::default(),
        time: FrameTime::zero(Instant::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, InputState, Key, KeyState};

    /// Recording GPU host: every lifecycle call appends to `log`.
    #[derive(Default)]
    struct Journal {
        log: Vec<String>,
        live: usize,
        fail_init: Option<&'static str>,
        fail_update: Option<&'static str>,
        fail_draw: Option<&'static str>,
    }

    struct Recorder;

    impl Example<Journal> for Recorder {
        fn init(ctx: &mut Context<'_, Journal>) -> Result<Self> {
            let journal = &mut *ctx.gpu;
            assert_eq!(journal.live, 0, "two examples active at once");
            journal.log.push(format!("init:{}", ctx.example));
            if journal.fail_init == Some(ctx.example) {
                anyhow::bail!("pipeline creation failed");
            }
            journal.live += 1;
            Ok(Recorder)
        }

        fn update(&mut self, ctx: &mut Context<'_, Journal>) -> Result<()> {
            let mut entry = format!("update:{}", ctx.example);
            if ctx.input.left {
                entry.push_str("+left");
            }
            if ctx.input.right {
                entry.push_str("+right");
            }
            ctx.gpu.log.push(entry);
            if ctx.gpu.fail_update == Some(ctx.example) {
                anyhow::bail!("update exploded");
            }
            Ok(())
        }

        fn draw(&mut self, ctx: &mut Context<'_, Journal>) -> Result<()> {
            ctx.gpu.log.push(format!("draw:{}", ctx.example));
            if ctx.gpu.fail_draw == Some(ctx.example) {
                anyhow::bail!("surface lost for good");
            }
            Ok(())
        }

        fn quit(self: Box<Self>, ctx: &mut Context<'_, Journal>) {
            ctx.gpu.log.push(format!("quit:{}", ctx.example));
            ctx.gpu.live -= 1;
        }
    }

    struct RecordingHook;

    impl SuspendHook<Journal> for RecordingHook {
        fn suspend(&mut self, gpu: &mut Journal) {
            gpu.log.push("suspend".into());
        }

        fn resume(&mut self, gpu: &mut Journal) {
            gpu.log.push("resume".into());
        }
    }

    fn registry() -> Registry<Journal> {
        Registry::new()
            .with::<Recorder>("ClearScreen")
            .with::<Recorder>("BasicTriangle")
            .with::<Recorder>("TexturedQuad")
    }

    fn assets() -> AssetLoader {
        AssetLoader::new(Vec::<std::path::PathBuf>::new())
    }

    /// Holds input state across frames the way the runtime does.
    #[derive(Default)]
    struct Keyboard {
        state: InputState,
        frame: InputFrame,
    }

    impl Keyboard {
        fn press(&mut self, key: Key) {
            self.send(key, KeyState::Pressed);
        }

        fn release(&mut self, key: Key) {
            self.send(key, KeyState::Released);
        }

        fn send(&mut self, key: Key, state: KeyState) {
            let ev = InputEvent::Key { key, state, code: 0, repeat: false };
            self.state.apply_event(&mut self.frame, ev);
        }

        fn run(&mut self, d: &mut Dispatcher<Journal>, gpu: &mut Journal, assets: &AssetLoader) -> Result<()> {
            let out = d.frame(gpu, assets, &self.frame);
            self.frame.clear();
            out
        }
    }

    fn started(options: LaunchOptions) -> (Dispatcher<Journal>, Journal, AssetLoader) {
        let mut d = Dispatcher::new(registry(), &options).unwrap();
        let mut gpu = Journal::default();
        let assets = assets();
        d.start(&mut gpu, &assets).unwrap();
        (d, gpu, assets)
    }

    #[test]
    fn starts_with_first_example_by_default() {
        let (d, gpu, _) = started(LaunchOptions::default());
        assert_eq!(d.phase(), Phase::Running(0));
        assert_eq!(d.active_name(), Some("ClearScreen"));
        assert_eq!(gpu.log, ["init:ClearScreen"]);
    }

    #[test]
    fn name_option_selects_start_example() {
        let options = LaunchOptions { example: Some("TexturedQuad".into()) };
        let (d, gpu, _) = started(options);
        assert_eq!(d.phase(), Phase::Running(2));
        assert_eq!(gpu.log, ["init:TexturedQuad"]);
    }

    #[test]
    fn unknown_name_fails_before_any_init() {
        let options = LaunchOptions { example: Some("Nope".into()) };
        let err = Dispatcher::new(registry(), &options).err();
        assert_eq!(err, Some(HarnessError::UnknownExample("Nope".into())));
    }

    #[test]
    fn update_then_draw_each_frame() {
        let (mut d, mut gpu, assets) = started(LaunchOptions::default());
        let mut kb = Keyboard::default();
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        assert_eq!(
            gpu.log,
            [
                "init:ClearScreen",
                "update:ClearScreen",
                "draw:ClearScreen",
                "update:ClearScreen",
                "draw:ClearScreen",
            ]
        );
    }

    #[test]
    fn clear_screen_then_next_then_quit() {
        let options = LaunchOptions::parse(["-name", "ClearScreen"]).unwrap();
        let (mut d, mut gpu, assets) = started(options);
        let mut kb = Keyboard::default();

        kb.run(&mut d, &mut gpu, &assets).unwrap();
        kb.press(Key::D);
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        kb.release(Key::D);
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        d.shutdown(&mut gpu, &assets);

        assert_eq!(
            gpu.log,
            [
                "init:ClearScreen",
                "update:ClearScreen",
                "draw:ClearScreen",
                "quit:ClearScreen",
                "init:BasicTriangle",
                "update:BasicTriangle",
                "draw:BasicTriangle",
                "update:BasicTriangle",
                "draw:BasicTriangle",
                "quit:BasicTriangle",
            ]
        );
        assert_eq!(d.phase(), Phase::Terminated);
        assert_eq!(gpu.live, 0);
    }

    #[test]
    fn navigation_wraps_around() {
        let (mut d, mut gpu, assets) = started(LaunchOptions::default());
        let mut kb = Keyboard::default();

        kb.press(Key::A);
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        assert_eq!(d.phase(), Phase::Running(2));

        kb.release(Key::A);
        kb.press(Key::D);
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        assert_eq!(d.phase(), Phase::Running(0));
    }

    #[test]
    fn quit_always_precedes_next_init() {
        let (mut d, mut gpu, assets) = started(LaunchOptions::default());
        let mut kb = Keyboard::default();

        for key in [Key::D, Key::D, Key::A, Key::D, Key::A, Key::A, Key::A] {
            kb.press(key);
            kb.run(&mut d, &mut gpu, &assets).unwrap();
            kb.release(key);
        }
        d.shutdown(&mut gpu, &assets);

        // Recorder::init asserts nothing else is live; here check strict alternation.
        let lifecycle: Vec<&str> = gpu
            .log
            .iter()
            .filter_map(|e| e.split(':').next())
            .filter(|k| *k == "init" || *k == "quit")
            .collect();
        for pair in lifecycle.chunks(2) {
            assert_eq!(pair, ["init", "quit"]);
        }
        assert_eq!(gpu.live, 0);
    }

    #[test]
    fn held_arrow_reaches_example_once() {
        let (mut d, mut gpu, assets) = started(LaunchOptions::default());
        let mut kb = Keyboard::default();

        kb.press(Key::ArrowLeft);
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        kb.run(&mut d, &mut gpu, &assets).unwrap();

        let updates: Vec<&String> = gpu.log.iter().filter(|e| e.starts_with("update")).collect();
        assert_eq!(updates, ["update:ClearScreen+left", "update:ClearScreen"]);
    }

    #[test]
    fn directions_are_cleared_on_switch() {
        let (mut d, mut gpu, assets) = started(LaunchOptions::default());
        let mut kb = Keyboard::default();

        kb.press(Key::ArrowRight);
        kb.press(Key::D);
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        assert!(gpu.log.contains(&"update:BasicTriangle".to_string()));
    }

    #[test]
    fn background_suppresses_draw_only() {
        let (d, mut gpu, assets) = started(LaunchOptions::default());
        let mut d = d.with_suspend_hook(RecordingHook);
        let lifecycle = d.lifecycle();
        let mut kb = Keyboard::default();
        gpu.log.clear();

        lifecycle.push(LifecycleEvent::EnteredBackground);
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        assert!(!d.can_draw());
        kb.run(&mut d, &mut gpu, &assets).unwrap();
        lifecycle.push(LifecycleEvent::EnteredForeground);
        kb.run(&mut d, &mut gpu, &assets).unwrap();

        assert_eq!(
            gpu.log,
            [
                "suspend",
                "update:ClearScreen",
                "update:ClearScreen",
                "resume",
                "update:ClearScreen",
                "draw:ClearScreen",
            ]
        );
        assert!(d.can_draw());
    }

    #[test]
    fn repeated_background_notifications_suspend_once() {
        let (d, mut gpu, assets) = started(LaunchOptions::default());
        let mut d = d.with_suspend_hook(RecordingHook);
        let lifecycle = d.lifecycle();
        gpu.log.clear();

        lifecycle.push(LifecycleEvent::EnteredBackground);
        lifecycle.push(LifecycleEvent::EnteredBackground);
        d.frame(&mut gpu, &assets, &InputFrame::default()).unwrap();

        assert_eq!(gpu.log.iter().filter(|e| *e == "suspend").count(), 1);
    }

    #[test]
    fn update_failure_terminates_without_quit() {
        let (mut d, mut gpu, assets) = started(LaunchOptions::default());
        gpu.fail_update = Some("ClearScreen");

        let err = d.frame(&mut gpu, &assets, &InputFrame::default()).unwrap_err();
        assert_eq!(d.phase(), Phase::Terminated);
        assert!(format!("{err:#}").starts_with("Update failed for example 'ClearScreen'"));
        assert!(!gpu.log.iter().any(|e| e.starts_with("draw") || e.starts_with("quit")));

        // Terminated dispatchers ignore further frames and shutdowns.
        let before = gpu.log.len();
        d.frame(&mut gpu, &assets, &InputFrame::default()).unwrap();
        d.shutdown(&mut gpu, &assets);
        assert_eq!(gpu.log.len(), before);
    }

    #[test]
    fn draw_failure_is_fatal() {
        let (mut d, mut gpu, assets) = started(LaunchOptions::default());
        gpu.fail_draw = Some("ClearScreen");

        let err = d.frame(&mut gpu, &assets, &InputFrame::default()).unwrap_err();
        assert!(err.to_string().contains("Draw failed"));
        assert_eq!(d.phase(), Phase::Terminated);
    }

    #[test]
    fn init_failure_on_switch_is_fatal() {
        let (mut d, mut gpu, assets) = started(LaunchOptions::default());
        gpu.fail_init = Some("BasicTriangle");
        let mut kb = Keyboard::default();

        kb.press(Key::D);
        let err = kb.run(&mut d, &mut gpu, &assets).unwrap_err();
        assert!(err.to_string().contains("Init failed for example 'BasicTriangle'"));
        assert_eq!(d.phase(), Phase::Terminated);
        assert_eq!(
            gpu.log,
            ["init:ClearScreen", "quit:ClearScreen", "init:BasicTriangle"]
        );
    }

    #[test]
    fn init_failure_at_startup_is_fatal() {
        let mut d = Dispatcher::new(registry(), &LaunchOptions::default()).unwrap();
        let mut gpu = Journal { fail_init: Some("ClearScreen"), ..Default::default() };
        let err = d.start(&mut gpu, &assets()).unwrap_err();
        assert!(err.to_string().starts_with("Init failed"));
        assert_eq!(d.phase(), Phase::Terminated);
    }

    #[test]
    fn frames_before_start_do_nothing() {
        let mut d = Dispatcher::new(registry(), &LaunchOptions::default()).unwrap();
        let mut gpu = Journal::default();
        d.frame(&mut gpu, &assets(), &InputFrame::default()).unwrap();
        assert!(gpu.log.is_empty());
        assert_eq!(d.phase(), Phase::Uninitialized);
    }
}
