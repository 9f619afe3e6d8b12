//! Core engine for macterm - application state without TUI dependencies.
//!
//! [`App`] owns the running [`Animator`], the window frame and the pointer
//! gesture in progress. The TUI reads from it to render and feeds it input.

mod animator;

use std::time::{Duration, Instant};

pub use animator::{Animator, Frame, FrameObserver};
pub use macterm_config::{ConfigError, MactermConfig};
pub use macterm_types::{
    InvalidConfiguration, Line, Phase, TerminalStyle, Typewriter, TypewriterConfig,
    TypewriterOptions,
    ui::{CaretBlink, UiOptions},
    window::{Gesture, PointerTracker, Position, Size, Viewport, WindowFrame},
};

/// Startup settings for [`App`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppSettings {
    pub style: TerminalStyle,
    pub ui_options: UiOptions,
}

pub struct App {
    animator: Animator,
    settings: AppSettings,
    viewport: Viewport,
    window: WindowFrame,
    pointer: PointerTracker,
    caret: CaretBlink,
    last_frame: Instant,
    should_quit: bool,
}

impl App {
    /// Start the animation. Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(config: TypewriterConfig, settings: AppSettings, viewport: Viewport) -> Self {
        tracing::info!(
            style = settings.style.as_str(),
            width = viewport.width,
            height = viewport.height,
            "Starting macterm"
        );
        Self {
            animator: Animator::spawn(Typewriter::new(config)),
            settings,
            viewport,
            window: WindowFrame::initial(viewport),
            pointer: PointerTracker::default(),
            caret: CaretBlink::default(),
            last_frame: Instant::now(),
            should_quit: false,
        }
    }

    /// Advance per-frame state: pull animator frames and move the caret blink.
    pub fn tick(&mut self) {
        let elapsed = self.frame_elapsed();
        self.advance(elapsed);
    }

    fn advance(&mut self, elapsed: Duration) {
        self.caret.advance(elapsed);
        if self.animator.poll() {
            self.caret.poke();
        }
    }

    fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    #[must_use]
    pub fn frame(&self) -> &Frame {
        self.animator.frame()
    }

    #[must_use]
    pub fn caret_visible(&self) -> bool {
        self.settings.ui_options.reduced_motion || self.caret.visible()
    }

    #[must_use]
    pub fn style(&self) -> TerminalStyle {
        self.settings.style
    }

    pub fn cycle_style(&mut self) {
        self.settings.style = self.settings.style.next();
        tracing::debug!(style = self.settings.style.as_str(), "Switched terminal style");
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.settings.ui_options
    }

    #[must_use]
    pub fn window(&self) -> WindowFrame {
        self.window
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.pointer.gesture()
    }

    /// Left button pressed. Returns whether a drag or resize started.
    pub fn pointer_down(&mut self, pointer: Position) -> bool {
        let started = self.pointer.press(pointer, &self.window);
        if started {
            tracing::debug!(gesture = ?self.pointer.gesture(), "Pointer gesture started");
        }
        started
    }

    pub fn pointer_drag(&mut self, pointer: Position) -> bool {
        self.pointer.motion(pointer, &mut self.window, self.viewport)
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    /// The terminal was resized.
    pub fn resize_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.window.clamp_to(viewport);
    }

    pub fn reconfigure(&self, config: TypewriterConfig) {
        self.animator.reconfigure(config);
    }

    pub fn restart(&self) {
        tracing::debug!("Restarting animation");
        self.animator.restart();
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Stop the animation task. Also happens on drop.
    pub fn shutdown(&mut self) {
        self.animator.shutdown();
    }
}
