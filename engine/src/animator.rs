//! Timer-driven typewriter task.
//!
//! The [`Typewriter`] lives inside a spawned tokio task that owns it
//! exclusively: sleep for `next_delay()`, tick, publish a [`Frame`]. Commands
//! from the UI are applied between ticks, so ticks never overlap and a
//! reconfiguration can never observe a half-updated state.

use std::future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::mpsc;

use macterm_types::{Phase, Typewriter, TypewriterConfig};

/// Snapshot of the animation published after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub line_index: usize,
    /// Byte length of the prompt portion of the current line.
    pub prompt_len: usize,
    pub phase: Phase,
    /// Number of transitions published so far.
    pub seq: u64,
}

impl Frame {
    fn capture(typewriter: &Typewriter, seq: u64) -> Self {
        let state = typewriter.state();
        Self {
            text: state.displayed().to_string(),
            line_index: state.line_index(),
            prompt_len: typewriter.config().prompt_len(state.line_index()),
            phase: state.phase(),
            seq,
        }
    }

    /// The part of `text` belonging to the prompt, and the rest.
    #[must_use]
    pub fn split_prompt(&self) -> (&str, &str) {
        let at = self.prompt_len.min(self.text.len());
        self.text.split_at(at)
    }
}

/// Reaction to each published frame (e.g. a keystroke sound).
///
/// Observers run after the transition is complete and cannot influence
/// timing or state.
pub trait FrameObserver: Send {
    fn on_frame(&mut self, frame: &Frame);
}

impl<F> FrameObserver for F
where
    F: FnMut(&Frame) + Send,
{
    fn on_frame(&mut self, frame: &Frame) {
        self(frame);
    }
}

enum Command {
    Reconfigure(TypewriterConfig),
    Restart,
}

/// Publication side shared between the task and its handle.
///
/// Teardown flips `cancelled` under the lock, so once [`Animator::shutdown`]
/// returns no frame can reach the channel or the observer.
struct Outlet {
    cancelled: bool,
    frames: mpsc::UnboundedSender<Frame>,
    observer: Option<Box<dyn FrameObserver>>,
}

impl Outlet {
    fn publish(outlet: &Mutex<Outlet>, frame: Frame) -> bool {
        let mut outlet = outlet.lock().unwrap_or_else(PoisonError::into_inner);
        if outlet.cancelled {
            return false;
        }
        if let Some(observer) = outlet.observer.as_mut() {
            observer.on_frame(&frame);
        }
        outlet.frames.send(frame).is_ok()
    }
}

/// Handle to a running typewriter task. Dropping it cancels the task.
pub struct Animator {
    frames: mpsc::UnboundedReceiver<Frame>,
    commands: mpsc::UnboundedSender<Command>,
    abort_handle: AbortHandle,
    outlet: Arc<Mutex<Outlet>>,
    latest: Frame,
}

impl Animator {
    /// Spawn the task on the current tokio runtime.
    #[must_use]
    pub fn spawn(typewriter: Typewriter) -> Self {
        Self::start(typewriter, None)
    }

    #[must_use]
    pub fn spawn_with_observer(typewriter: Typewriter, observer: impl FrameObserver + 'static) -> Self {
        Self::start(typewriter, Some(Box::new(observer)))
    }

    fn start(typewriter: Typewriter, observer: Option<Box<dyn FrameObserver>>) -> Self {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (abort_handle, abort_registration) = AbortHandle::new_pair();

        let latest = Frame::capture(&typewriter, 0);
        let outlet = Arc::new(Mutex::new(Outlet {
            cancelled: false,
            frames: frame_tx,
            observer,
        }));

        tracing::debug!(
            lines = typewriter.config().line_count(),
            "Starting typewriter animation"
        );

        let task = run(typewriter, command_rx, Arc::clone(&outlet));
        tokio::spawn(async move {
            let _ = Abortable::new(task, abort_registration).await;
        });

        Self {
            frames: frame_rx,
            commands: command_tx,
            abort_handle,
            outlet,
            latest,
        }
    }

    /// Most recent frame applied by [`Animator::poll`].
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.latest
    }

    /// Drain published frames. Returns whether the visible frame changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(frame) = self.frames.try_recv() {
            changed |= frame.text != self.latest.text || frame.phase != self.latest.phase;
            self.latest = frame;
        }
        changed
    }

    /// Replace the configuration; a new line sequence restarts from the top.
    pub fn reconfigure(&self, config: TypewriterConfig) {
        tracing::debug!(lines = config.line_count(), "Reconfiguring typewriter");
        let _ = self.commands.send(Command::Reconfigure(config));
    }

    pub fn restart(&self) {
        let _ = self.commands.send(Command::Restart);
    }

    /// Cancel the pending tick and detach the observer.
    pub fn shutdown(&mut self) {
        self.abort_handle.abort();
        let mut outlet = self.outlet.lock().unwrap_or_else(PoisonError::into_inner);
        outlet.cancelled = true;
        outlet.observer = None;
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run(
    mut typewriter: Typewriter,
    mut commands: mpsc::UnboundedReceiver<Command>,
    outlet: Arc<Mutex<Outlet>>,
) {
    let mut seq = 0;
    loop {
        tokio::select! {
            () = sleep_for(typewriter.next_delay()) => {
                typewriter.tick();
            }
            command = commands.recv() => match command {
                Some(Command::Reconfigure(config)) => typewriter.reconfigure(config),
                Some(Command::Restart) => typewriter.restart(),
                None => break,
            },
        }

        seq += 1;
        let frame = Frame::capture(&typewriter, seq);
        tracing::trace!(
            line = frame.line_index,
            phase = frame.phase.as_str(),
            len = frame.text.len(),
            "Typewriter tick"
        );
        if !Outlet::publish(&outlet, frame) {
            break;
        }
    }
    tracing::debug!("Typewriter animation stopped");
}

/// Sleep for `delay`, or forever once the animation is finished.
async fn sleep_for(delay: Option<Duration>) {
    match delay {
        Some(delay) => tokio::time::sleep(delay).await,
        None => future::pending().await,
    }
}
