//! Input handling for macterm.

use anyhow::{Error, Result, bail};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::{
    sync::mpsc::{self, error::TryRecvError},
    task::JoinHandle,
};
use tracing::{debug, warn};

use macterm_engine::{App, Position, Size};

/// How long the reader waits for an event before rechecking its stop flag.
const READ_POLL: Duration = Duration::from_millis(25);
const QUEUE_DEPTH: usize = 1024;
/// Events applied per frame; the rest wait for the next frame.
const EVENTS_PER_FRAME: usize = 64;
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Terminal events read on a blocking thread and queued for the frame loop.
///
/// A read error is queued like an event and ends the reader.
pub struct InputPump {
    events: mpsc::Receiver<io::Result<Event>>,
    reader: Option<Reader>,
}

struct Reader {
    stop: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, events) = mpsc::channel(QUEUE_DEPTH);
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let task = tokio::task::spawn_blocking(move || read_events(&flag, &tx));
        Self {
            events,
            reader: Some(Reader { stop, task }),
        }
    }

    /// Stop the reader and wait briefly for its thread to exit.
    pub async fn shutdown(&mut self) {
        // A reader blocked on a full queue wakes once the receiver closes.
        self.events.close();
        let Some(reader) = self.reader.take() else {
            return;
        };
        reader.stop.store(true, Ordering::Release);
        if tokio::time::timeout(SHUTDOWN_GRACE, reader.task).await.is_err() {
            warn!("Input reader still running after {SHUTDOWN_GRACE:?}");
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.events.close();
        if let Some(reader) = &self.reader {
            reader.stop.store(true, Ordering::Release);
        }
    }
}

fn read_events(stop: &AtomicBool, tx: &mpsc::Sender<io::Result<Event>>) {
    while !stop.load(Ordering::Acquire) {
        let next = match event::poll(READ_POLL) {
            Ok(false) => continue,
            Ok(true) => event::read(),
            Err(err) => Err(err),
        };
        let failed = next.is_err();
        if tx.blocking_send(next).is_err() || failed {
            return;
        }
    }
}

/// Apply queued input to `app`. Returns `true` when the app should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    for _ in 0..EVENTS_PER_FRAME {
        let event = match input.events.try_recv() {
            Ok(Ok(event)) => event,
            Ok(Err(err)) => return Err(Error::new(err).context("reading terminal input")),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => bail!("terminal input reader stopped"),
        };
        if apply_event(app, event) {
            return Ok(true);
        }
    }
    Ok(app.should_quit())
}

fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(width, height) => {
            debug!(width, height, "Terminal resized");
            app.resize_viewport(Size::new(width, height));
        }
        _ => {}
    }
    app.should_quit()
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if matches!(key.kind, KeyEventKind::Release) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('t') => app.cycle_style(),
        KeyCode::Char('r') => app.restart(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let pointer = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.pointer_down(pointer);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.pointer_drag(pointer);
        }
        MouseEventKind::Up(MouseButton::Left) => app.pointer_up(),
        _ => {}
    }
}
