//! macterm - binary entry point and terminal session management.
//!
//! The CLI bridges [`macterm_engine`] (application state) and [`macterm_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed cleanup.
//!
//! # Event Loop
//!
//! A fixed 8ms (~120 FPS) render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`macterm_tui::InputPump`])
//! 3. Advance application state (`app.tick()`)
//! 4. Render frame

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        size as terminal_size,
    },
};
use ratatui::prelude::*;
use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{self, Stdout, stdout},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tokio::time::{self, MissedTickBehavior};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use macterm_engine::{App, AppSettings, MactermConfig, TerminalStyle, Viewport};
use macterm_tui::{InputPump, draw, handle_events};

const STYLE_ENV: &str = "MACTERM_STYLE";

/// Send tracing output to a log file; nothing may be written over the TUI.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut unusable = Vec::new();
    let sink = log_paths()
        .into_iter()
        .find_map(|path| match open_log(&path) {
            Ok(file) => Some((path, file)),
            Err(err) => {
                unusable.push(format!("{}: {err}", path.display()));
                None
            }
        });

    let registry = tracing_subscriber::registry().with(filter);
    let Some((path, file)) = sink else {
        registry.init();
        return;
    };
    registry
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    tracing::info!(path = %path.display(), "Writing macterm log");
    for reason in unusable {
        tracing::warn!("Skipped log file {reason}");
    }
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `logs/macterm.log` beside the config file, then under `./.macterm`.
fn log_paths() -> Vec<PathBuf> {
    let config_dir = MactermConfig::path().and_then(|path| path.parent().map(Path::to_path_buf));
    config_dir
        .into_iter()
        .chain([PathBuf::from(".macterm")])
        .map(|dir| dir.join("logs").join("macterm.log"))
        .collect()
}

/// Config file contents, or defaults when it is missing or unreadable.
fn load_config() -> MactermConfig {
    match MactermConfig::load() {
        Ok(Some(config)) => config,
        Ok(None) => MactermConfig::default(),
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "Ignoring config: {err}");
            MactermConfig::default()
        }
    }
}

fn style_from_env() -> Option<TerminalStyle> {
    let raw = env::var(STYLE_ENV).ok()?;
    let style = TerminalStyle::parse(&raw);
    if style.is_none() {
        tracing::warn!("Unknown {STYLE_ENV} value: {raw}");
    }
    style
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Enables raw mode, the alternate screen and mouse capture (needed for
/// dragging and resizing the window). On drop, all terminal state is
/// restored, so the terminal stays usable after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            let _ = execute!(out, DisableMouseCapture, LeaveAlternateScreen);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_config();
    // Validation errors surface before the terminal is taken over.
    let typewriter = config
        .typewriter_config()
        .context("invalid macterm configuration")?;
    let settings = AppSettings {
        style: style_from_env()
            .or_else(|| config.style())
            .unwrap_or_default(),
        ui_options: config.ui_options(),
    };

    let (width, height) = terminal_size()?;
    let mut app = App::new(typewriter, settings, Viewport::new(width, height));

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app).await
    };

    app.shutdown();
    if let Err(err) = &result {
        tracing::error!("Exited with error: {err:?}");
    }
    result
}

const FRAME_DURATION: Duration = Duration::from_millis(8);

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(app, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        app.tick();

        if let Err(e) = terminal.draw(|frame| draw(frame, app)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
