//! Configuration for macterm.
//!
//! Loaded from `~/.macterm/config.toml` (or the path in `MACTERM_CONFIG`):
//!
//! ```toml
//! # Top-level keys must come before any [table].
//! lines = [
//!   "plain line",
//!   { prompt = "$ whoami\n", output = "dev" },
//! ]
//!
//! [app]
//! style = "mac"
//! ascii_only = false
//! high_contrast = false
//! reduced_motion = false
//!
//! [typewriter]
//! loop = true
//! delete_effect = true
//! typing_speed_ms = 50
//! delete_speed_ms = 25
//! pause_before_delete_ms = 1000
//! pause_before_next_line_ms = 2000
//! ```

use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
};
use thiserror::Error;

use macterm_types::{
    InvalidConfiguration, Line, TerminalStyle, TypewriterConfig, TypewriterOptions,
    duration_from_millis, ui::UiOptions,
};

const CONFIG_ENV: &str = "MACTERM_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct MactermConfig {
    /// Lines to type; the built-in demo sequence is used when absent.
    pub lines: Option<Vec<Line>>,
    pub app: Option<AppConfig>,
    pub typewriter: Option<TypewriterSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// "mac", "hacker" or "light".
    pub style: Option<String>,
    /// Use ASCII-only glyphs for traffic lights, caret and resize handle.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Keep the caret solid.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Raw `[typewriter]` table. Millisecond values are validated when the
/// section is turned into [`TypewriterOptions`].
#[derive(Debug, Default, Deserialize)]
pub struct TypewriterSection {
    #[serde(rename = "loop")]
    pub loop_lines: Option<bool>,
    pub delete_effect: Option<bool>,
    pub typing_speed_ms: Option<f64>,
    pub delete_speed_ms: Option<f64>,
    pub pause_before_delete_ms: Option<f64>,
    pub pause_before_next_line_ms: Option<f64>,
}

impl TypewriterSection {
    /// Resolve against the defaults. `default_loop` is used when `loop` is unset.
    pub fn options(&self, default_loop: bool) -> Result<TypewriterOptions, InvalidConfiguration> {
        let defaults = TypewriterOptions::default();
        let millis = |field: &'static str, value: Option<f64>, fallback| match value {
            Some(ms) => duration_from_millis(field, ms),
            None => Ok(fallback),
        };
        Ok(TypewriterOptions {
            loop_lines: self.loop_lines.unwrap_or(default_loop),
            delete_effect: self.delete_effect.unwrap_or(defaults.delete_effect),
            typing_speed: millis("typing_speed_ms", self.typing_speed_ms, defaults.typing_speed)?,
            delete_speed: millis("delete_speed_ms", self.delete_speed_ms, defaults.delete_speed)?,
            pause_before_delete: millis(
                "pause_before_delete_ms",
                self.pause_before_delete_ms,
                defaults.pause_before_delete,
            )?,
            pause_before_next_line: millis(
                "pause_before_next_line_ms",
                self.pause_before_next_line_ms,
                defaults.pause_before_next_line,
            )?,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl MactermConfig {
    /// Load from the default location. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Build the validated animator configuration.
    ///
    /// Without configured lines the demo sequence is used and looping
    /// defaults to on; otherwise looping defaults to off.
    pub fn typewriter_config(&self) -> Result<TypewriterConfig, InvalidConfiguration> {
        let (lines, default_loop) = match &self.lines {
            Some(lines) => (lines.clone(), TypewriterOptions::default().loop_lines),
            None => (demo_lines(), true),
        };
        let options = match &self.typewriter {
            Some(section) => section.options(default_loop)?,
            None => TypewriterSection::default().options(default_loop)?,
        };
        TypewriterConfig::new(lines, options)
    }

    /// Configured style; unknown names are logged and ignored.
    #[must_use]
    pub fn style(&self) -> Option<TerminalStyle> {
        let raw = self.app.as_ref()?.style.as_deref()?;
        let style = TerminalStyle::parse(raw);
        if style.is_none() {
            tracing::warn!("Unknown terminal style in config: {}", raw);
        }
        style
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }
}

/// `MACTERM_CONFIG` if set, else `~/.macterm/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".macterm").join("config.toml"))
}

/// Sequence shown when no lines are configured.
#[must_use]
pub fn demo_lines() -> Vec<Line> {
    vec![
        Line::prompt("$ whoami\n", "macterm"),
        Line::prompt(
            "$ cat mission.txt\n",
            "Typing things out, one character at a time ✨",
        ),
        Line::prompt("$ echo $STYLE\n", "mac | hacker | light"),
    ]
}
