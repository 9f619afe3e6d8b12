//! Core domain types for macterm.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod line;
mod style;
pub mod typewriter;
pub mod ui;
pub mod window;

pub use line::Line;
pub use style::TerminalStyle;
pub use typewriter::{
    AnimationState, Phase, Typewriter, TypewriterConfig, TypewriterOptions, advance, next_delay,
};
pub use window::{PointerTracker, Position, Size, Viewport, WindowFrame};

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Rejected animator configuration.
///
/// Raised at construction time only; a validated [`TypewriterConfig`] can
/// never make a tick fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfiguration {
    #[error("invalid configuration: line sequence must not be empty")]
    EmptyLines,
    #[error(
        "invalid configuration: {field} must be a finite, non-negative number of milliseconds (got {value})"
    )]
    Duration { field: &'static str, value: f64 },
}

/// Convert a millisecond value coming from user input into a [`Duration`].
///
/// Negative, NaN and infinite values are rejected.
pub fn duration_from_millis(field: &'static str, value: f64) -> Result<Duration, InvalidConfiguration> {
    if !value.is_finite() || value < 0.0 {
        return Err(InvalidConfiguration::Duration { field, value });
    }
    Duration::try_from_secs_f64(value / 1000.0)
        .map_err(|_| InvalidConfiguration::Duration { field, value })
}
