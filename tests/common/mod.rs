//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::time::Duration;

use macterm_types::{Line, Typewriter, TypewriterConfig, TypewriterOptions};

/// Options with every delay in milliseconds.
pub fn options(loop_lines: bool, delete_effect: bool, typing_ms: u64) -> TypewriterOptions {
    TypewriterOptions {
        loop_lines,
        delete_effect,
        typing_speed: Duration::from_millis(typing_ms),
        ..TypewriterOptions::default()
    }
}

pub fn config(lines: &[&str], options: TypewriterOptions) -> TypewriterConfig {
    let lines = lines.iter().copied().map(Line::from).collect();
    TypewriterConfig::new(lines, options).expect("non-empty lines")
}

pub fn typewriter(lines: &[&str], options: TypewriterOptions) -> Typewriter {
    Typewriter::new(config(lines, options))
}

/// Tick until no further tick is scheduled, collecting each displayed text.
///
/// Panics if the animation runs for more than `limit` ticks.
pub fn run_to_end(tw: &mut Typewriter, limit: usize) -> Vec<String> {
    let mut seen = Vec::new();
    for _ in 0..limit {
        let next = tw.tick();
        seen.push(tw.displayed().to_string());
        if next.is_none() {
            return seen;
        }
    }
    panic!("animation did not finish within {limit} ticks");
}
