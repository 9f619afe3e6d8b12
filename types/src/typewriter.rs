//! Typewriter animation state machine.
//!
//! The machine is a pure transition function driven by an external timer:
//! [`next_delay`] says how long to wait before the next tick, [`advance`]
//! performs one tick. Nothing here sleeps or owns a clock.
//!
//! ```text
//! Typing ──▶ PauseBeforeDelete ──▶ Deleting ──▶ (next line) Typing
//!   │
//!   ├──────▶ PauseBeforeNextLine ─────────────▶ (next line) Typing
//!   │
//!   └──────▶ Finished
//! ```
//!
//! Characters are grapheme clusters, so `"é"` written with a combining accent
//! is typed and deleted in a single tick.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::{InvalidConfiguration, Line};

/// Timing and flow knobs for the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterOptions {
    /// Start over from the first line after the last one.
    pub loop_lines: bool,
    /// Delete each line character by character before moving on.
    pub delete_effect: bool,
    pub typing_speed: Duration,
    pub delete_speed: Duration,
    pub pause_before_delete: Duration,
    /// Pause between a fully typed line and the next one when deletion is off.
    pub pause_before_next_line: Duration,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            loop_lines: false,
            delete_effect: true,
            typing_speed: Duration::from_millis(50),
            delete_speed: Duration::from_millis(25),
            pause_before_delete: Duration::from_millis(1000),
            pause_before_next_line: Duration::from_millis(2000),
        }
    }
}

/// A line's full text with its grapheme boundaries precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedLine {
    text: String,
    prompt_len: usize,
    /// `boundaries[k]` is the byte offset after `k` graphemes.
    boundaries: Vec<usize>,
}

impl ResolvedLine {
    fn new(line: &Line) -> Self {
        let text = line.full_text().into_owned();
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        boundaries.push(0);
        boundaries.extend(
            text.grapheme_indices(true)
                .map(|(start, grapheme)| start + grapheme.len()),
        );
        Self {
            prompt_len: line.prompt_text().len(),
            text,
            boundaries,
        }
    }

    fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn grapheme(&self, index: usize) -> Option<&str> {
        let start = *self.boundaries.get(index)?;
        let end = *self.boundaries.get(index + 1)?;
        Some(&self.text[start..end])
    }

    fn boundary(&self, graphemes: usize) -> usize {
        self.boundaries[graphemes.min(self.len())]
    }
}

/// Validated animator configuration: a non-empty line sequence plus options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    lines: Vec<Line>,
    resolved: Vec<ResolvedLine>,
    options: TypewriterOptions,
}

impl TypewriterConfig {
    pub fn new(lines: Vec<Line>, options: TypewriterOptions) -> Result<Self, InvalidConfiguration> {
        if lines.is_empty() {
            return Err(InvalidConfiguration::EmptyLines);
        }
        let resolved = lines.iter().map(ResolvedLine::new).collect();
        Ok(Self {
            lines,
            resolved,
            options,
        })
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn options(&self) -> &TypewriterOptions {
        &self.options
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.resolved.len()
    }

    /// Full text of line `index`, wrapping modulo the line count.
    #[must_use]
    pub fn full_text(&self, index: usize) -> &str {
        &self.line(index).text
    }

    /// Byte length of the prompt portion of line `index`'s full text.
    #[must_use]
    pub fn prompt_len(&self, index: usize) -> usize {
        self.line(index).prompt_len
    }

    /// Number of graphemes in line `index`'s full text.
    #[must_use]
    pub fn grapheme_count(&self, index: usize) -> usize {
        self.line(index).len()
    }

    fn line(&self, index: usize) -> &ResolvedLine {
        &self.resolved[index % self.resolved.len()]
    }
}

/// Logical state of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Typing,
    PauseBeforeDelete,
    Deleting,
    PauseBeforeNextLine,
    /// Terminal: no further ticks are scheduled.
    Finished,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Typing => "typing",
            Phase::PauseBeforeDelete => "pause_before_delete",
            Phase::Deleting => "deleting",
            Phase::PauseBeforeNextLine => "pause_before_next_line",
            Phase::Finished => "finished",
        }
    }
}

/// Phase entered once a line is fully typed.
fn post_typing(options: &TypewriterOptions) -> Phase {
    if options.delete_effect {
        Phase::PauseBeforeDelete
    } else if options.loop_lines {
        Phase::PauseBeforeNextLine
    } else {
        Phase::Finished
    }
}

/// Mutable animation state, advanced one tick at a time.
///
/// `displayed` is always a prefix of the current line's full text holding
/// exactly `char_index` graphemes, and `line_index` is always in bounds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimationState {
    line_index: usize,
    char_index: usize,
    displayed: String,
    phase: Phase,
}

impl AnimationState {
    /// State at the start of the first line.
    #[must_use]
    pub fn initial(config: &TypewriterConfig) -> Self {
        let mut state = Self::default();
        state.enter_line(0, config);
        state
    }

    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    #[must_use]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    #[must_use]
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.phase == Phase::Deleting
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn step(&mut self, config: &TypewriterConfig) {
        let line = config.line(self.line_index);
        match self.phase {
            Phase::Typing => {
                if let Some(grapheme) = line.grapheme(self.char_index) {
                    self.displayed.push_str(grapheme);
                    self.char_index += 1;
                }
                if self.char_index >= line.len() {
                    self.phase = post_typing(config.options());
                }
            }
            Phase::PauseBeforeDelete => {
                self.phase = Phase::Deleting;
                if self.char_index == 0 {
                    self.finish_line(config);
                }
            }
            Phase::Deleting => {
                if self.char_index > 0 {
                    self.char_index -= 1;
                    self.displayed.truncate(line.boundary(self.char_index));
                }
                if self.char_index == 0 {
                    self.finish_line(config);
                }
            }
            Phase::PauseBeforeNextLine => {
                let next = (self.line_index + 1) % config.line_count();
                self.enter_line(next, config);
            }
            Phase::Finished => {}
        }
    }

    /// Called once the current line has been deleted.
    fn finish_line(&mut self, config: &TypewriterConfig) {
        let next = self.line_index + 1;
        if next >= config.line_count() && !config.options().loop_lines {
            self.char_index = 0;
            self.displayed.clear();
            self.phase = Phase::Finished;
            return;
        }
        self.enter_line(next % config.line_count(), config);
    }

    fn enter_line(&mut self, index: usize, config: &TypewriterConfig) {
        self.line_index = index;
        self.char_index = 0;
        self.displayed.clear();
        self.phase = if config.line(index).is_empty() {
            // Nothing to type: go straight to what follows typing.
            post_typing(config.options())
        } else {
            Phase::Typing
        };
    }

    /// Re-derive the post-typing phase after the options changed.
    fn resettle(&mut self, config: &TypewriterConfig) {
        let line = config.line(self.line_index);
        if self.phase == Phase::Finished && self.char_index == 0 && !line.is_empty() {
            // Finished by deleting the last line.
            if config.options().loop_lines {
                let next = (self.line_index + 1) % config.line_count();
                self.enter_line(next, config);
            }
            return;
        }
        let fully_typed = self.char_index == line.len();
        let waiting = matches!(
            self.phase,
            Phase::PauseBeforeDelete | Phase::PauseBeforeNextLine | Phase::Finished
        );
        if fully_typed && waiting {
            self.phase = post_typing(config.options());
        }
    }
}

/// Delay before the next tick from `state`, or `None` once terminal.
#[must_use]
pub fn next_delay(state: &AnimationState, config: &TypewriterConfig) -> Option<Duration> {
    let options = config.options();
    match state.phase {
        Phase::Typing => Some(options.typing_speed),
        Phase::PauseBeforeDelete => Some(options.pause_before_delete),
        Phase::Deleting => Some(options.delete_speed),
        Phase::PauseBeforeNextLine => Some(options.pause_before_next_line),
        Phase::Finished => None,
    }
}

/// Perform one tick. Total for every reachable state; a finished state is
/// returned unchanged.
#[must_use]
pub fn advance(state: &AnimationState, config: &TypewriterConfig) -> AnimationState {
    let mut next = state.clone();
    next.step(config);
    next
}

/// A configuration and the state it drives.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    state: AnimationState,
}

impl Typewriter {
    #[must_use]
    pub fn new(config: TypewriterConfig) -> Self {
        let state = AnimationState::initial(&config);
        Self { config, state }
    }

    pub fn from_lines(
        lines: Vec<Line>,
        options: TypewriterOptions,
    ) -> Result<Self, InvalidConfiguration> {
        TypewriterConfig::new(lines, options).map(Self::new)
    }

    #[must_use]
    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[must_use]
    pub fn displayed(&self) -> &str {
        self.state.displayed()
    }

    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        next_delay(&self.state, &self.config)
    }

    /// Advance one tick and return the delay before the following one.
    pub fn tick(&mut self) -> Option<Duration> {
        self.state.step(&self.config);
        self.next_delay()
    }

    /// Swap in a new configuration.
    ///
    /// A different line sequence resets the state to the first line; the same
    /// sequence keeps the current progress.
    pub fn reconfigure(&mut self, config: TypewriterConfig) {
        let lines_changed = self.config.lines() != config.lines();
        self.config = config;
        if lines_changed {
            self.state = AnimationState::initial(&self.config);
        } else {
            self.state.resettle(&self.config);
        }
    }

    pub fn restart(&mut self) {
        self.state = AnimationState::initial(&self.config);
    }
}
