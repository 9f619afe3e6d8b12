use std::time::Duration;

/// Default caret blink period (on + off).
const CARET_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AnimPhase {
    Running { progress: f32 },
    Completed,
}

pub(crate) fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub(crate) struct EffectTimer {
    elapsed: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub(crate) fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    pub(crate) fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    #[must_use]
    pub(crate) fn phase(&self) -> AnimPhase {
        if self.elapsed >= self.duration {
            AnimPhase::Completed
        } else {
            AnimPhase::Running {
                progress: normalized_progress(self.elapsed, self.duration),
            }
        }
    }
}

/// Blinking text caret: visible for the first half of each period.
///
/// Any text change restarts the period so the caret stays solid while typing.
#[derive(Debug, Clone)]
pub struct CaretBlink {
    timer: EffectTimer,
}

impl CaretBlink {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            timer: EffectTimer::new(period),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
        if matches!(self.timer.phase(), AnimPhase::Completed) {
            // Drop whole periods so a long stall doesn't leave the caret stuck.
            let period = self.timer.duration;
            let leftover = if period.is_zero() {
                Duration::ZERO
            } else {
                Duration::from_nanos((self.timer.elapsed.as_nanos() % period.as_nanos()) as u64)
            };
            self.timer.reset();
            self.timer.advance(leftover);
        }
    }

    /// Restart the period with the caret shown.
    pub fn poke(&mut self) {
        self.timer.reset();
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        match self.timer.phase() {
            AnimPhase::Running { progress } => progress < 0.5,
            AnimPhase::Completed => true,
        }
    }
}

impl Default for CaretBlink {
    fn default() -> Self {
        Self::new(CARET_PERIOD)
    }
}
