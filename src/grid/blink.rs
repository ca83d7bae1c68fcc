use std::time::{Duration, Instant};

use crate::units::BlinkPhase;

/// Shared alternating-value clock. Owned by the grid view and driven by
/// ticks; a stopped clock never flips.
pub struct BlinkClock {
    interval: Duration,
    phase: BlinkPhase,
    last_flip: Option<Instant>,
}

impl BlinkClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            phase: BlinkPhase::Primary,
            last_flip: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.last_flip.is_none() {
            self.last_flip = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.last_flip = None;
        self.phase = BlinkPhase::Primary;
    }

    pub fn is_running(&self) -> bool {
        self.last_flip.is_some()
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Returns true when the phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_flip else { return false };
        if now.saturating_duration_since(last) < self.interval {
            return false;
        }
        self.phase = self.phase.flipped();
        // One flip per tick even if several intervals were missed.
        self.last_flip = Some(now);
        true
    }
}
