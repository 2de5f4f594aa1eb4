//! Movement domain: dash timing.
//!
//! A dash runs `Ready -> Dashing -> Cooldown -> Ready`. Time that overshoots
//! a phase boundary within one tick is carried into the next phase, so the
//! dash is available again exactly `dash_time + dash_cooldown` after it
//! started regardless of frame pacing.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashPhase {
    #[default]
    Ready,
    Dashing,
    Cooldown,
}

/// Phase boundaries crossed during one [`DashSequence::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashProgress {
    pub ended: bool,
    pub recharged: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DashSequence {
    phase: DashPhase,
    remaining: Duration,
    cooldown: Duration,
    saved_gravity: f32,
}

impl DashSequence {
    pub fn phase(&self) -> DashPhase {
        self.phase
    }

    pub fn is_dashing(&self) -> bool {
        self.phase == DashPhase::Dashing
    }

    pub fn can_dash(&self) -> bool {
        self.phase == DashPhase::Ready
    }

    /// Time left in the current phase. Zero when ready.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Gravity scale recorded when the running dash began.
    pub fn saved_gravity(&self) -> f32 {
        self.saved_gravity
    }

    /// Enter the dashing phase. Returns false if a dash is dashing or cooling down.
    pub fn begin(&mut self, duration: Duration, cooldown: Duration, saved_gravity: f32) -> bool {
        if !self.can_dash() {
            return false;
        }
        self.phase = DashPhase::Dashing;
        self.remaining = duration;
        self.cooldown = cooldown;
        self.saved_gravity = saved_gravity;
        true
    }

    pub fn advance(&mut self, mut dt: Duration) -> DashProgress {
        let mut progress = DashProgress::default();

        while self.phase != DashPhase::Ready {
            if dt < self.remaining {
                self.remaining -= dt;
                break;
            }
            dt -= self.remaining;

            if self.phase == DashPhase::Dashing {
                self.phase = DashPhase::Cooldown;
                self.remaining = self.cooldown;
                progress.ended = true;
            } else {
                self.phase = DashPhase::Ready;
                self.remaining = Duration::ZERO;
                progress.recharged = true;
            }
        }

        progress
    }

    /// Drop back to ready without running the remaining phases.
    pub fn abort(&mut self) {
        self.phase = DashPhase::Ready;
        self.remaining = Duration::ZERO;
    }
}
