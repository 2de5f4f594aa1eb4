//! Movement domain: buffered wall jump.
//!
//! Only wired into the controller with the `wall-jump` feature.

#![cfg_attr(not(feature = "wall-jump"), allow(dead_code))]

use std::time::Duration;

use bevy::prelude::*;

use crate::movement::{Facing, MovementTuning};

#[derive(Debug, Clone, Default)]
pub struct WallJump {
    wall_jumping: bool,
    /// Horizontal sign of the next wall jump, away from the wall.
    direction: f32,
    buffer: Duration,
    lockout: Duration,
}

impl WallJump {
    /// True from the jump until the lockout elapses.
    pub fn is_wall_jumping(&self) -> bool {
        self.wall_jumping
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn buffer_remaining(&self) -> Duration {
        self.buffer
    }

    /// Advance one frame. Returns the velocity to apply when a wall jump fires.
    pub fn update(
        &mut self,
        dt: Duration,
        wall_sliding: bool,
        facing: Facing,
        jump_pressed: bool,
        tuning: &MovementTuning,
    ) -> Option<Vec2> {
        if self.wall_jumping {
            self.lockout = self.lockout.saturating_sub(dt);
            if self.lockout.is_zero() {
                self.wall_jumping = false;
            }
        }

        if wall_sliding {
            self.wall_jumping = false;
            self.direction = -facing.sign();
            self.buffer = tuning.wall_jump_buffer();
            self.lockout = Duration::ZERO;
        } else {
            self.buffer = self.buffer.saturating_sub(dt);
        }

        if jump_pressed && !self.buffer.is_zero() {
            let impulse = tuning.wall_jump_impulse();
            self.wall_jumping = true;
            self.buffer = Duration::ZERO;
            self.lockout = tuning.wall_jump_lockout();
            return Some(Vec2::new(self.direction * impulse.x, impulse.y));
        }

        None
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
