//! Movement domain: tuning and input resources.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement constants. Distances are in pixels, times in seconds.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    /// Vertical velocity set by a jump (replaces, never adds).
    pub jump_force: f32,
    pub dash_power: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,
    /// Fastest allowed fall while wall sliding.
    pub wall_slide_speed: f32,
    /// (horizontal, vertical) velocity applied by a wall jump.
    pub wall_jump_power: [f32; 2],
    /// How long a jump press still counts as a wall jump after leaving the wall.
    pub wall_jump_buffer_time: f32,
    /// How long horizontal control stays locked after a wall jump.
    pub wall_jump_lock_time: f32,
    pub ground_check_offset: [f32; 2],
    pub ground_check_radius: f32,
    pub wall_check_offset: [f32; 2],
    pub wall_check_radius: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        // 32 pixels per world unit
        Self {
            move_speed: 320.0,
            jump_force: 640.0,
            dash_power: 480.0,
            dash_time: 0.2,
            dash_cooldown: 1.0,
            wall_slide_speed: 64.0,
            wall_jump_power: [256.0, 512.0],
            wall_jump_buffer_time: 0.2,
            wall_jump_lock_time: 0.4,
            ground_check_offset: [0.0, -24.0],
            ground_check_radius: 10.0,
            wall_check_offset: [12.0, 0.0],
            wall_check_radius: 8.0,
        }
    }
}

/// A tuning value that cannot drive the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for TuningValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tuning field '{}' {}", self.field, self.message)
    }
}

impl MovementTuning {
    pub fn dash_duration(&self) -> Duration {
        seconds(self.dash_time)
    }

    pub fn dash_cooldown_duration(&self) -> Duration {
        seconds(self.dash_cooldown)
    }

    pub fn wall_jump_buffer(&self) -> Duration {
        seconds(self.wall_jump_buffer_time)
    }

    pub fn wall_jump_lockout(&self) -> Duration {
        seconds(self.wall_jump_lock_time)
    }

    pub fn wall_jump_impulse(&self) -> Vec2 {
        Vec2::from(self.wall_jump_power)
    }

    /// Check every field. Returns an empty list when the tuning is usable.
    pub fn validate(&self) -> Vec<TuningValidationError> {
        let mut errors = Vec::new();

        let non_negative = [
            ("move_speed", self.move_speed),
            ("jump_force", self.jump_force),
            ("dash_power", self.dash_power),
            ("wall_slide_speed", self.wall_slide_speed),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                errors.push(TuningValidationError {
                    field,
                    message: format!("must be a finite value >= 0, got {}", value),
                });
            }
        }

        // Times must convert to a Duration without clamping.
        let times = [
            ("dash_time", self.dash_time),
            ("dash_cooldown", self.dash_cooldown),
            ("wall_jump_buffer_time", self.wall_jump_buffer_time),
            ("wall_jump_lock_time", self.wall_jump_lock_time),
        ];
        for (field, value) in times {
            if Duration::try_from_secs_f32(value).is_err() {
                errors.push(TuningValidationError {
                    field,
                    message: format!("must be a representable time >= 0 seconds, got {}", value),
                });
            }
        }

        let radii = [
            ("ground_check_radius", self.ground_check_radius),
            ("wall_check_radius", self.wall_check_radius),
        ];
        for (field, value) in radii {
            if !value.is_finite() || value <= 0.0 {
                errors.push(TuningValidationError {
                    field,
                    message: format!("must be a finite value > 0, got {}", value),
                });
            }
        }

        let vectors = [
            ("wall_jump_power", self.wall_jump_power),
            ("ground_check_offset", self.ground_check_offset),
            ("wall_check_offset", self.wall_check_offset),
        ];
        for (field, [x, y]) in vectors {
            if !x.is_finite() || !y.is_finite() {
                errors.push(TuningValidationError {
                    field,
                    message: format!("must be finite, got ({}, {})", x, y),
                });
            }
        }

        errors
    }
}

fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

/// Input sampled once per rendered frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementInput {
    /// Raw horizontal axis in [-1, 1].
    pub axis: f32,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
}
