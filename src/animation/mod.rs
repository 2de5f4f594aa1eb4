//! Animation module for the player sprite.
//!
//! This module handles:
//! - Named animator parameters written by the movement controller
//! - Clip selection from those parameters
//! - Frame playback timed by a JSON clip table

pub mod clips;
pub mod controller;
pub mod params;


use bevy::prelude::*;

pub use clips::*;
pub use controller::*;
pub use params::AnimatorParams;

use crate::core::GameState;
use crate::movement::MovementSystems;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClipTable>()
            .add_message::<AnimationStateChanged>()
            .add_message::<AnimationFinished>()
            .add_systems(
                Update,
                (
                    animation_state_machine,
                    update_animation_frames,
                    log_animation_changes,
                )
                    .chain()
                    .after(MovementSystems)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
