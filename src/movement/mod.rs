//! Movement domain: player controller plugin wiring and public exports.

mod bootstrap;
mod components;
mod controller;
mod dash;
mod dev;
mod host;
mod resources;
mod systems;
mod wall_jump;

#[cfg(test)]
mod tests;

pub use components::{
    Facing, GameLayer, Ground, Player, SpawnPoint, SurfaceContacts, SurfaceProbes, Wall,
};
pub use controller::MovementController;
pub use dash::DashPhase;
pub use host::{Animator, FacingTransform, MovementHost, PhysicsBody, SurfaceProbe, TrailEffect};
pub use resources::{MovementInput, MovementTuning};

use bevy::input::InputSystems;
use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::spawn_player;
use crate::movement::dev::spawn_test_room;
use crate::movement::systems::{
    probe_surfaces, read_input, respawn_fallen_player, run_fixed_update, run_frame_update,
};

/// Systems that read input and drive the controller each frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovementSystems;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(OnEnter(GameState::Run), (spawn_test_room, spawn_player))
            .add_systems(PreUpdate, read_input.after(InputSystems))
            .add_systems(
                Update,
                (probe_surfaces, run_frame_update, respawn_fallen_player)
                    .chain()
                    .in_set(MovementSystems)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                (probe_surfaces, run_fixed_update)
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
