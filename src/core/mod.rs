//! Core domain: game state and boot flow plugin.

mod state;
mod systems;

pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{finish_boot, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(Startup, (setup_camera, finish_boot));
    }
}
