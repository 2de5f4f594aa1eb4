//! Core domain: boot flow and camera setup.

use bevy::prelude::*;

use crate::core::state::GameState;

/// Content is loaded synchronously at startup, so the run can begin right away.
pub(crate) fn finish_boot(mut game_state: ResMut<NextState<GameState>>) {
    info!("Boot complete, entering run");
    game_state.set(GameState::Run);
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
