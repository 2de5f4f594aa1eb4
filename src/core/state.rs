//! Core domain: game state definitions.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content is loading; nothing is spawned yet.
    #[default]
    Boot,
    Run,
}
