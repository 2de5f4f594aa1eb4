//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::probe_surfaces;
pub(crate) use input::read_input;
pub(crate) use movement::{respawn_fallen_player, run_fixed_update, run_frame_update};
