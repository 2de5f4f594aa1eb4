//! Content loading: movement tuning and animation clip data from assets/data.

pub mod loader;

pub use loader::{load_clip_table, load_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::animation::ClipTable;
use crate::movement::MovementTuning;

const DATA_DIR: &str = "assets/data";
const TUNING_FILE: &str = "movement.ron";
const CLIP_TABLE_FILE: &str = "animations.json";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_movement_content);
    }
}

/// Load tuning and clip data, keeping built-in defaults for anything that fails.
fn load_movement_content(mut commands: Commands) {
    let base = Path::new(DATA_DIR);

    match load_tuning(&base.join(TUNING_FILE)) {
        Ok(tuning) => {
            info!(
                "Loaded movement tuning: move_speed={}, jump_force={}, dash_time={}, dash_cooldown={}",
                tuning.move_speed, tuning.jump_force, tuning.dash_time, tuning.dash_cooldown
            );
            commands.insert_resource(tuning);
        }
        Err(e) => {
            warn!("{}; using default movement tuning", e);
            commands.insert_resource(MovementTuning::default());
        }
    }

    match load_clip_table(&base.join(CLIP_TABLE_FILE)) {
        Ok(table) => {
            for clip in table.missing_clips() {
                warn!("Clip table has no '{}' entry, using built-in timing", clip.key());
            }
            info!("Loaded {} animation clips", table.clips.len());
            commands.insert_resource(table);
        }
        Err(e) => {
            warn!("{}; using built-in clip table", e);
            commands.insert_resource(ClipTable::default());
        }
    }
}
