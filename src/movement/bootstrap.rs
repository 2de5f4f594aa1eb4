//! Movement domain: player bootstrap from the loaded tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::{AnimationController, AnimatorParams};
use crate::movement::{
    GameLayer, MovementController, MovementTuning, Player, SpawnPoint, SurfaceContacts,
    SurfaceProbes,
};
use crate::trail::DashTrail;

pub(crate) const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);
pub(crate) const PLAYER_SPAWN: Vec2 = Vec2::new(-300.0, -120.0);

/// Spawn the player with a controller built from the current tuning.
/// Runs on entering GameState::Run, after the tuning file was loaded.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    info!(
        "Spawning player: move_speed={}, jump_force={}, dash_power={}",
        tuning.move_speed, tuning.jump_force, tuning.dash_power
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            MovementController::new(tuning.clone()),
            SurfaceProbes::from_tuning(&tuning),
            SurfaceContacts::default(),
            SpawnPoint(PLAYER_SPAWN),
        ),
        // Animation & effects
        (
            AnimatorParams::default(),
            AnimationController::default(),
            DashTrail::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.85, 0.9, 0.95),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(PLAYER_SPAWN.extend(1.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(1.0),
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}
