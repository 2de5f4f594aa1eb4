//! Dash trail: afterimage sprites left behind while the trail is enabled.

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::{MovementSystems, TrailEffect};

#[derive(Component, Debug, Clone)]
pub struct DashTrail {
    pub enabled: bool,
    /// Seconds between afterimages.
    pub interval: f32,
    /// Seconds an afterimage takes to fade out.
    pub lifetime: f32,
    /// Alpha of a fresh afterimage.
    pub start_alpha: f32,
    /// Counts down to the next afterimage.
    pub spawn_timer: f32,
}

impl Default for DashTrail {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: 0.03,
            lifetime: 0.25,
            start_alpha: 0.6,
            spawn_timer: 0.0,
        }
    }
}

impl TrailEffect for DashTrail {
    fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            // First afterimage on the very next tick
            self.spawn_timer = 0.0;
        }
        self.enabled = enabled;
    }
}

impl DashTrail {
    /// Count down and report how many afterimages are due this tick.
    pub fn due_afterimages(&mut self, dt: f32) -> u32 {
        if !self.enabled || self.interval <= 0.0 {
            return 0;
        }

        let mut due = 0;
        self.spawn_timer -= dt;
        while self.spawn_timer <= 0.0 {
            due += 1;
            self.spawn_timer += self.interval;
        }
        due
    }
}

/// A fading copy of the player sprite.
#[derive(Component, Debug)]
pub struct Afterimage {
    pub remaining: f32,
    pub lifetime: f32,
    pub start_alpha: f32,
}

impl Afterimage {
    pub fn alpha(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        self.start_alpha * (self.remaining / self.lifetime).clamp(0.0, 1.0)
    }
}

pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (emit_afterimages, fade_afterimages)
                .chain()
                .after(MovementSystems)
                .run_if(in_state(GameState::Run)),
        );
    }
}

fn emit_afterimages(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(&mut DashTrail, &Transform, &Sprite)>,
) {
    for (mut trail, transform, sprite) in &mut query {
        // Several afterimages due in one tick would stack on the same spot
        if trail.due_afterimages(time.delta_secs()) == 0 {
            continue;
        }

        let mut ghost = sprite.clone();
        ghost.color = ghost.color.with_alpha(trail.start_alpha);

        let mut ghost_transform = *transform;
        ghost_transform.translation.z -= 0.5;

        commands.spawn((
            Afterimage {
                remaining: trail.lifetime,
                lifetime: trail.lifetime,
                start_alpha: trail.start_alpha,
            },
            ghost,
            ghost_transform,
        ));
    }
}

fn fade_afterimages(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Afterimage, &mut Sprite)>,
) {
    for (entity, mut afterimage, mut sprite) in &mut query {
        afterimage.remaining -= time.delta_secs();
        if afterimage.remaining <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        sprite.color.set_alpha(afterimage.alpha());
    }
}
