//! Movement domain: systems that drive the controller from ECS components.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::AnimatorParams;
use crate::movement::{
    Animator, FacingTransform, MovementController, MovementInput, PhysicsBody, Player, SpawnPoint,
    SurfaceContacts, SurfaceProbe, TrailEffect,
};
use crate::trail::DashTrail;

/// Players falling below this height are put back at their spawn point.
pub(crate) const KILL_PLANE_Y: f32 = -600.0;

/// Borrowed player components presented to the controller as its host.
pub(crate) struct PlayerHost<'a> {
    pub velocity: &'a mut LinearVelocity,
    pub gravity: &'a mut GravityScale,
    pub contacts: SurfaceContacts,
    pub animator: &'a mut AnimatorParams,
    pub trail: &'a mut DashTrail,
    pub transform: &'a mut Transform,
}

impl PhysicsBody for PlayerHost<'_> {
    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity.0
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity.0 = scale;
    }
}

impl SurfaceProbe for PlayerHost<'_> {
    fn is_grounded(&self) -> bool {
        self.contacts.grounded
    }

    fn is_walled(&self) -> bool {
        self.contacts.walled
    }
}

impl Animator for PlayerHost<'_> {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.animator.set_bool(name, value);
    }

    fn set_float(&mut self, name: &'static str, value: f32) {
        self.animator.set_float(name, value);
    }

    fn set_trigger(&mut self, name: &'static str) {
        self.animator.set_trigger(name);
    }

    fn reset_trigger(&mut self, name: &'static str) {
        self.animator.reset_trigger(name);
    }

    fn set_layer_weight(&mut self, layer: usize, weight: f32) {
        self.animator.set_layer_weight(layer, weight);
    }
}

impl TrailEffect for PlayerHost<'_> {
    fn set_enabled(&mut self, enabled: bool) {
        self.trail.set_enabled(enabled);
    }
}

impl FacingTransform for PlayerHost<'_> {
    fn mirror_x(&mut self) {
        self.transform.scale.x *= -1.0;
    }
}

type PlayerHostQuery = (
    &'static mut MovementController,
    &'static mut LinearVelocity,
    &'static mut GravityScale,
    &'static SurfaceContacts,
    &'static mut AnimatorParams,
    &'static mut DashTrail,
    &'static mut Transform,
);

pub(crate) fn run_frame_update(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut query: Query<PlayerHostQuery, With<Player>>,
) {
    let dt = time.delta();

    for (mut controller, mut velocity, mut gravity, contacts, mut animator, mut trail, mut transform) in
        &mut query
    {
        let mut host = PlayerHost {
            velocity: &mut velocity,
            gravity: &mut gravity,
            contacts: *contacts,
            animator: &mut animator,
            trail: &mut trail,
            transform: &mut transform,
        };
        controller.frame_update(dt, &input, &mut host);
    }
}

pub(crate) fn run_fixed_update(
    input: Res<MovementInput>,
    mut query: Query<PlayerHostQuery, With<Player>>,
) {
    for (mut controller, mut velocity, mut gravity, contacts, mut animator, mut trail, mut transform) in
        &mut query
    {
        let mut host = PlayerHost {
            velocity: &mut velocity,
            gravity: &mut gravity,
            contacts: *contacts,
            animator: &mut animator,
            trail: &mut trail,
            transform: &mut transform,
        };
        controller.fixed_update(&input, &mut host);
    }
}

pub(crate) fn respawn_fallen_player(
    mut query: Query<(PlayerHostQuery, &SpawnPoint), With<Player>>,
) {
    for (
        (mut controller, mut velocity, mut gravity, contacts, mut animator, mut trail, mut transform),
        spawn,
    ) in &mut query
    {
        if transform.translation.y >= KILL_PLANE_Y {
            continue;
        }

        info!(
            "Player fell out at {:?}, respawning at {:?}",
            transform.translation.truncate(),
            spawn.0
        );

        let mut host = PlayerHost {
            velocity: &mut velocity,
            gravity: &mut gravity,
            contacts: *contacts,
            animator: &mut animator,
            trail: &mut trail,
            transform: &mut transform,
        };
        controller.reset(&mut host);

        transform.translation.x = spawn.0.x;
        transform.translation.y = spawn.0.y;
    }
}
