//! Movement domain: host capabilities the controller drives.
//!
//! The controller never touches ECS components directly. Each tick it is
//! handed something implementing [`MovementHost`], which in the game is a
//! bundle of borrowed avian2d/Bevy components and in tests a recorder.

use bevy::prelude::*;

/// Rigid-body velocity and gravity scale.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);
}

/// Circle-overlap queries against the ground and wall layers.
pub trait SurfaceProbe {
    fn is_grounded(&self) -> bool;
    fn is_walled(&self) -> bool;
}

/// Named animation parameters.
pub trait Animator {
    fn set_bool(&mut self, name: &'static str, value: bool);
    fn set_float(&mut self, name: &'static str, value: f32);
    fn set_trigger(&mut self, name: &'static str);
    fn reset_trigger(&mut self, name: &'static str);
    fn set_layer_weight(&mut self, layer: usize, weight: f32);
}

pub trait TrailEffect {
    fn set_enabled(&mut self, enabled: bool);
}

/// Visual transform whose horizontal scale mirrors the sprite.
pub trait FacingTransform {
    fn mirror_x(&mut self);
}

pub trait MovementHost: PhysicsBody + SurfaceProbe + Animator + TrailEffect + FacingTransform {}

impl<T> MovementHost for T where
    T: PhysicsBody + SurfaceProbe + Animator + TrailEffect + FacingTransform
{
}
