//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::MovementTuning;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Whether a horizontal input disagrees with this facing.
    /// Zero input never asks for a flip.
    pub fn disagrees_with(self, axis: f32) -> bool {
        (axis < 0.0 && self == Facing::Right) || (axis > 0.0 && self == Facing::Left)
    }
}

/// Circle-overlap probes relative to the player origin.
/// The wall probe x offset is mirrored by facing.
#[derive(Component, Debug, Clone, Copy)]
pub struct SurfaceProbes {
    pub ground_offset: Vec2,
    pub ground_radius: f32,
    pub wall_offset: Vec2,
    pub wall_radius: f32,
}

impl SurfaceProbes {
    pub fn from_tuning(tuning: &MovementTuning) -> Self {
        Self {
            ground_offset: Vec2::from(tuning.ground_check_offset),
            ground_radius: tuning.ground_check_radius,
            wall_offset: Vec2::from(tuning.wall_check_offset),
            wall_radius: tuning.wall_check_radius,
        }
    }

    pub fn ground_point(&self, origin: Vec2) -> Vec2 {
        origin + self.ground_offset
    }

    pub fn wall_point(&self, origin: Vec2, facing: Facing) -> Vec2 {
        origin + Vec2::new(self.wall_offset.x * facing.sign(), self.wall_offset.y)
    }
}

/// Latest probe results, refreshed before every controller tick.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SurfaceContacts {
    pub grounded: bool,
    pub walled: bool,
}

/// Where the player is put back after falling out of the room.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);
