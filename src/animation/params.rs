//! Named animator parameters written by the movement controller.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::movement::Animator;

pub const FALLING: &str = "falling";
pub const DASHING: &str = "dashing";
pub const WALL_SLIDING: &str = "wall_sliding";
pub const SPEED: &str = "speed";
pub const JUMP: &str = "jump";

pub const GROUNDED_LAYER: usize = 0;
pub const AIRBORNE_LAYER: usize = 1;
pub const DASH_POSE_LAYER: usize = 2;

/// Parameter store read by the clip selector.
#[derive(Component, Debug, Default, Clone)]
pub struct AnimatorParams {
    bools: HashMap<&'static str, bool>,
    floats: HashMap<&'static str, f32>,
    triggers: HashSet<&'static str>,
    layer_weights: Vec<f32>,
}

impl AnimatorParams {
    /// Unset bools read as false.
    pub fn get_bool(&self, name: &'static str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    /// Unset floats read as zero.
    pub fn get_float(&self, name: &'static str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    pub fn is_triggered(&self, name: &'static str) -> bool {
        self.triggers.contains(name)
    }

    /// Clear a trigger, returning whether it was set.
    pub fn consume_trigger(&mut self, name: &'static str) -> bool {
        self.triggers.remove(name)
    }

    pub fn layer_weight(&self, layer: usize) -> f32 {
        self.layer_weights.get(layer).copied().unwrap_or(0.0)
    }
}

impl Animator for AnimatorParams {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.insert(name, value);
    }

    fn set_trigger(&mut self, name: &'static str) {
        self.triggers.insert(name);
    }

    fn reset_trigger(&mut self, name: &'static str) {
        self.triggers.remove(name);
    }

    fn set_layer_weight(&mut self, layer: usize, weight: f32) {
        if self.layer_weights.len() <= layer {
            self.layer_weights.resize(layer + 1, 0.0);
        }
        self.layer_weights[layer] = weight;
    }
}
