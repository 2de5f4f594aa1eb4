//! Movement domain: the player movement controller.
//!
//! Two entry points are driven by the game loop:
//! - [`MovementController::frame_update`] once per rendered frame
//!   (jumps, dash trigger, falling/landing, wall slide, facing)
//! - [`MovementController::fixed_update`] once per physics step
//!   (horizontal run velocity, speed parameter, layer weights, facing)
//!
//! While a dash is running both entry points leave velocity alone.

use std::time::Duration;

use bevy::prelude::*;

use crate::animation::params::{
    AIRBORNE_LAYER, DASH_POSE_LAYER, DASHING, FALLING, GROUNDED_LAYER, JUMP, SPEED, WALL_SLIDING,
};
use crate::movement::dash::DashSequence;
#[cfg(feature = "wall-jump")]
use crate::movement::wall_jump::WallJump;
use crate::movement::{Facing, MovementHost, MovementInput, MovementTuning};

/// Ground jump plus one air jump.
pub const MAX_JUMPS: u8 = 2;

#[derive(Debug, Clone, Default)]
pub struct MovementState {
    /// Horizontal input from the latest frame, in [-1, 1].
    pub axis: f32,
    pub facing: Facing,
    /// Jumps spent since the last ground or wall reset. Never above [`MAX_JUMPS`].
    pub jumps_used: u8,
    /// Set by a jump, cleared once the body starts falling.
    pub jumping: bool,
    pub wall_sliding: bool,
    pub dash: DashSequence,
}

impl MovementState {
    pub fn is_dashing(&self) -> bool {
        self.dash.is_dashing()
    }

    pub fn can_dash(&self) -> bool {
        self.dash.can_dash()
    }
}

#[derive(Component, Debug, Clone)]
pub struct MovementController {
    tuning: MovementTuning,
    state: MovementState,
    #[cfg(feature = "wall-jump")]
    wall_jump: WallJump,
}

impl MovementController {
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            tuning,
            state: MovementState::default(),
            #[cfg(feature = "wall-jump")]
            wall_jump: WallJump::default(),
        }
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    #[cfg(feature = "wall-jump")]
    pub fn wall_jump(&self) -> &WallJump {
        &self.wall_jump
    }

    pub fn frame_update<H: MovementHost>(
        &mut self,
        dt: Duration,
        input: &MovementInput,
        host: &mut H,
    ) {
        self.state.axis = input.axis.clamp(-1.0, 1.0);

        self.advance_dash(dt, host);
        if self.state.is_dashing() {
            return;
        }

        if input.jump_pressed && !self.try_jump(host) {
            self.cut_jump(host);
        }

        if input.dash_pressed && self.state.can_dash() {
            self.start_dash(host);
        }

        self.detect_falling(host);
        self.reset_on_landing(host);
        self.update_wall_slide(host);

        #[cfg(feature = "wall-jump")]
        self.update_wall_jump(dt, input, host);

        self.update_facing(host);
    }

    pub fn fixed_update<H: MovementHost>(&mut self, input: &MovementInput, host: &mut H) {
        if self.state.is_dashing() {
            return;
        }

        if !self.horizontal_locked() {
            let velocity = host.velocity();
            host.set_velocity(Vec2::new(
                self.state.axis * self.tuning.move_speed,
                velocity.y,
            ));
        }
        host.set_float(SPEED, self.state.axis.abs());

        self.update_layers(input, host);
        self.update_facing(host);
    }

    /// Abort any running dash and clear jump and wall state.
    /// Facing is kept so the sprite mirror stays consistent.
    pub fn reset<H: MovementHost>(&mut self, host: &mut H) {
        if self.state.is_dashing() {
            self.finish_dash(host);
        }
        self.state = MovementState {
            facing: self.state.facing,
            ..default()
        };
        #[cfg(feature = "wall-jump")]
        self.wall_jump.reset();

        host.set_velocity(Vec2::ZERO);
        host.set_bool(FALLING, false);
        host.set_bool(WALL_SLIDING, false);
        host.reset_trigger(JUMP);
        debug!("Movement reset");
    }

    fn try_jump<H: MovementHost>(&mut self, host: &mut H) -> bool {
        if self.state.jumps_used >= MAX_JUMPS {
            return false;
        }

        let velocity = host.velocity();
        host.set_velocity(Vec2::new(velocity.x, self.tuning.jump_force));
        self.state.jumping = true;
        self.state.jumps_used += 1;
        host.set_bool(FALLING, false);
        host.set_trigger(JUMP);

        debug!("Jump: jumps_used={}", self.state.jumps_used);
        true
    }

    /// A press that grants no jump while still rising halves the ascent.
    fn cut_jump<H: MovementHost>(&mut self, host: &mut H) {
        let velocity = host.velocity();
        if velocity.y <= 0.0 {
            return;
        }

        host.set_velocity(Vec2::new(velocity.x, velocity.y * 0.5));
        self.state.jumping = true;
        host.set_bool(FALLING, false);
        host.set_trigger(JUMP);
        debug!("Jump cut: vy {} -> {}", velocity.y, velocity.y * 0.5);
    }

    fn start_dash<H: MovementHost>(&mut self, host: &mut H) {
        let started = self.state.dash.begin(
            self.tuning.dash_duration(),
            self.tuning.dash_cooldown_duration(),
            host.gravity_scale(),
        );
        if !started {
            return;
        }

        host.set_gravity_scale(0.0);
        host.set_bool(DASHING, true);
        host.set_velocity(Vec2::new(
            self.state.facing.sign() * self.tuning.dash_power,
            0.0,
        ));
        host.set_enabled(true);

        debug!(
            "Dash started: facing={:?}, saved_gravity={}",
            self.state.facing,
            self.state.dash.saved_gravity()
        );
    }

    fn advance_dash<H: MovementHost>(&mut self, dt: Duration, host: &mut H) {
        let was_dashing = self.state.is_dashing();
        let progress = self.state.dash.advance(dt);

        if progress.ended && was_dashing {
            self.finish_dash(host);
        }
        if progress.recharged {
            debug!("Dash recharged");
        }
    }

    fn finish_dash<H: MovementHost>(&mut self, host: &mut H) {
        host.set_enabled(false);
        host.set_bool(DASHING, false);
        host.set_gravity_scale(self.state.dash.saved_gravity());
        if self.state.is_dashing() {
            self.state.dash.abort();
        }
        debug!("Dash ended: gravity restored to {}", host.gravity_scale());
    }

    fn detect_falling<H: MovementHost>(&mut self, host: &mut H) {
        if host.velocity().y < 0.0 {
            host.reset_trigger(JUMP);
            host.set_bool(FALLING, true);
            self.state.jumping = false;
        }
    }

    fn reset_on_landing<H: MovementHost>(&mut self, host: &mut H) {
        if host.is_grounded() && !self.state.jumping {
            host.set_bool(FALLING, false);
            if self.state.jumps_used > 0 {
                debug!("Landed: jumps_used {} -> 0", self.state.jumps_used);
            }
            self.state.jumps_used = 0;
        }
    }

    fn update_wall_slide<H: MovementHost>(&mut self, host: &mut H) {
        let sliding = host.is_walled() && !host.is_grounded() && self.state.axis != 0.0;

        if sliding {
            self.state.jumps_used = 0;
            let velocity = host.velocity();
            host.set_velocity(Vec2::new(
                velocity.x,
                velocity.y.max(-self.tuning.wall_slide_speed),
            ));
        }

        if sliding != self.state.wall_sliding {
            debug!("Wall slide: {}", sliding);
            host.set_bool(WALL_SLIDING, sliding);
        }
        self.state.wall_sliding = sliding;
    }

    #[cfg(feature = "wall-jump")]
    fn update_wall_jump<H: MovementHost>(
        &mut self,
        dt: Duration,
        input: &MovementInput,
        host: &mut H,
    ) {
        let Some(velocity) = self.wall_jump.update(
            dt,
            self.state.wall_sliding,
            self.state.facing,
            input.jump_pressed,
            &self.tuning,
        ) else {
            return;
        };

        host.set_velocity(velocity);
        if self.state.facing.sign() != self.wall_jump.direction() {
            self.state.facing = self.state.facing.flipped();
            host.mirror_x();
        }
        debug!("Wall jump: velocity={:?}", velocity);
    }

    #[cfg(feature = "wall-jump")]
    fn horizontal_locked(&self) -> bool {
        self.wall_jump.is_wall_jumping()
    }

    #[cfg(not(feature = "wall-jump"))]
    fn horizontal_locked(&self) -> bool {
        false
    }

    /// Layer weights follow the ground probe. The dash pose layer reads the
    /// raw dash press rather than the dashing flag.
    fn update_layers<H: MovementHost>(&self, input: &MovementInput, host: &mut H) {
        if host.is_grounded() {
            host.set_layer_weight(AIRBORNE_LAYER, 0.0);
            host.set_layer_weight(GROUNDED_LAYER, 1.0);
        } else {
            host.set_layer_weight(AIRBORNE_LAYER, 1.0);
            host.set_layer_weight(GROUNDED_LAYER, 0.0);
        }

        let dash_pose = if input.dash_pressed && self.state.can_dash() {
            1.0
        } else {
            0.0
        };
        host.set_layer_weight(DASH_POSE_LAYER, dash_pose);
    }

    fn update_facing<H: MovementHost>(&mut self, host: &mut H) {
        if self.state.facing.disagrees_with(self.state.axis) {
            self.state.facing = self.state.facing.flipped();
            host.mirror_x();
        }
    }
}
