//! Movement domain: tests for the controller against a recording host.

use std::time::Duration;

use bevy::prelude::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::controller::MAX_JUMPS;
use super::{
    Animator, DashPhase, Facing, FacingTransform, MovementController, MovementInput,
    MovementTuning, PhysicsBody, SurfaceProbe, TrailEffect,
};
use crate::animation::AnimatorParams;
use crate::animation::params::{
    AIRBORNE_LAYER, DASH_POSE_LAYER, DASHING, FALLING, GROUNDED_LAYER, JUMP, SPEED, WALL_SLIDING,
};

const FRAME: Duration = Duration::from_millis(16);

// -----------------------------------------------------------------------------
// Test host
// -----------------------------------------------------------------------------

struct MockHost {
    velocity: Vec2,
    gravity: f32,
    grounded: bool,
    walled: bool,
    params: AnimatorParams,
    triggers_fired: u32,
    trail: bool,
    scale_x: f32,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity: 1.0,
            grounded: false,
            walled: false,
            params: AnimatorParams::default(),
            triggers_fired: 0,
            trail: false,
            scale_x: 1.0,
        }
    }
}

impl PhysicsBody for MockHost {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity = scale;
    }
}

impl SurfaceProbe for MockHost {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn is_walled(&self) -> bool {
        self.walled
    }
}

impl Animator for MockHost {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.params.set_bool(name, value);
    }

    fn set_float(&mut self, name: &'static str, value: f32) {
        self.params.set_float(name, value);
    }

    fn set_trigger(&mut self, name: &'static str) {
        self.triggers_fired += 1;
        self.params.set_trigger(name);
    }

    fn reset_trigger(&mut self, name: &'static str) {
        self.params.reset_trigger(name);
    }

    fn set_layer_weight(&mut self, layer: usize, weight: f32) {
        self.params.set_layer_weight(layer, weight);
    }
}

impl TrailEffect for MockHost {
    fn set_enabled(&mut self, enabled: bool) {
        self.trail = enabled;
    }
}

impl FacingTransform for MockHost {
    fn mirror_x(&mut self) {
        self.scale_x *= -1.0;
    }
}

fn controller() -> MovementController {
    MovementController::new(MovementTuning::default())
}

fn idle() -> MovementInput {
    MovementInput::default()
}

fn axis(x: f32) -> MovementInput {
    MovementInput {
        axis: x,
        ..Default::default()
    }
}

fn jump(x: f32) -> MovementInput {
    MovementInput {
        axis: x,
        jump_pressed: true,
        ..Default::default()
    }
}

fn dash() -> MovementInput {
    MovementInput {
        dash_pressed: true,
        ..Default::default()
    }
}

// -----------------------------------------------------------------------------
// Jumping
// -----------------------------------------------------------------------------

#[test]
fn test_airborne_jump_sets_impulse() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &jump(1.0), &mut host);

    assert_eq!(host.velocity.y, controller.tuning().jump_force);
    assert_eq!(controller.state().jumps_used, 1);
    assert!(controller.state().jumping);
    assert!(host.params.is_triggered(JUMP));
    assert!(!host.params.get_bool(FALLING));
}

#[test]
fn test_jump_replaces_vertical_velocity() {
    let mut controller = controller();
    let mut host = MockHost {
        velocity: Vec2::new(50.0, -900.0),
        ..Default::default()
    };

    controller.frame_update(FRAME, &jump(0.0), &mut host);

    assert_eq!(host.velocity, Vec2::new(50.0, 640.0));
}

#[test]
fn test_second_press_is_air_jump() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &jump(0.0), &mut host);
    host.velocity.y = 120.0;
    controller.frame_update(FRAME, &jump(0.0), &mut host);

    assert_eq!(host.velocity.y, 640.0);
    assert_eq!(controller.state().jumps_used, MAX_JUMPS);
}

#[test]
fn test_no_jump_left_while_falling_changes_nothing() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &jump(0.0), &mut host);
    controller.frame_update(FRAME, &jump(0.0), &mut host);
    host.velocity.y = -100.0;
    controller.frame_update(FRAME, &idle(), &mut host);
    let fired = host.triggers_fired;

    controller.frame_update(FRAME, &jump(0.0), &mut host);

    assert_eq!(host.velocity.y, -100.0);
    assert_eq!(host.triggers_fired, fired);
    assert_eq!(controller.state().jumps_used, 2);
}

#[test]
fn test_press_without_jumps_left_cuts_ascent() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &jump(0.0), &mut host);
    controller.frame_update(FRAME, &jump(0.0), &mut host);
    host.velocity.y = 300.0;

    controller.frame_update(FRAME, &jump(0.0), &mut host);

    assert_eq!(host.velocity.y, 150.0);
    assert_eq!(controller.state().jumps_used, 2);
    assert!(host.params.is_triggered(JUMP));
}

#[test]
fn test_falling_clears_jump_state() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &jump(0.0), &mut host);
    host.velocity.y = -1.0;
    controller.frame_update(FRAME, &idle(), &mut host);

    assert!(!controller.state().jumping);
    assert!(host.params.get_bool(FALLING));
    assert!(!host.params.is_triggered(JUMP));
}

#[test]
fn test_landing_resets_jumps() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &jump(0.0), &mut host);
    controller.frame_update(FRAME, &jump(0.0), &mut host);
    host.velocity.y = -200.0;
    controller.frame_update(FRAME, &idle(), &mut host);
    assert_eq!(controller.state().jumps_used, 2);

    host.grounded = true;
    host.velocity.y = 0.0;
    controller.frame_update(FRAME, &idle(), &mut host);

    assert_eq!(controller.state().jumps_used, 0);
    assert!(!host.params.get_bool(FALLING));
}

#[test]
fn test_ground_jump_not_reset_while_rising() {
    let mut controller = controller();
    let mut host = MockHost {
        grounded: true,
        ..Default::default()
    };

    controller.frame_update(FRAME, &jump(0.0), &mut host);
    controller.frame_update(FRAME, &idle(), &mut host);

    assert_eq!(controller.state().jumps_used, 1);
}

// -----------------------------------------------------------------------------
// Dash
// -----------------------------------------------------------------------------

#[test]
fn test_dash_full_sequence() {
    let mut controller = controller();
    let mut host = MockHost::default();
    let dash_time = controller.tuning().dash_duration();
    let cooldown = controller.tuning().dash_cooldown_duration();
    let tick = Duration::from_millis(1);

    controller.frame_update(FRAME, &dash(), &mut host);
    assert_eq!(host.velocity, Vec2::new(480.0, 0.0));
    assert!(host.trail);
    assert_eq!(host.gravity, 0.0);
    assert!(host.params.get_bool(DASHING));
    assert!(controller.state().is_dashing());
    assert!(!controller.state().can_dash());

    controller.frame_update(dash_time - tick, &idle(), &mut host);
    assert!(controller.state().is_dashing());
    assert!(host.trail);

    controller.frame_update(tick, &idle(), &mut host);
    assert!(!controller.state().is_dashing());
    assert!(!host.trail);
    assert!(!host.params.get_bool(DASHING));
    assert_eq!(host.gravity, 1.0);
    assert!(!controller.state().can_dash());

    controller.frame_update(cooldown - tick, &idle(), &mut host);
    assert!(!controller.state().can_dash());

    controller.frame_update(tick, &idle(), &mut host);
    assert!(controller.state().can_dash());
    assert_eq!(controller.state().dash.phase(), DashPhase::Ready);
}

#[test]
fn test_dash_follows_facing() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &axis(-1.0), &mut host);
    assert_eq!(controller.state().facing, Facing::Left);

    controller.frame_update(FRAME, &dash(), &mut host);
    assert_eq!(host.velocity, Vec2::new(-480.0, 0.0));
}

#[test]
fn test_dash_restores_custom_gravity() {
    let mut controller = controller();
    let mut host = MockHost {
        gravity: 2.5,
        ..Default::default()
    };

    controller.frame_update(FRAME, &dash(), &mut host);
    controller.frame_update(controller.tuning().dash_duration(), &idle(), &mut host);

    assert_eq!(host.gravity, 2.5);
}

#[test]
fn test_dash_blocks_run_velocity() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &dash(), &mut host);
    controller.frame_update(FRAME, &axis(-1.0), &mut host);
    controller.fixed_update(&axis(-1.0), &mut host);

    assert_eq!(host.velocity, Vec2::new(480.0, 0.0));
    assert_eq!(controller.state().facing, Facing::Right);
}

#[test]
fn test_dash_blocks_jumps() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &dash(), &mut host);
    controller.frame_update(FRAME, &jump(0.0), &mut host);

    assert_eq!(host.velocity.y, 0.0);
    assert_eq!(controller.state().jumps_used, 0);
}

#[test]
fn test_dash_press_during_cooldown_ignored() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &dash(), &mut host);
    controller.frame_update(controller.tuning().dash_duration(), &idle(), &mut host);
    host.velocity = Vec2::new(10.0, -5.0);
    controller.frame_update(FRAME, &dash(), &mut host);

    assert!(!controller.state().is_dashing());
    assert_eq!(host.velocity, Vec2::new(10.0, -5.0));
}

#[test]
fn test_reset_aborts_dash() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &dash(), &mut host);
    controller.reset(&mut host);

    assert!(controller.state().can_dash());
    assert!(!host.trail);
    assert_eq!(host.gravity, 1.0);
    assert_eq!(host.velocity, Vec2::ZERO);
    assert!(!host.params.get_bool(DASHING));
}

// -----------------------------------------------------------------------------
// Fixed step
// -----------------------------------------------------------------------------

#[test]
fn test_fixed_update_sets_run_velocity() {
    let mut controller = controller();
    let mut host = MockHost {
        velocity: Vec2::new(0.0, -42.0),
        ..Default::default()
    };

    controller.frame_update(FRAME, &axis(0.5), &mut host);
    controller.fixed_update(&axis(0.5), &mut host);

    assert_eq!(host.velocity, Vec2::new(160.0, -42.0));
    assert_eq!(host.params.get_float(SPEED), 0.5);
}

#[test]
fn test_layer_weights_follow_ground() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.fixed_update(&idle(), &mut host);
    assert_eq!(host.params.layer_weight(AIRBORNE_LAYER), 1.0);
    assert_eq!(host.params.layer_weight(GROUNDED_LAYER), 0.0);

    host.grounded = true;
    controller.fixed_update(&idle(), &mut host);
    assert_eq!(host.params.layer_weight(AIRBORNE_LAYER), 0.0);
    assert_eq!(host.params.layer_weight(GROUNDED_LAYER), 1.0);
}

#[test]
fn test_dash_pose_layer_reads_raw_press() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.fixed_update(&dash(), &mut host);
    assert_eq!(host.params.layer_weight(DASH_POSE_LAYER), 1.0);

    controller.fixed_update(&idle(), &mut host);
    assert_eq!(host.params.layer_weight(DASH_POSE_LAYER), 0.0);

    // Once the dash is cooling down the press no longer lights the layer
    controller.frame_update(FRAME, &dash(), &mut host);
    controller.frame_update(controller.tuning().dash_duration(), &idle(), &mut host);
    controller.fixed_update(&dash(), &mut host);
    assert_eq!(host.params.layer_weight(DASH_POSE_LAYER), 0.0);
}

// -----------------------------------------------------------------------------
// Facing
// -----------------------------------------------------------------------------

#[test]
fn test_facing_flips_and_mirrors() {
    let mut controller = controller();
    let mut host = MockHost::default();

    controller.frame_update(FRAME, &axis(-1.0), &mut host);
    assert_eq!(controller.state().facing, Facing::Left);
    assert_eq!(host.scale_x, -1.0);

    controller.frame_update(FRAME, &axis(0.0), &mut host);
    assert_eq!(controller.state().facing, Facing::Left);

    controller.frame_update(FRAME, &axis(-0.3), &mut host);
    assert_eq!(host.scale_x, -1.0);

    controller.frame_update(FRAME, &axis(1.0), &mut host);
    assert_eq!(controller.state().facing, Facing::Right);
    assert_eq!(host.scale_x, 1.0);
}

#[test]
fn test_facing_disagreement() {
    assert!(Facing::Right.disagrees_with(-0.1));
    assert!(Facing::Left.disagrees_with(0.1));
    assert!(!Facing::Right.disagrees_with(0.0));
    assert!(!Facing::Left.disagrees_with(-1.0));
    assert_eq!(Facing::Right.flipped().flipped(), Facing::Right);
}

// -----------------------------------------------------------------------------
// Wall slide / wall jump
// -----------------------------------------------------------------------------

#[test]
fn test_wall_slide_clamps_fall() {
    let mut controller = controller();
    let mut host = MockHost {
        walled: true,
        velocity: Vec2::new(0.0, -500.0),
        ..Default::default()
    };

    controller.frame_update(FRAME, &jump(1.0), &mut host);
    host.velocity.y = -500.0;
    controller.frame_update(FRAME, &axis(1.0), &mut host);

    assert!(controller.state().wall_sliding);
    assert_eq!(host.velocity.y, -64.0);
    assert_eq!(controller.state().jumps_used, 0);
    assert!(host.params.get_bool(WALL_SLIDING));
}

#[test]
fn test_wall_slide_leaves_ascent_alone() {
    let mut controller = controller();
    let mut host = MockHost {
        walled: true,
        velocity: Vec2::new(0.0, 200.0),
        ..Default::default()
    };

    controller.frame_update(FRAME, &axis(1.0), &mut host);

    assert!(controller.state().wall_sliding);
    assert_eq!(host.velocity.y, 200.0);
}

#[test]
fn test_wall_slide_needs_input_and_air() {
    let mut controller = controller();
    let mut host = MockHost {
        walled: true,
        velocity: Vec2::new(0.0, -500.0),
        ..Default::default()
    };

    controller.frame_update(FRAME, &idle(), &mut host);
    assert!(!controller.state().wall_sliding);
    assert_eq!(host.velocity.y, -500.0);

    host.grounded = true;
    controller.frame_update(FRAME, &axis(1.0), &mut host);
    assert!(!controller.state().wall_sliding);
}

#[cfg(not(feature = "wall-jump"))]
#[test]
fn test_wall_jump_inactive_by_default() {
    let mut controller = controller();
    let mut host = MockHost {
        walled: true,
        velocity: Vec2::new(0.0, -100.0),
        ..Default::default()
    };

    controller.frame_update(FRAME, &axis(1.0), &mut host);
    host.walled = false;
    controller.frame_update(FRAME, &jump(0.0), &mut host);

    // Plain jump only, no push away from the wall
    assert_eq!(host.velocity, Vec2::new(0.0, 640.0));
    assert_eq!(controller.state().facing, Facing::Right);
}

#[cfg(feature = "wall-jump")]
#[test]
fn test_wall_jump_pushes_away_and_locks_run() {
    let mut controller = controller();
    let mut host = MockHost {
        walled: true,
        velocity: Vec2::new(0.0, -100.0),
        ..Default::default()
    };

    controller.frame_update(FRAME, &axis(1.0), &mut host);
    host.walled = false;
    controller.frame_update(FRAME, &jump(0.0), &mut host);

    assert_eq!(host.velocity, Vec2::new(-256.0, 512.0));
    assert_eq!(controller.state().facing, Facing::Left);
    assert_eq!(host.scale_x, -1.0);
    assert!(controller.wall_jump().is_wall_jumping());

    controller.fixed_update(&idle(), &mut host);
    assert_eq!(host.velocity.x, -256.0);

    controller.frame_update(controller.tuning().wall_jump_lockout(), &idle(), &mut host);
    controller.fixed_update(&idle(), &mut host);
    assert_eq!(host.velocity.x, 0.0);
}

// -----------------------------------------------------------------------------
// Randomized frame sequences
// -----------------------------------------------------------------------------

#[test]
fn test_random_frames_keep_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let mut controller = controller();
        let mut host = MockHost::default();

        for _ in 0..400 {
            let input = MovementInput {
                axis: rng.random_range(-1..=1) as f32,
                jump_pressed: rng.random_bool(0.2),
                dash_pressed: rng.random_bool(0.05),
            };
            host.grounded = rng.random_bool(0.4);
            host.walled = rng.random_bool(0.2);
            let dt = Duration::from_millis(rng.random_range(5..=40));

            controller.frame_update(dt, &input, &mut host);
            controller.fixed_update(&input, &mut host);

            let state = controller.state();
            assert!(state.jumps_used <= MAX_JUMPS);
            if !state.is_dashing() && host.grounded && !state.jumping {
                assert_eq!(state.jumps_used, 0);
            }
            if !state.is_dashing() && input.axis != 0.0 {
                assert_eq!(state.facing.sign(), input.axis.signum());
            }
            assert_eq!(host.scale_x, state.facing.sign());
            if state.is_dashing() {
                assert_eq!(host.gravity, 0.0);
            } else {
                assert_eq!(host.gravity, 1.0);
            }

            // Crude gravity so falls and landings happen
            if !state.is_dashing() {
                host.velocity.y -= 60.0;
            }
            if host.grounded && host.velocity.y < 0.0 {
                host.velocity.y = 0.0;
            }
        }
    }
}

#[test]
fn test_random_frame_pacing_recharges_dash_exactly() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let tuning = MovementTuning::default();
    let dash_time = tuning.dash_duration();
    let total = dash_time + tuning.dash_cooldown_duration();

    for _ in 0..100 {
        let mut controller = MovementController::new(tuning.clone());
        let mut host = MockHost::default();
        controller.frame_update(FRAME, &dash(), &mut host);

        let mut elapsed = Duration::ZERO;
        while elapsed < total + Duration::from_millis(100) {
            let dt = Duration::from_millis(rng.random_range(1..=50));
            elapsed += dt;
            controller.frame_update(dt, &idle(), &mut host);

            assert_eq!(controller.state().is_dashing(), elapsed < dash_time);
            assert_eq!(host.trail, elapsed < dash_time);
            assert_eq!(controller.state().can_dash(), elapsed >= total);
        }
    }
}
