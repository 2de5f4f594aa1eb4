//! Clip selection and frame playback driven by the animator parameters.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::animation::params::{AIRBORNE_LAYER, DASHING, FALLING, JUMP, SPEED, WALL_SLIDING};
use crate::animation::clips::AnimationClip;
use crate::animation::{AnimatorParams, ClipSpec, ClipTable};

/// Frames a single tick may advance before the remaining time is dropped.
const MAX_CATCH_UP_FRAMES: u32 = 64;

/// Component for clip playback on the player sprite.
#[derive(Component, Debug)]
pub struct AnimationController {
    pub clip: AnimationClip,
    /// Previous clip (for detecting transitions).
    pub previous_clip: AnimationClip,
    /// Current frame index (0-based).
    pub current_frame: u32,
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    pub frame_duration: f32,
    pub looping: bool,
    /// Set once a non-looping clip reaches its last frame.
    pub finished: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        let spec = ClipTable::default().spec(AnimationClip::Idle);
        Self {
            clip: AnimationClip::Idle,
            previous_clip: AnimationClip::Idle,
            current_frame: 0,
            total_frames: spec.frames,
            frame_timer: 0.0,
            frame_duration: spec.frame_duration,
            looping: spec.looping,
            finished: false,
        }
    }
}

impl AnimationController {
    /// Switch clip, resetting playback only if the clip changed.
    pub fn set_clip(&mut self, clip: AnimationClip, spec: ClipSpec) -> bool {
        if self.clip == clip {
            return false;
        }
        self.restart(clip, spec);
        true
    }

    /// Play a clip from its first frame even if it is already playing.
    pub fn restart(&mut self, clip: AnimationClip, spec: ClipSpec) {
        self.previous_clip = self.clip;
        self.clip = clip;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;
        self.total_frames = spec.frames.max(1);
        self.frame_duration = spec.frame_duration;
        self.looping = spec.looping;
    }

    /// Advance playback. Returns true on the tick a non-looping clip finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.finished || self.frame_duration <= 0.0 {
            return false;
        }

        self.frame_timer += dt;
        let mut advanced = 0;
        while self.frame_timer >= self.frame_duration {
            if advanced == MAX_CATCH_UP_FRAMES {
                // Drop the backlog after a long stall.
                self.frame_timer = 0.0;
                break;
            }
            advanced += 1;
            self.frame_timer -= self.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= self.total_frames {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = self.total_frames - 1;
                    self.finished = true;
                    return true;
                }
            }
        }
        false
    }

    /// Sprite key for the current frame, e.g. "player_run_3".
    pub fn current_sprite_key(&self) -> String {
        format!("player_{}_{}", self.clip.key(), self.current_frame + 1)
    }
}

/// Pick the clip the parameters ask for.
/// An unfinished jump clip keeps playing until the body starts falling.
pub fn select_clip(
    params: &AnimatorParams,
    jump_triggered: bool,
    current: &AnimationController,
) -> AnimationClip {
    if params.get_bool(DASHING) {
        AnimationClip::Dash
    } else if params.get_bool(WALL_SLIDING) {
        AnimationClip::WallSlide
    } else if params.get_bool(FALLING) {
        AnimationClip::Fall
    } else if jump_triggered || params.layer_weight(AIRBORNE_LAYER) >= 0.5 {
        AnimationClip::Jump
    } else if current.clip == AnimationClip::Jump && !current.finished {
        AnimationClip::Jump
    } else if params.get_float(SPEED) > 0.01 {
        AnimationClip::Run
    } else {
        AnimationClip::Idle
    }
}

/// Message fired when the playing clip changes.
#[derive(Debug)]
pub struct AnimationStateChanged {
    pub entity: Entity,
    pub from: AnimationClip,
    pub to: AnimationClip,
}

impl Message for AnimationStateChanged {}

/// Message fired when a non-looping clip completes.
#[derive(Debug)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub clip: AnimationClip,
}

impl Message for AnimationFinished {}

/// Apply animator parameters to clip playback. Consumes the jump trigger.
pub fn animation_state_machine(
    clips: Res<ClipTable>,
    mut query: Query<(Entity, &mut AnimatorParams, &mut AnimationController)>,
    mut changed_events: MessageWriter<AnimationStateChanged>,
) {
    for (entity, mut params, mut controller) in &mut query {
        let jump_triggered = params.consume_trigger(JUMP);
        let target = select_clip(&params, jump_triggered, &controller);
        let from = controller.clip;

        let changed = if jump_triggered && target == AnimationClip::Jump {
            controller.restart(target, clips.spec(target));
            from != target
        } else {
            controller.set_clip(target, clips.spec(target))
        };

        if changed {
            changed_events.write(AnimationStateChanged {
                entity,
                from,
                to: target,
            });
        }
    }
}

/// System that updates animation frames based on time.
pub fn update_animation_frames(
    time: Res<Time>,
    mut query: Query<(Entity, &mut AnimationController)>,
    mut finished_events: MessageWriter<AnimationFinished>,
) {
    for (entity, mut controller) in &mut query {
        if controller.tick(time.delta_secs()) {
            finished_events.write(AnimationFinished {
                entity,
                clip: controller.clip,
            });
        }
    }
}

pub fn log_animation_changes(
    mut changed: MessageReader<AnimationStateChanged>,
    mut finished: MessageReader<AnimationFinished>,
) {
    for event in changed.read() {
        debug!(
            "Animation {:?}: {:?} -> {:?}",
            event.entity, event.from, event.to
        );
    }
    for event in finished.read() {
        debug!("Animation {:?}: {:?} finished", event.entity, event.clip);
    }
}
