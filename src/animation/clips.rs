//! Animation clip table: frame counts and timing per clip.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationClip {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    Dash,
    WallSlide,
}

impl AnimationClip {
    pub const ALL: [AnimationClip; 6] = [
        AnimationClip::Idle,
        AnimationClip::Run,
        AnimationClip::Jump,
        AnimationClip::Fall,
        AnimationClip::Dash,
        AnimationClip::WallSlide,
    ];

    /// Key used in the clip table file.
    pub fn key(self) -> &'static str {
        match self {
            AnimationClip::Idle => "idle",
            AnimationClip::Run => "run",
            AnimationClip::Jump => "jump",
            AnimationClip::Fall => "fall",
            AnimationClip::Dash => "dash",
            AnimationClip::WallSlide => "wall_slide",
        }
    }
}

/// Shortest frame time a clip may use, in seconds.
pub const MIN_FRAME_DURATION: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ClipSpec {
    pub frames: u32,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub looping: bool,
}

/// A clip entry that cannot be played.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipValidationError {
    pub clip: String,
    pub message: String,
}

impl std::fmt::Display for ClipValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.clip, self.message)
    }
}

impl ClipSpec {
    fn builtin(clip: AnimationClip) -> Self {
        let (frames, frame_duration, looping) = match clip {
            AnimationClip::Idle => (4, 0.15, true),
            AnimationClip::Run => (6, 0.1, true),
            AnimationClip::Jump => (2, 0.1, false),
            AnimationClip::Fall => (2, 0.15, true),
            AnimationClip::Dash => (3, 0.06, false),
            AnimationClip::WallSlide => (2, 0.2, true),
        };
        Self {
            frames,
            frame_duration,
            looping,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClipTable {
    pub clips: HashMap<String, ClipSpec>,
}

impl Default for ClipTable {
    fn default() -> Self {
        Self {
            clips: AnimationClip::ALL
                .into_iter()
                .map(|clip| (clip.key().to_string(), ClipSpec::builtin(clip)))
                .collect(),
        }
    }
}

impl ClipTable {
    /// Spec for a clip, falling back to the built-in timing when the table lacks it.
    pub fn spec(&self, clip: AnimationClip) -> ClipSpec {
        self.clips
            .get(clip.key())
            .copied()
            .unwrap_or_else(|| ClipSpec::builtin(clip))
    }

    pub fn missing_clips(&self) -> Vec<AnimationClip> {
        AnimationClip::ALL
            .into_iter()
            .filter(|clip| !self.clips.contains_key(clip.key()))
            .collect()
    }

    /// Check every entry. Returns an empty list when all clips are playable.
    pub fn validate(&self) -> Vec<ClipValidationError> {
        let mut errors = Vec::new();
        let mut keys: Vec<&String> = self.clips.keys().collect();
        keys.sort();

        for key in keys {
            let spec = &self.clips[key];
            if spec.frames == 0 {
                errors.push(ClipValidationError {
                    clip: key.clone(),
                    message: "must have at least one frame".to_string(),
                });
            }
            if !spec.frame_duration.is_finite() || spec.frame_duration < MIN_FRAME_DURATION {
                errors.push(ClipValidationError {
                    clip: key.clone(),
                    message: format!(
                        "frame_duration must be a finite value >= {}, got {}",
                        MIN_FRAME_DURATION, spec.frame_duration
                    ),
                });
            }
        }

        errors
    }
}
