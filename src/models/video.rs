//! Video studio sub-state.
//!
//! The studio sits behind a simple access code. The gate only hides the UI;
//! it is not a security boundary and the code is compared in plain text.

use serde::{Deserialize, Serialize};

use super::patch::settings_group;

/// Maximum camera direction in degrees.
pub const MAX_DIRECTION_DEGREES: u16 = 360;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    #[default]
    Static,
    Orbit,
    Pan,
    Dolly,
    Flyover,
    Walkthrough,
}

impl MotionType {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Static => "static camera",
            Self::Orbit => "orbiting camera",
            Self::Pan => "panning camera",
            Self::Dolly => "dolly move",
            Self::Flyover => "aerial flyover",
            Self::Walkthrough => "walkthrough at eye level",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl MotionSpeed {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
        }
    }
}

/// Camera motion for the generated clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VideoCamera {
    pub motion: MotionType,
    /// Direction of travel in degrees, 0–360.
    pub direction: u16,
    pub speed: MotionSpeed,
    /// Motion smoothing, 0–100.
    pub smoothness: u8,
}

impl Default for VideoCamera {
    fn default() -> Self {
        Self {
            motion: MotionType::Static,
            direction: 0,
            speed: MotionSpeed::Normal,
            smoothness: 50,
        }
    }
}

/// One still in the keyframe strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Keyframe {
    /// Image reference (data URL or history thumbnail).
    pub image: String,
    pub duration_ms: u32,
}

settings_group! {
    /// Video studio state.
    pub struct VideoState, patch VideoPatch {
        /// Set once the access code has been accepted.
        pub unlocked: bool = false,
        pub camera: VideoCamera = VideoCamera::default(),
        /// Ordered keyframes; playback follows vector order.
        pub keyframes: Vec<Keyframe> = Vec::new(),
        pub duration_seconds: u8 = 5,
    }
}

impl VideoState {
    /// Compare `input` with the configured access code.
    ///
    /// Surrounding whitespace is ignored; an empty configured code never
    /// matches.
    pub fn check_access_code(input: &str, expected: &str) -> bool {
        !expected.is_empty() && input.trim() == expected
    }

    /// Sum of all keyframe durations.
    pub fn total_keyframe_duration_ms(&self) -> u64 {
        self.keyframes.iter().map(|k| u64::from(k.duration_ms)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_code_trims_input() {
        assert!(VideoState::check_access_code("  studio\n", "studio"));
        assert!(!VideoState::check_access_code("Studio", "studio"));
    }

    #[test]
    fn empty_access_code_never_unlocks() {
        assert!(!VideoState::check_access_code("", ""));
    }

    #[test]
    fn keyframe_durations_sum() {
        let state = VideoState {
            keyframes: vec![
                Keyframe {
                    image: "data:image/png;base64,AA".to_string(),
                    duration_ms: 1500,
                },
                Keyframe {
                    image: "data:image/png;base64,BB".to_string(),
                    duration_ms: 2500,
                },
            ],
            ..Default::default()
        };
        assert_eq!(state.total_keyframe_duration_ms(), 4000);
    }

    #[test]
    fn default_camera_is_static() {
        let camera = VideoCamera::default();
        assert_eq!(camera.motion, MotionType::Static);
        assert_eq!(camera.direction, 0);
        assert_eq!(camera.smoothness, 50);
    }
}
