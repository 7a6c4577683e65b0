//! Semantic checks applied to every state read from outside the process.
//!
//! Serde already enforces the shape of the document (every field present,
//! no unknown keys, enum values in range). What it cannot express lives here.

use std::collections::HashSet;

use crate::error::AppError;
use crate::models::video::MAX_DIRECTION_DEGREES;
use crate::models::HISTORY_CAPACITY;
use crate::state::AppState;

const DATA_URL_PREFIX: &str = "data:";

/// Reject states that violate an invariant the reducer would never produce.
pub fn validate(state: &AppState) -> Result<(), AppError> {
    if state.progress > 100 {
        return Err(invalid(format!("progress {} exceeds 100", state.progress)));
    }

    if state.history.len() > HISTORY_CAPACITY {
        return Err(invalid(format!(
            "history holds {} entries; at most {HISTORY_CAPACITY} are allowed",
            state.history.len()
        )));
    }
    let mut ids = HashSet::with_capacity(state.history.len());
    for entry in state.history.iter() {
        if !ids.insert(entry.id.as_str()) {
            return Err(invalid(format!("duplicate history id `{}`", entry.id)));
        }
    }

    let camera = &state.workflow.video.camera;
    if camera.direction > MAX_DIRECTION_DEGREES {
        return Err(invalid(format!(
            "video camera direction {} exceeds {MAX_DIRECTION_DEGREES}",
            camera.direction
        )));
    }
    if camera.smoothness > 100 {
        return Err(invalid(format!(
            "video camera smoothness {} exceeds 100",
            camera.smoothness
        )));
    }

    if let Some(image) = state.uploaded_image.as_deref() {
        if !image.starts_with(DATA_URL_PREFIX) {
            return Err(invalid("uploaded image is not a data URL".to_string()));
        }
    }

    Ok(())
}

/// Clear transient generation fields. A loaded project never resumes a
/// generation.
pub fn normalize(mut state: AppState) -> AppState {
    state.is_generating = false;
    state.progress = 0;
    state
}

fn invalid(message: String) -> AppError {
    AppError::InvalidProjectFile(message)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{HistoryEntry, Mode, WorkflowSettings};

    fn entry(id: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            timestamp: 1,
            thumbnail: String::new(),
            prompt: String::new(),
            attachments: vec![],
            mode: Mode::Render3d,
        }
    }

    fn expect_invalid(state: &AppState, needle: &str) {
        match validate(state) {
            Err(AppError::InvalidProjectFile(msg)) => {
                assert!(msg.contains(needle), "expected `{needle}` in: {msg}")
            }
            other => panic!("expected InvalidProjectFile, got {other:?}"),
        }
    }

    #[test]
    fn default_state_is_valid() {
        assert!(validate(&AppState::default()).is_ok());
    }

    #[test]
    fn rejects_progress_over_100() {
        let state = AppState {
            progress: 101,
            ..AppState::default()
        };
        expect_invalid(&state, "progress");
    }

    #[test]
    fn rejects_oversized_history() {
        let history: Vec<_> = (0..HISTORY_CAPACITY + 1)
            .map(|i| entry(&i.to_string()))
            .collect();
        let state = AppState {
            history: Arc::new(history),
            ..AppState::default()
        };
        expect_invalid(&state, "history");
    }

    #[test]
    fn rejects_duplicate_history_ids() {
        let state = AppState {
            history: Arc::new(vec![entry("a"), entry("b"), entry("a")]),
            ..AppState::default()
        };
        expect_invalid(&state, "duplicate");
    }

    #[test]
    fn rejects_video_direction_out_of_range() {
        let mut workflow = WorkflowSettings::default();
        workflow.video.camera.direction = 361;
        let state = AppState {
            workflow: Arc::new(workflow),
            ..AppState::default()
        };
        expect_invalid(&state, "direction");

        let mut workflow = WorkflowSettings::default();
        workflow.video.camera.direction = 360;
        let state = AppState {
            workflow: Arc::new(workflow),
            ..AppState::default()
        };
        assert!(validate(&state).is_ok());
    }

    #[test]
    fn rejects_smoothness_over_100() {
        let mut workflow = WorkflowSettings::default();
        workflow.video.camera.smoothness = 150;
        let state = AppState {
            workflow: Arc::new(workflow),
            ..AppState::default()
        };
        expect_invalid(&state, "smoothness");
    }

    #[test]
    fn rejects_non_data_url_image() {
        let state = AppState {
            uploaded_image: Some(Arc::from("https://example.com/a.png")),
            ..AppState::default()
        };
        expect_invalid(&state, "data URL");
    }

    #[test]
    fn normalize_clears_generation_fields() {
        let state = normalize(AppState {
            is_generating: true,
            progress: 64,
            prompt: "kept".to_string(),
            ..AppState::default()
        });
        assert!(!state.is_generating);
        assert_eq!(state.progress, 0);
        assert_eq!(state.prompt, "kept");
    }
}
