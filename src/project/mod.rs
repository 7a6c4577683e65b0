//! `.avz` project file I/O.
//!
//! An `.avz` file is a ZIP archive holding `manifest.json` and the session
//! state as `project.json`. Bare `project.json` documents are accepted on load
//! as well. This module provides:
//!
//! - [`types`]: the manifest schema
//! - [`validation`]: semantic checks serde cannot express
//! - [`serialization`]: atomic save and validated load

pub mod serialization;
pub mod types;
pub mod validation;

pub use serialization::{load, save};

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// File extension of project archives.
pub const PROJECT_EXTENSION: &str = "avz";

/// An [`AppState`] that passed [`validation::validate`] and was normalized.
///
/// This is the only payload `LOAD_PROJECT` accepts, so a project cannot reach
/// the store without being checked first, whether it was built in Rust,
/// deserialized from an action envelope or read from disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedProject(Arc<AppState>);

impl ValidatedProject {
    pub fn new(state: AppState) -> Result<Self, AppError> {
        validation::validate(&state)?;
        Ok(Self(Arc::new(validation::normalize(state))))
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.0
    }

    pub fn into_state(self) -> Arc<AppState> {
        self.0
    }
}

impl Deref for ValidatedProject {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ValidatedProject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let state = AppState::deserialize(deserializer)?;
        Self::new(state).map_err(serde::de::Error::custom)
    }
}

/// Parse and validate a project document already decoded to JSON.
///
/// This is the entry point for `LOAD_PROJECT` payloads coming from a host.
pub fn parse_project_value(value: serde_json::Value) -> Result<ValidatedProject, AppError> {
    let state: AppState = serde_json::from_value(value)
        .map_err(|e| AppError::InvalidProjectFile(format!("schema mismatch: {e}")))?;
    ValidatedProject::new(state)
}

/// Parse and validate a project document from its JSON text.
pub fn parse_project_json(json: &str) -> Result<ValidatedProject, AppError> {
    let state: AppState = serde_json::from_str(json)
        .map_err(|e| AppError::InvalidProjectFile(format!("schema mismatch: {e}")))?;
    ValidatedProject::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mode;

    #[test]
    fn parses_serialized_state() {
        let mut state = AppState::default();
        state.mode = Mode::Exploded;
        state.prompt = "stacked timber floors".to_string();
        let json = serde_json::to_string(&state).expect("serialize");

        assert_eq!(*parse_project_json(&json).expect("parse"), state);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let result = parse_project_json(r#"{"mode":"video"}"#);
        assert!(matches!(result, Err(AppError::InvalidProjectFile(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut value = serde_json::to_value(AppState::default()).expect("serialize");
        value["theme"] = serde_json::json!("dark");
        let result = parse_project_value(value);
        assert!(matches!(result, Err(AppError::InvalidProjectFile(_))));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let mut value = serde_json::to_value(AppState::default()).expect("serialize");
        value["mode"] = serde_json::json!("render-4d");
        assert!(parse_project_value(value).is_err());
    }

    #[test]
    fn generation_fields_are_normalized() {
        let mut value = serde_json::to_value(AppState::default()).expect("serialize");
        value["isGenerating"] = serde_json::json!(true);
        value["progress"] = serde_json::json!(55);
        let state = parse_project_value(value).expect("valid");
        assert!(!state.is_generating);
        assert_eq!(state.progress, 0);
    }

    #[test]
    fn validated_project_rejects_out_of_range_state() {
        let mut state = AppState::default();
        state.progress = 140;
        assert!(matches!(
            ValidatedProject::new(state),
            Err(AppError::InvalidProjectFile(_))
        ));
    }

    #[test]
    fn validated_project_normalizes_generation_fields() {
        let mut state = AppState::default();
        state.is_generating = true;
        state.progress = 40;
        let project = ValidatedProject::new(state).expect("valid");
        assert!(!project.is_generating);
        assert_eq!(project.progress, 0);
    }

    #[test]
    fn deserializing_validated_project_runs_checks() {
        let mut value = serde_json::to_value(AppState::default()).expect("serialize");
        value["progress"] = serde_json::json!(250);
        assert!(serde_json::from_value::<ValidatedProject>(value.clone()).is_err());

        value["progress"] = serde_json::json!(60);
        value["isGenerating"] = serde_json::json!(true);
        let project: ValidatedProject = serde_json::from_value(value).expect("valid");
        assert!(!project.is_generating);
        assert_eq!(project.progress, 0);
    }
}
