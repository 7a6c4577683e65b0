//! State transitions understood by the reducer.
//!
//! Over the wire an action is an envelope `{ "type": "SET_MODE", "payload":
//! "masterplan" }`. [`Action::from_json`] parses envelopes coming from a
//! front-end host; envelope types this version does not know are reported as
//! `Ok(None)` so newer front-ends degrade gracefully.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{
    CameraPatch, ContextPatch, GeometryPatch, HistoryEntry, LightingPatch, MaterialPatch, Mode,
    OutputPatch, WorkflowPatch,
};
use crate::project::ValidatedProject;
use crate::state::{BottomTab, LayoutPatch, PanelTab};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // ── Scalar replace ───────────────────────────────────────────────────────
    SetMode(Mode),
    SetStyle(String),
    /// `None` clears the uploaded image.
    SetImage(Option<Arc<str>>),
    SetGenerating(bool),
    /// Clamped to 0–100 by the reducer.
    SetProgress(i64),
    SetPrompt(String),
    SetActiveTab(PanelTab),
    SetActiveBottomTab(BottomTab),

    // ── Shallow merge ────────────────────────────────────────────────────────
    UpdateWorkflow(WorkflowPatch),
    UpdateGeometry(GeometryPatch),
    UpdateCamera(CameraPatch),
    UpdateLighting(LightingPatch),
    UpdateMaterials(MaterialPatch),
    UpdateContext(ContextPatch),
    UpdateOutput(OutputPatch),
    ResizePanels(LayoutPatch),

    // ── Toggles ──────────────────────────────────────────────────────────────
    ToggleBottomPanel,
    ToggleLeftSidebar,
    ToggleRightPanel,

    /// Prepend to history, keeping the newest 20 entries.
    AddHistory(HistoryEntry),

    // ── Whole-state ──────────────────────────────────────────────────────────
    /// Replace the whole state with a checked project.
    LoadProject(ValidatedProject),
    ResetProject,
}

impl Action {
    /// Every envelope `type` this version understands.
    pub const KNOWN_TYPES: [&'static str; 22] = [
        "SET_MODE",
        "SET_STYLE",
        "SET_IMAGE",
        "SET_GENERATING",
        "SET_PROGRESS",
        "SET_PROMPT",
        "SET_ACTIVE_TAB",
        "SET_ACTIVE_BOTTOM_TAB",
        "UPDATE_WORKFLOW",
        "UPDATE_GEOMETRY",
        "UPDATE_CAMERA",
        "UPDATE_LIGHTING",
        "UPDATE_MATERIALS",
        "UPDATE_CONTEXT",
        "UPDATE_OUTPUT",
        "RESIZE_PANELS",
        "TOGGLE_BOTTOM_PANEL",
        "TOGGLE_LEFT_SIDEBAR",
        "TOGGLE_RIGHT_PANEL",
        "ADD_HISTORY",
        "LOAD_PROJECT",
        "RESET_PROJECT",
    ];

    /// The envelope `type` of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetMode(_) => "SET_MODE",
            Self::SetStyle(_) => "SET_STYLE",
            Self::SetImage(_) => "SET_IMAGE",
            Self::SetGenerating(_) => "SET_GENERATING",
            Self::SetProgress(_) => "SET_PROGRESS",
            Self::SetPrompt(_) => "SET_PROMPT",
            Self::SetActiveTab(_) => "SET_ACTIVE_TAB",
            Self::SetActiveBottomTab(_) => "SET_ACTIVE_BOTTOM_TAB",
            Self::UpdateWorkflow(_) => "UPDATE_WORKFLOW",
            Self::UpdateGeometry(_) => "UPDATE_GEOMETRY",
            Self::UpdateCamera(_) => "UPDATE_CAMERA",
            Self::UpdateLighting(_) => "UPDATE_LIGHTING",
            Self::UpdateMaterials(_) => "UPDATE_MATERIALS",
            Self::UpdateContext(_) => "UPDATE_CONTEXT",
            Self::UpdateOutput(_) => "UPDATE_OUTPUT",
            Self::ResizePanels(_) => "RESIZE_PANELS",
            Self::ToggleBottomPanel => "TOGGLE_BOTTOM_PANEL",
            Self::ToggleLeftSidebar => "TOGGLE_LEFT_SIDEBAR",
            Self::ToggleRightPanel => "TOGGLE_RIGHT_PANEL",
            Self::AddHistory(_) => "ADD_HISTORY",
            Self::LoadProject(_) => "LOAD_PROJECT",
            Self::ResetProject => "RESET_PROJECT",
        }
    }

    /// Parse an action envelope.
    ///
    /// Returns `Ok(None)` for a well-formed envelope whose `type` is not
    /// recognized. `LOAD_PROJECT` payloads go through the same validation as
    /// project files.
    pub fn from_json(json: &str) -> Result<Option<Action>, AppError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| AppError::InvalidAction(e.to_string()))?;

        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| AppError::InvalidAction("missing string field `type`".to_string()))?;

        if !Self::KNOWN_TYPES.contains(&kind.as_str()) {
            tracing::warn!(action = kind, "ignoring unrecognized action type");
            return Ok(None);
        }

        if kind == "LOAD_PROJECT" {
            let payload = value.get("payload").cloned().ok_or_else(|| {
                AppError::InvalidProjectFile("LOAD_PROJECT without payload".to_string())
            })?;
            let project = crate::project::parse_project_value(payload)?;
            return Ok(Some(Action::LoadProject(project)));
        }

        let action: Action = serde_json::from_value(value)
            .map_err(|e| AppError::InvalidAction(format!("{kind}: {e}")))?;
        Ok(Some(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workflow::{MasterplanPatch, MpOutputType};
    use crate::state::AppState;

    #[test]
    fn envelope_shape() {
        let value = serde_json::to_value(Action::SetMode(Mode::Masterplan)).expect("serialize");
        assert_eq!(value["type"], "SET_MODE");
        assert_eq!(value["payload"], "masterplan");

        let value = serde_json::to_value(Action::ToggleBottomPanel).expect("serialize");
        assert_eq!(value["type"], "TOGGLE_BOTTOM_PANEL");
        assert!(value.get("payload").is_none());
    }

    #[test]
    fn parses_update_workflow() {
        let action = Action::from_json(
            r#"{"type":"UPDATE_WORKFLOW","payload":{"masterplan":{"outputType":"photorealistic"}}}"#,
        )
        .expect("parse")
        .expect("known action");
        assert_eq!(
            action,
            Action::UpdateWorkflow(WorkflowPatch {
                masterplan: Some(MasterplanPatch {
                    output_type: Some(MpOutputType::Photorealistic),
                    ..Default::default()
                }),
                ..Default::default()
            })
        );
    }

    #[test]
    fn parses_unit_action_without_payload() {
        let action = Action::from_json(r#"{"type":"RESET_PROJECT"}"#)
            .expect("parse")
            .expect("known action");
        assert_eq!(action, Action::ResetProject);
    }

    #[test]
    fn unknown_type_is_none() {
        let parsed = Action::from_json(r#"{"type":"SET_MOOD","payload":"happy"}"#).expect("parse");
        assert!(parsed.is_none());
    }

    #[test]
    fn missing_type_is_error() {
        let result = Action::from_json(r#"{"payload":1}"#);
        assert!(matches!(result, Err(AppError::InvalidAction(_))));
    }

    #[test]
    fn bad_payload_is_error() {
        let result = Action::from_json(r#"{"type":"SET_MODE","payload":"render-4d"}"#);
        assert!(matches!(result, Err(AppError::InvalidAction(_))));
    }

    #[test]
    fn load_project_payload_is_validated() {
        let result = Action::from_json(r#"{"type":"LOAD_PROJECT","payload":{"mode":"video"}}"#);
        assert!(matches!(result, Err(AppError::InvalidProjectFile(_))));
    }

    #[test]
    fn load_project_accepts_saved_state() {
        let state = AppState::default();
        let project = ValidatedProject::new(state.clone()).expect("valid");
        let json = serde_json::to_string(&Action::LoadProject(project)).expect("serialize");
        match Action::from_json(&json).expect("parse") {
            Some(Action::LoadProject(loaded)) => assert_eq!(*loaded, state),
            other => panic!("expected LoadProject, got {other:?}"),
        }
    }

    #[test]
    fn serde_load_project_is_validated_too() {
        let mut value = serde_json::to_value(AppState::default()).expect("serialize");
        let history: Vec<HistoryEntry> = (0..21)
            .map(|_| HistoryEntry::new("", "", Mode::Render3d))
            .collect();
        value["history"] = serde_json::to_value(history).expect("serialize");
        let envelope = serde_json::json!({ "type": "LOAD_PROJECT", "payload": value });
        assert!(serde_json::from_value::<Action>(envelope).is_err());
    }

    #[test]
    fn type_field_survives_payload_error() {
        let err = Action::from_json(r#"{"type":"SET_PROGRESS","payload":"lots"}"#)
            .expect_err("payload has the wrong type");
        match err {
            AppError::InvalidAction(message) => assert!(message.starts_with("SET_PROGRESS: ")),
            other => panic!("expected InvalidAction, got {other:?}"),
        }
    }

    #[test]
    fn kind_matches_serialized_type() {
        let samples = [
            Action::SetStyle("brutalist".to_string()),
            Action::SetImage(None),
            Action::SetProgress(40),
            Action::UpdateGeometry(GeometryPatch::default()),
            Action::ResizePanels(LayoutPatch::default()),
            Action::ToggleRightPanel,
            Action::ResetProject,
        ];
        for action in samples {
            let value = serde_json::to_value(&action).expect("serialize");
            assert_eq!(value["type"], action.kind());
            assert!(Action::KNOWN_TYPES.contains(&action.kind()));
        }
    }
}
