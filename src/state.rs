//! Root session state.
//!
//! [`AppState`] is the single state tree for one editing session. It is never
//! mutated in place: the reducer builds a new value for every action. Each
//! slice an action can replace sits behind an [`Arc`], so slices an action
//! did not touch are pointer-identical to the previous state and consumers
//! detect change with [`Arc::ptr_eq`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{
    CameraSettings, ContextSettings, GeometrySettings, HistoryEntry, LightingSettings,
    MaterialSettings, Mode, OutputSettings, WorkflowSettings,
};
use crate::styles::DEFAULT_STYLE_ID;

/// Tab shown in the right-hand settings panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelTab {
    #[default]
    Settings,
    Styles,
    Output,
}

/// Tab shown in the bottom panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomTab {
    #[default]
    History,
    Prompt,
    Attachments,
}

/// Payload of `RESIZE_PANELS`; absent sizes are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_sidebar_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_panel_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_panel_height: Option<u32>,
}

/// Root application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppState {
    pub mode: Mode,
    pub active_style_id: String,
    /// Data URL of the uploaded image. Generation and export require one.
    pub uploaded_image: Option<Arc<str>>,
    pub is_generating: bool,
    /// Generation progress, 0–100. Only meaningful while generating.
    pub progress: u8,
    /// Free-text supplement appended to the generated prompt.
    pub prompt: String,

    pub workflow: Arc<WorkflowSettings>,
    pub geometry: Arc<GeometrySettings>,
    pub camera: Arc<CameraSettings>,
    pub lighting: Arc<LightingSettings>,
    pub materials: Arc<MaterialSettings>,
    pub context: Arc<ContextSettings>,
    pub output: Arc<OutputSettings>,

    /// Completed generations, newest first.
    pub history: Arc<Vec<HistoryEntry>>,

    // ── Layout ───────────────────────────────────────────────────────────────
    pub left_sidebar_width: u32,
    pub right_panel_width: u32,
    pub bottom_panel_height: u32,
    pub is_left_sidebar_collapsed: bool,
    pub is_right_panel_collapsed: bool,
    pub is_bottom_panel_open: bool,
    pub active_tab: PanelTab,
    pub active_bottom_tab: BottomTab,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            active_style_id: DEFAULT_STYLE_ID.to_string(),
            uploaded_image: None,
            is_generating: false,
            progress: 0,
            prompt: String::new(),
            workflow: Arc::default(),
            geometry: Arc::default(),
            camera: Arc::default(),
            lighting: Arc::default(),
            materials: Arc::default(),
            context: Arc::default(),
            output: Arc::default(),
            history: Arc::default(),
            left_sidebar_width: 280,
            right_panel_width: 320,
            bottom_panel_height: 200,
            is_left_sidebar_collapsed: false,
            is_right_panel_collapsed: false,
            is_bottom_panel_open: true,
            active_tab: PanelTab::default(),
            active_bottom_tab: BottomTab::default(),
        }
    }
}

impl AppState {
    /// Whether closing the session would lose work: something has been
    /// generated or an image is loaded.
    pub fn has_unsaved_work(&self) -> bool {
        !self.history.is_empty() || self.uploaded_image.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle_and_empty() {
        let state = AppState::default();
        assert_eq!(state.mode, Mode::Render3d);
        assert_eq!(state.active_style_id, DEFAULT_STYLE_ID);
        assert!(state.uploaded_image.is_none());
        assert!(!state.is_generating);
        assert_eq!(state.progress, 0);
        assert!(state.history.is_empty());
        assert!(state.is_bottom_panel_open);
    }

    #[test]
    fn unsaved_work_tracks_image_and_history() {
        let mut state = AppState::default();
        assert!(!state.has_unsaved_work());

        state.uploaded_image = Some(Arc::from("data:image/png;base64,AA"));
        assert!(state.has_unsaved_work());

        state.uploaded_image = None;
        state.history = Arc::new(vec![HistoryEntry::new("t", "p", Mode::Render3d)]);
        assert!(state.has_unsaved_work());
    }

    #[test]
    fn clone_shares_slices() {
        let state = AppState::default();
        let copy = state.clone();
        assert!(Arc::ptr_eq(&state.workflow, &copy.workflow));
        assert!(Arc::ptr_eq(&state.history, &copy.history));
    }

    #[test]
    fn state_json_uses_front_end_keys() {
        let value = serde_json::to_value(AppState::default()).expect("serialize");
        for key in [
            "mode",
            "activeStyleId",
            "uploadedImage",
            "isGenerating",
            "progress",
            "workflow",
            "geometry",
            "history",
            "leftSidebarWidth",
            "bottomPanelHeight",
            "isBottomPanelOpen",
            "activeBottomTab",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value["uploadedImage"].is_null());
    }

    #[test]
    fn state_json_round_trips() {
        let state = AppState::default();
        let json = serde_json::to_string(&state).expect("serialize");
        let back: AppState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, state);
    }
}
