//! The pure state-transition function.
//!
//! [`reduce`] never fails and never performs I/O. Every action yields a new
//! [`AppState`]; slices the action does not touch are shared with the input
//! through their [`Arc`]s.

use std::sync::Arc;

use crate::action::Action;
use crate::models::history::prepend_capped;
use crate::state::AppState;

/// Apply `action` to `state` and return the next state.
pub fn reduce(state: &Arc<AppState>, action: Action) -> Arc<AppState> {
    tracing::debug!(action = action.kind(), "reduce");

    let mut next = AppState::clone(state);
    match action {
        Action::SetMode(mode) => next.mode = mode,
        Action::SetStyle(id) => next.active_style_id = id,
        Action::SetImage(image) => next.uploaded_image = image,
        Action::SetGenerating(flag) => next.is_generating = flag,
        Action::SetProgress(value) => {
            let clamped = value.clamp(0, 100);
            if clamped != value {
                tracing::debug!(value, clamped, "progress out of range; clamped");
            }
            next.progress = clamped as u8;
        }
        Action::SetPrompt(text) => next.prompt = text,
        Action::SetActiveTab(tab) => next.active_tab = tab,
        Action::SetActiveBottomTab(tab) => next.active_bottom_tab = tab,

        Action::UpdateWorkflow(patch) => next.workflow = Arc::new(state.workflow.merged(patch)),
        Action::UpdateGeometry(patch) => next.geometry = Arc::new(state.geometry.merged(patch)),
        Action::UpdateCamera(patch) => next.camera = Arc::new(state.camera.merged(patch)),
        Action::UpdateLighting(patch) => next.lighting = Arc::new(state.lighting.merged(patch)),
        Action::UpdateMaterials(patch) => {
            next.materials = Arc::new(state.materials.merged(patch))
        }
        Action::UpdateContext(patch) => next.context = Arc::new(state.context.merged(patch)),
        Action::UpdateOutput(patch) => next.output = Arc::new(state.output.merged(patch)),
        Action::ResizePanels(patch) => {
            if let Some(width) = patch.left_sidebar_width {
                next.left_sidebar_width = width;
            }
            if let Some(width) = patch.right_panel_width {
                next.right_panel_width = width;
            }
            if let Some(height) = patch.bottom_panel_height {
                next.bottom_panel_height = height;
            }
        }

        Action::ToggleBottomPanel => next.is_bottom_panel_open = !state.is_bottom_panel_open,
        Action::ToggleLeftSidebar => {
            next.is_left_sidebar_collapsed = !state.is_left_sidebar_collapsed
        }
        Action::ToggleRightPanel => next.is_right_panel_collapsed = !state.is_right_panel_collapsed,

        Action::AddHistory(entry) => next.history = Arc::new(prepend_capped(&state.history, entry)),

        Action::LoadProject(loaded) => return loaded.into_state(),
        Action::ResetProject => return Arc::new(AppState::default()),
    }
    Arc::new(next)
}
