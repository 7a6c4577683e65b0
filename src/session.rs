//! Application root for one editing session.
//!
//! [`Session`] owns the [`Store`], keeps the debounced prompt current and
//! exposes the operations a front-end host invokes. File I/O runs on the
//! blocking thread pool so the async runtime is not starved.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::watch;

use crate::action::Action;
use crate::config::StudioConfig;
use crate::error::AppError;
use crate::generation::{self, GenerationHandle};
use crate::models::{VideoPatch, VideoState, WorkflowPatch};
use crate::project;
use crate::prompt::watch::PromptWatcher;
use crate::state::AppState;
use crate::store::Store;

pub struct Session {
    store: Arc<Store>,
    prompt: PromptWatcher,
    config: StudioConfig,
}

impl Session {
    /// Create a session with default state. Must be called from within a
    /// tokio runtime.
    pub fn start(config: StudioConfig) -> Self {
        let store = Arc::new(Store::default());
        let prompt = PromptWatcher::spawn(&store, config.debounce());
        tracing::info!("session started");
        Self {
            store,
            prompt,
            config,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn state(&self) -> Arc<AppState> {
        self.store.state()
    }

    pub fn dispatch(&self, action: Action) -> Arc<AppState> {
        self.store.dispatch(action)
    }

    pub fn dispatch_json(&self, json: &str) -> Result<Arc<AppState>, AppError> {
        self.store.dispatch_json(json)
    }

    /// Debounced prompt for the current state.
    pub fn prompt(&self) -> String {
        self.prompt.latest()
    }

    pub fn watch_prompt(&self) -> watch::Receiver<String> {
        self.prompt.subscribe()
    }

    /// Start a simulated generation with the configured timing.
    pub fn generate(&self) -> Result<GenerationHandle, AppError> {
        generation::start(Arc::clone(&self.store), self.config.generation())
    }

    pub fn cancel_generation(&self) -> bool {
        self.store.cancel_generation()
    }

    /// Discard the session and start over from defaults.
    pub fn reset(&self) -> Arc<AppState> {
        self.store.dispatch(Action::ResetProject)
    }

    /// Unlock the video workflow if `code` matches the configured access
    /// code. Returns whether the workflow is unlocked afterwards.
    pub fn unlock_video(&self, code: &str) -> bool {
        if !VideoState::check_access_code(code, &self.config.video.access_code) {
            tracing::warn!("video access code rejected");
            return self.state().workflow.video.unlocked;
        }
        let patch = WorkflowPatch {
            video: Some(VideoPatch {
                unlocked: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        self.store.dispatch(Action::UpdateWorkflow(patch));
        true
    }

    /// Write the current state to `path` as an `.avz` archive.
    pub async fn save_project(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        let state = self.state();
        let path = path.as_ref().to_path_buf();
        blocking(move || project::save(&state, &path)).await
    }

    /// Load a project file and replace the session state with it.
    ///
    /// A running generation is cancelled. On error the state is unchanged.
    pub async fn load_project(&self, path: impl AsRef<Path>) -> Result<Arc<AppState>, AppError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let loaded = blocking(move || project::load(&path)).await?;
        Ok(self.store.dispatch(Action::LoadProject(loaded)))
    }
}

async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Io(format!("file task panicked: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mode;

    #[tokio::test]
    async fn unlock_requires_matching_code() {
        let session = Session::start(StudioConfig::default());
        assert!(!session.unlock_video("letmein"));
        assert!(!session.state().workflow.video.unlocked);

        assert!(session.unlock_video(" studio "));
        assert!(session.state().workflow.video.unlocked);
        // Stays unlocked after a wrong attempt.
        assert!(session.unlock_video("nope"));
    }

    #[tokio::test]
    async fn empty_access_code_never_unlocks() {
        let mut config = StudioConfig::default();
        config.video.access_code = String::new();
        let session = Session::start(config);
        assert!(!session.unlock_video(""));
    }

    #[tokio::test]
    async fn failed_load_leaves_state_untouched() {
        let session = Session::start(StudioConfig::default());
        session.dispatch(Action::SetMode(Mode::Section));
        let before = session.state();

        let result = session.load_project("/nonexistent/dir/p.avz").await;
        assert!(result.is_err());
        assert!(Arc::ptr_eq(&before, &session.state()));
    }

    #[tokio::test]
    async fn generate_without_image_fails() {
        let session = Session::start(StudioConfig::default());
        assert!(matches!(session.generate(), Err(AppError::NoImage)));
    }

    #[tokio::test]
    async fn host_generating_flag_can_be_cancelled() {
        let session = Session::start(StudioConfig::default());
        session
            .dispatch_json(r#"{"type":"SET_GENERATING","payload":true}"#)
            .expect("dispatch");
        assert!(session.cancel_generation());
        assert!(!session.state().is_generating);
    }
}
