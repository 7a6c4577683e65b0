//! Simulated generation pipeline.
//!
//! [`start`] marks the session as generating and spawns a task that advances
//! `progress` by a fixed step on every tick. At 100 it clears the generating
//! flags and records one [`HistoryEntry`]. The task checks a [`CancelToken`]
//! on every tick; cancelling, resetting or loading a project stops it without
//! any further state writes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::action::Action;
use crate::error::AppError;
use crate::models::HistoryEntry;
use crate::prompt::generate_prompt;
use crate::store::Store;

/// Cooperative cancellation flag shared between a generation task and its
/// owners.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Whether both handles refer to the same token.
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Timing of the simulated pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    pub tick: Duration,
    /// Progress added per tick, 1–100.
    pub step: u8,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(50),
            step: 2,
        }
    }
}

/// How a generation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Completed(HistoryEntry),
    Cancelled,
}

/// Handle to a running generation.
pub struct GenerationHandle {
    store: Arc<Store>,
    token: CancelToken,
    task: JoinHandle<GenerationOutcome>,
}

impl GenerationHandle {
    /// Stop this generation and clear the progress fields. Returns `false`
    /// if it already finished.
    pub fn cancel(&self) -> bool {
        self.store.cancel_generation_for(&self.token)
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Wait for the generation to finish.
    pub async fn wait(self) -> Result<GenerationOutcome, AppError> {
        self.task
            .await
            .map_err(|e| AppError::Generation(format!("generation task failed: {e}")))
    }
}

/// Start a simulated generation for the current state.
///
/// Fails with [`AppError::NoImage`] when no image is uploaded and with
/// [`AppError::GenerationInProgress`] while another generation runs. Must be
/// called from within a tokio runtime.
pub fn start(store: Arc<Store>, config: GenerationConfig) -> Result<GenerationHandle, AppError> {
    let snapshot = store.state();
    if snapshot.uploaded_image.is_none() {
        return Err(AppError::NoImage);
    }

    let token = CancelToken::default();
    store.begin_generation(&token)?;
    store.dispatch_for(&token, |_| {
        vec![Action::SetGenerating(true), Action::SetProgress(0)]
    });
    tracing::info!(mode = snapshot.mode.label(), "generation started");

    let task = tokio::spawn(run(Arc::clone(&store), config, token.clone()));
    Ok(GenerationHandle { store, token, task })
}

async fn run(store: Arc<Store>, config: GenerationConfig, token: CancelToken) -> GenerationOutcome {
    let step = i64::from(config.step.clamp(1, 100));
    let mut ticker = tokio::time::interval(config.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval completes immediately.
    ticker.tick().await;

    let mut progress: i64 = 0;
    while progress < 100 {
        ticker.tick().await;
        progress = (progress + step).min(100);
        let applied = store.dispatch_for(&token, |_| vec![Action::SetProgress(progress)]);
        if applied.is_none() {
            tracing::debug!(progress, "generation stopped");
            return GenerationOutcome::Cancelled;
        }
    }

    let mut created = None;
    let applied = store.dispatch_for(&token, |state| {
        let thumbnail = state.uploaded_image.as_deref().unwrap_or_default();
        let entry = HistoryEntry::new(thumbnail, generate_prompt(state), state.mode);
        created = Some(entry.clone());
        vec![
            Action::SetGenerating(false),
            Action::SetProgress(0),
            Action::AddHistory(entry),
        ]
    });
    store.end_generation(&token);

    match (applied, created) {
        (Some(_), Some(entry)) => {
            tracing::info!(id = %entry.id, "generation completed");
            GenerationOutcome::Completed(entry)
        }
        _ => GenerationOutcome::Cancelled,
    }
}
