//! Session store.
//!
//! [`Store`] owns the single [`AppState`] of a session. It is created by the
//! application root and handed by `Arc` to whatever needs it; there is no
//! ambient global. Dispatches are serialized: each one reduces the current
//! state and publishes the result before the next begins. Subscribers receive
//! every published state through a `tokio::sync::watch` channel.
//!
//! The store also tracks the in-flight generation's [`CancelToken`] so that
//! `RESET_PROJECT` and `LOAD_PROJECT` stop it before replacing the state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::action::Action;
use crate::error::AppError;
use crate::generation::CancelToken;
use crate::reducer::reduce;
use crate::state::AppState;

pub struct Store {
    state: watch::Sender<Arc<AppState>>,
    /// Token of the running generation, if any.
    generation: Mutex<Option<CancelToken>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self {
            state,
            generation: Mutex::new(None),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state.borrow())
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.state.subscribe()
    }

    /// Reduce `action` into the current state and publish the result.
    pub fn dispatch(&self, action: Action) -> Arc<AppState> {
        if matches!(action, Action::ResetProject | Action::LoadProject(_)) {
            self.cancel_slot(None, false);
        }
        self.apply(action)
    }

    /// Parse and dispatch an action envelope from a front-end host.
    ///
    /// Unrecognized action types leave the state untouched and return the
    /// current snapshot.
    pub fn dispatch_json(&self, json: &str) -> Result<Arc<AppState>, AppError> {
        match Action::from_json(json)? {
            Some(action) => Ok(self.dispatch(action)),
            None => Ok(self.state()),
        }
    }

    /// Cancel the running generation, if any, and clear the progress fields.
    ///
    /// A generating flag left set without a registered generation (for
    /// example a host dispatching `SET_GENERATING true`) is cleared as well.
    /// Returns whether anything was cancelled or cleared.
    pub fn cancel_generation(&self) -> bool {
        self.cancel_slot(None, true)
    }

    /// Whether a generation is registered with the store.
    pub fn generation_active(&self) -> bool {
        self.lock_generation().is_some()
    }

    // ── Generation bookkeeping ───────────────────────────────────────────────

    /// Register `token` as the running generation.
    pub(crate) fn begin_generation(&self, token: &CancelToken) -> Result<(), AppError> {
        let mut slot = self.lock_generation();
        if slot.is_some() {
            return Err(AppError::GenerationInProgress);
        }
        *slot = Some(token.clone());
        Ok(())
    }

    /// Dispatch the actions built by `build` on behalf of generation `token`.
    ///
    /// Runs while holding the generation slot, so a concurrent reset either
    /// happens entirely before (and the actions are dropped) or entirely
    /// after. Returns `None` when `token` is no longer the running generation.
    pub(crate) fn dispatch_for<F>(&self, token: &CancelToken, build: F) -> Option<Arc<AppState>>
    where
        F: FnOnce(&AppState) -> Vec<Action>,
    {
        let slot = self.lock_generation();
        let active = slot.as_ref().is_some_and(|t| t.same_as(token));
        if !active || token.is_cancelled() {
            return None;
        }
        let mut last = self.state();
        for action in build(&last) {
            last = self.apply(action);
        }
        Some(last)
    }

    /// Release the slot held by `token`.
    pub(crate) fn end_generation(&self, token: &CancelToken) {
        let mut slot = self.lock_generation();
        if slot.as_ref().is_some_and(|t| t.same_as(token)) {
            *slot = None;
        }
    }

    /// Cancel the running generation if it is `token`.
    pub(crate) fn cancel_generation_for(&self, token: &CancelToken) -> bool {
        self.cancel_slot(Some(token), true)
    }

    fn cancel_slot(&self, only: Option<&CancelToken>, clear_progress: bool) -> bool {
        let mut slot = self.lock_generation();
        let matches = match (slot.as_ref(), only) {
            (Some(active), Some(wanted)) => active.same_as(wanted),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            // Nothing registered; only a dangling flag is left to clear.
            (None, None) => clear_progress && self.state().is_generating,
        };
        if !matches {
            return false;
        }
        match slot.take() {
            Some(token) => {
                token.cancel();
                tracing::info!("generation cancelled");
            }
            None => tracing::warn!("clearing generating flag with no generation registered"),
        }
        if clear_progress && self.state().is_generating {
            self.apply(Action::SetGenerating(false));
            self.apply(Action::SetProgress(0));
        }
        true
    }

    fn apply(&self, action: Action) -> Arc<AppState> {
        let mut next = None;
        self.state.send_modify(|current| {
            let reduced = reduce(current, action);
            *current = Arc::clone(&reduced);
            next = Some(reduced);
        });
        next.unwrap_or_else(|| self.state())
    }

    fn lock_generation(&self) -> MutexGuard<'_, Option<CancelToken>> {
        self.generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
