//! Debounced prompt recomputation.
//!
//! [`PromptWatcher`] follows a [`Store`] and regenerates the prompt after the
//! inputs it depends on stop changing for the debounce interval. Every
//! relevant change restarts the timer, so a burst of edits costs a single
//! recomputation on the state current when the timer fires.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::generate_prompt;
use crate::models::{
    CameraSettings, ContextSettings, GeometrySettings, LightingSettings, MaterialSettings, Mode,
    OutputSettings, WorkflowSettings,
};
use crate::state::AppState;
use crate::store::Store;

/// The slices of [`AppState`] whose change schedules a recomputation.
///
/// Slices are compared by pointer, so an action that leaves them untouched
/// never counts as a change.
struct PromptInputs {
    mode: Mode,
    style: String,
    free_text: String,
    workflow: Arc<WorkflowSettings>,
    geometry: Arc<GeometrySettings>,
    camera: Arc<CameraSettings>,
    lighting: Arc<LightingSettings>,
    materials: Arc<MaterialSettings>,
    context: Arc<ContextSettings>,
    output: Arc<OutputSettings>,
}

impl PromptInputs {
    fn of(state: &AppState) -> Self {
        Self {
            mode: state.mode,
            style: state.active_style_id.clone(),
            free_text: state.prompt.clone(),
            workflow: Arc::clone(&state.workflow),
            geometry: Arc::clone(&state.geometry),
            camera: Arc::clone(&state.camera),
            lighting: Arc::clone(&state.lighting),
            materials: Arc::clone(&state.materials),
            context: Arc::clone(&state.context),
            output: Arc::clone(&state.output),
        }
    }

    fn differs_from(&self, state: &AppState) -> bool {
        self.mode != state.mode
            || self.style != state.active_style_id
            || self.free_text != state.prompt
            || !Arc::ptr_eq(&self.workflow, &state.workflow)
            || !Arc::ptr_eq(&self.geometry, &state.geometry)
            || !Arc::ptr_eq(&self.camera, &state.camera)
            || !Arc::ptr_eq(&self.lighting, &state.lighting)
            || !Arc::ptr_eq(&self.materials, &state.materials)
            || !Arc::ptr_eq(&self.context, &state.context)
            || !Arc::ptr_eq(&self.output, &state.output)
    }
}

/// Background task keeping a debounced copy of the generated prompt.
///
/// The task stops when the watcher is dropped or [`shutdown`](Self::shutdown)
/// is called.
pub struct PromptWatcher {
    prompt: watch::Receiver<String>,
    recomputations: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl PromptWatcher {
    /// Start watching `store`. The prompt for the current state is available
    /// immediately. Must be called from within a tokio runtime.
    pub fn spawn(store: &Store, debounce: Duration) -> Self {
        let mut states = store.subscribe();
        // Baseline and initial prompt share one snapshot.
        let current = Arc::clone(&states.borrow_and_update());
        let inputs = PromptInputs::of(&current);
        let (tx, prompt) = watch::channel(generate_prompt(&current));
        let recomputations = Arc::new(AtomicUsize::new(0));

        let task = tokio::spawn(run(
            states,
            inputs,
            tx,
            debounce,
            Arc::clone(&recomputations),
        ));
        Self {
            prompt,
            recomputations,
            task,
        }
    }

    /// Most recently published prompt.
    pub fn latest(&self) -> String {
        self.prompt.borrow().clone()
    }

    /// Receiver notified each time a recomputed prompt is published.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.prompt.clone()
    }

    /// Number of debounced recomputations performed so far.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Stop the background task. The last published prompt stays readable.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for PromptWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut states: watch::Receiver<Arc<AppState>>,
    mut inputs: PromptInputs,
    tx: watch::Sender<String>,
    debounce: Duration,
    recomputations: Arc<AtomicUsize>,
) {
    let timer = tokio::time::sleep(debounce);
    tokio::pin!(timer);
    let mut pending = false;

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    tracing::debug!("store closed; prompt watcher stopping");
                    break;
                }
                let state = Arc::clone(&states.borrow_and_update());
                if inputs.differs_from(&state) {
                    inputs = PromptInputs::of(&state);
                    pending = true;
                    timer.as_mut().reset(Instant::now() + debounce);
                }
            }
            () = &mut timer, if pending => {
                pending = false;
                let state = Arc::clone(&states.borrow());
                let prompt = generate_prompt(&state);
                recomputations.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(len = prompt.len(), "prompt recomputed");
                tx.send_replace(prompt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::models::settings::{LightingPatch, OutputPatch, TimeOfDay};

    const DEBOUNCE: Duration = Duration::from_millis(200);

    fn lighting(time_of_day: TimeOfDay) -> Action {
        Action::UpdateLighting(LightingPatch {
            time_of_day: Some(time_of_day),
            ..Default::default()
        })
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn initial_prompt_is_available_without_recomputing() {
        let store = Store::default();
        store.dispatch(Action::SetPrompt("a courtyard".to_string()));
        let watcher = PromptWatcher::spawn(&store, DEBOUNCE);
        assert_eq!(watcher.latest(), "a courtyard");
        assert_eq!(watcher.recomputations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_changes_recomputes_once() {
        let store = Store::default();
        let watcher = PromptWatcher::spawn(&store, DEBOUNCE);

        for time_of_day in [
            TimeOfDay::Morning,
            TimeOfDay::Noon,
            TimeOfDay::GoldenHour,
            TimeOfDay::Dusk,
            TimeOfDay::Night,
        ] {
            store.dispatch(lighting(time_of_day));
            advance(50).await;
        }
        assert_eq!(watcher.recomputations(), 0);

        advance(300).await;
        assert_eq!(watcher.recomputations(), 1);
        assert_eq!(watcher.latest(), generate_prompt(&store.state()));
    }

    #[tokio::test(start_paused = true)]
    async fn irrelevant_changes_do_not_schedule() {
        let store = Store::default();
        let watcher = PromptWatcher::spawn(&store, DEBOUNCE);

        store.dispatch(Action::ToggleBottomPanel);
        store.dispatch(Action::SetProgress(40));
        store.dispatch(Action::SetImage(Some(Arc::from("data:image/png;base64,AA"))));
        advance(500).await;
        assert_eq!(watcher.recomputations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn each_change_restarts_the_timer() {
        let store = Store::default();
        let watcher = PromptWatcher::spawn(&store, DEBOUNCE);

        store.dispatch(Action::SetMode(Mode::Masterplan));
        advance(150).await;
        store.dispatch(lighting(TimeOfDay::GoldenHour));
        advance(150).await;
        assert_eq!(watcher.recomputations(), 0);

        advance(100).await;
        assert_eq!(watcher.recomputations(), 1);
        assert_eq!(watcher.latest(), "Golden hour light");
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_receive_new_prompt() {
        let store = Store::default();
        let watcher = PromptWatcher::spawn(&store, DEBOUNCE);
        let mut rx = watcher.subscribe();

        store.dispatch(Action::SetStyle("brutalist".to_string()));
        rx.changed().await.expect("watcher alive");
        assert!(rx.borrow().starts_with("Style: "));
    }

    #[tokio::test(start_paused = true)]
    async fn change_made_before_task_starts_is_picked_up() {
        let store = Store::default();
        let watcher = PromptWatcher::spawn(&store, DEBOUNCE);
        store.dispatch(lighting(TimeOfDay::Dusk));

        advance(300).await;
        assert_eq!(watcher.recomputations(), 1);
        assert_eq!(watcher.latest(), generate_prompt(&store.state()));
        assert!(!watcher.latest().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn free_text_and_output_changes_recompute() {
        let store = Store::default();
        let watcher = PromptWatcher::spawn(&store, DEBOUNCE);

        store.dispatch(Action::SetPrompt("a quiet plaza".to_string()));
        advance(300).await;
        assert_eq!(watcher.recomputations(), 1);
        assert_eq!(watcher.latest(), "a quiet plaza");

        store.dispatch(Action::UpdateOutput(OutputPatch {
            variations: Some(3),
            ..Default::default()
        }));
        advance(300).await;
        assert_eq!(watcher.recomputations(), 2);
        assert_eq!(watcher.latest(), generate_prompt(&store.state()));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_recomputing() {
        let store = Store::default();
        let watcher = PromptWatcher::spawn(&store, DEBOUNCE);
        watcher.shutdown();
        advance(1).await;

        store.dispatch(lighting(TimeOfDay::Night));
        advance(500).await;
        assert_eq!(watcher.recomputations(), 0);
    }
}
