use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use planner_core::{update, AppState, AppViewModel, FieldName, Msg};
use planner_engine::{EngineError, FetchSettings, PlanFetcher};
use planner_logging::{planner_debug, planner_info};

use super::effects::EffectRunner;
use super::surface::{FieldChangeNotifier, Inbound, PageSurface};

/// Owns the session state and drives one page.
///
/// Everything here runs on the thread that owns the controller. The engine
/// only talks back through the inbox, which is drained by
/// [`Controller::process_pending_messages`] or [`Controller::wait_until_idle`].
pub struct Controller<S: PageSurface> {
    state: AppState,
    surface: S,
    runner: EffectRunner,
    inbox_rx: mpsc::Receiver<Inbound>,
    inbox_tx: mpsc::Sender<Inbound>,
}

impl<S: PageSurface> Controller<S> {
    pub fn new(surface: S, base_url: &str, settings: FetchSettings) -> Result<Self, EngineError> {
        let (inbox_tx, inbox_rx) = mpsc::channel();
        let runner = EffectRunner::new(base_url, settings, inbox_tx.clone())?;
        Ok(Self::assemble(surface, runner, inbox_tx, inbox_rx))
    }

    /// Builds a controller over a custom transport.
    pub fn with_fetcher(surface: S, fetcher: Arc<dyn PlanFetcher>) -> Result<Self, EngineError> {
        let (inbox_tx, inbox_rx) = mpsc::channel();
        let runner = EffectRunner::with_fetcher(fetcher, inbox_tx.clone())?;
        Ok(Self::assemble(surface, runner, inbox_tx, inbox_rx))
    }

    fn assemble(
        surface: S,
        runner: EffectRunner,
        inbox_tx: mpsc::Sender<Inbound>,
        inbox_rx: mpsc::Receiver<Inbound>,
    ) -> Self {
        Self {
            state: AppState::new(),
            surface,
            runner,
            inbox_rx,
            inbox_tx,
        }
    }

    /// Seeds the fields from `location`, runs the first sync with history
    /// replace, then starts listening to field changes.
    pub fn bootstrap(&mut self, location: &str) {
        planner_info!("bootstrapping from {location}");
        self.dispatch(Msg::Bootstrap {
            location: location.to_string(),
        });
        for field in FieldName::ALL {
            let notifier = self.notifier();
            self.surface.on_field_change(field, notifier);
        }
    }

    pub fn notifier(&self) -> FieldChangeNotifier {
        FieldChangeNotifier::new(self.inbox_tx.clone())
    }

    /// Applies `msg` and runs its effects against the surface.
    pub fn dispatch(&mut self, msg: Msg) {
        // Line editors rewrite the field's cached text, so queued user edits
        // must land first or they would be overwritten.
        if let Some(field) = msg.edited_field() {
            let drained = self.process_pending_messages();
            if drained > 0 {
                planner_debug!("applied {drained} queued items before editing {field}");
            }
        }
        self.apply(msg);
    }

    fn apply(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        self.runner.run(&mut self.surface, effects);

        if self.state.consume_dirty() {
            let view = self.state.view();
            self.surface
                .show_status(view.status, view.last_failure.as_deref());
        }
    }

    /// Applies everything queued so far without blocking. Returns the number
    /// of handled items.
    pub fn process_pending_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(inbound) = self.inbox_rx.try_recv() {
            self.handle(inbound);
            handled += 1;
        }
        handled
    }

    /// Blocks until no fetch is in flight and the inbox is empty, or until
    /// `timeout` elapses. Returns whether the controller settled.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_pending_messages();
            if self.state.is_idle() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                planner_debug!("still waiting on {:?}", self.state.sync_phase());
                return false;
            }
            if let Ok(inbound) = self.inbox_rx.recv_timeout(remaining) {
                self.handle(inbound);
            }
        }
    }

    fn handle(&mut self, inbound: Inbound) {
        match inbound {
            Inbound::FieldChanged(field) => {
                let text = self.surface.field_text(field);
                self.apply(Msg::FieldEdited { field, text });
            }
            Inbound::Msg(msg) => self.apply(msg),
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
