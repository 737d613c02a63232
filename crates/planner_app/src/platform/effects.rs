use std::sync::{mpsc, Arc};

use planner_core::{Effect, Msg};
use planner_engine::{
    EngineError, EngineEvent, EngineHandle, EventSink, FetchSettings, PlanFetcher,
};
use planner_logging::{planner_debug, planner_info};

use super::surface::{Inbound, PageSurface};

/// Executes effects: page writes happen inline, plan fetches go to the
/// engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        base_url: &str,
        settings: FetchSettings,
        inbox: mpsc::Sender<Inbound>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(base_url, settings, Arc::new(InboxSink { tx: inbox }))?;
        Ok(Self { engine })
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn PlanFetcher>,
        inbox: mpsc::Sender<Inbound>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::with_fetcher(fetcher, Arc::new(InboxSink { tx: inbox }))?;
        Ok(Self { engine })
    }

    pub fn run<S: PageSurface + ?Sized>(&self, surface: &mut S, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SetFieldText { field, text } => {
                    planner_debug!("SetFieldText field={field} text_len={}", text.len());
                    surface.set_field_text(field, &text);
                }
                Effect::WriteLocation { path, mode } => {
                    planner_debug!("WriteLocation mode={mode:?} path_len={}", path.len());
                    surface.write_location(&path, mode);
                }
                Effect::FetchPlan { request_id, path } => {
                    planner_info!("FetchPlan request_id={request_id} path_len={}", path.len());
                    self.engine.fetch_plan(request_id, path);
                }
                Effect::ReplacePlan { markup } => {
                    surface.replace_plan(&markup);
                }
            }
        }
    }
}

/// Turns engine completions into controller messages.
struct InboxSink {
    tx: mpsc::Sender<Inbound>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::PlanCompleted { request_id, result } => match result {
                Ok(response) => Msg::PlanLoaded {
                    request_id,
                    markup: response.markup,
                },
                Err(err) => Msg::PlanFailed {
                    request_id,
                    reason: err.to_string(),
                },
            },
        };
        let _ = self.tx.send(Inbound::Msg(msg));
    }
}
