use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use planner_logging::{planner_debug, planner_error, planner_info};

use crate::fetch::{EventSink, FetchSettings, PlanFetcher, ReqwestPlanFetcher};
use crate::{EngineEvent, FailureKind, FetchError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("could not start engine: {0}")]
    Startup(#[from] io::Error),
    #[error(transparent)]
    Transport(#[from] FetchError),
}

enum EngineCommand {
    FetchPlan { request_id: RequestId, path: String },
}

/// Runs plan fetches on a background tokio runtime and reports each
/// completion to the sink.
///
/// The handle does not limit concurrency; callers keep at most one fetch in
/// flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Starts an engine talking to the backend at `base_url`.
    pub fn new(
        base_url: &str,
        settings: FetchSettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let fetcher = ReqwestPlanFetcher::new(base_url, settings)?;
        planner_info!("plan engine targeting {}", fetcher.base_url());
        Self::with_fetcher(Arc::new(fetcher), sink)
    }

    /// Starts an engine with a custom transport.
    pub fn with_fetcher(
        fetcher: Arc<dyn PlanFetcher>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("plan-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    runtime.spawn(handle_command(fetcher.clone(), command, sink.clone()));
                }
                planner_debug!("plan engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn fetch_plan(&self, request_id: RequestId, path: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPlan {
            request_id,
            path: path.into(),
        });
    }
}

/// Every command ends in exactly one event, even when the fetch task panics.
async fn handle_command(
    fetcher: Arc<dyn PlanFetcher>,
    command: EngineCommand,
    sink: Arc<dyn EventSink>,
) {
    match command {
        EngineCommand::FetchPlan { request_id, path } => {
            let task = tokio::spawn(async move { fetcher.fetch_plan(&path).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    planner_error!("plan request {request_id} aborted: {err}");
                    Err(FetchError::new(FailureKind::Aborted, err.to_string()))
                }
            };
            sink.emit(EngineEvent::PlanCompleted { request_id, result });
        }
    }
}
