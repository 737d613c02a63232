use std::sync::{mpsc, Arc};
use std::time::Duration;

use planner_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, FailureKind, FetchError, PlanFetcher,
    PlanResponse,
};

struct EchoFetcher;

#[async_trait::async_trait]
impl PlanFetcher for EchoFetcher {
    async fn fetch_plan(&self, path: &str) -> Result<PlanResponse, FetchError> {
        if path.contains("panic") {
            panic!("transport bug");
        }
        if path.contains("fail") {
            return Err(FetchError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        Ok(PlanResponse {
            status: 200,
            markup: format!("<p>{path}</p>"),
            encoding_label: "UTF-8".to_string(),
        })
    }
}

fn start() -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let engine =
        EngineHandle::with_fetcher(Arc::new(EchoFetcher), Arc::new(ChannelEventSink::new(tx)))
            .expect("engine starts");
    (engine, rx)
}

#[test]
fn completion_carries_request_id_and_markup() {
    let (engine, rx) = start();
    engine.fetch_plan(4, "/plan?target=a");

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event,
        EngineEvent::PlanCompleted {
            request_id: 4,
            result: Ok(PlanResponse {
                status: 200,
                markup: "<p>/plan?target=a</p>".to_string(),
                encoding_label: "UTF-8".to_string(),
            }),
        }
    );
}

#[test]
fn failures_are_reported_not_dropped() {
    let (engine, rx) = start();
    engine.fetch_plan(9, "/plan?target=fail");

    match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
        EngineEvent::PlanCompleted { request_id, result } => {
            assert_eq!(request_id, 9);
            assert_eq!(result.unwrap_err().kind, FailureKind::Network);
        }
    }
}

#[test]
fn panicking_fetch_still_completes_the_request() {
    let (engine, rx) = start();
    engine.fetch_plan(11, "/plan?target=panic");

    match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
        EngineEvent::PlanCompleted { request_id, result } => {
            assert_eq!(request_id, 11);
            assert_eq!(result.unwrap_err().kind, FailureKind::Aborted);
        }
    }

    engine.fetch_plan(12, "/plan?target=b");
    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert!(matches!(
        event,
        EngineEvent::PlanCompleted { request_id: 12, result: Ok(_) }
    ));
}
