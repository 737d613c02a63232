//! Plan sync engine: transport for the planning endpoint and effect execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_markup, DecodeError, DecodedMarkup};
pub use engine::{EngineError, EngineHandle};
pub use fetch::{ChannelEventSink, EventSink, FetchSettings, PlanFetcher, ReqwestPlanFetcher};
pub use types::{EngineEvent, FailureKind, FetchError, PlanResponse, RequestId};
