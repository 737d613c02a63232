use std::fmt;

pub use planner_core::RequestId;

/// Plan fragment returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanResponse {
    /// HTTP status. The backend renders its own error markup with non-2xx
    /// statuses, so any status carries displayable markup.
    pub status: u16,
    pub markup: String,
    pub encoding_label: String,
}

impl PlanResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PlanCompleted {
        request_id: RequestId,
        result: Result<PlanResponse, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
    /// The fetch task panicked or was cancelled.
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Aborted => write!(f, "fetch aborted"),
        }
    }
}
