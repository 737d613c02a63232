use std::time::Duration;

use futures_util::StreamExt;
use planner_logging::{planner_debug, planner_warn};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::decode::decode_markup;
use crate::{EngineEvent, FailureKind, FetchError, PlanResponse};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Upper bound for one plan exchange. A hung backend otherwise holds the
    /// single fetch slot forever.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Receives engine events; implemented by whoever owns the page state.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Transport for the planning endpoint.
#[async_trait::async_trait]
pub trait PlanFetcher: Send + Sync {
    /// Fetches `path` (e.g. `/plan?target=a`) relative to the backend.
    async fn fetch_plan(&self, path: &str) -> Result<PlanResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPlanFetcher {
    base_url: Url,
    client: reqwest::Client,
    settings: FetchSettings,
}

impl ReqwestPlanFetcher {
    pub fn new(base_url: &str, settings: FetchSettings) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            base_url,
            client,
            settings,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl PlanFetcher for ReqwestPlanFetcher {
    async fn fetch_plan(&self, path: &str) -> Result<PlanResponse, FetchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_markup(&bytes, content_type.as_deref())
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        planner_debug!(
            "plan body {} bytes decoded as {}",
            bytes.len(),
            decoded.encoding_label
        );

        let plan = PlanResponse {
            status,
            markup: decoded.markup,
            encoding_label: decoded.encoding_label,
        };
        if !plan.is_success() {
            planner_warn!("plan endpoint answered {status}; showing its markup");
        }
        Ok(plan)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
