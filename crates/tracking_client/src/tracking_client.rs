use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::location_update::LocationUpdate;

pub const UPDATE_LOCATION_API_PATH: &str = "/update_location";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl TrackingError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TrackingError::Request(err) if err.is_timeout())
    }
}

#[derive(Debug, Clone)]
pub struct TrackingClientParams {
    /// e.g. `http://localhost:8000`, a trailing slash is ignored
    pub base_url: String,

    /// Upper bound for a whole request, connect included
    pub timeout: Duration,
}

impl TrackingClientParams {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for the external tracking service.
///
/// The inner `reqwest::Client` pools connections and is safe to share between
/// tasks, so one `TrackingClient` serves a whole fleet.
pub struct TrackingClient {
    params: TrackingClientParams,
    update_location_url: String,
    client: reqwest::Client,
}

impl TrackingClient {
    pub fn new(params: TrackingClientParams) -> Result<Self, TrackingError> {
        let base_url = params.base_url.trim_end_matches('/');

        let is_http = reqwest::Url::parse(base_url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
        if !is_http {
            return Err(TrackingError::InvalidBaseUrl(params.base_url.clone()));
        }

        let update_location_url = format!("{}{}", base_url, UPDATE_LOCATION_API_PATH);
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self {
            params,
            update_location_url,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.params.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.params.timeout
    }

    pub fn update_location_url(&self) -> &str {
        &self.update_location_url
    }

    /// Posts a single update. Only `200 OK` counts as delivered.
    pub async fn update_location(&self, update: &LocationUpdate) -> Result<(), TrackingError> {
        let response = self
            .client
            .post(&self.update_location_url)
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(vehicle_id = %update.vehicle_id, "TrackingApi: update accepted");
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(TrackingError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
