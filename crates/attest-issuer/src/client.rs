use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::IssuerError;
use crate::request::EligibilityRequest;

/// Response of the remote verification service.
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityResponse {
    pub eligible: bool,
    /// Service-supplied rejection reason, when `eligible` is false.
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Remote verification service seam.
///
/// The only error an implementation may return is
/// [`IssuerError::Transport`]; an explicit rejection is a successful
/// response with `eligible=false`.
#[async_trait]
pub trait EligibilityService: Send + Sync {
    async fn check(&self, request: &EligibilityRequest) -> Result<EligibilityResponse, IssuerError>;
}

/// HTTP client for the verification service.
pub struct HttpEligibilityService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpEligibilityService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl EligibilityService for HttpEligibilityService {
    async fn check(&self, request: &EligibilityRequest) -> Result<EligibilityResponse, IssuerError> {
        let url = format!("{}/{}", self.base_url, request.endpoint_path());

        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| IssuerError::Transport(format!("verification service unreachable: {}", e)))?;

        if !resp.status().is_success() {
            return Err(IssuerError::Transport(format!(
                "verification service returned HTTP {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| IssuerError::Transport(format!("malformed service response: {}", e)))
    }
}
