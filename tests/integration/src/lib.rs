//! Shared helpers for the Attest integration tests.

use async_trait::async_trait;

use attest_issuer::{EligibilityRequest, EligibilityResponse, EligibilityService, IssuerError};

/// Eligibility service that accepts everything.
pub struct AcceptingService;

#[async_trait]
impl EligibilityService for AcceptingService {
    async fn check(
        &self,
        _request: &EligibilityRequest,
    ) -> Result<EligibilityResponse, IssuerError> {
        Ok(EligibilityResponse {
            eligible: true,
            reason: None,
            message: Some("requirement satisfied".into()),
        })
    }
}

/// Eligibility service that rejects everything with a fixed reason.
pub struct RejectingService;

#[async_trait]
impl EligibilityService for RejectingService {
    async fn check(
        &self,
        _request: &EligibilityRequest,
    ) -> Result<EligibilityResponse, IssuerError> {
        Ok(EligibilityResponse {
            eligible: false,
            reason: Some("Proof verification failed".into()),
            message: None,
        })
    }
}

/// Eligibility service that is never reachable.
pub struct DownService;

#[async_trait]
impl EligibilityService for DownService {
    async fn check(
        &self,
        _request: &EligibilityRequest,
    ) -> Result<EligibilityResponse, IssuerError> {
        Err(IssuerError::Transport("connection refused".into()))
    }
}
