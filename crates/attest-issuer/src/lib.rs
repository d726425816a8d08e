//! Attest Issuer — Turns a disclosure selection into an issued proof.
//!
//! The selection maps to one eligibility request kind, the request goes to
//! the remote verification service, and a transport failure is absorbed by
//! mock issuance: the subject-facing flow never stalls because a backend is
//! down. Availability over failing closed.

pub mod client;
pub mod error;
pub mod issuer;
pub mod request;

pub use client::{EligibilityResponse, EligibilityService, HttpEligibilityService};
pub use error::IssuerError;
pub use issuer::ProofIssuer;
pub use request::{EligibilityRequest, IssuancePolicy};
