//! Attest Core — Shared types and the subject workflow state machine.
//!
//! Everything the other crates exchange lives here: the attribute record
//! extracted from a scanned document, the subject's disclosure selection,
//! issued proof records and their identifiers, verification results, and
//! the upload → issuance workflow session.

pub mod error;
pub mod proof_id;
pub mod types;
pub mod upload;
pub mod workflow;

pub use error::CoreError;
pub use proof_id::{ProofId, ProofKind};
pub use types::{
    AttributeRecord, AttributeSelection, ProofRecord, RetainedData, Role, RoleRecord, TrustTier,
    VerificationLogEntry, VerificationResult,
};
pub use upload::UploadedFile;
pub use workflow::{WorkflowEvent, WorkflowSession, WorkflowState};
