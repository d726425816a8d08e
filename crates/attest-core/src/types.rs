use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::proof_id::{ProofId, ProofKind};

/// Identity facts extracted from a scanned document payload.
///
/// Produced once per upload session by the payload parser. Never persisted
/// as-is — only the minimal [`RetainedData`] projection survives into an
/// issued [`ProofRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    /// Holder name as printed on the document. Accepted but never retained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Year of birth.
    pub dob_year: i32,
    /// Numeric country code.
    #[serde(default)]
    pub country_code: i32,
    /// Numeric state/region code.
    #[serde(default)]
    pub state_code: i32,
}

/// The subject's chosen subset of facts to disclose.
///
/// Snapshot-copied into the issued proof and never mutated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSelection {
    /// Disclose "age over threshold".
    #[serde(default)]
    pub age: bool,
    /// Disclose "resident of an allowed region".
    #[serde(default)]
    pub address: bool,
    /// Disclose "document is valid" without any concrete fact.
    #[serde(default, rename = "identityValid")]
    pub identity_valid: bool,
}

impl AttributeSelection {
    /// Whether at least one attribute flag is set.
    pub fn any(&self) -> bool {
        self.age || self.address || self.identity_valid
    }

    /// All flags granted. Used by the heuristic verification tier.
    pub fn all_granted() -> Self {
        Self {
            age: true,
            address: true,
            identity_valid: true,
        }
    }
}

/// Minimal projection of an [`AttributeRecord`] kept inside a proof.
///
/// Only the fields the attempted request kind actually used are retained;
/// the full record (and the holder name) never leave the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetainedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<i32>,
}

impl RetainedData {
    /// Project the fields the given request kind needs for future lookups.
    pub fn project(record: &AttributeRecord, kind: ProofKind) -> Self {
        match kind {
            ProofKind::Age => Self {
                dob_year: Some(record.dob_year),
                ..Default::default()
            },
            ProofKind::Address => Self {
                country_code: Some(record.country_code),
                state_code: Some(record.state_code),
                ..Default::default()
            },
            ProofKind::Kyc => Self {
                dob_year: Some(record.dob_year),
                country_code: Some(record.country_code),
                state_code: Some(record.state_code),
            },
        }
    }
}

/// An issued assertion that the selected facts hold.
///
/// Created exactly once by the issuer, appended to the proof store, and
/// never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// Globally unique proof identifier (`ZKP-<TYPE>-<4 digits>`).
    pub id: ProofId,
    /// The request kind the proof was issued for.
    pub kind: ProofKind,
    /// Issuance time.
    pub created_at: DateTime<Utc>,
    /// Snapshot of the subject's disclosure selection.
    pub selection: AttributeSelection,
    /// Whether the asserted facts were checked (always true for issued records).
    pub verified: bool,
    /// Least-privilege projection of the source record.
    #[serde(default)]
    pub retained: RetainedData,
}

/// Provenance/confidence level of a verification result.
///
/// `Remote` > `LocalCache` > `HeuristicAccept`; `NotFound` is the terminal
/// failure tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustTier {
    /// Resolved against the shared remote document store.
    Remote,
    /// Resolved against the current identity's own issuance history.
    LocalCache,
    /// Accepted on identifier syntax alone. Demo behavior, not a guarantee.
    HeuristicAccept,
    /// Identifier malformed and located nowhere.
    NotFound,
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "Remote"),
            Self::LocalCache => write!(f, "LocalCache"),
            Self::HeuristicAccept => write!(f, "HeuristicAccept"),
            Self::NotFound => write!(f, "NotFound"),
        }
    }
}

/// Outcome of a proof identifier lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verified: bool,
    pub attributes: AttributeSelection,
    pub timestamp: DateTime<Utc>,
    pub trust_tier: TrustTier,
}

impl VerificationResult {
    /// The terminal failure result: nothing disclosed, nothing verified.
    pub fn not_found() -> Self {
        Self {
            verified: false,
            attributes: AttributeSelection::default(),
            timestamp: Utc::now(),
            trust_tier: TrustTier::NotFound,
        }
    }
}

/// One line of the append-only verification audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationLogEntry {
    /// The identifier the verifier was asked about, as typed.
    pub proof_id: String,
    pub verified: bool,
    pub attributes: AttributeSelection,
    pub trust_tier: TrustTier,
    /// Perceived-latency tag for display ("0.8s (cloud)" and friends).
    pub latency_label: String,
    pub timestamp: DateTime<Utc>,
}

impl VerificationLogEntry {
    pub fn from_result(proof_id: &str, result: &VerificationResult, latency_label: &str) -> Self {
        Self {
            proof_id: proof_id.to_string(),
            verified: result.verified,
            attributes: result.attributes,
            trust_tier: result.trust_tier,
            latency_label: latency_label.to_string(),
            timestamp: result.timestamp,
        }
    }
}

/// Role an identity plays in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Subject,
    Verifier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subject => write!(f, "subject"),
            Self::Verifier => write!(f, "verifier"),
        }
    }
}

/// Per-identity role mapping persisted alongside the proof history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(rename = "displayName")]
    pub display_name: String,
}
