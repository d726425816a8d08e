use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Kind of eligibility request a proof was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofKind {
    /// Age-over-threshold check.
    Age,
    /// Residency/region check.
    Address,
    /// Combined age + residency check.
    Kyc,
}

impl ProofKind {
    /// The uppercase `<TYPE>` segment used in proof identifiers.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Age => "AGE",
            Self::Address => "ADDRESS",
            Self::Kyc => "KYC",
        }
    }
}

impl fmt::Display for ProofKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Age => write!(f, "age"),
            Self::Address => write!(f, "address"),
            Self::Kyc => write!(f, "kyc"),
        }
    }
}

/// Proof identifier in the `ZKP-<TYPE>-<4 digits>` scheme.
///
/// Identifiers are independently randomly generated per issuance; collisions
/// are treated as negligible and not mitigated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofId(String);

impl ProofId {
    /// Parse a full identifier string, rejecting anything off-scheme.
    pub fn new(raw: String) -> Result<Self, CoreError> {
        if Self::is_well_formed(&raw) {
            Ok(Self(raw))
        } else {
            Err(CoreError::InvalidProofId(raw))
        }
    }

    /// Generate a fresh identifier for the given request kind.
    pub fn generate(kind: ProofKind) -> Self {
        let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
        Self(format!("ZKP-{}-{}", kind.type_tag(), suffix))
    }

    /// Syntactic well-formedness check: `ZKP-<TYPE>-<4 digits>` with an
    /// uppercase alphanumeric `<TYPE>`. This is the whole prefix scheme —
    /// nothing here implies the identifier was ever issued.
    pub fn is_well_formed(raw: &str) -> bool {
        let mut parts = raw.split('-');
        let (prefix, tag, suffix) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(t), Some(s), None) => (p, t, s),
            _ => return false,
        };
        prefix == "ZKP"
            && !tag.is_empty()
            && tag.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            && suffix.len() == 4
            && suffix.chars().all(|c| c.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProofId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_matches_scheme() {
        for kind in [ProofKind::Age, ProofKind::Address, ProofKind::Kyc] {
            let id = ProofId::generate(kind);
            assert!(ProofId::is_well_formed(id.as_str()), "bad id: {}", id);
            assert!(id.as_str().starts_with(&format!("ZKP-{}-", kind.type_tag())));
        }
    }

    #[test]
    fn test_generate_four_digit_suffix() {
        for _ in 0..100 {
            let id = ProofId::generate(ProofKind::Age);
            let suffix = id.as_str().rsplit('-').next().unwrap();
            assert_eq!(suffix.len(), 4);
            assert!(suffix.parse::<u32>().unwrap() >= 1000);
        }
    }

    #[test]
    fn test_well_formed_accepts_unknown_types() {
        // The scheme is open: verifiers accept any uppercase type tag.
        assert!(ProofId::is_well_formed("ZKP-AGE-4821"));
        assert!(ProofId::is_well_formed("ZKP-FULL-0001"));
    }

    #[test]
    fn test_well_formed_rejects_malformed() {
        for raw in [
            "",
            "ZKP",
            "ZKP-AGE",
            "ZKP-AGE-482",
            "ZKP-AGE-48210",
            "ZKP-age-4821",
            "ZKP-AGE-4821-X",
            "zkp-AGE-4821",
            "PROOF-AGE-4821",
            "ZKP--4821",
            "ZKP-AGE-482a",
        ] {
            assert!(!ProofId::is_well_formed(raw), "accepted: {}", raw);
        }
    }

    #[test]
    fn test_new_rejects_malformed() {
        assert!(ProofId::new("ZKP-AGE-4821".into()).is_ok());
        assert!(ProofId::new("garbage".into()).is_err());
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(ProofKind::Age.type_tag(), "AGE");
        assert_eq!(ProofKind::Address.type_tag(), "ADDRESS");
        assert_eq!(ProofKind::Kyc.type_tag(), "KYC");
    }

    #[test]
    fn test_proof_id_serde_transparent() {
        let id = ProofId::new("ZKP-KYC-1234".into()).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ZKP-KYC-1234\"");
    }
}
