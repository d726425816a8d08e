use serde::{Deserialize, Serialize};

use attest_core::{AttributeRecord, AttributeSelection, ProofKind};

use crate::error::IssuerError;

/// Policy constants the eligibility requests carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuancePolicy {
    /// Minimum age for the age check.
    pub min_age: i32,
    /// Country code residency requires.
    pub required_country: i32,
    /// First allowed state code.
    pub allowed_state1: i32,
    /// Second allowed state code.
    pub allowed_state2: i32,
}

impl Default for IssuancePolicy {
    fn default() -> Self {
        // Simulator defaults: country 1, states 10 and 13.
        Self {
            min_age: 18,
            required_country: 1,
            allowed_state1: 10,
            allowed_state2: 13,
        }
    }
}

/// Body of the age-eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCheck {
    pub dob_year: i32,
    pub current_year: i32,
    pub min_age: i32,
}

/// Body of the residency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidencyCheck {
    pub country_code: i32,
    pub state_code: i32,
    pub required_country: i32,
    pub allowed_state1: i32,
    pub allowed_state2: i32,
}

/// Body of the combined check: union of the two field sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycCheck {
    pub dob_year: i32,
    pub current_year: i32,
    pub min_age: i32,
    pub country_code: i32,
    pub state_code: i32,
    pub required_country: i32,
    pub allowed_state1: i32,
    pub allowed_state2: i32,
}

/// One eligibility request, ready to send. Serializes to the bare body of
/// whichever check it wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EligibilityRequest {
    Age(AgeCheck),
    Address(ResidencyCheck),
    Kyc(KycCheck),
}

impl EligibilityRequest {
    /// Map a disclosure selection to the request kind that checks it.
    ///
    /// An `identity_valid`-only selection falls back to the age check — a
    /// preserved quirk of the source system, not an oversight. An empty
    /// selection is a [`IssuerError::Selection`].
    pub fn from_selection(
        selection: AttributeSelection,
        record: &AttributeRecord,
        policy: &IssuancePolicy,
        current_year: i32,
    ) -> Result<Self, IssuerError> {
        let age_check = AgeCheck {
            dob_year: record.dob_year,
            current_year,
            min_age: policy.min_age,
        };
        let residency_check = ResidencyCheck {
            country_code: record.country_code,
            state_code: record.state_code,
            required_country: policy.required_country,
            allowed_state1: policy.allowed_state1,
            allowed_state2: policy.allowed_state2,
        };

        if selection.age && selection.address {
            Ok(Self::Kyc(KycCheck {
                dob_year: age_check.dob_year,
                current_year: age_check.current_year,
                min_age: age_check.min_age,
                country_code: residency_check.country_code,
                state_code: residency_check.state_code,
                required_country: residency_check.required_country,
                allowed_state1: residency_check.allowed_state1,
                allowed_state2: residency_check.allowed_state2,
            }))
        } else if selection.age {
            Ok(Self::Age(age_check))
        } else if selection.address {
            Ok(Self::Address(residency_check))
        } else if selection.identity_valid {
            Ok(Self::Age(age_check))
        } else {
            Err(IssuerError::Selection(
                "select at least one attribute to verify".into(),
            ))
        }
    }

    /// The proof kind this request issues.
    pub fn kind(&self) -> ProofKind {
        match self {
            Self::Age(_) => ProofKind::Age,
            Self::Address(_) => ProofKind::Address,
            Self::Kyc(_) => ProofKind::Kyc,
        }
    }

    /// Service endpoint path for this request kind.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Age(_) => "verify-age",
            Self::Address(_) => "verify-address",
            Self::Kyc(_) => "verify-both",
        }
    }
}
