use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use attest_core::{AttributeSelection, ProofId, TrustTier, VerificationResult};
use attest_store::{DocumentStore, ProofStore};

/// One tier of the verification chain.
///
/// A strategy either resolves the identifier or stands aside; transport and
/// storage failures are absorbed as "no result" so the chain always reaches
/// the next tier.
#[async_trait]
pub trait LookupStrategy: Send + Sync {
    /// Perceived-latency tag written to the log when this tier resolves.
    fn latency_label(&self) -> &'static str;

    async fn lookup(&self, proof_id: &str) -> Option<VerificationResult>;
}

/// Tier 1: the shared remote document store.
///
/// Resolves only on exactly one match — zero matches means unknown, more
/// than one means the id is ambiguous and a lower tier must decide.
pub struct RemoteLookup {
    documents: Arc<dyn DocumentStore>,
}

impl RemoteLookup {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl LookupStrategy for RemoteLookup {
    fn latency_label(&self) -> &'static str {
        "0.8s (cloud)"
    }

    async fn lookup(&self, proof_id: &str) -> Option<VerificationResult> {
        let docs = match self.documents.find_by_proof_id(proof_id).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(proof_id, error = %e, "remote lookup failed, falling through");
                return None;
            }
        };

        match docs.as_slice() {
            [doc] => Some(VerificationResult {
                verified: true,
                attributes: doc.selection,
                timestamp: Utc::now(),
                trust_tier: TrustTier::Remote,
            }),
            [] => None,
            _ => {
                tracing::warn!(proof_id, matches = docs.len(), "ambiguous remote matches");
                None
            }
        }
    }
}

/// Tier 2: the current identity's own issuance history.
pub struct LocalCacheLookup {
    store: Arc<ProofStore>,
}

impl LocalCacheLookup {
    pub fn new(store: Arc<ProofStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LookupStrategy for LocalCacheLookup {
    fn latency_label(&self) -> &'static str {
        "1.1s (local)"
    }

    async fn lookup(&self, proof_id: &str) -> Option<VerificationResult> {
        let record = match self.store.find(proof_id) {
            Ok(found) => found?,
            Err(e) => {
                tracing::warn!(proof_id, error = %e, "local lookup failed, falling through");
                return None;
            }
        };

        Some(VerificationResult {
            verified: true,
            attributes: record.selection,
            timestamp: Utc::now(),
            trust_tier: TrustTier::LocalCache,
        })
    }
}

/// Tier 3: accept any well-formed identifier located nowhere.
///
/// Demo behavior carried over deliberately: a syntactically valid id is
/// treated as verified with every attribute granted. This tier asserts
/// nothing about the id ever having been issued — it is not a security
/// guarantee, and a production deployment should drop it from the chain.
#[derive(Default)]
pub struct HeuristicLookup;

#[async_trait]
impl LookupStrategy for HeuristicLookup {
    fn latency_label(&self) -> &'static str {
        "1.5s (heuristic)"
    }

    async fn lookup(&self, proof_id: &str) -> Option<VerificationResult> {
        if !ProofId::is_well_formed(proof_id) {
            return None;
        }

        tracing::info!(proof_id, "well-formed but unknown id accepted heuristically");
        Some(VerificationResult {
            verified: true,
            attributes: AttributeSelection::all_granted(),
            timestamp: Utc::now(),
            trust_tier: TrustTier::HeuristicAccept,
        })
    }
}
