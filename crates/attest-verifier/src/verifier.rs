use std::sync::Arc;

use attest_core::{VerificationLogEntry, VerificationResult};
use attest_store::{DocumentStore, ProofStore, VerificationLog};

use crate::error::VerifierError;
use crate::strategy::{HeuristicLookup, LocalCacheLookup, LookupStrategy, RemoteLookup};

/// Resolves proof identifiers through the ordered strategy chain and keeps
/// the audit trail.
pub struct ProofVerifier {
    strategies: Vec<Box<dyn LookupStrategy>>,
    log: VerificationLog,
}

impl ProofVerifier {
    /// The standard chain: remote store, then local history, then the
    /// heuristic accept.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        store: Arc<ProofStore>,
        log: VerificationLog,
    ) -> Self {
        Self::with_strategies(
            vec![
                Box::new(RemoteLookup::new(documents)),
                Box::new(LocalCacheLookup::new(store)),
                Box::new(HeuristicLookup),
            ],
            log,
        )
    }

    /// A custom chain, for deployments that drop or add tiers.
    pub fn with_strategies(strategies: Vec<Box<dyn LookupStrategy>>, log: VerificationLog) -> Self {
        Self { strategies, log }
    }

    /// Resolve an identifier, stopping at the first tier that answers.
    ///
    /// Exactly one log entry is written when some tier resolves; a full
    /// miss returns the `NotFound` result and writes nothing.
    pub async fn verify(&self, proof_id: &str) -> Result<VerificationResult, VerifierError> {
        for strategy in &self.strategies {
            if let Some(result) = strategy.lookup(proof_id).await {
                tracing::info!(
                    proof_id,
                    trust_tier = %result.trust_tier,
                    "proof identifier resolved"
                );
                let entry =
                    VerificationLogEntry::from_result(proof_id, &result, strategy.latency_label());
                self.log.append(&entry)?;
                return Ok(result);
            }
        }

        tracing::info!(proof_id, "proof identifier not found");
        Ok(VerificationResult::not_found())
    }
}
