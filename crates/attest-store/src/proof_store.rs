use std::sync::Arc;

use attest_core::ProofRecord;

use crate::error::StoreError;
use crate::repository::{Repository, CF_PROOFS};

/// Append-only, identity-scoped history of issued proofs.
///
/// Every issued record — service-backed or mock — lands here. The whole
/// history is one serialized newest-first list under the identity key, so a
/// read always sees a consistent snapshot.
pub struct ProofStore {
    repo: Arc<dyn Repository>,
    identity: String,
}

impl ProofStore {
    pub fn new(repo: Arc<dyn Repository>, identity: impl Into<String>) -> Self {
        Self {
            repo,
            identity: identity.into(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Append a record at the head of this identity's history.
    pub fn append(&self, record: &ProofRecord) -> Result<(), StoreError> {
        let mut history = self.history()?;
        history.insert(0, record.clone());
        let serialized = serde_json::to_vec(&history)?;
        self.repo.put(CF_PROOFS, &self.identity, &serialized)?;

        tracing::info!(
            identity = %self.identity,
            proof_id = %record.id,
            total = history.len(),
            "proof appended to local store"
        );
        Ok(())
    }

    /// Full newest-first history for this identity.
    pub fn history(&self) -> Result<Vec<ProofRecord>, StoreError> {
        match self.repo.get(CF_PROOFS, &self.identity)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Look up a proof by identifier within this identity's own issuances.
    pub fn find(&self, proof_id: &str) -> Result<Option<ProofRecord>, StoreError> {
        Ok(self
            .history()?
            .into_iter()
            .find(|record| record.id.as_str() == proof_id))
    }
}
