use std::sync::Arc;

use attest_core::VerificationLogEntry;

use crate::error::StoreError;
use crate::repository::{Repository, CF_LOGS};

/// Storage key for the single global log list.
const LOG_KEY: &str = "global";

/// Append-only audit trail of verification attempts.
///
/// Global rather than identity-scoped, newest-first, and independent of the
/// proof store: entries are never mutated once written.
pub struct VerificationLog {
    repo: Arc<dyn Repository>,
}

impl VerificationLog {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Append an entry at the head of the log.
    pub fn append(&self, entry: &VerificationLogEntry) -> Result<(), StoreError> {
        let mut entries = self.entries()?;
        entries.insert(0, entry.clone());
        let serialized = serde_json::to_vec(&entries)?;
        self.repo.put(CF_LOGS, LOG_KEY, &serialized)?;

        tracing::info!(
            proof_id = %entry.proof_id,
            trust_tier = %entry.trust_tier,
            "verification logged"
        );
        Ok(())
    }

    /// Full newest-first log.
    pub fn entries(&self) -> Result<Vec<VerificationLogEntry>, StoreError> {
        match self.repo.get(CF_LOGS, LOG_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }
}
