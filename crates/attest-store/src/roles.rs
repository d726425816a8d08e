use std::sync::Arc;

use attest_core::RoleRecord;

use crate::error::StoreError;
use crate::repository::{Repository, CF_ROLES};

/// Per-identity role mapping (`{type, displayName}`).
///
/// Written at signup time by the surrounding application; the proof
/// pipeline itself never consults it.
pub struct RoleDirectory {
    repo: Arc<dyn Repository>,
}

impl RoleDirectory {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub fn set(&self, identity: &str, record: &RoleRecord) -> Result<(), StoreError> {
        let serialized = serde_json::to_vec(record)?;
        self.repo.put(CF_ROLES, identity, &serialized)?;
        tracing::debug!(identity, role = %record.role, "role recorded");
        Ok(())
    }

    pub fn get(&self, identity: &str) -> Result<Option<RoleRecord>, StoreError> {
        match self.repo.get(CF_ROLES, identity)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
