use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;

use attest_core::ProofRecord;

use crate::error::StoreError;

/// Shared remote document store holding proof records across identities.
///
/// Higher trust than the local cache: a record found here was written by
/// some issuance, not necessarily this identity's. Both operations may fail
/// with [`StoreError::Transport`]; callers treat that as "try the next
/// tier", never as a hard failure.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a proof document. Best-effort on the issuance path.
    async fn insert_proof(&self, record: &ProofRecord) -> Result<(), StoreError>;

    /// All documents carrying the given proof identifier.
    async fn find_by_proof_id(&self, proof_id: &str) -> Result<Vec<ProofRecord>, StoreError>;
}

/// HTTP client for the shared document store.
pub struct HttpDocumentStore {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpDocumentStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn insert_proof(&self, record: &ProofRecord) -> Result<(), StoreError> {
        let url = format!("{}/proofs", self.base_url);
        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(record)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("document store unreachable: {}", e)))?;

        if !resp.status().is_success() {
            return Err(StoreError::Transport(format!(
                "document store returned HTTP {}",
                resp.status()
            )));
        }
        Ok(())
    }

    async fn find_by_proof_id(&self, proof_id: &str) -> Result<Vec<ProofRecord>, StoreError> {
        let url = format!("{}/proofs", self.base_url);
        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .query(&[("proof_id", proof_id)])
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("document store unreachable: {}", e)))?;

        if !resp.status().is_success() {
            return Err(StoreError::Transport(format!(
                "document store returned HTTP {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| StoreError::Transport(format!("malformed document store response: {}", e)))
    }
}

/// In-memory document store for tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: DashMap<String, Vec<ProofRecord>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_proof(&self, record: &ProofRecord) -> Result<(), StoreError> {
        self.docs
            .entry(record.id.as_str().to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn find_by_proof_id(&self, proof_id: &str) -> Result<Vec<ProofRecord>, StoreError> {
        Ok(self
            .docs
            .get(proof_id)
            .map(|docs| docs.clone())
            .unwrap_or_default())
    }
}

/// Document store that always fails with a transport error. Models an
/// unreachable backend in tests.
#[derive(Default)]
pub struct UnreachableDocumentStore;

#[async_trait]
impl DocumentStore for UnreachableDocumentStore {
    async fn insert_proof(&self, _record: &ProofRecord) -> Result<(), StoreError> {
        Err(StoreError::Transport("document store unreachable".into()))
    }

    async fn find_by_proof_id(&self, _proof_id: &str) -> Result<Vec<ProofRecord>, StoreError> {
        Err(StoreError::Transport("document store unreachable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_core::{AttributeSelection, ProofId, ProofKind, RetainedData};
    use chrono::Utc;

    fn record() -> ProofRecord {
        ProofRecord {
            id: ProofId::generate(ProofKind::Age),
            kind: ProofKind::Age,
            created_at: Utc::now(),
            selection: AttributeSelection::all_granted(),
            verified: true,
            retained: RetainedData::default(),
        }
    }

    #[tokio::test]
    async fn test_memory_insert_and_find() {
        let store = MemoryDocumentStore::new();
        let rec = record();
        store.insert_proof(&rec).await.unwrap();

        let found = store.find_by_proof_id(rec.id.as_str()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, rec.id);
        assert!(store
            .find_by_proof_id("ZKP-AGE-0000")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_memory_duplicate_ids_accumulate() {
        let store = MemoryDocumentStore::new();
        let rec = record();
        store.insert_proof(&rec).await.unwrap();
        store.insert_proof(&rec).await.unwrap();
        let found = store.find_by_proof_id(rec.id.as_str()).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_with_transport() {
        let store = UnreachableDocumentStore;
        assert!(matches!(
            store.insert_proof(&record()).await.unwrap_err(),
            StoreError::Transport(_)
        ));
        assert!(matches!(
            store.find_by_proof_id("ZKP-AGE-1234").await.unwrap_err(),
            StoreError::Transport(_)
        ));
    }
}
