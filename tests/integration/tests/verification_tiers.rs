//! Integration test: tiered verification over the issuance pipeline,
//! including the degraded paths where backends are unreachable.

use std::sync::Arc;

use attest_core::{AttributeRecord, AttributeSelection, TrustTier};
use attest_integration_tests::{AcceptingService, DownService};
use attest_issuer::{IssuancePolicy, ProofIssuer};
use attest_store::{
    DocumentStore, MemoryDocumentStore, MemoryRepository, ProofStore, Repository,
    UnreachableDocumentStore, VerificationLog,
};
use attest_verifier::ProofVerifier;

fn record() -> AttributeRecord {
    AttributeRecord {
        name: None,
        dob_year: 2000,
        country_code: 1,
        state_code: 10,
    }
}

fn age_only() -> AttributeSelection {
    AttributeSelection {
        age: true,
        ..Default::default()
    }
}

struct World {
    repo: Arc<dyn Repository>,
    store: Arc<ProofStore>,
    documents: Arc<MemoryDocumentStore>,
}

impl World {
    fn new() -> Self {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        Self {
            store: Arc::new(ProofStore::new(repo.clone(), "alice")),
            documents: Arc::new(MemoryDocumentStore::new()),
            repo,
        }
    }

    fn verifier(&self) -> ProofVerifier {
        ProofVerifier::new(
            self.documents.clone(),
            self.store.clone(),
            VerificationLog::new(self.repo.clone()),
        )
    }

    fn log_len(&self) -> usize {
        VerificationLog::new(self.repo.clone())
            .entries()
            .unwrap()
            .len()
    }
}

// =========================================================================
// Issued proofs always resolve
// =========================================================================

#[tokio::test]
async fn test_mock_issued_proof_resolves_remotely() {
    let world = World::new();
    // Eligibility service down: mock fallback publishes to the document store.
    let issuer = ProofIssuer::new(
        Arc::new(DownService),
        world.documents.clone(),
        IssuancePolicy::default(),
    );
    let proof = issuer.issue(&record(), age_only()).await.unwrap();
    world.store.append(&proof).unwrap();

    let result = world.verifier().verify(proof.id.as_str()).await.unwrap();
    assert!(result.verified);
    assert_eq!(result.trust_tier, TrustTier::Remote);
    // The shared document asserts the kind-derived flags.
    assert!(result.attributes.age);
    assert!(result.attributes.identity_valid);
    assert_eq!(world.log_len(), 1);
}

#[tokio::test]
async fn test_issued_proof_resolves_locally_when_remote_write_failed() {
    let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
    let store = Arc::new(ProofStore::new(repo.clone(), "alice"));

    // Both the service and the document store are down: the proof exists
    // only in the local history.
    let issuer = ProofIssuer::new(
        Arc::new(DownService),
        Arc::new(UnreachableDocumentStore),
        IssuancePolicy::default(),
    );
    let proof = issuer.issue(&record(), age_only()).await.unwrap();
    store.append(&proof).unwrap();

    let verifier = ProofVerifier::new(
        Arc::new(UnreachableDocumentStore),
        store,
        VerificationLog::new(repo.clone()),
    );
    let result = verifier.verify(proof.id.as_str()).await.unwrap();
    assert!(result.verified, "just-issued proof must never be NotFound");
    assert_eq!(result.trust_tier, TrustTier::LocalCache);
    assert!(result.attributes.age);
}

#[tokio::test]
async fn test_service_backed_proof_resolves_at_local_tier() {
    let world = World::new();
    // Reachable service: no document is published, so the remote tier
    // misses and the local history answers.
    let issuer = ProofIssuer::new(
        Arc::new(AcceptingService),
        world.documents.clone(),
        IssuancePolicy::default(),
    );
    let proof = issuer.issue(&record(), age_only()).await.unwrap();
    world.store.append(&proof).unwrap();

    let result = world.verifier().verify(proof.id.as_str()).await.unwrap();
    assert_eq!(result.trust_tier, TrustTier::LocalCache);
    assert!(result.attributes.age && !result.attributes.identity_valid);
}

// =========================================================================
// Heuristic and terminal tiers
// =========================================================================

#[tokio::test]
async fn test_never_issued_well_formed_id_heuristically_accepted() {
    let world = World::new();
    let result = world.verifier().verify("ZKP-AGE-4821").await.unwrap();
    assert!(result.verified);
    assert_eq!(result.trust_tier, TrustTier::HeuristicAccept);
    assert!(
        result.attributes.age && result.attributes.address && result.attributes.identity_valid
    );
    assert_eq!(world.log_len(), 1);
}

#[tokio::test]
async fn test_malformed_absent_id_is_not_found_and_unlogged() {
    let world = World::new();
    let result = world.verifier().verify("PROOF-123").await.unwrap();
    assert!(!result.verified);
    assert_eq!(result.trust_tier, TrustTier::NotFound);
    assert_eq!(world.log_len(), 0, "NotFound must not write a log entry");
}

#[tokio::test]
async fn test_other_identity_resolves_via_document_store_only() {
    let world = World::new();
    // Bob mock-issues; the shared document store carries his proof.
    let issuer = ProofIssuer::new(
        Arc::new(DownService),
        world.documents.clone(),
        IssuancePolicy::default(),
    );
    let proof = issuer.issue(&record(), age_only()).await.unwrap();
    // Never appended to Alice's local store.

    let result = world.verifier().verify(proof.id.as_str()).await.unwrap();
    assert_eq!(result.trust_tier, TrustTier::Remote);
}

#[tokio::test]
async fn test_log_accumulates_newest_first() {
    let world = World::new();
    let issuer = ProofIssuer::new(
        Arc::new(DownService),
        world.documents.clone(),
        IssuancePolicy::default(),
    );
    let first = issuer.issue(&record(), age_only()).await.unwrap();
    world.store.append(&first).unwrap();

    world.verifier().verify(first.id.as_str()).await.unwrap();
    world.verifier().verify("ZKP-KYC-9999").await.unwrap();

    let entries = VerificationLog::new(world.repo.clone()).entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].proof_id, "ZKP-KYC-9999");
    assert_eq!(entries[0].trust_tier, TrustTier::HeuristicAccept);
    assert_eq!(entries[1].proof_id, first.id.as_str());
}

#[tokio::test]
async fn test_duplicate_remote_documents_fall_back_to_local() {
    let world = World::new();
    let issuer = ProofIssuer::new(
        Arc::new(DownService),
        world.documents.clone(),
        IssuancePolicy::default(),
    );
    let proof = issuer.issue(&record(), age_only()).await.unwrap();
    world.store.append(&proof).unwrap();

    // A duplicate document makes the remote match ambiguous.
    world.documents.insert_proof(&proof).await.unwrap();

    let result = world.verifier().verify(proof.id.as_str()).await.unwrap();
    assert_eq!(result.trust_tier, TrustTier::LocalCache);
}
