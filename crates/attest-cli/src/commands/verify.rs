//! `attest verify` — Resolve a proof identifier through the lookup chain.

use clap::Args;
use std::sync::Arc;
use std::time::Duration;

use attest_store::{HttpDocumentStore, ProofStore, VerificationLog};
use attest_verifier::ProofVerifier;

use crate::config::AttestConfig;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The proof identifier to check (e.g. ZKP-AGE-4821).
    pub proof_id: String,
}

pub async fn run(args: &VerifyArgs, config: &AttestConfig) -> anyhow::Result<()> {
    let repo = super::open_repository(config)?;
    let store = Arc::new(ProofStore::new(repo.clone(), &config.identity.name));
    let documents = Arc::new(HttpDocumentStore::new(
        &config.services.document_store_endpoint,
        config.timeout(),
    ));
    let verifier = ProofVerifier::new(documents, store, VerificationLog::new(repo));

    let result = verifier.verify(&args.proof_id).await?;

    // Keep the check from feeling instantaneous when it resolved offline.
    if result.trust_tier != attest_core::TrustTier::Remote {
        tokio::time::sleep(Duration::from_millis(1500)).await;
    }

    if result.verified {
        println!("Proof {} is VERIFIED ({})", args.proof_id, result.trust_tier);
        println!("  Disclosed attributes:");
        println!("    age over threshold: {}", result.attributes.age);
        println!("    region verified:    {}", result.attributes.address);
        println!("    identity valid:     {}", result.attributes.identity_valid);
    } else {
        println!("Proof {} NOT FOUND", args.proof_id);
    }
    Ok(())
}
