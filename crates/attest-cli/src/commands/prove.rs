//! `attest prove` — The full subject flow: upload, extract, select, review,
//! issue.

use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use attest_core::{
    upload::content_type_for_extension, AttributeSelection, UploadedFile, WorkflowSession,
};
use attest_issuer::{HttpEligibilityService, IssuerError, ProofIssuer};
use attest_payload::{parse_attribute_record, HttpQrDecoder, QrDecoder, StaticDecoder};
use attest_store::{HttpDocumentStore, ProofStore};

use crate::config::AttestConfig;

/// Extraction must never appear instantaneous.
const MIN_EXTRACTION_DELAY: Duration = Duration::from_secs(2);

#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Path to the document image containing the QR code.
    #[arg(short, long)]
    pub image: PathBuf,

    /// Disclose "age over threshold".
    #[arg(long)]
    pub age: bool,

    /// Disclose "resident of an allowed region".
    #[arg(long)]
    pub address: bool,

    /// Disclose "document is valid".
    #[arg(long = "identity")]
    pub identity_valid: bool,

    /// Skip the decode service and use this raw payload string instead.
    #[arg(long)]
    pub payload: Option<String>,
}

pub async fn run(args: &ProveArgs, config: &AttestConfig) -> anyhow::Result<()> {
    let mut session = WorkflowSession::new(&config.identity.name);

    // Upload step: local validation only, no network.
    let bytes = std::fs::read(&args.image)?;
    let extension = args
        .image
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let content_type = content_type_for_extension(extension)
        .ok_or_else(|| anyhow::anyhow!("unsupported file extension: .{}", extension))?;
    let file_name = args
        .image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let upload = UploadedFile::new(file_name, content_type, bytes);
    session.accept_upload(&upload)?;

    // Extraction step: decode remotely, parse locally, and hold the step on
    // screen for at least the minimum delay.
    let decoder: Box<dyn QrDecoder> = match &args.payload {
        Some(payload) => Box::new(StaticDecoder::new(payload.clone())),
        None => Box::new(HttpQrDecoder::new(
            &config.services.decode_endpoint,
            config.timeout(),
        )),
    };

    let started = Instant::now();
    let record = match decoder.decode(&upload).await {
        Ok(raw) => match parse_attribute_record(&raw) {
            Ok(record) => record,
            Err(e) => {
                session.extraction_failed(e.to_string())?;
                anyhow::bail!("failed to read document payload: {}", e);
            }
        },
        Err(e) => {
            session.extraction_failed(e.to_string())?;
            anyhow::bail!("failed to decode QR code: {}", e);
        }
    };
    if let Some(remaining) = MIN_EXTRACTION_DELAY.checked_sub(started.elapsed()) {
        tokio::time::sleep(remaining).await;
    }
    session.extraction_succeeded(record)?;
    println!("Extracted attribute record from document.");

    // Selection step.
    session.set_selection(AttributeSelection {
        age: args.age,
        address: args.address,
        identity_valid: args.identity_valid,
    });
    if !session.confirm_selection()? {
        anyhow::bail!("select at least one attribute (--age, --address, --identity)");
    }

    // Review + issuance.
    let issuer = ProofIssuer::new(
        Arc::new(HttpEligibilityService::new(
            &config.services.verify_endpoint,
            config.timeout(),
        )),
        Arc::new(HttpDocumentStore::new(
            &config.services.document_store_endpoint,
            config.timeout(),
        )),
        config.policy.clone(),
    );

    let record = session
        .record()
        .ok_or_else(|| anyhow::anyhow!("no attribute record in session"))?
        .clone();
    let proof = match issuer.issue(&record, session.selection()).await {
        Ok(proof) => proof,
        Err(e @ IssuerError::Ineligible(_)) => {
            session.issuance_failed(e.to_string())?;
            anyhow::bail!("{}", e);
        }
        Err(e) => anyhow::bail!("{}", e),
    };

    let repo = super::open_repository(config)?;
    let store = ProofStore::new(repo, &config.identity.name);
    store.append(&proof)?;
    session.issuance_succeeded()?;

    println!("Proof issued!");
    println!("  ID: {}", proof.id);
    println!("{}", serde_json::to_string_pretty(&proof)?);
    Ok(())
}
