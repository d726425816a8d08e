//! Integration test: the full subject pipeline from decoded payload to
//! stored proof, under reachable and unreachable backends.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;

use attest_core::{AttributeSelection, ProofKind, UploadedFile, WorkflowSession, WorkflowState};
use attest_integration_tests::{AcceptingService, DownService, RejectingService};
use attest_issuer::{IssuancePolicy, IssuerError, ProofIssuer};
use attest_payload::parse_attribute_record;
use attest_store::{MemoryDocumentStore, MemoryRepository, ProofStore, Repository};

const RECORD_JSON: &str = r#"{"name":"Amlan","dob_year":2000,"country_code":1,"state_code":10}"#;

fn age_only() -> AttributeSelection {
    AttributeSelection {
        age: true,
        ..Default::default()
    }
}

// =========================================================================
// Payload parsing
// =========================================================================

#[test]
fn test_both_encodings_parse_identically() {
    let nested = BASE64.encode(format!(
        r#"{{"aadhaar_data":{},"signature":"c2ln"}}"#,
        RECORD_JSON
    ));
    let from_nested = parse_attribute_record(&nested).expect("nested envelope should parse");
    let from_direct = parse_attribute_record(RECORD_JSON).expect("direct JSON should parse");
    assert_eq!(from_nested, from_direct);
    assert_eq!(from_nested.dob_year, 2000);
}

#[test]
fn test_missing_dob_year_fails_under_both_encodings() {
    let bare = r#"{"country_code":1,"state_code":10}"#;
    let nested = BASE64.encode(format!(r#"{{"aadhaar_data":{}}}"#, bare));
    assert!(parse_attribute_record(bare).is_err());
    assert!(parse_attribute_record(&nested).is_err());
}

// =========================================================================
// Session + issuance
// =========================================================================

#[tokio::test]
async fn test_full_flow_with_reachable_service() {
    let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
    let store = ProofStore::new(repo, "alice");
    let issuer = ProofIssuer::new(
        Arc::new(AcceptingService),
        Arc::new(MemoryDocumentStore::new()),
        IssuancePolicy::default(),
    );

    let mut session = WorkflowSession::new("alice");
    let upload = UploadedFile::new("card.png", "image/png", vec![0u8; 256]);
    session.accept_upload(&upload).expect("upload should pass");

    let record = parse_attribute_record(RECORD_JSON).expect("payload should parse");
    session.extraction_succeeded(record).unwrap();

    session.set_selection(age_only());
    assert!(session.confirm_selection().unwrap());

    let record = session.record().unwrap().clone();
    let proof = issuer
        .issue(&record, session.selection())
        .await
        .expect("issuance should succeed");
    store.append(&proof).unwrap();
    session.issuance_succeeded().unwrap();

    assert_eq!(session.state(), WorkflowState::Issued);
    assert_eq!(store.history().unwrap().len(), 1);
    assert!(proof.id.as_str().starts_with("ZKP-AGE-"));
    // Age-only selection: exactly the age flag in the stored proof.
    assert!(proof.selection.age);
    assert!(!proof.selection.address);
    assert!(!proof.selection.identity_valid);
}

#[tokio::test]
async fn test_transport_failure_never_escapes_the_issuer() {
    let issuer = ProofIssuer::new(
        Arc::new(DownService),
        Arc::new(MemoryDocumentStore::new()),
        IssuancePolicy::default(),
    );
    let record = parse_attribute_record(RECORD_JSON).unwrap();

    let proof = issuer
        .issue(&record, age_only())
        .await
        .expect("fallback must absorb the transport failure");
    assert!(proof.verified);
    assert!(proof.selection.age && !proof.selection.address && !proof.selection.identity_valid);
}

#[tokio::test]
async fn test_rejection_keeps_session_in_reviewing() {
    let issuer = ProofIssuer::new(
        Arc::new(RejectingService),
        Arc::new(MemoryDocumentStore::new()),
        IssuancePolicy::default(),
    );

    let mut session = WorkflowSession::new("alice");
    let upload = UploadedFile::new("card.png", "image/png", vec![0u8; 256]);
    session.accept_upload(&upload).unwrap();
    session
        .extraction_succeeded(parse_attribute_record(RECORD_JSON).unwrap())
        .unwrap();
    session.set_selection(age_only());
    session.confirm_selection().unwrap();

    let record = session.record().unwrap().clone();
    let err = issuer.issue(&record, session.selection()).await.unwrap_err();
    assert!(matches!(err, IssuerError::Ineligible(_)));

    session.issuance_failed(err.to_string()).unwrap();
    assert_eq!(session.state(), WorkflowState::Reviewing);
    assert!(session.last_error().is_some());
}

#[tokio::test]
async fn test_identifier_format_for_every_kind() {
    let issuer = ProofIssuer::new(
        Arc::new(AcceptingService),
        Arc::new(MemoryDocumentStore::new()),
        IssuancePolicy::default(),
    );
    let record = parse_attribute_record(RECORD_JSON).unwrap();

    let cases = [
        (age_only(), ProofKind::Age, "ZKP-AGE-"),
        (
            AttributeSelection {
                address: true,
                ..Default::default()
            },
            ProofKind::Address,
            "ZKP-ADDRESS-",
        ),
        (
            AttributeSelection {
                age: true,
                address: true,
                ..Default::default()
            },
            ProofKind::Kyc,
            "ZKP-KYC-",
        ),
        (
            AttributeSelection {
                identity_valid: true,
                ..Default::default()
            },
            ProofKind::Age,
            "ZKP-AGE-",
        ),
    ];

    for (selection, kind, prefix) in cases {
        let proof = issuer.issue(&record, selection).await.unwrap();
        assert_eq!(proof.kind, kind);
        assert!(
            proof.id.as_str().starts_with(prefix),
            "id {} should start with {}",
            proof.id,
            prefix
        );
        let suffix = proof.id.as_str().rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }
}
