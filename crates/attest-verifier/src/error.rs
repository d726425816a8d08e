/// Verification errors.
///
/// Lookup failures are not errors — they fall through to the next tier.
/// Only the local audit-log write can fail here.
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("verification log error: {0}")]
    Log(#[from] attest_store::StoreError),
}
