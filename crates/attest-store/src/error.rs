/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote document store unreachable or answering nonsense. Callers on
    /// the issuance and verification paths absorb this; it never surfaces
    /// as a hard failure.
    #[error("transport error: {0}")]
    Transport(String),
}
