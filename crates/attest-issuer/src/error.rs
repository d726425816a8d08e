/// Issuance errors.
#[derive(Debug, thiserror::Error)]
pub enum IssuerError {
    /// No attribute flag was selected.
    #[error("selection error: {0}")]
    Selection(String),

    /// The service explicitly rejected eligibility, with its reason.
    #[error("not eligible: {0}")]
    Ineligible(String),

    /// Service unreachable, malformed response, or non-success status.
    /// Absorbed by mock issuance inside the issuer; never escapes `issue`.
    #[error("transport error: {0}")]
    Transport(String),
}
