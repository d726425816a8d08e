/// Payload handling errors.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The decode service found no code, reported a symbol error, or was
    /// unreachable.
    #[error("decode error: {0}")]
    Decode(String),

    /// The decoded string parses under neither supported encoding, or the
    /// resulting record is missing the mandatory `dob_year` field.
    #[error("format error: {0}")]
    Format(String),
}
