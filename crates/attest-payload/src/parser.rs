use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;

use attest_core::AttributeRecord;

use crate::error::PayloadError;

/// Which encoding a raw payload string resolved under.
///
/// The simulator emits `base64(JSON({aadhaar_data: {...}, signature: ...}))`;
/// older payloads are plain JSON with the record nested under `aadhaar_data`
/// or standing alone. Both must stay supported — callers never assume a
/// single format.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPayload {
    /// Base64 envelope whose decoded JSON carries an `aadhaar_data` field.
    NestedEncoded(Value),
    /// The raw string itself is JSON; the record is its `aadhaar_data`
    /// field when present, otherwise the document itself.
    DirectJson(Value),
    /// Neither attempt produced a structured document.
    Unparsable,
}

impl ParsedPayload {
    /// Run the ordered attempts; first success wins.
    pub fn classify(raw: &str) -> Self {
        if let Ok(bytes) = BASE64.decode(raw.trim()) {
            if let Ok(doc) = serde_json::from_slice::<Value>(&bytes) {
                if let Some(data) = doc.get("aadhaar_data") {
                    if !data.is_null() {
                        return Self::NestedEncoded(data.clone());
                    }
                }
            }
        }

        if let Ok(doc) = serde_json::from_str::<Value>(raw) {
            let data = match doc.get("aadhaar_data") {
                Some(data) if !data.is_null() => data.clone(),
                _ => doc,
            };
            return Self::DirectJson(data);
        }

        Self::Unparsable
    }

    /// The candidate record, if either attempt succeeded.
    pub fn candidate(self) -> Option<Value> {
        match self {
            Self::NestedEncoded(v) | Self::DirectJson(v) => Some(v),
            Self::Unparsable => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::NestedEncoded(_) => "nested-encoded",
            Self::DirectJson(_) => "direct-json",
            Self::Unparsable => "unparsable",
        }
    }
}

/// Resolve a raw decoded string to an [`AttributeRecord`].
///
/// Fails with [`PayloadError::Format`] when the string parses under neither
/// encoding or the candidate record lacks the mandatory `dob_year` field.
pub fn parse_attribute_record(raw: &str) -> Result<AttributeRecord, PayloadError> {
    let parsed = ParsedPayload::classify(raw);
    tracing::debug!(encoding = parsed.label(), "payload classified");

    let candidate = parsed.candidate().ok_or_else(|| {
        PayloadError::Format("payload is neither a base64 envelope nor a JSON document".into())
    })?;

    if candidate.get("dob_year").is_none() {
        return Err(PayloadError::Format(
            "payload does not contain the mandatory dob_year field".into(),
        ));
    }

    serde_json::from_value(candidate)
        .map_err(|e| PayloadError::Format(format!("malformed attribute record: {}", e)))
}
