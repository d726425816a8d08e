use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use attest_core::UploadedFile;

use crate::error::PayloadError;

/// Turns a document image into the raw string embedded in its QR code.
///
/// The decode algorithm itself is an external collaborator; implementations
/// only move bytes and map failures to [`PayloadError::Decode`].
#[async_trait]
pub trait QrDecoder: Send + Sync {
    async fn decode(&self, upload: &UploadedFile) -> Result<String, PayloadError>;
}

/// One symbol result from the decode service.
#[derive(Debug, Deserialize)]
struct SymbolResult {
    data: Option<String>,
    error: Option<String>,
}

/// One detected code with its symbol results.
#[derive(Debug, Deserialize)]
struct SymbolGroup {
    #[serde(default)]
    symbol: Vec<SymbolResult>,
}

/// HTTP client for a goqr-style decode service.
///
/// The service takes a multipart image upload and answers with a list of
/// symbol results `[{symbol: [{data, error}]}]`.
pub struct HttpQrDecoder {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpQrDecoder {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl QrDecoder for HttpQrDecoder {
    async fn decode(&self, upload: &UploadedFile) -> Result<String, PayloadError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| PayloadError::Decode(format!("invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PayloadError::Decode(format!("decode service unreachable: {}", e)))?;

        if !resp.status().is_success() {
            return Err(PayloadError::Decode(format!(
                "decode service returned HTTP {}",
                resp.status()
            )));
        }

        let groups: Vec<SymbolGroup> = resp
            .json()
            .await
            .map_err(|e| PayloadError::Decode(format!("malformed decode response: {}", e)))?;

        let symbol = groups
            .first()
            .and_then(|g| g.symbol.first())
            .ok_or_else(|| PayloadError::Decode("no QR code found in the image".into()))?;

        if let Some(ref err) = symbol.error {
            return Err(PayloadError::Decode(err.clone()));
        }

        let data = symbol
            .data
            .clone()
            .ok_or_else(|| PayloadError::Decode("no QR code found in the image".into()))?;

        tracing::debug!(bytes = upload.bytes.len(), "QR code decoded");
        Ok(data)
    }
}

/// Decoder that always yields a fixed payload. Stands in for the remote
/// service in tests and offline demos.
pub struct StaticDecoder {
    payload: String,
}

impl StaticDecoder {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl QrDecoder for StaticDecoder {
    async fn decode(&self, upload: &UploadedFile) -> Result<String, PayloadError> {
        if upload.bytes.is_empty() {
            return Err(PayloadError::Decode("no QR code found in the image".into()));
        }
        Ok(self.payload.clone())
    }
}
