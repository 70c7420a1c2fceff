//! Image transcoding collaborator
//!
//! HEIC/HEIF payloads cannot be decoded locally; they are handed to an
//! external transcoding service that returns a web-displayable JPEG.
//! Input is already bounded to 10 MB by the workflow.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Transcoding boundary errors
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("transcode request failed: {0}")]
    Http(String),

    #[error("transcode service returned an unusable reply: {0}")]
    InvalidResponse(String),

    #[error("transcoding timed out")]
    Timeout,
}

/// Boundary to the transcoding collaborator
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Convert a HEIC/HEIF payload into JPEG bytes
    async fn transcode_to_jpeg(&self, data: &[u8]) -> Result<Vec<u8>, TranscodeError>;
}

/// HTTP client for the transcoding collaborator
#[derive(Debug, Clone)]
pub struct HttpTranscoder {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranscoder {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, TranscodeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscodeError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Transcoder for HttpTranscoder {
    async fn transcode_to_jpeg(&self, data: &[u8]) -> Result<Vec<u8>, TranscodeError> {
        let response = self
            .client
            .post(format!("{}/transcode", self.base_url.trim_end_matches('/')))
            .header(http::header::CONTENT_TYPE, "image/heic")
            .header(http::header::ACCEPT, "image/jpeg")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscodeError::Timeout
                } else {
                    TranscodeError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(TranscodeError::Http(format!(
                "transcode service returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TranscodeError::Http(e.to_string()))?
            .to_vec();

        // The reply must itself be a decodable JPEG
        if image::load_from_memory(&bytes).is_err() {
            return Err(TranscodeError::InvalidResponse(
                "reply is not a decodable image".to_string(),
            ));
        }

        Ok(bytes)
    }
}
