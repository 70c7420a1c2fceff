//! AI analysis collaborator
//!
//! The analysis service is opaque, fallible and slow (seconds-scale).
//! This module only specifies the boundary: a trait the workflow calls,
//! and an HTTP implementation that posts the image to the configured
//! endpoint and maps the reply into [`AnalysisResult`].

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use shared::design::AnalysisResult;
use std::time::Duration;
use thiserror::Error;

use crate::db::models::ProjectType;

/// Analysis boundary errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Http(String),

    #[error("analysis service returned an unusable reply: {0}")]
    InvalidResponse(String),

    #[error("analysis timed out")]
    Timeout,
}

/// One turn of an assistant conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user" or "assistant"
    pub role: String,
    pub content: String,
}

/// Boundary to the AI analysis/chat collaborator
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Analyze an image for the given renovation category
    async fn analyze(
        &self,
        image: &[u8],
        content_type: &str,
        project_type: &ProjectType,
    ) -> Result<AnalysisResult, AnalysisError>;

    /// One conversational reply for the assistant widget
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, AnalysisError>;
}

// =============================================================================
// HTTP implementation
// =============================================================================

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    image: String,
    content_type: &'a str,
    project_type: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    reply: String,
}

/// HTTP client for the analysis collaborator
#[derive(Debug, Clone)]
pub struct HttpAnalysisProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisProvider {
    /// `timeout` bounds a single upstream call; the workflow applies its
    /// own overall deadline on top.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl AnalysisProvider for HttpAnalysisProvider {
    async fn analyze(
        &self,
        image: &[u8],
        content_type: &str,
        project_type: &ProjectType,
    ) -> Result<AnalysisResult, AnalysisError> {
        let body = AnalyzeRequest {
            image: base64::engine::general_purpose::STANDARD.encode(image),
            content_type,
            project_type: project_type.as_str(),
        };

        let response = self
            .client
            .post(self.endpoint("analyze"))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout
                } else {
                    AnalysisError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(AnalysisError::Http(format!(
                "analysis service returned {}",
                response.status()
            )));
        }

        let result: AnalysisResult = response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

        // An analysis with no style and no materials is not attachable
        if result.style.is_empty() && result.materials.is_empty() {
            return Err(AnalysisError::InvalidResponse(
                "empty analysis result".to_string(),
            ));
        }

        tracing::debug!(
            target: "designs",
            style = %result.style,
            materials = result.materials.len(),
            "analysis completed"
        );

        Ok(result)
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, AnalysisError> {
        let response = self
            .client
            .post(self.endpoint("chat"))
            .json(&ChatRequest { messages })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout
                } else {
                    AnalysisError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(AnalysisError::Http(format!(
                "chat service returned {}",
                response.status()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;
        Ok(parsed.reply)
    }
}
