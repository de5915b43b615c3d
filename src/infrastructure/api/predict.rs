//! Multipart client for the emotion prediction endpoint

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::domain::models::{CapturedImage, EmotionResult, PredictionResponse, UPLOAD_FIELD};
use crate::platform::EmotionPredictor;
use crate::shared::config::DEFAULT_ENDPOINT;
use crate::shared::errors::{AppError, Result};

/// Longest error body kept in `AppError::Status`
const MAX_ERROR_BODY: usize = 512;

pub struct HttpPredictor {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for HttpPredictor {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl HttpPredictor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Single `image` part, always sent as `photo.jpg` / `image/jpeg`
    async fn build_form(image: &CapturedImage) -> Result<Form> {
        let bytes = tokio::fs::read(image.local_path()).await?;
        let part = Part::bytes(bytes)
            .file_name(image.filename())
            .mime_str(image.content_type())?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

#[async_trait]
impl EmotionPredictor for HttpPredictor {
    async fn predict(&self, image: &CapturedImage) -> Result<EmotionResult> {
        let form = Self::build_form(image).await?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            body_len = body.len(),
            "Prediction response received"
        );

        if !status.is_success() {
            return Err(AppError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body)
                    .chars()
                    .take(MAX_ERROR_BODY)
                    .collect(),
            });
        }

        Ok(PredictionResponse::from_slice(&body)?.emotions)
    }
}
