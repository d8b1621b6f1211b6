use std::path::Path;
use std::time::Duration;
use anyhow::Result;
use log::{debug, error};
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::errors::TranscribeError;
use crate::transcript::Transcript;

/// Client for the external transcription service.
///
/// The service takes a multipart video upload and answers with the
/// transcript record: declared resolution plus ordered sentence and word
/// spans. The service is a black box here; only the JSON shape is part of
/// the contract.
pub struct TranscribeClient {
    /// HTTP client for API requests
    client: Client,
    /// Service endpoint URL
    endpoint: String,
}

impl TranscribeClient {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Upload a video and return its transcript
    pub async fn transcribe<P: AsRef<Path>>(&self, video_path: P) -> Result<Transcript, TranscribeError> {
        let video_path = video_path.as_ref();

        let file_name = video_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("video.mp4"));

        let bytes = tokio::fs::read(video_path).await.map_err(|e| {
            TranscribeError::RequestFailed(format!(
                "Failed to read video file {:?}: {}",
                video_path, e
            ))
        })?;

        debug!("Uploading {:?} ({} bytes) to {}", video_path, bytes.len(), self.endpoint);

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TranscribeError::ConnectionError(e.to_string())
                } else {
                    TranscribeError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Transcription service error ({}): {}", status, error_text);
            return Err(TranscribeError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TranscribeError::RequestFailed(e.to_string()))?;

        let transcript =
            Transcript::from_json(&body).map_err(|e| TranscribeError::ParseError(e.to_string()))?;

        debug!(
            "Received transcript: {} sentences, {} words",
            transcript.sentences.len(),
            transcript.words.len()
        );

        Ok(transcript)
    }

    /// Test that the service endpoint is reachable
    pub async fn test_connection(&self) -> Result<(), TranscribeError> {
        self.client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| TranscribeError::ConnectionError(e.to_string()))?;
        Ok(())
    }
}
