//! Azure Speech REST client implementing the recognition backend contract.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, info};

use crate::core::recognition::{
    AudioFormatDescriptor, RecognitionBackend, RecognitionError, RecognitionOutcome,
    RecognizerSession,
};

use super::config::AzureSpeechConfig;
use super::messages::SpeechRecognitionResponse;

/// Client-side request timeout, above any per-strategy budget so the
/// sequencer's own timeout always fires first.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Azure Speech-to-Text client. One instance serves many sessions; the
/// pooled HTTP client is reused across attempts.
pub struct AzureSpeechClient {
    config: AzureSpeechConfig,
    http_client: Client,
}

impl AzureSpeechClient {
    /// Create a client over the given configuration.
    ///
    /// # Errors
    /// [`RecognitionError::Configuration`] when the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: AzureSpeechConfig) -> Result<Self, RecognitionError> {
        config.validate().map_err(RecognitionError::Configuration)?;

        let http_client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                RecognitionError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Content-Type the audio is submitted under for a given descriptor.
    fn content_type(format: AudioFormatDescriptor) -> String {
        match format {
            AudioFormatDescriptor::PcmWav { sample_rate } => {
                format!("audio/wav; codecs=audio/pcm; samplerate={sample_rate}")
            }
            AudioFormatDescriptor::AutoDetect => "application/octet-stream".to_string(),
        }
    }
}

#[async_trait]
impl RecognitionBackend for AzureSpeechClient {
    async fn open_session(
        &self,
        audio: Bytes,
        format: AudioFormatDescriptor,
    ) -> Result<Box<dyn RecognizerSession>, RecognitionError> {
        debug!(
            format = %format,
            bytes = audio.len(),
            "opening Azure Speech recognizer session"
        );
        Ok(Box::new(AzureRecognizerSession {
            http_client: self.http_client.clone(),
            url: self.config.recognize_url(),
            subscription_key: self.config.subscription_key.clone(),
            language: self.config.language.clone(),
            content_type: Self::content_type(format),
            audio: Some(audio),
        }))
    }
}

/// One in-flight recognition request. The REST API holds no server-side
/// handle, so the session bounds the HTTP request: dropping or closing it
/// cancels anything still in flight.
struct AzureRecognizerSession {
    http_client: Client,
    url: String,
    subscription_key: String,
    language: String,
    content_type: String,
    audio: Option<Bytes>,
}

#[async_trait]
impl RecognizerSession for AzureRecognizerSession {
    async fn recognize_once(&mut self) -> Result<RecognitionOutcome, RecognitionError> {
        let audio = self.audio.take().ok_or_else(|| {
            RecognitionError::Backend("recognizer session already consumed".to_string())
        })?;

        let response = self
            .http_client
            .post(&self.url)
            .query(&[("language", self.language.as_str()), ("format", "simple")])
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header("Content-Type", &self.content_type)
            .header("Accept", "application/json")
            .body(audio)
            .send()
            .await
            .map_err(|e| RecognitionError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RecognitionError::Network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            let details = match status.as_u16() {
                401 => "authentication failed with the speech service".to_string(),
                403 => "speech service access denied".to_string(),
                429 => "speech service rate limit exceeded".to_string(),
                _ => format!("speech service returned {status}: {body}"),
            };
            return Err(RecognitionError::Backend(details));
        }

        let parsed: SpeechRecognitionResponse = serde_json::from_str(&body).map_err(|e| {
            RecognitionError::Backend(format!("unparseable recognition response: {e}"))
        })?;

        info!(
            status = parsed.recognition_status.as_str(),
            "Azure Speech terminal event"
        );
        Ok(parsed.into_outcome())
    }

    async fn close(&mut self) {
        // Nothing server-side to release for the one-shot REST call.
        // Dropping the audio frees the buffer and makes a second
        // recognize_once fail fast instead of re-submitting.
        self.audio = None;
        debug!("Azure Speech recognizer session closed");
    }
}
