//! Azure speech synthesis REST client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, info};

use super::config::{SynthesisConfig, OUTPUT_FORMAT};
use super::SynthesisError;

/// Client-side request timeout. Long texts synthesize slowly.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// A backend capable of synthesizing speech from text.
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// Synthesize `text` spoken by `voice` in `language`, returning WAV
    /// bytes.
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        voice: &str,
    ) -> Result<Bytes, SynthesisError>;
}

/// Azure speech synthesis client.
pub struct SynthesisClient {
    config: SynthesisConfig,
    http_client: Client,
}

impl SynthesisClient {
    /// Create a client over the given configuration.
    ///
    /// # Errors
    /// [`SynthesisError::Configuration`] when the configuration is invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: SynthesisConfig) -> Result<Self, SynthesisError> {
        config.validate().map_err(SynthesisError::Configuration)?;

        let http_client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                SynthesisError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Build the SSML request body.
    fn ssml(text: &str, language: &str, voice: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='{language}'>\
             <voice xml:lang='{language}' name='{voice}'>{}</voice>\
             </speak>",
            escape_xml(text)
        )
    }

    /// Categorize a non-success status.
    fn map_failure(status: reqwest::StatusCode, body: &str) -> SynthesisError {
        let detail = if body.is_empty() {
            format!("status {status}")
        } else {
            body.to_string()
        };
        match status.as_u16() {
            401 => SynthesisError::AuthenticationFailed(detail),
            403 => SynthesisError::AccessDenied(detail),
            429 => SynthesisError::RateLimited(detail),
            _ => SynthesisError::Provider(detail),
        }
    }
}

#[async_trait]
impl SynthesisBackend for SynthesisClient {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        voice: &str,
    ) -> Result<Bytes, SynthesisError> {
        debug!(language, voice, chars = text.len(), "requesting synthesis");

        let response = self
            .http_client
            .post(self.config.synthesize_url())
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", "voxlate-gateway")
            .body(Self::ssml(text, language, voice))
            .send()
            .await
            .map_err(|e| SynthesisError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_failure(status, &body));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Network(format!("failed to read audio: {e}")))?;

        if audio.is_empty() {
            return Err(SynthesisError::InvalidResponse(
                "service returned no audio data".to_string(),
            ));
        }

        info!(bytes = audio.len(), "synthesis succeeded");
        Ok(audio)
    }
}

/// Escape text for embedding in SSML character data.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
