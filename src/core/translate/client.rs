//! Azure Translator v3 REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use uuid::Uuid;

use super::config::TranslatorConfig;
use super::messages::{TranslateRequestItem, TranslationItem, TranslatorErrorResponse};
use super::TranslateError;

/// Client-side request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A backend capable of translating text between two languages.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` from `from_lang` to `to_lang`.
    async fn translate(
        &self,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<String, TranslateError>;
}

/// Azure Translator client. The pooled HTTP client is reused across
/// requests; each request carries a fresh client trace id.
pub struct TranslatorClient {
    config: TranslatorConfig,
    http_client: Client,
}

impl TranslatorClient {
    /// Create a client over the given configuration.
    ///
    /// # Errors
    /// [`TranslateError::Configuration`] when the configuration is invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslateError> {
        config.validate().map_err(TranslateError::Configuration)?;

        let http_client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                TranslateError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Categorize a non-success status, folding in the service error body
    /// when one is present.
    fn map_failure(status: reqwest::StatusCode, body: &str) -> TranslateError {
        let detail = serde_json::from_str::<TranslatorErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("status {status}"));

        match status.as_u16() {
            401 => TranslateError::AuthenticationFailed(detail),
            403 => TranslateError::AccessDenied(detail),
            429 => TranslateError::RateLimited(detail),
            _ => TranslateError::Provider(detail),
        }
    }
}

#[async_trait]
impl TranslationBackend for TranslatorClient {
    async fn translate(
        &self,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<String, TranslateError> {
        debug!(
            from = from_lang,
            to = to_lang,
            chars = text.len(),
            "requesting translation"
        );

        let mut request = self
            .http_client
            .post(self.config.translate_url())
            .query(&[
                ("api-version", "3.0"),
                ("from", from_lang),
                ("to", to_lang),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .header("X-ClientTraceId", Uuid::new_v4().to_string())
            .json(&[TranslateRequestItem {
                text: text.to_string(),
            }]);

        if let Some(region) = self.config.region_header() {
            request = request.header("Ocp-Apim-Subscription-Region", region);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranslateError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranslateError::Network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_failure(status, &body));
        }

        let items: Vec<TranslationItem> = serde_json::from_str(&body)
            .map_err(|e| TranslateError::InvalidResponse(format!("unparseable response: {e}")))?;

        let translated = items
            .first()
            .and_then(|item| item.translations.first())
            .map(|t| t.text.clone())
            .ok_or_else(|| {
                TranslateError::InvalidResponse(
                    "no translation text returned from service".to_string(),
                )
            })?;

        info!(chars = translated.len(), "translation succeeded");
        Ok(translated)
    }
}
