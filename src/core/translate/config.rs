//! Configuration for the Azure Translator client.

/// Public Translator endpoint.
pub const DEFAULT_TRANSLATOR_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

/// Settings for the Translator v3 REST client.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Translator resource subscription key.
    pub subscription_key: String,

    /// Region of the Translator resource. Not sent for "global" resources.
    pub region: Option<String>,

    /// Service endpoint; overridable for tests and sovereign clouds.
    pub endpoint: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            subscription_key: String::new(),
            region: None,
            endpoint: DEFAULT_TRANSLATOR_ENDPOINT.to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// A human-readable description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.subscription_key.is_empty() {
            return Err("Azure Translator subscription key is required".to_string());
        }
        if self.endpoint.is_empty() {
            return Err("translator endpoint must not be empty".to_string());
        }
        Ok(())
    }

    /// URL of the translate operation.
    pub fn translate_url(&self) -> String {
        format!("{}/translate", self.endpoint.trim_end_matches('/'))
    }

    /// The region header value, when one should be sent.
    pub fn region_header(&self) -> Option<&str> {
        self.region
            .as_deref()
            .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case("global"))
    }
}
