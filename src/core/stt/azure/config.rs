//! Configuration for the Azure Speech-to-Text client.

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Settings for the Azure Speech REST client.
#[derive(Debug, Clone)]
pub struct AzureSpeechConfig {
    /// Azure Speech resource subscription key
    /// (Azure Portal -> Speech resource -> Keys and Endpoint).
    pub subscription_key: String,

    /// Region the Speech resource is deployed in (e.g. "eastus"). The
    /// subscription key is tied to this region.
    pub region: String,

    /// BCP-47 recognition language.
    pub language: String,

    /// Full endpoint override. When set, `region` is not used to build the
    /// URL (tests and sovereign clouds).
    pub endpoint: Option<String>,
}

impl Default for AzureSpeechConfig {
    fn default() -> Self {
        Self {
            subscription_key: String::new(),
            region: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            endpoint: None,
        }
    }
}

impl AzureSpeechConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// A human-readable description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.subscription_key.is_empty() {
            return Err("Azure Speech subscription key is required".to_string());
        }
        if self.region.is_empty() && self.endpoint.is_none() {
            return Err("Azure Speech region is required when no endpoint override is set".to_string());
        }
        if self.language.is_empty() {
            return Err("recognition language must not be empty".to_string());
        }
        Ok(())
    }

    /// URL of the short-audio recognition endpoint.
    pub fn recognize_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!(
                "{}/speech/recognition/conversation/cognitiveservices/v1",
                endpoint.trim_end_matches('/')
            ),
            None => format!(
                "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
                self.region
            ),
        }
    }
}
