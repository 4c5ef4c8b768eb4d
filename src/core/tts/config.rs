//! Configuration for the Azure speech synthesis client.

/// Default synthesis language.
pub const DEFAULT_SYNTHESIS_LANGUAGE: &str = "fr-FR";

/// Default neural voice.
pub const DEFAULT_SYNTHESIS_VOICE: &str = "fr-FR-DeniseNeural";

/// Output format requested from the service: 16 kHz mono 16-bit WAV, the
/// same layout the normalization pipeline produces.
pub const OUTPUT_FORMAT: &str = "riff-16khz-16bit-mono-pcm";

/// Settings for the synthesis REST client.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Azure Speech resource subscription key (shared with recognition).
    pub subscription_key: String,

    /// Region the Speech resource is deployed in.
    pub region: String,

    /// Default synthesis language, overridable per request.
    pub language: String,

    /// Default voice name, overridable per request.
    pub voice: String,

    /// Full endpoint override. When set, `region` is not used to build the
    /// URL (tests and sovereign clouds).
    pub endpoint: Option<String>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            subscription_key: String::new(),
            region: String::new(),
            language: DEFAULT_SYNTHESIS_LANGUAGE.to_string(),
            voice: DEFAULT_SYNTHESIS_VOICE.to_string(),
            endpoint: None,
        }
    }
}

impl SynthesisConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// A human-readable description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.subscription_key.is_empty() {
            return Err("Azure Speech subscription key is required".to_string());
        }
        if self.region.is_empty() && self.endpoint.is_none() {
            return Err(
                "Azure Speech region is required when no endpoint override is set".to_string()
            );
        }
        Ok(())
    }

    /// URL of the synthesis endpoint.
    pub fn synthesize_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => {
                format!("{}/cognitiveservices/v1", endpoint.trim_end_matches('/'))
            }
            None => format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                self.region
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SynthesisConfig::default();
        assert_eq!(config.language, "fr-FR");
        assert_eq!(config.voice, "fr-FR-DeniseNeural");
    }

    #[test]
    fn test_synthesize_url() {
        let config = SynthesisConfig {
            region: "westeurope".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.synthesize_url(),
            "https://westeurope.tts.speech.microsoft.com/cognitiveservices/v1"
        );

        let config = SynthesisConfig {
            endpoint: Some("http://localhost:7000/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.synthesize_url(),
            "http://localhost:7000/cognitiveservices/v1"
        );
    }

    #[test]
    fn test_validation() {
        assert!(SynthesisConfig::default().validate().is_err());
        let config = SynthesisConfig {
            subscription_key: "key".to_string(),
            region: "eastus".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
