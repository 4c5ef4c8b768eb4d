//! Shared application state.
//!
//! The recognition, translation, and synthesis backends are injected here
//! as trait objects: production wiring builds the Azure clients from
//! configuration, tests substitute mocks. A backend left unconfigured stays
//! `None` and its endpoint answers with a configuration error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::core::audio::{NormalizationPipeline, WavDecoder};
use crate::core::recognition::{strategies_with_timeout, RecognitionBackend, RecognitionStrategy};
use crate::core::stt::{AzureSpeechClient, AzureSpeechConfig};
use crate::core::translate::{TranslationBackend, TranslatorClient, TranslatorConfig};
use crate::core::tts::{SynthesisBackend, SynthesisClient, SynthesisConfig};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub pipeline: NormalizationPipeline,
    pub recognizer: Option<Arc<dyn RecognitionBackend>>,
    pub translator: Option<Arc<dyn TranslationBackend>>,
    pub synthesizer: Option<Arc<dyn SynthesisBackend>>,
}

impl AppState {
    /// Build production state: Azure clients for every backend whose
    /// credentials are configured.
    ///
    /// # Errors
    /// A description of a client that could not be constructed from
    /// otherwise-present credentials.
    pub fn new(config: ServerConfig) -> Result<Self, String> {
        let pipeline = NormalizationPipeline::new(Arc::new(WavDecoder));

        let recognizer: Option<Arc<dyn RecognitionBackend>> =
            match (&config.azure_speech_key, &config.azure_speech_region) {
                (Some(key), Some(region)) => {
                    let client = AzureSpeechClient::new(AzureSpeechConfig {
                        subscription_key: key.clone(),
                        region: region.clone(),
                        language: config.speech_language.clone(),
                        endpoint: None,
                    })
                    .map_err(|e| e.to_string())?;
                    info!(region = region.as_str(), "Azure Speech recognition configured");
                    Some(Arc::new(client))
                }
                _ => {
                    warn!("Azure Speech credentials not set; /api/speech-to-text disabled");
                    None
                }
            };

        let translator: Option<Arc<dyn TranslationBackend>> = match &config.azure_translator_key {
            Some(key) => {
                let client = TranslatorClient::new(TranslatorConfig {
                    subscription_key: key.clone(),
                    region: config.azure_translator_region.clone(),
                    ..Default::default()
                })
                .map_err(|e| e.to_string())?;
                info!("Azure Translator configured");
                Some(Arc::new(client))
            }
            None => {
                warn!("Azure Translator credentials not set; /api/translate disabled");
                None
            }
        };

        let synthesizer: Option<Arc<dyn SynthesisBackend>> =
            match (&config.azure_speech_key, &config.azure_speech_region) {
                (Some(key), Some(region)) => {
                    let client = SynthesisClient::new(SynthesisConfig {
                        subscription_key: key.clone(),
                        region: region.clone(),
                        language: config.synthesis_language.clone(),
                        voice: config.synthesis_voice.clone(),
                        endpoint: None,
                    })
                    .map_err(|e| e.to_string())?;
                    Some(Arc::new(client))
                }
                _ => None,
            };

        Ok(Self {
            config,
            pipeline,
            recognizer,
            translator,
            synthesizer,
        })
    }

    /// Build state with explicit backends. Used by tests and embedders.
    pub fn with_backends(
        config: ServerConfig,
        recognizer: Option<Arc<dyn RecognitionBackend>>,
        translator: Option<Arc<dyn TranslationBackend>>,
        synthesizer: Option<Arc<dyn SynthesisBackend>>,
    ) -> Self {
        Self {
            config,
            pipeline: NormalizationPipeline::new(Arc::new(WavDecoder)),
            recognizer,
            translator,
            synthesizer,
        }
    }

    /// The strategy tiers this deployment runs, with the configured
    /// per-strategy timeout.
    pub fn strategies(&self) -> Vec<RecognitionStrategy> {
        strategies_with_timeout(Duration::from_secs(self.config.strategy_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_state_has_no_backends() {
        let state = AppState::new(ServerConfig::default()).unwrap();
        assert!(state.recognizer.is_none());
        assert!(state.translator.is_none());
        assert!(state.synthesizer.is_none());
    }

    #[test]
    fn test_configured_state_builds_clients() {
        let config = ServerConfig {
            azure_speech_key: Some("speech-key".to_string()),
            azure_speech_region: Some("eastus".to_string()),
            azure_translator_key: Some("translator-key".to_string()),
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.recognizer.is_some());
        assert!(state.translator.is_some());
        assert!(state.synthesizer.is_some());
    }

    #[test]
    fn test_strategies_honor_configured_timeout() {
        let config = ServerConfig {
            strategy_timeout_secs: 5,
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        let strategies = state.strategies();
        assert_eq!(strategies.len(), 3);
        assert!(strategies
            .iter()
            .all(|s| s.timeout == Duration::from_secs(5)));
    }
}
