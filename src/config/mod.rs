//! Server configuration.
//!
//! Configuration comes from environment variables (a `.env` file is loaded
//! by the binary before this runs) with an optional YAML overlay. Priority:
//! YAML > environment variables > defaults.
//!
//! # Example
//! ```rust,no_run
//! use voxlate_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable fallback
//! let config = ServerConfig::from_file(&PathBuf::from("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::Deserialize;

/// Upload size cap enforced at the API boundary.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Per-strategy recognition timeout in seconds.
pub const DEFAULT_STRATEGY_TIMEOUT_SECS: u64 = 30;

/// Server configuration.
///
/// Provider keys are optional at startup; endpoints whose backend is not
/// configured answer with a configuration error instead of refusing to
/// boot, matching the original deployment's behavior.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    /// Comma-separated CORS origins; `*` or unset allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Azure Speech subscription key (recognition and synthesis).
    pub azure_speech_key: Option<String>,
    /// Region the Speech resource is deployed in (e.g. "eastus").
    pub azure_speech_region: Option<String>,
    /// Azure Translator subscription key.
    pub azure_translator_key: Option<String>,
    /// Region of the Translator resource; omit for global resources.
    pub azure_translator_region: Option<String>,

    /// Recognition language.
    pub speech_language: String,
    /// Synthesis language.
    pub synthesis_language: String,
    /// Synthesis voice name.
    pub synthesis_voice: String,

    /// Upload size cap in bytes.
    pub max_upload_bytes: usize,
    /// Per-strategy recognition timeout in seconds.
    pub strategy_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7071,
            cors_allowed_origins: None,
            azure_speech_key: None,
            azure_speech_region: None,
            azure_translator_key: None,
            azure_translator_region: None,
            speech_language: "en-US".to_string(),
            synthesis_language: "fr-FR".to_string(),
            synthesis_voice: "fr-FR-DeniseNeural".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            strategy_timeout_secs: DEFAULT_STRATEGY_TIMEOUT_SECS,
        }
    }
}

/// YAML overlay shape: every field optional, unset fields fall through to
/// the environment/default value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    host: Option<String>,
    port: Option<u16>,
    cors_allowed_origins: Option<String>,
    azure_speech_key: Option<String>,
    azure_speech_region: Option<String>,
    azure_translator_key: Option<String>,
    azure_translator_region: Option<String>,
    speech_language: Option<String>,
    synthesis_language: Option<String>,
    synthesis_voice: Option<String>,
    max_upload_mb: Option<usize>,
    strategy_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// A description of the invalid setting.
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(host) = env_string("HOST") {
            config.host = host;
        }
        if let Some(port) = env_string("PORT") {
            config.port = port
                .parse()
                .map_err(|_| format!("invalid PORT value: {port}"))?;
        }
        config.cors_allowed_origins = env_string("CORS_ALLOWED_ORIGINS");
        config.azure_speech_key = env_string("AZURE_SPEECH_KEY");
        config.azure_speech_region = env_string("AZURE_SPEECH_REGION");
        config.azure_translator_key = env_string("AZURE_TRANSLATOR_KEY");
        config.azure_translator_region = env_string("AZURE_TRANSLATOR_REGION");

        if let Some(language) = env_string("SPEECH_LANGUAGE") {
            config.speech_language = language;
        }
        if let Some(language) = env_string("SYNTHESIS_LANGUAGE") {
            config.synthesis_language = language;
        }
        if let Some(voice) = env_string("SYNTHESIS_VOICE") {
            config.synthesis_voice = voice;
        }
        if let Some(mb) = env_string("MAX_UPLOAD_MB") {
            let mb: usize = mb
                .parse()
                .map_err(|_| format!("invalid MAX_UPLOAD_MB value: {mb}"))?;
            config.max_upload_bytes = mb * 1024 * 1024;
        }
        if let Some(secs) = env_string("STRATEGY_TIMEOUT_SECS") {
            config.strategy_timeout_secs = secs
                .parse()
                .map_err(|_| format!("invalid STRATEGY_TIMEOUT_SECS value: {secs}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, falling back to environment
    /// variables for unset fields.
    ///
    /// # Errors
    /// A description of the unreadable file or invalid setting.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let yaml: YamlConfig = serde_yaml::from_str(&content)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;

        let mut config = Self::from_env()?;

        if let Some(host) = yaml.host {
            config.host = host;
        }
        if let Some(port) = yaml.port {
            config.port = port;
        }
        if yaml.cors_allowed_origins.is_some() {
            config.cors_allowed_origins = yaml.cors_allowed_origins;
        }
        if yaml.azure_speech_key.is_some() {
            config.azure_speech_key = yaml.azure_speech_key;
        }
        if yaml.azure_speech_region.is_some() {
            config.azure_speech_region = yaml.azure_speech_region;
        }
        if yaml.azure_translator_key.is_some() {
            config.azure_translator_key = yaml.azure_translator_key;
        }
        if yaml.azure_translator_region.is_some() {
            config.azure_translator_region = yaml.azure_translator_region;
        }
        if let Some(language) = yaml.speech_language {
            config.speech_language = language;
        }
        if let Some(language) = yaml.synthesis_language {
            config.synthesis_language = language;
        }
        if let Some(voice) = yaml.synthesis_voice {
            config.synthesis_voice = voice;
        }
        if let Some(mb) = yaml.max_upload_mb {
            config.max_upload_bytes = mb * 1024 * 1024;
        }
        if let Some(secs) = yaml.strategy_timeout_secs {
            config.strategy_timeout_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency.
    ///
    /// # Errors
    /// A description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_upload_bytes == 0 {
            return Err("upload size limit must be positive".to_string());
        }
        if self.strategy_timeout_secs == 0 {
            return Err("strategy timeout must be positive".to_string());
        }
        if self.azure_speech_key.is_some() && self.azure_speech_region.is_none() {
            return Err(
                "AZURE_SPEECH_REGION is required when AZURE_SPEECH_KEY is set".to_string()
            );
        }
        Ok(())
    }

    /// The socket address string to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
