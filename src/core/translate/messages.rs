//! Wire types for the Azure Translator v3 API.
//!
//! API Reference: https://learn.microsoft.com/azure/ai-services/translator/reference/v3-0-translate

use serde::{Deserialize, Serialize};

/// One input text in the request body array.
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequestItem {
    #[serde(rename = "Text")]
    pub text: String,
}

/// One result in the response array, aligned with the request items.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationItem {
    /// Translations of this input, one per requested target language.
    pub translations: Vec<Translation>,
}

/// A single translated text.
#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    /// The translated text.
    pub text: String,
    /// Target language code.
    pub to: String,
}

/// Error body the service returns on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorErrorResponse {
    pub error: TranslatorError,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorError {
    /// Service-specific numeric error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}
