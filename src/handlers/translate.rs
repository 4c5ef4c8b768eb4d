//! Translation endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// `POST /api/translate` request body.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_to")]
    pub to: String,
}

fn default_from() -> String {
    "en".to_string()
}

fn default_to() -> String {
    "fr".to_string()
}

/// `POST /api/translate` success body.
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    #[serde(rename = "originalText")]
    pub original_text: String,
    #[serde(rename = "translatedText")]
    pub translated_text: String,
    #[serde(rename = "fromLanguage")]
    pub from_language: String,
    #[serde(rename = "toLanguage")]
    pub to_language: String,
}

/// Translate text between two languages.
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslateRequest>,
) -> AppResult<Json<TranslateResponse>> {
    let Some(translator) = state.translator.clone() else {
        return Err(AppError::Configuration(
            "Azure Translator configuration missing".to_string(),
        ));
    };

    let text = match request.text.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => {
            return Err(AppError::BadRequest {
                error: "Missing text to translate".to_string(),
                details: "Please provide text in the request body".to_string(),
            });
        }
    };

    info!(
        from = request.from.as_str(),
        to = request.to.as_str(),
        chars = text.len(),
        "translating text"
    );

    let translated = translator
        .translate(&text, &request.from, &request.to)
        .await?;

    Ok(Json(TranslateResponse {
        success: true,
        original_text: text,
        translated_text: translated,
        from_language: request.from,
        to_language: request.to,
    }))
}
