//! Speech synthesis endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// `POST /api/text-to-speech` request body.
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Synthesis language; the configured default when omitted.
    #[serde(default)]
    pub language: Option<String>,
    /// Voice name; the configured default when omitted.
    #[serde(default)]
    pub voice: Option<String>,
}

/// `POST /api/text-to-speech` success body.
#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub success: bool,
    /// Base64-encoded WAV audio.
    #[serde(rename = "audioData")]
    pub audio_data: String,
    pub format: &'static str,
    pub language: String,
    pub voice: String,
}

/// Synthesize speech from text, returning base64 WAV audio.
pub async fn synthesize_speech(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesizeRequest>,
) -> AppResult<Json<SynthesizeResponse>> {
    let Some(synthesizer) = state.synthesizer.clone() else {
        return Err(AppError::Configuration(
            "Azure Speech Service configuration missing".to_string(),
        ));
    };

    let text = match request.text.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => {
            return Err(AppError::BadRequest {
                error: "Missing text to synthesize".to_string(),
                details: "Please provide text in the request body".to_string(),
            });
        }
    };

    let language = request
        .language
        .unwrap_or_else(|| state.config.synthesis_language.clone());
    let voice = request
        .voice
        .unwrap_or_else(|| state.config.synthesis_voice.clone());

    info!(
        language = language.as_str(),
        voice = voice.as_str(),
        chars = text.len(),
        "synthesizing speech"
    );

    let audio = synthesizer.synthesize(&text, &language, &voice).await?;

    Ok(Json(SynthesizeResponse {
        success: true,
        audio_data: BASE64.encode(&audio),
        format: "wav",
        language,
        voice,
    }))
}
