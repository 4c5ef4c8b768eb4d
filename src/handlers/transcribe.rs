//! Speech-to-text endpoint.
//!
//! Accepts a base64 audio payload, validates the upload boundary (size and
//! declared format), then hands the bytes to the normalization pipeline and
//! the tiered recognition sequencer. Format conversion runs on a blocking
//! worker so large files do not stall the async runtime.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::recognition::{
    prepare_strategy_payloads, RecognitionAttempt, TranscriptionSession,
};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// MIME types accepted at the upload boundary.
const ALLOWED_MIME_TYPES: [&str; 6] = [
    "audio/mp3",
    "audio/wav",
    "audio/x-wav",
    "audio/mpeg",
    "audio/mp4",
    "audio/x-m4a",
];

/// `POST /api/speech-to-text` request body.
#[derive(Debug, Deserialize)]
pub struct SpeechToTextRequest {
    /// Base64-encoded audio file.
    #[serde(rename = "audioData", default)]
    pub audio_data: Option<String>,
    /// Declared MIME type of the upload.
    #[serde(default)]
    pub format: Option<String>,
}

/// `POST /api/speech-to-text` success body.
#[derive(Debug, Serialize)]
pub struct SpeechToTextResponse {
    pub success: bool,
    /// The recognized English text.
    pub text: String,
    /// Per-strategy diagnostics, in submission order.
    pub attempts: Vec<RecognitionAttempt>,
}

/// Transcribe an uploaded audio file to English text.
pub async fn speech_to_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpeechToTextRequest>,
) -> AppResult<Json<SpeechToTextResponse>> {
    let Some(recognizer) = state.recognizer.clone() else {
        return Err(AppError::Configuration(
            "Azure Speech Service configuration missing".to_string(),
        ));
    };

    let encoded = match request.audio_data.as_deref() {
        Some(data) if !data.is_empty() => data,
        _ => {
            return Err(AppError::BadRequest {
                error: "Missing audio data".to_string(),
                details: "Please provide audio data in the request body".to_string(),
            });
        }
    };

    validate_declared_format(request.format.as_deref())?;

    let raw = BASE64.decode(encoded).map_err(|e| AppError::BadRequest {
        error: "Invalid audio data".to_string(),
        details: format!("audio data is not valid base64: {e}"),
    })?;

    if raw.len() > state.config.max_upload_bytes {
        return Err(AppError::BadRequest {
            error: "File too large".to_string(),
            details: format!(
                "File size must be less than {} MB",
                state.config.max_upload_bytes / (1024 * 1024)
            ),
        });
    }

    info!(
        bytes = raw.len(),
        format = request.format.as_deref().unwrap_or("unknown"),
        "processing speech-to-text upload"
    );

    let mut session = TranscriptionSession::with_strategies(state.strategies());

    // Decode and per-tier conversion are CPU-bound; keep them off the
    // async worker threads.
    let payloads = {
        let strategies = session.strategies().to_vec();
        let pipeline = state.pipeline.clone();
        let declared_mime = request.format.clone();
        tokio::task::spawn_blocking(move || {
            prepare_strategy_payloads(&strategies, &pipeline, &raw, declared_mime.as_deref())
        })
        .await
        .map_err(|e| AppError::Internal(format!("audio preparation task failed: {e}")))??
    };

    let cancel = CancellationToken::new();
    let text = session.run(recognizer.as_ref(), payloads, &cancel).await?;

    Ok(Json(SpeechToTextResponse {
        success: true,
        text,
        attempts: session.attempts().to_vec(),
    }))
}

/// Reject declared formats outside the supported set. An absent declaration
/// is allowed; the decoder sniffs the bytes either way.
fn validate_declared_format(format: Option<&str>) -> Result<(), AppError> {
    let Some(format) = format else {
        return Ok(());
    };
    let essence = format
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if ALLOWED_MIME_TYPES.contains(&essence.as_str()) {
        Ok(())
    } else {
        Err(AppError::BadRequest {
            error: "Unsupported file type".to_string(),
            details: "Please upload an MP3, WAV, or M4A file".to_string(),
        })
    }
}
