//! Application-level error type and HTTP mapping.
//!
//! Every handler returns `AppResult<T>`; this module turns core errors into
//! the JSON failure bodies the API serves: `{"success": false, "error",
//! "details", ...}`, with the status code chosen by category.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::audio::AudioError;
use crate::core::recognition::{RecognitionAttempt, SessionError};
use crate::core::translate::TranslateError;
use crate::core::tts::SynthesisError;

/// Result alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Troubleshooting guidance served with a no-speech failure.
const NO_SPEECH_SUGGESTIONS: [&str; 6] = [
    "Ensure the audio contains clear English speech",
    "Check that the audio is not muted or too quiet",
    "Try reducing background noise",
    "Verify the audio file is not corrupted",
    "Use WAV format if possible",
    "Supported formats: WAV (recommended), MP3, M4A",
];

/// Errors a handler can surface to the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request input.
    #[error("{error}: {details}")]
    BadRequest { error: String, details: String },

    /// Every recognition strategy failed for this upload.
    #[error("no speech detected")]
    NoSpeech {
        details: String,
        attempts: Vec<RecognitionAttempt>,
    },

    /// A backend rejected our credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A backend denied access to the resource.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// A backend rate limit was hit.
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    /// The server is missing required configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A backend failed in a way we cannot act on.
    #[error("upstream service error: {0}")]
    Upstream(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } | Self::NoSpeech { .. } => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::AccessDenied(_) => StatusCode::FORBIDDEN,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            Self::BadRequest { error, details } => json!({
                "success": false,
                "error": error,
                "details": details,
            }),
            Self::NoSpeech { details, attempts } => json!({
                "success": false,
                "error": "No speech detected",
                "details": details,
                "attempts": attempts,
                "troubleshooting": { "suggestions": NO_SPEECH_SUGGESTIONS },
            }),
            Self::Authentication(details) => json!({
                "success": false,
                "error": "Authentication failed",
                "details": details,
            }),
            Self::AccessDenied(details) => json!({
                "success": false,
                "error": "Access denied",
                "details": details,
            }),
            Self::RateLimited(details) => json!({
                "success": false,
                "error": "Rate limit exceeded",
                "details": details,
            }),
            Self::Configuration(details) => json!({
                "success": false,
                "error": "Server configuration error",
                "details": details,
            }),
            Self::Upstream(details) => json!({
                "success": false,
                "error": "Upstream service error",
                "details": details,
            }),
            Self::Internal(details) => json!({
                "success": false,
                "error": "Internal server error",
                "details": details,
            }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "request failed");
        } else {
            warn!(status = %status, error = %self, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<AudioError> for AppError {
    fn from(err: AudioError) -> Self {
        let error = match &err {
            AudioError::InvalidAudio(_) => "Invalid audio data",
            AudioError::UnsupportedFormat(_) => "Unsupported audio format",
            AudioError::Decode(_) => "Audio decode failed",
        };
        Self::BadRequest {
            error: error.to_string(),
            details: err.to_string(),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Audio(audio) => audio.into(),
            SessionError::RecognitionFailed { attempts } => Self::NoSpeech {
                details: "Could not detect any speech in the provided audio file. \
                          Please ensure the audio contains clear English speech."
                    .to_string(),
                attempts,
            },
            SessionError::Cancelled => Self::Internal("transcription cancelled".to_string()),
        }
    }
}

impl From<TranslateError> for AppError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::AuthenticationFailed(d) => Self::Authentication(d),
            TranslateError::AccessDenied(d) => Self::AccessDenied(d),
            TranslateError::RateLimited(d) => Self::RateLimited(d),
            TranslateError::Configuration(d) => Self::Configuration(d),
            TranslateError::Network(d) | TranslateError::Provider(d) => Self::Upstream(d),
            TranslateError::InvalidResponse(d) => Self::Upstream(d),
        }
    }
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::AuthenticationFailed(d) => Self::Authentication(d),
            SynthesisError::AccessDenied(d) => Self::AccessDenied(d),
            SynthesisError::RateLimited(d) => Self::RateLimited(d),
            SynthesisError::Configuration(d) => Self::Configuration(d),
            SynthesisError::Network(d) | SynthesisError::Provider(d) => Self::Upstream(d),
            SynthesisError::InvalidResponse(d) => Self::Upstream(d),
        }
    }
}
