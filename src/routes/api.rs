use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, synthesize, transcribe, translate};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router.
///
/// CORS is applied in main.rs where the configured origins are available.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/api/speech-to-text", post(transcribe::speech_to_text))
        .route("/api/translate", post(translate::translate_text))
        .route("/api/text-to-speech", post(synthesize::synthesize_speech))
        .layer(TraceLayer::new_for_http())
}
