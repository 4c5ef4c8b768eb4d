//! Health check endpoint.

use axum::Json;
use serde_json::{json, Value};

/// `GET /` - liveness probe with service identity.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "service": "voxlate-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
