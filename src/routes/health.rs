use axum::Json;
use std::time::{SystemTime, UNIX_EPOCH};

/// GET /health
/// Liveness probe.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
      "status": "ok",
      "service": env!("CARGO_PKG_NAME"),
      "timestamp": SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
    }))
}
