use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portfolio-api"
    }))
}

/// GET /
/// Human-readable status page.
pub async fn status_page(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Backend API Status</title>
  <style>
    body {{ margin: 0; font-family: 'Segoe UI', Tahoma, sans-serif; display: flex; justify-content: center; align-items: center; height: 100vh; background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%); color: #fff; text-align: center; }}
    .card {{ background: rgba(255, 255, 255, 0.15); padding: 40px; border-radius: 20px; max-width: 500px; }}
    .status {{ margin-top: 20px; padding: 10px 20px; display: inline-block; background: #00c853; border-radius: 30px; font-weight: bold; }}
  </style>
</head>
<body>
  <div class="card">
    <h1>Backend API is Working!</h1>
    <p>Server is running successfully on port <strong>{port}</strong></p>
    <div class="status">Status: Online</div>
  </div>
</body>
</html>
"#,
        port = state.config.port
    ))
}
