//! Axum route handlers for the content resources.
//!
//! Every resource shares the same four handlers, instantiated per model type
//! in `routes::build_router`.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use portfolio_content::{validate_collection, validate_singleton, Resource};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::AdminAuth;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::{load_collection, load_singleton, save_collection, save_singleton};

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct WriteAck {
    pub success: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /<collection>
pub async fn list_collection<R: Resource>(
    State(state): State<AppState>,
) -> Result<Json<Vec<R>>, AppError> {
    let items = load_collection::<R>(state.store.as_ref()).await?;
    Ok(Json(items))
}

/// GET /<singleton>. Answers `{}` when nothing has been written yet.
pub async fn get_singleton<R: Resource>(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let response = match load_singleton::<R>(state.store.as_ref()).await? {
        Some(doc) => Json(doc).into_response(),
        None => Json(json!({})).into_response(),
    };
    Ok(response)
}

/// PUT /<collection>
pub async fn replace_collection<R: Resource>(
    _admin: AdminAuth,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WriteAck>, AppError> {
    let items = validate_collection::<R>(json_body(body)?)?;
    save_collection(state.store.as_ref(), &items).await?;

    info!("Replaced {} with {} document(s)", R::NAME, items.len());
    Ok(Json(WriteAck { success: true }))
}

/// PUT /<singleton>
pub async fn replace_singleton<R: Resource>(
    _admin: AdminAuth,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WriteAck>, AppError> {
    let doc = validate_singleton::<R>(json_body(body)?)?;
    save_singleton(state.store.as_ref(), &doc).await?;

    info!("Replaced {}", R::NAME);
    Ok(Json(WriteAck { success: true }))
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}
