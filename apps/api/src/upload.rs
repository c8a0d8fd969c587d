use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    Json,
};
use rand::Rng;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::auth::AdminAuth;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field that carries the uploaded file.
const UPLOAD_FIELD: &str = "image";
/// URL prefix the uploads directory is served under.
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /upload
///
/// Stores the `image` file under a generated name and returns its served URL.
/// No type or size restriction; files are never cleaned up.
pub async fn handle_upload(
    _admin: AdminAuth,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let no_file = || AppError::Validation("No file uploaded".to_string());
    let mut multipart = multipart.map_err(|_| no_file())?;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A plain text field named `image` is not a file.
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let file_name = upload_file_name(
            &original_name,
            chrono::Utc::now().timestamp_millis(),
            rand::thread_rng().gen_range(0..1_000_000_000),
        );

        let dir = &state.config.uploads_dir;
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create uploads directory {}", dir.display()))?;
        let path = dir.join(&file_name);
        let written = match stream_to_file(&mut field, &path).await {
            Ok(written) => written,
            Err(err) => {
                // Never leave a truncated file behind.
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => warn!("Failed to remove partial upload {}: {e}", path.display()),
                }
                return Err(err);
            }
        };

        info!("Stored upload {file_name} ({written} bytes)");
        return Ok(Json(UploadResponse {
            url: format!("{UPLOADS_ROUTE}/{file_name}"),
        }));
    }

    Err(no_file())
}

/// Copies the field to `path` chunk by chunk, so the upload never has to fit
/// in memory. Returns the number of bytes written.
async fn stream_to_file(field: &mut Field<'_>, path: &Path) -> Result<u64, AppError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create upload {}", path.display()))?;

    let mut written = 0u64;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write upload {}", path.display()))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .with_context(|| format!("Failed to flush upload {}", path.display()))?;
    Ok(written)
}

/// `<millis>-<random>-<sanitized original name>`
pub fn upload_file_name(original: &str, timestamp_millis: i64, random: u32) -> String {
    format!(
        "{timestamp_millis}-{random}-{}",
        sanitize_file_name(original)
    )
}

/// Keeps only the last path component and turns whitespace runs into `_`.
/// `:` and control characters become `_` so the result can never leave the
/// uploads directory; `#`, `?` and `%` become `_` so the name can be used in
/// the returned URL path as is.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let mut out = String::with_capacity(base.len());
    let mut in_whitespace = false;
    for c in base.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if matches!(c, ':' | '#' | '?' | '%') || c.is_control() {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    match out.as_str() {
        "" | "." | ".." => "upload".to_string(),
        _ => out,
    }
}
