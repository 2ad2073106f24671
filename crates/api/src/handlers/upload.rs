//! PDF upload and table extraction.

use axum::extract::{Multipart, State};
use axum::Json;
use harbor_core::validation::plain_file_name;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub file_name: String,
}

/// GET /api/hello
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the harbor backend!".to_string(),
    })
}

/// POST /api/upload
///
/// Stores the multipart field `file` under the upload directory, keeping its
/// client file name. An existing file with the same name is replaced.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let raw_name = field.file_name().unwrap_or_default().to_string();
        let file_name = plain_file_name(&raw_name)?.to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
        let dest = state.config.upload_dir.join(&file_name);
        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        tracing::info!(file = %file_name, bytes = data.len(), "Stored upload");
        return Ok(Json(MessageResponse {
            message: format!("Uploaded {file_name} successfully."),
        }));
    }

    Err(AppError::BadRequest("Missing multipart field 'file'".to_string()))
}

/// POST /api/convert
///
/// Runs the extraction tool on a previously uploaded file and returns its
/// JSON output untouched.
pub async fn convert(
    State(state): State<AppState>,
    Json(input): Json<ConvertRequest>,
) -> AppResult<Json<Value>> {
    let file_name = plain_file_name(&input.file_name)?;
    let path = state.config.upload_dir.join(file_name);

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(AppError::NotFound("File not found.".to_string()));
    }

    tracing::debug!(file = %file_name, tool = state.extractor.program(), "Running table extraction");
    let output = state.extractor.extract(&path).await?;
    Ok(Json(output))
}
