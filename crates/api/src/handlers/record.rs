//! Handlers shared by every soft-deletable entity.
//!
//! Each handler is generic over an [`Entity`] descriptor and is mounted once
//! per table by [`crate::routes::entity_router`]. Update and delete answer
//! `true` on success and 404 otherwise; an absent id and a tombstoned row
//! produce the same response.

use axum::extract::{Path, Query, State};
use axum::Json;
use harbor_core::error::CoreError;
use harbor_core::types::DbId;
use harbor_core::validation::require_text;
use harbor_db::models::record::{CreateRecord, Entity, Record, RecordFields, UpdateRecord};
use harbor_db::repositories::RecordRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for DELETE.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub deleted_by: String,
}

fn not_found<E: Entity>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: E::LABEL,
        id,
    })
}

/// POST /api/.../{entity}
///
/// Answers with the stored row read back after the insert.
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    Json(input): Json<CreateRecord<E::Fields>>,
) -> AppResult<Json<Record<E::Fields>>> {
    input.fields.validate()?;
    require_text("created_by", &input.created_by)?;

    let id = RecordRepo::<E>::create(&state.pool, &input.fields, &input.created_by).await?;
    tracing::info!(table = E::TABLE, id, actor = %input.created_by, "Record created");

    let record = RecordRepo::<E>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Consistency(format!(
                "{} with id={id} not found after insertion",
                E::LABEL
            )))
        })?;
    Ok(Json(record))
}

/// GET /api/.../{entity}
pub async fn list<E: Entity>(State(state): State<AppState>) -> AppResult<Json<Vec<Record<E::Fields>>>> {
    let records = RecordRepo::<E>::list(&state.pool).await?;
    Ok(Json(records))
}

/// GET /api/.../{entity}/{id}
pub async fn get_by_id<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Record<E::Fields>>> {
    let record = RecordRepo::<E>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<E>(id))?;
    Ok(Json(record))
}

/// PUT /api/.../{entity}/{id}
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRecord<E::Fields>>,
) -> AppResult<Json<bool>> {
    input.fields.validate()?;
    require_text("updated_by", &input.updated_by)?;

    let updated = RecordRepo::<E>::update(&state.pool, id, &input.fields, &input.updated_by).await?;
    if !updated {
        return Err(not_found::<E>(id));
    }
    tracing::info!(table = E::TABLE, id, actor = %input.updated_by, "Record updated");
    Ok(Json(true))
}

/// DELETE /api/.../{entity}/{id}?deleted_by=...
pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<bool>> {
    require_text("deleted_by", &params.deleted_by)?;

    let deleted = RecordRepo::<E>::soft_delete(&state.pool, id, &params.deleted_by).await?;
    if !deleted {
        return Err(not_found::<E>(id));
    }
    tracing::info!(table = E::TABLE, id, actor = %params.deleted_by, "Record tombstoned");
    Ok(Json(true))
}
