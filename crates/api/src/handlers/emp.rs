//! Handlers specific to `/api/emps`. Single-row verbs reuse [`super::record`].

use axum::extract::State;
use axum::Json;
use harbor_core::validation::require_text;
use harbor_db::models::emp::{CreateEmp, EmpRecord};
use harbor_db::models::record::RecordFields;
use harbor_db::repositories::EmpRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/emps/bulk
///
/// Inserts the whole batch in one statement and answers with the stored rows
/// in request order. An empty batch is rejected with 400; a row that cannot
/// be read back fails the whole request with 500.
pub async fn create_bulk(
    State(state): State<AppState>,
    Json(input): Json<Vec<CreateEmp>>,
) -> AppResult<Json<Vec<EmpRecord>>> {
    for row in &input {
        row.fields.validate()?;
        require_text("created_by", &row.created_by)?;
    }

    let records = EmpRepo::import(&state.pool, &input).await?;
    tracing::info!(count = records.len(), "Bulk imported emps");
    Ok(Json(records))
}
