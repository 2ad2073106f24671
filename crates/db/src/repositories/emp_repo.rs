//! Bulk loading for the `emps` table.
//!
//! Single-row emp operations go through [`RecordRepo<Emp>`]. This module adds
//! the batch path: one multi-row insert tagged with a fresh correlation token,
//! then a read-back of the generated ids by that token.
//!
//! The insert commits before the read-back runs. If the process fails
//! between the two round trips the rows stay stored but the caller never
//! learns their ids.

use harbor_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::emp::{CreateEmp, Emp, EmpRecord};
use crate::repositories::RecordRepo;

/// Failure modes of a bulk import.
#[derive(Debug, thiserror::Error)]
pub enum BulkImportError {
    /// The batch was empty. No statement was issued.
    #[error("Input list is empty")]
    Empty,

    /// The read-back returned a different number of ids than rows submitted.
    #[error("Bulk insert returned {found} ids for {expected} rows")]
    CountMismatch { expected: usize, found: usize },

    /// An id from the read-back could not be fetched afterwards.
    #[error("Emp with id={0} not found after insertion")]
    Missing(DbId),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Batch operations on emps.
pub struct EmpRepo;

impl EmpRepo {
    /// Insert every row in one statement and return the generated ids in
    /// input order.
    ///
    /// Each row also stores its 1-based input position next to the token,
    /// and the read-back orders by it, so `ids[i]` belongs to `rows[i]`.
    /// Both statements run on the same pooled connection.
    pub async fn bulk_insert(pool: &PgPool, rows: &[CreateEmp]) -> Result<Vec<DbId>, BulkImportError> {
        if rows.is_empty() {
            return Err(BulkImportError::Empty);
        }

        let token = Uuid::new_v4();

        let ship_names: Vec<String> = rows.iter().map(|r| r.fields.ship_name.clone()).collect();
        let dws: Vec<i64> = rows.iter().map(|r| r.fields.dw).collect();
        let cargo_names: Vec<String> = rows
            .iter()
            .map(|r| r.fields.loaded_cargo_name.clone())
            .collect();
        let data_dates: Vec<i32> = rows.iter().map(|r| r.fields.data_date).collect();
        let actors: Vec<String> = rows.iter().map(|r| r.created_by.clone()).collect();

        let mut conn = pool.acquire().await?;

        sqlx::query(
            "INSERT INTO emps
                (ship_name, dw, loaded_cargo_name, data_date,
                 created_at, created_by, updated_at, updated_by,
                 session_id, session_seq)
             SELECT t.ship_name, t.dw, t.loaded_cargo_name, t.data_date,
                    NOW(), t.actor, NOW(), t.actor,
                    $6, t.seq
             FROM UNNEST($1::text[], $2::bigint[], $3::text[], $4::integer[], $5::text[])
                  WITH ORDINALITY AS t(ship_name, dw, loaded_cargo_name, data_date, actor, seq)",
        )
        .bind(&ship_names)
        .bind(&dws)
        .bind(&cargo_names)
        .bind(&data_dates)
        .bind(&actors)
        .bind(token)
        .execute(&mut *conn)
        .await?;

        let ids: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM emps WHERE session_id = $1 ORDER BY session_seq")
                .bind(token)
                .fetch_all(&mut *conn)
                .await?;

        tracing::debug!(%token, rows = rows.len(), ids = ids.len(), "Bulk inserted emps");

        if ids.len() != rows.len() {
            return Err(BulkImportError::CountMismatch {
                expected: rows.len(),
                found: ids.len(),
            });
        }
        Ok(ids)
    }

    /// Bulk insert, then fetch every new row by id.
    ///
    /// Any row that cannot be fetched fails the whole call; no partial
    /// result is returned.
    pub async fn import(pool: &PgPool, rows: &[CreateEmp]) -> Result<Vec<EmpRecord>, BulkImportError> {
        let ids = Self::bulk_insert(pool, rows).await?;

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let record = RecordRepo::<Emp>::find_by_id(pool, id)
                .await?
                .ok_or(BulkImportError::Missing(id))?;
            records.push(record);
        }
        Ok(records)
    }
}
