//! Generic soft-delete repository shared by every entity table.
//!
//! All statements are built from the compile-time [`Entity`] descriptor, so
//! the table and column names in the SQL are fixed strings. Every mutating
//! statement carries a `deleted_at IS NULL` guard and reports success via the
//! affected-row count; a caller that loses a race sees `false`, never a
//! half-applied write.

use std::marker::PhantomData;

use harbor_core::types::DbId;
use sqlx::{PgPool, Row};

use crate::models::record::{Entity, Record, RecordFields, AUDIT_COLUMNS};

/// CRUD over the live rows of `E::TABLE`.
pub struct RecordRepo<E>(PhantomData<E>);

impl<E: Entity> RecordRepo<E> {
    fn select_columns() -> String {
        format!("id, {}, {AUDIT_COLUMNS}", E::Fields::COLUMNS.join(", "))
    }

    /// Insert a live row stamped with `actor` as both creator and updater.
    /// Returns the generated id.
    pub async fn create(pool: &PgPool, fields: &E::Fields, actor: &str) -> Result<DbId, sqlx::Error> {
        let columns = E::Fields::COLUMNS;
        let placeholders = (1..=columns.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let actor_param = columns.len() + 1;
        let query = format!(
            "INSERT INTO {table} ({columns}, created_at, created_by, updated_at, updated_by)
             VALUES ({placeholders}, NOW(), ${actor_param}, NOW(), ${actor_param})
             RETURNING id",
            table = E::TABLE,
            columns = columns.join(", "),
        );
        let row = fields
            .bind(sqlx::query(&query))
            .bind(actor)
            .fetch_one(pool)
            .await?;
        row.try_get("id")
    }

    /// Find a live row by id. Tombstoned rows are reported as `None`.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Record<E::Fields>>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            Self::select_columns(),
            E::TABLE
        );
        sqlx::query_as::<_, Record<E::Fields>>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every live row, most recently updated first. Unbounded.
    pub async fn list(pool: &PgPool) -> Result<Vec<Record<E::Fields>>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE deleted_at IS NULL ORDER BY updated_at DESC, id DESC",
            Self::select_columns(),
            E::TABLE
        );
        sqlx::query_as::<_, Record<E::Fields>>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the editable fields of a live row and refresh its update stamp.
    ///
    /// Returns `false` when the id does not exist or the row is tombstoned;
    /// the two cases are not distinguished.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &E::Fields,
        actor: &str,
    ) -> Result<bool, sqlx::Error> {
        let columns = E::Fields::COLUMNS;
        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{col} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let actor_param = columns.len() + 1;
        let id_param = columns.len() + 2;
        // GREATEST keeps updated_at non-decreasing even if the server clock steps back.
        let query = format!(
            "UPDATE {table} SET {assignments},
                 updated_at = GREATEST(NOW(), updated_at),
                 updated_by = ${actor_param}
             WHERE id = ${id_param} AND deleted_at IS NULL",
            table = E::TABLE,
        );
        let result = fields
            .bind(sqlx::query(&query))
            .bind(actor)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Tombstone a live row. Returns `false` if it is absent or already
    /// tombstoned, so repeated calls are harmless.
    pub async fn soft_delete(pool: &PgPool, id: DbId, actor: &str) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET deleted_at = NOW(), deleted_by = $2
             WHERE id = $1 AND deleted_at IS NULL",
            E::TABLE
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(actor)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
