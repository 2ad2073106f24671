//! Shared row shape for every soft-deletable table.
//!
//! A [`Record`] is the surrogate id, the entity's editable fields, the
//! last-writer audit stamps, and a [`Liveness`] tag. The tag replaces the
//! raw `deleted_at`/`deleted_by` column pair so that a row is always either
//! live or tombstoned with both stamps present.

use harbor_core::error::CoreError;
use harbor_core::types::{DbId, Timestamp};
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Postgres, Row};

/// An unexecuted query with positional Postgres arguments.
pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Audit columns present on every table, in select order.
pub const AUDIT_COLUMNS: &str =
    "created_at, created_by, updated_at, updated_by, deleted_at, deleted_by";

/// Editable columns of one entity shape.
pub trait RecordFields:
    for<'r> FromRow<'r, PgRow> + Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    /// Column names, in the order [`RecordFields::bind`] binds them.
    const COLUMNS: &'static [&'static str];

    /// Bind every column value onto `query`, in [`RecordFields::COLUMNS`] order.
    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;

    /// Reject values that must never reach the table (e.g. blank names).
    fn validate(&self) -> Result<(), CoreError>;
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A table the repositories may touch.
///
/// Sealed: the implementations in this crate are the complete allow-list,
/// so table names never come from request input.
pub trait Entity: sealed::Sealed + Send + Sync + 'static {
    /// Table name.
    const TABLE: &'static str;
    /// Human-readable name used in not-found messages.
    const LABEL: &'static str;
    /// Editable column set.
    type Fields: RecordFields;
}

/// Created/updated stamps. Only the last writer is retained.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AuditTrail {
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Timestamp,
    pub updated_by: String,
}

/// Whether a row is visible to normal reads.
///
/// There is no transition back to [`Liveness::Live`]; tombstoning is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Liveness {
    Live,
    Tombstoned { at: Timestamp, by: String },
}

impl Liveness {
    pub fn is_live(&self) -> bool {
        matches!(self, Liveness::Live)
    }

    /// Build from the nullable column pair. Exactly one of "both null" or
    /// "both set" is valid.
    pub fn from_columns(
        deleted_at: Option<Timestamp>,
        deleted_by: Option<String>,
    ) -> Result<Self, sqlx::Error> {
        match (deleted_at, deleted_by) {
            (None, None) => Ok(Liveness::Live),
            (Some(at), Some(by)) => Ok(Liveness::Tombstoned { at, by }),
            (at, by) => Err(sqlx::Error::Decode(
                format!(
                    "inconsistent tombstone columns: deleted_at set = {}, deleted_by set = {}",
                    at.is_some(),
                    by.is_some()
                )
                .into(),
            )),
        }
    }
}

/// Serializes back to the stored column names so JSON keeps the flat shape.
impl Serialize for Liveness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Liveness", 2)?;
        match self {
            Liveness::Live => {
                state.serialize_field("deleted_at", &None::<Timestamp>)?;
                state.serialize_field("deleted_by", &None::<String>)?;
            }
            Liveness::Tombstoned { at, by } => {
                state.serialize_field("deleted_at", at)?;
                state.serialize_field("deleted_by", by)?;
            }
        }
        state.end()
    }
}

/// One row of an entity table.
#[derive(Debug, Clone, Serialize)]
pub struct Record<F> {
    pub id: DbId,
    #[serde(flatten)]
    pub fields: F,
    #[serde(flatten)]
    pub audit: AuditTrail,
    #[serde(flatten)]
    pub liveness: Liveness,
}

impl<'r, F: RecordFields> FromRow<'r, PgRow> for Record<F> {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            fields: F::from_row(row)?,
            audit: AuditTrail::from_row(row)?,
            liveness: Liveness::from_columns(row.try_get("deleted_at")?, row.try_get("deleted_by")?)?,
        })
    }
}

/// Request body for creating a record: the fields plus the acting user.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "F: DeserializeOwned"))]
pub struct CreateRecord<F> {
    #[serde(flatten)]
    pub fields: F,
    pub created_by: String,
}

/// Request body for updating a record: the full field set plus the acting user.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "F: DeserializeOwned"))]
pub struct UpdateRecord<F> {
    #[serde(flatten)]
    pub fields: F,
    pub updated_by: String,
}
