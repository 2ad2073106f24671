use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The id is absent or the row is tombstoned. The two cases are not
    /// distinguished.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A row that must exist right after a write could not be read back.
    #[error("Consistency failure: {0}")]
    Consistency(String),

    /// The table-extraction tool failed to produce output.
    #[error("External tool failure: {0}")]
    ExternalTool(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
