//! Emp entity: one shipment line loaded in bulk from extracted PDF tables.

use harbor_core::error::CoreError;
use harbor_core::validation::require_text;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::master::define_entity;
use crate::models::record::{sealed, CreateRecord, Entity, PgQuery, Record, RecordFields};

/// Editable emp columns.
///
/// `loaded_cargo_name` is a denormalized label, not a reference into
/// `loaded_cargo`. The bulk correlation token stored alongside each row is
/// write-only and never part of this set.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct EmpFields {
    pub ship_name: String,
    /// Deadweight tonnage.
    pub dw: i64,
    pub loaded_cargo_name: String,
    /// Numeric date code, e.g. `20250612`.
    pub data_date: i32,
}

impl RecordFields for EmpFields {
    const COLUMNS: &'static [&'static str] = &["ship_name", "dw", "loaded_cargo_name", "data_date"];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.ship_name)
            .bind(self.dw)
            .bind(&self.loaded_cargo_name)
            .bind(self.data_date)
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("ship_name", &self.ship_name)?;
        require_text("loaded_cargo_name", &self.loaded_cargo_name)
    }
}

define_entity! {
    Emp { table: "emps", label: "Emp", fields: EmpFields }
}

pub type EmpRecord = Record<EmpFields>;

/// One row of a single or bulk emp creation request.
pub type CreateEmp = CreateRecord<EmpFields>;
