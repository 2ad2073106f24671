//! Master-data entities: the seven lookup tables edited from the master
//! screens, and their editable field sets.

use harbor_core::error::CoreError;
use harbor_core::types::DbId;
use harbor_core::validation::require_text;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::record::{sealed, Entity, PgQuery, Record, RecordFields};

/// Declare a zero-sized entity descriptor bound to one table.
macro_rules! define_entity {
    (
        $(#[$meta:meta])*
        $name:ident { table: $table:literal, label: $label:literal, fields: $fields:ty $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Entity for $name {
            const TABLE: &'static str = $table;
            const LABEL: &'static str = $label;
            type Fields = $fields;
        }
    };
}

pub(crate) use define_entity;

/// Name + optional abbreviation, shared by most master tables.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct NamedFields {
    pub name: String,
    pub short_name: Option<String>,
}

impl RecordFields for NamedFields {
    const COLUMNS: &'static [&'static str] = &["name", "short_name"];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.name).bind(&self.short_name)
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)
    }
}

/// Berth fields. `port_id` names a port but is not enforced or cascaded.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct BerthFields {
    pub name: String,
    pub short_name: Option<String>,
    pub port_id: Option<DbId>,
}

impl RecordFields for BerthFields {
    const COLUMNS: &'static [&'static str] = &["name", "short_name", "port_id"];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.short_name)
            .bind(self.port_id)
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)
    }
}

/// Towing operator fields: company name plus tug name and horsepower label.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TowingFields {
    pub name: String,
    pub short_name: Option<String>,
    pub t_name: Option<String>,
    pub ps: Option<String>,
}

impl RecordFields for TowingFields {
    const COLUMNS: &'static [&'static str] = &["name", "short_name", "t_name", "ps"];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.short_name)
            .bind(&self.t_name)
            .bind(&self.ps)
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)
    }
}

define_entity! {
    /// Shipping lines operating vessels.
    OperatingVessel { table: "operating_vessels", label: "Operating vessel", fields: NamedFields }
}

define_entity! {
    Port { table: "ports", label: "Port", fields: NamedFields }
}

define_entity! {
    /// Shipping agents.
    Agent { table: "agents", label: "Agent", fields: NamedFields }
}

define_entity! {
    /// Named escort routes.
    EscortLocation { table: "escort_locations", label: "Escort location", fields: NamedFields }
}

define_entity! {
    /// Cargo categories.
    LoadedCargo { table: "loaded_cargo", label: "Loaded cargo", fields: NamedFields }
}

define_entity! {
    Berth { table: "berths", label: "Berth", fields: BerthFields }
}

define_entity! {
    /// Towing operators and their tugs.
    MasterTowing { table: "master_towing", label: "Master towing", fields: TowingFields }
}

pub type NamedRecord = Record<NamedFields>;
pub type BerthRecord = Record<BerthFields>;
pub type TowingRecord = Record<TowingFields>;
