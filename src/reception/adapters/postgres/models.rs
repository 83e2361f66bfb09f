//! Diesel row models for reception persistence.

use super::schema::receptions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for reception records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = receptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReceptionRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Reception date.
    pub date: DateTime<Utc>,
    /// Order number.
    pub order_number: String,
    /// Part designation.
    pub designation: String,
    /// Part name.
    pub name: String,
    /// Quantity as free text.
    pub quantity: String,
    /// Route card number.
    pub route_card_number: String,
    /// Reception status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for reception records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = receptions)]
pub struct NewReceptionRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Reception date.
    pub date: DateTime<Utc>,
    /// Order number.
    pub order_number: String,
    /// Part designation.
    pub designation: String,
    /// Part name.
    pub name: String,
    /// Quantity as free text.
    pub quantity: String,
    /// Route card number.
    pub route_card_number: String,
    /// Reception status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
