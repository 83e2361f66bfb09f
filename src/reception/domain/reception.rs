//! Goods-reception records.

use super::{ReceptionDomainError, ReceptionId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Default status of newly received positions.
pub const ACCEPTED_STATUS: &str = "accepted";

/// Creation payload for a reception record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceptionDraft {
    order_number: String,
    designation: String,
    name: String,
    quantity: String,
    route_card_number: String,
    status: Option<String>,
    date: Option<DateTime<Utc>>,
}

impl ReceptionDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(
        order_number: impl Into<String>,
        designation: impl Into<String>,
        name: impl Into<String>,
        quantity: impl Into<String>,
        route_card_number: impl Into<String>,
    ) -> Self {
        Self {
            order_number: order_number.into(),
            designation: designation.into(),
            name: name.into(),
            quantity: quantity.into(),
            route_card_number: route_card_number.into(),
            status: None,
            date: None,
        }
    }

    /// Sets the status; defaults to [`ACCEPTED_STATUS`].
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the reception date; defaults to the clock's current time.
    #[must_use]
    pub const fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// One goods-reception position.
///
/// Reception records are a flat intake journal: they are created and
/// listed, never mutated, so they carry no change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reception {
    id: ReceptionId,
    date: DateTime<Utc>,
    order_number: String,
    designation: String,
    name: String,
    quantity: String,
    route_card_number: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl Reception {
    /// Creates a new reception record from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`ReceptionDomainError::EmptyField`] when any required
    /// field is empty after trimming.
    pub fn new(draft: ReceptionDraft, clock: &impl Clock) -> Result<Self, ReceptionDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: ReceptionId::new(),
            date: draft.date.unwrap_or(timestamp),
            order_number: required(draft.order_number, "order number")?,
            designation: required(draft.designation, "designation")?,
            name: required(draft.name, "name")?,
            quantity: required(draft.quantity, "quantity")?,
            route_card_number: required(draft.route_card_number, "route card number")?,
            status: draft
                .status
                .filter(|status| !status.trim().is_empty())
                .unwrap_or_else(|| ACCEPTED_STATUS.to_owned()),
            created_at: timestamp,
        })
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReceptionData) -> Self {
        Self {
            id: data.id,
            date: data.date,
            order_number: data.order_number,
            designation: data.designation,
            name: data.name,
            quantity: data.quantity,
            route_card_number: data.route_card_number,
            status: data.status,
            created_at: data.created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> ReceptionId {
        self.id
    }

    /// Returns the reception date.
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns the order number.
    #[must_use]
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Returns the part designation.
    #[must_use]
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Returns the part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the received quantity as free text.
    #[must_use]
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Returns the route card number.
    #[must_use]
    pub fn route_card_number(&self) -> &str {
        &self.route_card_number
    }

    /// Returns the reception status.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parameter object for reconstructing a persisted reception record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReceptionData {
    /// Persisted record identifier.
    pub id: ReceptionId,
    /// Persisted reception date.
    pub date: DateTime<Utc>,
    /// Persisted order number.
    pub order_number: String,
    /// Persisted designation.
    pub designation: String,
    /// Persisted name.
    pub name: String,
    /// Persisted quantity text.
    pub quantity: String,
    /// Persisted route card number.
    pub route_card_number: String,
    /// Persisted status.
    pub status: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Listing filter for reception records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceptionFilter {
    search: Option<String>,
    status: Option<String>,
}

impl ReceptionFilter {
    /// Creates a filter matching all records.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to records whose order number, designation, name, or
    /// route card number contains `term`.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restricts to records with exactly this status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the status criterion, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Evaluates the filter against one record.
    #[must_use]
    pub fn matches(&self, reception: &Reception) -> bool {
        if let Some(term) = self.search.as_deref() {
            let hit = reception.order_number().contains(term)
                || reception.designation().contains(term)
                || reception.name().contains(term)
                || reception.route_card_number().contains(term);
            if !hit {
                return false;
            }
        }
        if let Some(status) = self.status.as_deref() {
            if reception.status() != status {
                return false;
            }
        }
        true
    }
}

fn required(value: String, field: &'static str) -> Result<String, ReceptionDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReceptionDomainError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}
