//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists. Raw strings are kept as
//! received: the engine validates them so every caller gets the same errors.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Append an entry to a customer's ledger.
#[derive(Clone, Debug)]
pub struct LedgerEntryCmd {
    pub customer_id: Uuid,
    pub entry_type: String,
    pub amount: String,
    pub note: Option<String>,
    pub entry_date: Option<DateTime<Utc>>,
}

impl LedgerEntryCmd {
    #[must_use]
    pub fn new(
        customer_id: Uuid,
        entry_type: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            entry_type: entry_type.into(),
            amount: amount.into(),
            note: None,
            entry_date: None,
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn entry_date(mut self, entry_date: DateTime<Utc>) -> Self {
        self.entry_date = Some(entry_date);
        self
    }
}

/// Add a cashbook entry.
#[derive(Clone, Debug)]
pub struct CashbookEntryCmd {
    pub entry_type: String,
    pub amount: String,
    pub payment_mode: String,
    pub category: Option<String>,
    pub entry_date: Option<DateTime<Utc>>,
    pub attachment_url: Option<String>,
}

impl CashbookEntryCmd {
    #[must_use]
    pub fn new(
        entry_type: impl Into<String>,
        amount: impl Into<String>,
        payment_mode: impl Into<String>,
    ) -> Self {
        Self {
            entry_type: entry_type.into(),
            amount: amount.into(),
            payment_mode: payment_mode.into(),
            category: None,
            entry_date: None,
            attachment_url: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn entry_date(mut self, entry_date: DateTime<Utc>) -> Self {
        self.entry_date = Some(entry_date);
        self
    }

    #[must_use]
    pub fn attachment_url(mut self, url: impl Into<String>) -> Self {
        self.attachment_url = Some(url.into());
        self
    }
}

/// Create a customer.
#[derive(Clone, Debug, Default)]
pub struct CustomerCmd {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Profile fields to change. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.business_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }
}

/// Filters for listing cashbook entries. Bounds are inclusive.
#[derive(Clone, Debug, Default)]
pub struct CashbookFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub category: Option<String>,
}
