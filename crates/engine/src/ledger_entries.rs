//! Customer ledger.
//!
//! A ledger is the ordered list of entries of a single customer. A `DEBIT`
//! increases what the customer owes, a `CREDIT` decreases it:
//!
//! $balance = \sum debit - \sum credit$
//!
//! The balance is never stored. It is folded from the entries every time it is
//! needed, so deleting an entry is enough to correct it.

use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    money::{parse_amount, too_large},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LedgerEntryType {
    Debit,
    Credit,
}

impl LedgerEntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }

    /// Apply the entry sign to `amount`.
    pub fn signed(self, amount: Money) -> ResultEngine<Money> {
        match self {
            Self::Debit => Ok(amount),
            Self::Credit => amount.checked_neg().ok_or_else(too_large),
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LedgerEntryType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "DEBIT" => Ok(Self::Debit),
            "CREDIT" => Ok(Self::Credit),
            other => Err(EngineError::InvalidEntryType(format!(
                "ledger entries are DEBIT or CREDIT, got {other:?}"
            ))),
        }
    }
}

/// A single movement in a customer's ledger.
///
/// `amount` keeps the stored decimal text; it is parsed while folding so a
/// corrupted row is reported with its id instead of being skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub entry_type: LedgerEntryType,
    pub amount: String,
    pub note: Option<String>,
    pub entry_date: DateTime<Utc>,
}

impl LedgerEntry {
    /// Parsed, unsigned amount.
    pub fn amount(&self) -> ResultEngine<Money> {
        parse_amount(&self.amount).map_err(|err| err.for_entry(self.id))
    }

    /// Amount with the sign of the entry type.
    pub fn signed_amount(&self) -> ResultEngine<Money> {
        self.entry_type.signed(self.amount()?)
    }
}

impl TryFrom<Model> for LedgerEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            customer_id: model.customer_id,
            entry_type: LedgerEntryType::try_from(model.entry_type.as_str())?,
            amount: model.amount,
            note: model.note,
            entry_date: model.entry_date,
        })
    }
}

impl From<&LedgerEntry> for ActiveModel {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id),
            customer_id: ActiveValue::Set(entry.customer_id),
            entry_type: ActiveValue::Set(entry.entry_type.as_str().to_string()),
            amount: ActiveValue::Set(entry.amount.clone()),
            note: ActiveValue::Set(entry.note.clone()),
            entry_date: ActiveValue::Set(entry.entry_date),
        }
    }
}

/// Fold the entries of one customer into its balance.
///
/// Ownership is the caller's business. The sum is commutative, so the order of
/// `entries` does not matter; an empty ledger is worth zero.
pub fn compute_balance<'a, I>(entries: I) -> ResultEngine<Money>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    entries
        .into_iter()
        .try_fold(Money::ZERO, |balance, entry| {
            balance.try_add(entry.signed_amount()?)
        })
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub entry_type: String,
    pub amount: String,
    pub note: Option<String>,
    pub entry_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
