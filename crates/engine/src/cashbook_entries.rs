//! Cashbook entries: money coming in or going out of the business.

use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    money::{parse_amount, too_large},
};

/// Category key of entries stored without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CashbookEntryType {
    In,
    Out,
}

impl CashbookEntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    /// Apply the entry sign to `amount`.
    pub fn signed(self, amount: Money) -> ResultEngine<Money> {
        match self {
            Self::In => Ok(amount),
            Self::Out => amount.checked_neg().ok_or_else(too_large),
        }
    }
}

impl fmt::Display for CashbookEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CashbookEntryType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            other => Err(EngineError::InvalidEntryType(format!(
                "cashbook entries are IN or OUT, got {other:?}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    Cash,
    Online,
}

impl PaymentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Online => "ONLINE",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentMode {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "CASH" => Ok(Self::Cash),
            "ONLINE" => Ok(Self::Online),
            other => Err(EngineError::InvalidPaymentMode(format!(
                "payment mode is CASH or ONLINE, got {other:?}"
            ))),
        }
    }
}

/// A cashbook movement of a user.
///
/// `amount` is the stored decimal text, parsed while aggregating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashbookEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: String,
    pub entry_type: CashbookEntryType,
    pub category: Option<String>,
    pub payment_mode: PaymentMode,
    pub entry_date: DateTime<Utc>,
    pub attachment_url: Option<String>,
}

impl CashbookEntry {
    /// Parsed, unsigned amount.
    pub fn amount(&self) -> ResultEngine<Money> {
        parse_amount(&self.amount).map_err(|err| err.for_entry(self.id))
    }

    /// `+amount` for `IN`, `-amount` for `OUT`.
    pub fn net_amount(&self) -> ResultEngine<Money> {
        self.entry_type.signed(self.amount()?)
    }

    /// Name the entry is rolled up under.
    pub fn category_key(&self) -> &str {
        self.category
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

impl TryFrom<Model> for CashbookEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            entry_type: CashbookEntryType::try_from(model.entry_type.as_str())?,
            category: model.category,
            payment_mode: PaymentMode::try_from(model.payment_mode.as_str())?,
            entry_date: model.entry_date,
            attachment_url: model.attachment_url,
        })
    }
}

impl From<&CashbookEntry> for ActiveModel {
    fn from(entry: &CashbookEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id),
            user_id: ActiveValue::Set(entry.user_id),
            amount: ActiveValue::Set(entry.amount.clone()),
            entry_type: ActiveValue::Set(entry.entry_type.as_str().to_string()),
            category: ActiveValue::Set(entry.category.clone()),
            payment_mode: ActiveValue::Set(entry.payment_mode.as_str().to_string()),
            entry_date: ActiveValue::Set(entry.entry_date),
            attachment_url: ActiveValue::Set(entry.attachment_url.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cashbook_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: String,
    pub entry_type: String,
    pub category: Option<String>,
    pub payment_mode: String,
    pub entry_date: DateTimeUtc,
    pub attachment_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_category(category: Option<&str>) -> CashbookEntry {
        CashbookEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            amount: "1".to_string(),
            entry_type: CashbookEntryType::In,
            category: category.map(ToString::to_string),
            payment_mode: PaymentMode::Cash,
            entry_date: Utc::now(),
            attachment_url: None,
        }
    }

    #[test]
    fn missing_category_is_uncategorized() {
        assert_eq!(with_category(None).category_key(), UNCATEGORIZED);
        assert_eq!(with_category(Some("")).category_key(), UNCATEGORIZED);
        assert_eq!(with_category(Some("Sales")).category_key(), "Sales");
    }

    #[test]
    fn payment_mode_rejects_unknown() {
        assert_eq!(PaymentMode::try_from("ONLINE"), Ok(PaymentMode::Online));
        assert!(matches!(
            PaymentMode::try_from("card"),
            Err(EngineError::InvalidPaymentMode(_))
        ));
    }

    #[test]
    fn out_entries_are_negative() {
        let mut entry = with_category(None);
        entry.amount = "12.50".to_string();
        assert_eq!(entry.net_amount(), Ok(Money::new(1250)));
        entry.entry_type = CashbookEntryType::Out;
        assert_eq!(entry.net_amount(), Ok(Money::new(-1250)));
    }
}
