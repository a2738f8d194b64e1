use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A monetary input: either a JSON number (`12.5`) or a decimal string
/// (`"12.50"`, `"12,50"`).
///
/// The server forwards the textual form to the engine, which owns parsing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Amount {
    /// Textual form of the amount, as sent by the client.
    pub fn into_raw(self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text,
        }
    }
}

/// Response body for create operations that only return the new id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: Uuid,
}

pub mod profile {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Profile {
        pub id: Uuid,
        pub username: String,
        pub name: Option<String>,
        pub business_name: Option<String>,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    /// Fields to change. Missing fields are left untouched; an empty string
    /// clears the field.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProfileUpdate {
        pub name: Option<String>,
        pub business_name: Option<String>,
        pub phone: Option<String>,
        pub email: Option<String>,
    }
}

pub mod customer {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomerNew {
        pub name: String,
        pub phone: Option<String>,
        pub address: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CustomerView {
        pub id: Uuid,
        pub name: String,
        pub phone: Option<String>,
        pub address: Option<String>,
        pub created_at: DateTime<Utc>,
        /// Debits minus credits. Positive means the customer owes money.
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomerList {
        pub customers: Vec<CustomerView>,
    }
}

pub mod ledger {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LedgerEntryNew {
        /// `DEBIT` or `CREDIT`.
        pub entry_type: String,
        pub amount: Amount,
        pub note: Option<String>,
        /// RFC3339 timestamp. Defaults to now.
        pub entry_date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LedgerEntryView {
        pub id: Uuid,
        pub customer_id: Uuid,
        pub entry_type: String,
        pub amount: f64,
        pub note: Option<String>,
        pub entry_date: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LedgerView {
        pub entries: Vec<LedgerEntryView>,
        pub balance: f64,
    }
}

pub mod cashbook {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CashbookEntryNew {
        /// `IN` or `OUT`.
        pub entry_type: String,
        pub amount: Amount,
        /// `CASH` or `ONLINE`.
        pub payment_mode: String,
        pub category: Option<String>,
        /// RFC3339 timestamp. Defaults to now.
        pub entry_date: Option<DateTime<FixedOffset>>,
        pub attachment_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CashbookEntryView {
        pub id: Uuid,
        pub amount: f64,
        pub entry_type: String,
        pub category: Option<String>,
        pub payment_mode: String,
        pub entry_date: DateTime<Utc>,
        pub attachment_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashbookEntries {
        pub entries: Vec<CashbookEntryView>,
    }

    /// Query string of `GET /cashbook`. Date bounds are inclusive.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CashbookQuery {
        pub from: Option<DateTime<FixedOffset>>,
        pub to: Option<DateTime<FixedOffset>>,
        pub category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CashbookSummary {
        pub total_balance: f64,
        pub todays_balance: f64,
        pub online_balance: f64,
        pub cash_balance: f64,
        pub todays_online_balance: f64,
        pub todays_cash_balance: f64,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        /// `IN`, `OUT` or `BOTH`.
        #[serde(rename = "type")]
        pub category_type: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        #[serde(rename = "type")]
        pub category_type: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryList {
        pub categories: Vec<CategoryView>,
    }

    /// Totals of one category. `id` is missing for names that only appear on
    /// entries.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySummary {
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<Uuid>,
        pub total_in: f64,
        pub total_out: f64,
        pub balance: f64,
        pub last_entry_date: DateTime<Utc>,
        pub entries_count: u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_numbers_and_strings() {
        let number: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(number.into_raw(), "12.5");

        let integer: Amount = serde_json::from_str("100").unwrap();
        assert_eq!(integer.into_raw(), "100");

        let text: Amount = serde_json::from_str("\"12,50\"").unwrap();
        assert_eq!(text.into_raw(), "12,50");
    }

    #[test]
    fn synthesized_category_summaries_omit_id() {
        let summary = category::CategorySummary {
            name: "Uncategorized".to_string(),
            id: None,
            total_in: 0.0,
            total_out: 20.0,
            balance: -20.0,
            last_entry_date: DateTime::<Utc>::UNIX_EPOCH,
            entries_count: 1,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["total_out"], 20.0);
        assert_eq!(value["entries_count"], 1);
    }

    #[test]
    fn summary_fields_are_camel_case() {
        let summary = cashbook::CashbookSummary {
            total_balance: 120.0,
            todays_balance: 50.0,
            online_balance: -30.0,
            cash_balance: 150.0,
            todays_online_balance: 0.0,
            todays_cash_balance: 50.0,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["totalBalance"], 120.0);
        assert_eq!(value["todaysCashBalance"], 50.0);
        assert_eq!(value["todaysOnlineBalance"], 0.0);
    }
}
