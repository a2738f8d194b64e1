pub use cashbook_entries::{CashbookEntry, CashbookEntryType, PaymentMode, UNCATEGORIZED};
pub use categories::{Category, CategoryType};
pub use commands::{CashbookEntryCmd, CashbookFilter, CustomerCmd, LedgerEntryCmd, ProfileUpdate};
pub use customers::{Customer, CustomerBalance};
pub use dates::{DayReference, day_key, normalize_timestamp, parse_timezone};
pub use error::EngineError;
pub use ledger_entries::{LedgerEntry, LedgerEntryType, compute_balance};
pub use money::{Money, parse_amount};
pub use ops::{Engine, EngineBuilder, Ledger};
pub use rollup::{CategorySummary, compute_category_rollup};
pub use summary::{CashbookSummary, compute_summary};
pub use users::User;

mod cashbook_entries;
mod categories;
mod commands;
mod customers;
mod dates;
mod error;
mod ledger_entries;
mod money;
mod ops;
mod rollup;
mod summary;
mod users;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
