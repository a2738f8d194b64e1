//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidEntryType`] thrown when an entry type is outside its enum.
//! - [`MalformedAmount`] thrown when an amount cannot be parsed. When the
//!   amount comes from a stored entry the offending entry id is attached.
//! - [`UnauthorizedOrNotFound`] thrown when an item does not exist or belongs
//!   to another user.
//!
//!  [`InvalidEntryType`]: EngineError::InvalidEntryType
//!  [`MalformedAmount`]: EngineError::MalformedAmount
//!  [`UnauthorizedOrNotFound`]: EngineError::UnauthorizedOrNotFound
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid entry type: {0}")]
    InvalidEntryType(String),
    #[error("Invalid payment mode: {0}")]
    InvalidPaymentMode(String),
    #[error("Invalid category type: {0}")]
    InvalidCategoryType(String),
    #[error("Malformed amount \"{raw}\"{}", entry_suffix(.entry_id))]
    MalformedAmount { entry_id: Option<Uuid>, raw: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("\"{0}\" not found!")]
    UnauthorizedOrNotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

fn entry_suffix(entry_id: &Option<Uuid>) -> String {
    match entry_id {
        Some(id) => format!(" in entry {id}"),
        None => String::new(),
    }
}

impl EngineError {
    /// Attach the id of the stored entry that carried a malformed amount.
    ///
    /// Other variants are returned untouched.
    #[must_use]
    pub fn for_entry(self, id: Uuid) -> Self {
        match self {
            Self::MalformedAmount { raw, .. } => Self::MalformedAmount {
                entry_id: Some(id),
                raw,
            },
            other => other,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidEntryType(a), Self::InvalidEntryType(b)) => a == b,
            (Self::InvalidPaymentMode(a), Self::InvalidPaymentMode(b)) => a == b,
            (Self::InvalidCategoryType(a), Self::InvalidCategoryType(b)) => a == b,
            (
                Self::MalformedAmount {
                    entry_id: a_id,
                    raw: a_raw,
                },
                Self::MalformedAmount {
                    entry_id: b_id,
                    raw: b_raw,
                },
            ) => a_id == b_id && a_raw == b_raw,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::UnauthorizedOrNotFound(a), Self::UnauthorizedOrNotFound(b)) => a == b,
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_amount_mentions_entry() {
        let id = Uuid::new_v4();
        let err = EngineError::MalformedAmount {
            entry_id: None,
            raw: "abc".to_string(),
        }
        .for_entry(id);

        assert_eq!(
            err.to_string(),
            format!("Malformed amount \"abc\" in entry {id}")
        );
    }

    #[test]
    fn for_entry_keeps_other_variants() {
        let err = EngineError::InvalidAmount("negative".to_string()).for_entry(Uuid::new_v4());
        assert_eq!(err, EngineError::InvalidAmount("negative".to_string()));
    }
}
