//! Internal helpers for input validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every operation enforces the same rules.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, Money, ResultEngine, money::parse_amount};

/// Trim a name and reject it when empty.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim + NFC normalize a category name. Case is preserved: names are
/// compared case-sensitively.
pub(crate) fn normalize_category_name(value: &str) -> ResultEngine<String> {
    let trimmed = normalize_required_name(value, "category")?;
    Ok(trimmed.nfc().collect())
}

/// Category name attached to an entry: blank means uncategorized.
pub(crate) fn normalize_optional_category(value: Option<&str>) -> Option<String> {
    normalize_optional_text(value).map(|name| name.nfc().collect())
}

/// Trim optional text, mapping blank values to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Parse a user supplied amount and return its canonical stored form.
///
/// Entry amounts are unsigned: the entry type carries the direction.
pub(crate) fn canonical_entry_amount(raw: &str) -> ResultEngine<(Money, String)> {
    let amount = parse_amount(raw)?;
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be >= 0, got {amount}"
        )));
    }
    Ok((amount, amount.to_string()))
}
