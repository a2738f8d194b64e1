use std::{fmt, str::FromStr};

use crate::{EngineError, ResultEngine};

/// Signed money amount represented as **integer cents**.
///
/// Every amount that enters the engine (stored entry amounts, request
/// payloads) goes through [`parse_amount`], so balances are exact sums and
/// never drift the way floating point does.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing accepts `.` or `,` as decimal separator and rejects more than two
/// decimals:
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Checked negation (returns `None` for `i64::MIN` cents).
    #[must_use]
    pub fn checked_neg(self) -> Option<Money> {
        self.0.checked_neg().map(Money)
    }

    /// Addition that fails with [`EngineError::InvalidAmount`] on overflow.
    pub fn try_add(self, rhs: Money) -> ResultEngine<Money> {
        self.checked_add(rhs).ok_or_else(too_large)
    }

    /// Subtraction that fails with [`EngineError::InvalidAmount`] on overflow.
    pub fn try_sub(self, rhs: Money) -> ResultEngine<Money> {
        self.checked_sub(rhs).ok_or_else(too_large)
    }

    /// Amount in major units, for JSON responses.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

pub(crate) fn too_large() -> EngineError {
    EngineError::InvalidAmount("amount too large".to_string())
}

/// Parse a stored or user supplied decimal amount.
///
/// Fails with [`EngineError::MalformedAmount`] on anything that is not a
/// decimal number with at most two fractional digits. The caller attaches the
/// entry id with [`EngineError::for_entry`] when the value comes from storage.
pub fn parse_amount(raw: &str) -> Result<Money, EngineError> {
    raw.parse()
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// Rejects empty strings, non digits and more than 2 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || EngineError::MalformedAmount {
            entry_id: None,
            raw: s.to_string(),
        };

        let trimmed = s.trim();
        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(malformed)?;
        let cents_str = parts.next();
        if parts.next().is_some() {
            return Err(malformed());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        let units: i64 = units_str.parse().map_err(|_| malformed())?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(malformed());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| malformed())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| malformed())?,
                    _ => return Err(malformed()),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(malformed)?;

        Ok(Money(if negative { -total } else { total }))
    }
}
