//! Cashbook balances.
//!
//! Six running figures are folded from the whole entry set of a user in a
//! single pass:
//!
//! | figure | entries |
//! |---|---|
//! | `total_balance` | all |
//! | `online_balance` / `cash_balance` | split by payment mode |
//! | `todays_balance` | entries dated on the reference day |
//! | `todays_online_balance` / `todays_cash_balance` | same day, split by payment mode |
//!
//! so `total = online + cash` and `todays = todays_online + todays_cash` hold by
//! construction.

use crate::{CashbookEntry, Money, PaymentMode, ResultEngine, dates::DayReference};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CashbookSummary {
    pub total_balance: Money,
    pub todays_balance: Money,
    pub online_balance: Money,
    pub cash_balance: Money,
    pub todays_online_balance: Money,
    pub todays_cash_balance: Money,
}

impl CashbookSummary {
    fn apply(&mut self, net: Money, payment_mode: PaymentMode, today: bool) -> ResultEngine<()> {
        self.total_balance = self.total_balance.try_add(net)?;
        match payment_mode {
            PaymentMode::Online => self.online_balance = self.online_balance.try_add(net)?,
            PaymentMode::Cash => self.cash_balance = self.cash_balance.try_add(net)?,
        }

        if today {
            self.todays_balance = self.todays_balance.try_add(net)?;
            match payment_mode {
                PaymentMode::Online => {
                    self.todays_online_balance = self.todays_online_balance.try_add(net)?
                }
                PaymentMode::Cash => {
                    self.todays_cash_balance = self.todays_cash_balance.try_add(net)?
                }
            }
        }
        Ok(())
    }
}

/// Fold `entries` into a [`CashbookSummary`].
///
/// The first entry with an unparsable amount aborts the fold with
/// [`EngineError::MalformedAmount`](crate::EngineError::MalformedAmount)
/// carrying its id; no partial summary is returned. A figure that would leave
/// the `i64` cents range fails with
/// [`EngineError::InvalidAmount`](crate::EngineError::InvalidAmount).
pub fn compute_summary<'a, I>(entries: I, reference: &DayReference) -> ResultEngine<CashbookSummary>
where
    I: IntoIterator<Item = &'a CashbookEntry>,
{
    entries
        .into_iter()
        .try_fold(CashbookSummary::default(), |mut summary, entry| {
            let net = entry.net_amount()?;
            summary.apply(net, entry.payment_mode, reference.is_today(entry.entry_date))?;
            Ok(summary)
        })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::{CashbookEntryType, EngineError};

    fn day(d: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, hour, 0, 0).unwrap()
    }

    fn entry(
        entry_type: CashbookEntryType,
        amount: &str,
        payment_mode: PaymentMode,
        category: &str,
        entry_date: DateTime<Utc>,
    ) -> CashbookEntry {
        CashbookEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            amount: amount.to_string(),
            entry_type,
            category: Some(category.to_string()),
            payment_mode,
            entry_date,
            attachment_url: None,
        }
    }

    fn scenario() -> Vec<CashbookEntry> {
        vec![
            entry(CashbookEntryType::In, "100", PaymentMode::Cash, "Sales", day(1, 10)),
            entry(CashbookEntryType::Out, "30", PaymentMode::Online, "Rent", day(1, 12)),
            entry(CashbookEntryType::In, "50", PaymentMode::Cash, "Sales", day(2, 9)),
        ]
    }

    #[test]
    fn two_day_scenario() {
        let reference = DayReference::at(chrono_tz::UTC, day(2, 18));
        let summary = compute_summary(&scenario(), &reference).unwrap();

        assert_eq!(
            summary,
            CashbookSummary {
                total_balance: Money::new(12000),
                todays_balance: Money::new(5000),
                online_balance: Money::new(-3000),
                cash_balance: Money::new(12000),
                todays_online_balance: Money::ZERO,
                todays_cash_balance: Money::new(5000),
            }
        );
    }

    #[test]
    fn splits_always_add_up() {
        let mut entries = scenario();
        entries.push(entry(CashbookEntryType::Out, "7.25", PaymentMode::Online, "", day(2, 1)));
        entries.push(entry(CashbookEntryType::In, "0.75", PaymentMode::Online, "Tips", day(3, 1)));

        for reference_day in 1..=3 {
            let reference = DayReference::at(chrono_tz::UTC, day(reference_day, 12));
            let summary = compute_summary(&entries, &reference).unwrap();
            assert_eq!(
                summary.total_balance,
                summary.online_balance.try_add(summary.cash_balance).unwrap()
            );
            assert_eq!(
                summary.todays_balance,
                summary
                    .todays_online_balance
                    .try_add(summary.todays_cash_balance)
                    .unwrap()
            );
        }
    }

    #[test]
    fn today_uses_reference_timezone() {
        // 23:00 UTC on the 1st is the 2nd in Rome.
        let entries = vec![entry(
            CashbookEntryType::In,
            "10",
            PaymentMode::Cash,
            "Sales",
            day(1, 23),
        )];

        let utc = DayReference::at(chrono_tz::UTC, day(2, 12));
        let rome = DayReference::at(chrono_tz::Europe::Rome, day(2, 12));

        assert_eq!(compute_summary(&entries, &utc).unwrap().todays_balance, Money::ZERO);
        assert_eq!(
            compute_summary(&entries, &rome).unwrap().todays_balance,
            Money::new(1000)
        );
    }

    #[test]
    fn empty_cashbook_is_all_zero() {
        let reference = DayReference::at(chrono_tz::UTC, day(2, 12));
        assert_eq!(
            compute_summary(&Vec::new(), &reference),
            Ok(CashbookSummary::default())
        );
    }

    #[test]
    fn malformed_amount_aborts_summary() {
        let mut entries = scenario();
        let bad = entry(CashbookEntryType::In, "abc", PaymentMode::Cash, "Sales", day(2, 10));
        let bad_id = bad.id;
        entries.insert(1, bad);

        let reference = DayReference::at(chrono_tz::UTC, day(2, 12));
        assert_eq!(
            compute_summary(&entries, &reference),
            Err(EngineError::MalformedAmount {
                entry_id: Some(bad_id),
                raw: "abc".to_string(),
            })
        );
    }

    #[test]
    fn overflowing_summary_is_an_error() {
        let entries = vec![
            entry(CashbookEntryType::In, "90000000000000000", PaymentMode::Cash, "Sales", day(1, 10)),
            entry(CashbookEntryType::In, "90000000000000000", PaymentMode::Online, "Sales", day(1, 11)),
        ];
        let reference = DayReference::at(chrono_tz::UTC, day(2, 12));
        assert_eq!(
            compute_summary(&entries, &reference),
            Err(EngineError::InvalidAmount("amount too large".to_string()))
        );
    }
}
