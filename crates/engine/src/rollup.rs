//! Per-category rollup of the cashbook.
//!
//! Declared categories are seeded first, in the order they are given, then
//! every entry is folded into the summary named by its category. Entries whose
//! category was never declared (legacy rows, or no category at all) get a
//! summary synthesized on the fly, without an id. The result is ordered by
//! most recent activity; ties keep seeding/first-seen order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{CashbookEntry, CashbookEntryType, Category, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    /// `None` for categories inferred from entries only.
    pub id: Option<Uuid>,
    pub total_in: Money,
    pub total_out: Money,
    pub balance: Money,
    pub last_entry_date: DateTime<Utc>,
    pub entries_count: u64,
}

impl CategorySummary {
    fn seeded(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            id: Some(category.id),
            total_in: Money::ZERO,
            total_out: Money::ZERO,
            balance: Money::ZERO,
            last_entry_date: category.created_at,
            entries_count: 0,
        }
    }

    fn inferred(name: &str, first_seen: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            id: None,
            total_in: Money::ZERO,
            total_out: Money::ZERO,
            balance: Money::ZERO,
            last_entry_date: first_seen,
            entries_count: 0,
        }
    }

    fn apply(
        &mut self,
        entry_type: CashbookEntryType,
        amount: Money,
        entry_date: DateTime<Utc>,
    ) -> ResultEngine<()> {
        match entry_type {
            CashbookEntryType::In => {
                self.total_in = self.total_in.try_add(amount)?;
                self.balance = self.balance.try_add(amount)?;
            }
            CashbookEntryType::Out => {
                self.total_out = self.total_out.try_add(amount)?;
                self.balance = self.balance.try_sub(amount)?;
            }
        }
        self.last_entry_date = self.last_entry_date.max(entry_date);
        self.entries_count += 1;
        Ok(())
    }
}

/// Name-keyed summaries that remember insertion order.
#[derive(Default)]
struct Rollup {
    summaries: Vec<CategorySummary>,
    index: HashMap<String, usize>,
}

impl Rollup {
    fn seed(&mut self, category: &Category) {
        // A second declaration with the same name folds into the first one.
        if self.index.contains_key(&category.name) {
            return;
        }
        self.index
            .insert(category.name.clone(), self.summaries.len());
        self.summaries.push(CategorySummary::seeded(category));
    }

    fn summary_mut(&mut self, name: &str, first_seen: DateTime<Utc>) -> &mut CategorySummary {
        let position = match self.index.get(name) {
            Some(position) => *position,
            None => {
                let position = self.summaries.len();
                self.index.insert(name.to_string(), position);
                self.summaries
                    .push(CategorySummary::inferred(name, first_seen));
                position
            }
        };
        &mut self.summaries[position]
    }

    fn into_sorted(self) -> Vec<CategorySummary> {
        let mut summaries = self.summaries;
        // `sort_by` is stable: equal dates keep insertion order.
        summaries.sort_by(|a, b| b.last_entry_date.cmp(&a.last_entry_date));
        summaries
    }
}

/// Roll `entries` up by category name, seeding one summary per `categories`
/// item.
///
/// A malformed stored amount aborts the rollup with
/// [`EngineError::MalformedAmount`](crate::EngineError::MalformedAmount); a
/// total that would overflow aborts it with
/// [`EngineError::InvalidAmount`](crate::EngineError::InvalidAmount).
pub fn compute_category_rollup<'a, E, C>(
    entries: E,
    categories: C,
) -> ResultEngine<Vec<CategorySummary>>
where
    E: IntoIterator<Item = &'a CashbookEntry>,
    C: IntoIterator<Item = &'a Category>,
{
    let mut rollup = Rollup::default();
    for category in categories {
        rollup.seed(category);
    }

    for entry in entries {
        let amount = entry.amount()?;
        rollup
            .summary_mut(entry.category_key(), entry.entry_date)
            .apply(entry.entry_type, amount, entry.entry_date)?;
    }

    Ok(rollup.into_sorted())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{CategoryType, EngineError, PaymentMode, UNCATEGORIZED};

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 8, 0, 0).unwrap()
    }

    fn category(name: &str, created_at: DateTime<Utc>) -> Category {
        Category {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.to_string(),
            category_type: CategoryType::Both,
            created_at,
        }
    }

    fn entry(
        entry_type: CashbookEntryType,
        amount: &str,
        category: Option<&str>,
        entry_date: DateTime<Utc>,
    ) -> CashbookEntry {
        CashbookEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            amount: amount.to_string(),
            entry_type,
            category: category.map(ToString::to_string),
            payment_mode: PaymentMode::Cash,
            entry_date,
            attachment_url: None,
        }
    }

    #[test]
    fn empty_category_keeps_creation_date() {
        let sales = category("Sales", at(3));
        let rollup = compute_category_rollup(&Vec::new(), &vec![sales.clone()]).unwrap();

        assert_eq!(
            rollup,
            vec![CategorySummary {
                name: "Sales".to_string(),
                id: Some(sales.id),
                total_in: Money::ZERO,
                total_out: Money::ZERO,
                balance: Money::ZERO,
                last_entry_date: at(3),
                entries_count: 0,
            }]
        );
    }

    #[test]
    fn entry_lands_in_seeded_category() {
        let sales = category("Sales", at(1));
        let entries = vec![entry(CashbookEntryType::In, "50", Some("Sales"), at(2))];

        let rollup = compute_category_rollup(&entries, &vec![sales.clone()]).unwrap();
        assert_eq!(rollup.len(), 1);
        let summary = &rollup[0];
        assert_eq!(summary.id, Some(sales.id));
        assert_eq!(summary.total_in, Money::new(5000));
        assert_eq!(summary.total_out, Money::ZERO);
        assert_eq!(summary.balance, Money::new(5000));
        assert_eq!(summary.entries_count, 1);
        assert_eq!(summary.last_entry_date, at(2));
    }

    #[test]
    fn uncategorized_entries_are_synthesized_without_id() {
        let entries = vec![
            entry(CashbookEntryType::Out, "12", None, at(4)),
            entry(CashbookEntryType::In, "2", Some(""), at(5)),
        ];

        let rollup = compute_category_rollup(&entries, &Vec::new()).unwrap();
        assert_eq!(rollup.len(), 1);
        let summary = &rollup[0];
        assert_eq!(summary.name, UNCATEGORIZED);
        assert_eq!(summary.id, None);
        assert_eq!(summary.entries_count, 2);
        assert_eq!(summary.total_in, Money::new(200));
        assert_eq!(summary.total_out, Money::new(1200));
        assert_eq!(summary.balance, Money::new(-1000));
        assert_eq!(summary.last_entry_date, at(5));
    }

    #[test]
    fn legacy_category_takes_first_entry_date_then_max() {
        let entries = vec![
            entry(CashbookEntryType::In, "1", Some("Old"), at(9)),
            entry(CashbookEntryType::In, "1", Some("Old"), at(7)),
        ];
        let rollup = compute_category_rollup(&entries, &Vec::new()).unwrap();
        assert_eq!(rollup[0].last_entry_date, at(9));
    }

    #[test]
    fn most_recent_first_with_stable_ties() {
        let rent = category("Rent", at(1));
        let sales = category("Sales", at(1));
        let misc = category("Misc", at(1));
        let entries = vec![entry(CashbookEntryType::Out, "10", Some("Misc"), at(6))];

        let rollup =
            compute_category_rollup(&entries, &vec![rent, sales, misc]).unwrap();
        let names: Vec<&str> = rollup.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Misc", "Rent", "Sales"]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let sales = category("Sales", at(1));
        let entries = vec![entry(CashbookEntryType::In, "5", Some("sales"), at(2))];

        let rollup = compute_category_rollup(&entries, &vec![sales]).unwrap();
        let names: Vec<&str> = rollup.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["sales", "Sales"]);
        assert_eq!(rollup[0].id, None);
    }

    #[test]
    fn malformed_amount_aborts_rollup() {
        let bad = entry(CashbookEntryType::In, "abc", Some("Sales"), at(2));
        let bad_id = bad.id;
        let entries = vec![entry(CashbookEntryType::In, "5", Some("Sales"), at(1)), bad];

        assert_eq!(
            compute_category_rollup(&entries, &Vec::new()),
            Err(EngineError::MalformedAmount {
                entry_id: Some(bad_id),
                raw: "abc".to_string(),
            })
        );
    }

    #[test]
    fn overflowing_category_total_is_an_error() {
        let entries = vec![
            entry(CashbookEntryType::Out, "90000000000000000", Some("Rent"), at(1)),
            entry(CashbookEntryType::Out, "90000000000000000", Some("Rent"), at(2)),
        ];
        assert_eq!(
            compute_category_rollup(&entries, &Vec::new()),
            Err(EngineError::InvalidAmount("amount too large".to_string()))
        );
    }
}
