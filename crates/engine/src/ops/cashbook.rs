use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    CashbookEntry, CashbookEntryCmd, CashbookEntryType, CashbookFilter, CashbookSummary,
    CategorySummary, DayReference, PaymentMode, ResultEngine, UNCATEGORIZED, cashbook_entries,
    compute_category_rollup, compute_summary, normalize_timestamp,
    util::{canonical_entry_amount, normalize_optional_category, normalize_optional_text},
};

use super::Engine;

impl Engine {
    /// Record money coming in or going out.
    ///
    /// A blank category is stored as NULL and rolled up as "Uncategorized".
    pub async fn add_cashbook_entry(
        &self,
        user_id: Uuid,
        cmd: CashbookEntryCmd,
    ) -> ResultEngine<CashbookEntry> {
        let entry_type = CashbookEntryType::try_from(cmd.entry_type.as_str())?;
        let payment_mode = PaymentMode::try_from(cmd.payment_mode.as_str())?;
        let (_, amount) = canonical_entry_amount(&cmd.amount)?;

        let entry = CashbookEntry {
            id: Uuid::new_v4(),
            user_id,
            amount,
            entry_type,
            category: normalize_optional_category(cmd.category.as_deref()),
            payment_mode,
            entry_date: normalize_timestamp(cmd.entry_date.unwrap_or_else(Utc::now)),
            attachment_url: normalize_optional_text(cmd.attachment_url.as_deref()),
        };

        let model = cashbook_entries::ActiveModel::from(&entry)
            .insert(&self.database)
            .await?;
        let entry = CashbookEntry::try_from(model)?;

        tracing::debug!(
            entry_id = %entry.id,
            entry_type = %entry.entry_type,
            payment_mode = %entry.payment_mode,
            category = entry.category_key(),
            "cashbook entry added"
        );
        Ok(entry)
    }

    /// List cashbook entries, newest first.
    ///
    /// The category filter matches the rollup key, so filtering on
    /// "Uncategorized" returns entries stored without a category.
    pub async fn cashbook_entries(
        &self,
        user_id: Uuid,
        filter: &CashbookFilter,
    ) -> ResultEngine<Vec<CashbookEntry>> {
        let mut query = cashbook_entries::Entity::find()
            .filter(cashbook_entries::Column::UserId.eq(user_id));
        if let Some(from) = filter.from {
            query = query.filter(cashbook_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(cashbook_entries::Column::EntryDate.lte(to));
        }

        let entries = query
            .order_by_desc(cashbook_entries::Column::EntryDate)
            .all(&self.database)
            .await?
            .into_iter()
            .map(CashbookEntry::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(match filter.category.as_deref() {
            Some(category) => {
                let category = normalize_optional_category(Some(category))
                    .unwrap_or_else(|| UNCATEGORIZED.to_string());
                entries
                    .into_iter()
                    .filter(|entry| entry.category_key() == category)
                    .collect()
            }
            None => entries,
        })
    }

    /// The six running balances of the user's cashbook.
    ///
    /// "Today" is captured once, in the engine timezone, before folding.
    pub async fn cashbook_summary(&self, user_id: Uuid) -> ResultEngine<CashbookSummary> {
        let reference = DayReference::now(self.timezone);
        self.cashbook_summary_at(user_id, &reference).await
    }

    /// Same as [`Engine::cashbook_summary`] with an explicit reference day.
    pub async fn cashbook_summary_at(
        &self,
        user_id: Uuid,
        reference: &DayReference,
    ) -> ResultEngine<CashbookSummary> {
        let entries = self.all_cashbook_entries(user_id).await?;
        compute_summary(&entries, reference)
    }

    /// Per-category totals, most recently active category first.
    pub async fn category_rollup(&self, user_id: Uuid) -> ResultEngine<Vec<CategorySummary>> {
        let entries = self.all_cashbook_entries(user_id).await?;
        let declared = self.categories(user_id).await?;

        compute_category_rollup(&entries, &declared)
    }

    async fn all_cashbook_entries(&self, user_id: Uuid) -> ResultEngine<Vec<CashbookEntry>> {
        cashbook_entries::Entity::find()
            .filter(cashbook_entries::Column::UserId.eq(user_id))
            .order_by_asc(cashbook_entries::Column::EntryDate)
            .order_by_asc(cashbook_entries::Column::Category)
            .order_by_asc(cashbook_entries::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(CashbookEntry::try_from)
            .collect()
    }
}
