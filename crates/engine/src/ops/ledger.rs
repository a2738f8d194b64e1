use chrono::Utc;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, LedgerEntry, LedgerEntryCmd, LedgerEntryType, ResultEngine, compute_balance,
    ledger_entries, normalize_timestamp,
    util::{canonical_entry_amount, normalize_optional_text},
};

use super::{Engine, Ledger, with_tx};

impl Engine {
    /// Append a DEBIT or CREDIT entry to a customer's ledger.
    ///
    /// The entry type and amount are validated before the store is touched.
    /// The customer must belong to `user_id`, otherwise nothing is written.
    /// A missing date defaults to now; every date is truncated to seconds.
    pub async fn append_ledger_entry(
        &self,
        user_id: Uuid,
        cmd: LedgerEntryCmd,
    ) -> ResultEngine<LedgerEntry> {
        let entry_type = LedgerEntryType::try_from(cmd.entry_type.as_str())?;
        let (_, amount) = canonical_entry_amount(&cmd.amount)?;
        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            customer_id: cmd.customer_id,
            entry_type,
            amount,
            note: normalize_optional_text(cmd.note.as_deref()),
            entry_date: normalize_timestamp(cmd.entry_date.unwrap_or_else(Utc::now)),
        };

        let appended: ResultEngine<LedgerEntry> = with_tx!(self, |db_tx| {
            self.require_customer(&db_tx, user_id, entry.customer_id)
                .await?;
            let model = ledger_entries::ActiveModel::from(&entry)
                .insert(&db_tx)
                .await?;
            LedgerEntry::try_from(model)
        });
        let entry = appended?;

        tracing::debug!(
            entry_id = %entry.id,
            customer_id = %entry.customer_id,
            entry_type = %entry.entry_type,
            "ledger entry appended"
        );
        Ok(entry)
    }

    /// Return the ledger of a customer, oldest entry first, with its balance.
    pub async fn ledger(&self, user_id: Uuid, customer_id: Uuid) -> ResultEngine<Ledger> {
        with_tx!(self, |db_tx| {
            self.require_customer(&db_tx, user_id, customer_id).await?;
            self.customer_ledger(&db_tx, customer_id).await
        })
    }

    /// Entries of an already authorized customer, folded into its balance.
    pub(super) async fn customer_ledger<C: ConnectionTrait>(
        &self,
        db: &C,
        customer_id: Uuid,
    ) -> ResultEngine<Ledger> {
        let entries = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::CustomerId.eq(customer_id))
            .order_by_asc(ledger_entries::Column::EntryDate)
            .all(db)
            .await?
            .into_iter()
            .map(LedgerEntry::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        let balance = compute_balance(&entries)?;

        Ok(Ledger { entries, balance })
    }

    /// Delete one entry of a customer's ledger.
    pub async fn delete_ledger_entry(
        &self,
        user_id: Uuid,
        customer_id: Uuid,
        entry_id: Uuid,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_customer(&db_tx, user_id, customer_id).await?;
            let result = ledger_entries::Entity::delete_many()
                .filter(ledger_entries::Column::Id.eq(entry_id))
                .filter(ledger_entries::Column::CustomerId.eq(customer_id))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::UnauthorizedOrNotFound(format!(
                    "ledger entry {entry_id}"
                )));
            }
            Ok(())
        })
    }
}
