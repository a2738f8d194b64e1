use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Customer, CustomerBalance, CustomerCmd, LedgerEntry, Money, ResultEngine, compute_balance,
    customers, ledger_entries, normalize_timestamp,
    util::{normalize_optional_text, normalize_required_name},
};

use super::{Engine, with_tx};

impl Engine {
    /// Add a customer to the user's book.
    pub async fn create_customer(&self, user_id: Uuid, cmd: CustomerCmd) -> ResultEngine<Customer> {
        let name = normalize_required_name(&cmd.name, "customer")?;
        let model = customers::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name),
            phone: ActiveValue::Set(normalize_optional_text(cmd.phone.as_deref())),
            address: ActiveValue::Set(normalize_optional_text(cmd.address.as_deref())),
            created_at: ActiveValue::Set(normalize_timestamp(Utc::now())),
        }
        .insert(&self.database)
        .await?;

        tracing::debug!(customer_id = %model.id, "customer created");
        Ok(Customer::from(model))
    }

    /// List the user's customers by name, each with its ledger balance.
    pub async fn customers(&self, user_id: Uuid) -> ResultEngine<Vec<CustomerBalance>> {
        let models = customers::Entity::find()
            .filter(customers::Column::UserId.eq(user_id))
            .order_by_asc(customers::Column::Name)
            .all(&self.database)
            .await?;

        let ids: Vec<Uuid> = models.iter().map(|model| model.id).collect();
        let mut ledgers: HashMap<Uuid, Vec<LedgerEntry>> = HashMap::new();
        if !ids.is_empty() {
            let entry_models = ledger_entries::Entity::find()
                .filter(ledger_entries::Column::CustomerId.is_in(ids))
                .all(&self.database)
                .await?;
            for model in entry_models {
                let entry = LedgerEntry::try_from(model)?;
                ledgers.entry(entry.customer_id).or_default().push(entry);
            }
        }

        models
            .into_iter()
            .map(|model| -> ResultEngine<CustomerBalance> {
                let balance = match ledgers.get(&model.id) {
                    Some(entries) => compute_balance(entries)?,
                    None => Money::ZERO,
                };
                Ok(CustomerBalance {
                    customer: Customer::from(model),
                    balance,
                })
            })
            .collect()
    }

    /// Return one customer with its ledger balance.
    pub async fn customer(&self, user_id: Uuid, customer_id: Uuid) -> ResultEngine<CustomerBalance> {
        with_tx!(self, |db_tx| {
            let model = self.require_customer(&db_tx, user_id, customer_id).await?;
            let ledger = self.customer_ledger(&db_tx, customer_id).await?;
            Ok(CustomerBalance {
                customer: Customer::from(model),
                balance: ledger.balance,
            })
        })
    }

    /// Delete a customer together with its ledger.
    pub async fn delete_customer(&self, user_id: Uuid, customer_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_customer(&db_tx, user_id, customer_id).await?;
            let removed = ledger_entries::Entity::delete_many()
                .filter(ledger_entries::Column::CustomerId.eq(customer_id))
                .exec(&db_tx)
                .await?;
            customers::Entity::delete_by_id(customer_id)
                .exec(&db_tx)
                .await?;
            tracing::info!(
                %customer_id,
                entries = removed.rows_affected,
                "customer deleted"
            );
            Ok(())
        })
    }
}
