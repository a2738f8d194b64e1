use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Category, CategoryType, EngineError, ResultEngine, categories, normalize_timestamp,
    util::normalize_category_name,
};

use super::{Engine, with_tx};

impl Engine {
    /// Declare a category for the user's cashbook.
    ///
    /// Names are unique per user after trimming and NFC normalization; the
    /// comparison is case-sensitive.
    pub async fn create_category(
        &self,
        user_id: Uuid,
        name: &str,
        category_type: &str,
    ) -> ResultEngine<Category> {
        let name = normalize_category_name(name)?;
        let category_type = CategoryType::try_from(category_type)?;

        let created: ResultEngine<Category> = with_tx!(self, |db_tx| {
            let exists = categories::Entity::find()
                .filter(categories::Column::UserId.eq(user_id))
                .filter(categories::Column::Name.eq(name.as_str()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let model = categories::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                user_id: ActiveValue::Set(user_id),
                name: ActiveValue::Set(name.clone()),
                category_type: ActiveValue::Set(category_type.as_str().to_string()),
                created_at: ActiveValue::Set(normalize_timestamp(Utc::now())),
            }
            .insert(&db_tx)
            .await?;
            Category::try_from(model)
        });
        let category = created?;

        tracing::debug!(
            category_id = %category.id,
            name = %category.name,
            category_type = %category.category_type,
            "category created"
        );
        Ok(category)
    }

    /// The user's declared categories, oldest first.
    pub async fn categories(&self, user_id: Uuid) -> ResultEngine<Vec<Category>> {
        categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .order_by_asc(categories::Column::CreatedAt)
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    /// Remove a declared category.
    ///
    /// Entries keep their category name and keep showing up in the rollup.
    pub async fn delete_category(&self, user_id: Uuid, category_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_category(&db_tx, user_id, category_id).await?;
            categories::Entity::delete_by_id(category_id)
                .exec(&db_tx)
                .await?;
            tracing::info!(%category_id, "category deleted");
            Ok(())
        })
    }
}
