use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, categories, customers, users};

use super::Engine;

/// Generates a `require_*` lookup for an entity scoped by `user_id`.
///
/// A row that exists but belongs to someone else is reported exactly like a
/// missing one.
macro_rules! impl_owned_by_user {
    ($require_fn:ident, $entity:path, $model:path, $user_col:expr, $label:literal) => {
        pub(super) async fn $require_fn<C: ConnectionTrait>(
            &self,
            db: &C,
            user_id: Uuid,
            id: Uuid,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(id)
                .filter($user_col.eq(user_id))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::UnauthorizedOrNotFound(format!("{} {id}", $label)))
        }
    };
}

impl Engine {
    impl_owned_by_user!(
        require_customer,
        customers::Entity,
        customers::Model,
        customers::Column::UserId,
        "customer"
    );

    impl_owned_by_user!(
        require_category,
        categories::Entity,
        categories::Model,
        categories::Column::UserId,
        "category"
    );

    pub(super) async fn require_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::UnauthorizedOrNotFound(format!("user {user_id}")))
    }
}
