use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ProfileUpdate, ResultEngine, User, normalize_timestamp, users,
    util::{normalize_optional_text, normalize_required_name},
};

use super::{Engine, with_tx};

/// Turn an optional profile field into an `ActiveValue`.
///
/// Absent fields stay `NotSet` so the UPDATE only touches what was sent; a
/// blank value clears the column.
fn profile_field(value: Option<&str>) -> ActiveValue<Option<String>> {
    match value {
        Some(value) => ActiveValue::Set(normalize_optional_text(Some(value))),
        None => ActiveValue::NotSet,
    }
}

impl Engine {
    /// Create a new user with an argon2 hashed password.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        profile: ProfileUpdate,
    ) -> ResultEngine<User> {
        let username = normalize_required_name(username, "user")?;
        if password.is_empty() {
            return Err(EngineError::InvalidName(
                "password must not be empty".to_string(),
            ));
        }
        let password_hash = users::hash_password(password)?;

        let created: ResultEngine<User> = with_tx!(self, |db_tx| {
            let exists = users::Entity::find()
                .filter(users::Column::Username.eq(username.as_str()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(username));
            }

            let model = users::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                username: ActiveValue::Set(username.clone()),
                password_hash: ActiveValue::Set(password_hash),
                name: ActiveValue::Set(normalize_optional_text(profile.name.as_deref())),
                business_name: ActiveValue::Set(normalize_optional_text(
                    profile.business_name.as_deref(),
                )),
                phone: ActiveValue::Set(normalize_optional_text(profile.phone.as_deref())),
                email: ActiveValue::Set(normalize_optional_text(profile.email.as_deref())),
                created_at: ActiveValue::Set(normalize_timestamp(Utc::now())),
            }
            .insert(&db_tx)
            .await?;
            Ok(User::from(model))
        });
        let user = created?;

        tracing::info!(username = %user.username, "user created");
        Ok(user)
    }

    /// Check credentials and return the matching user.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<User> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .one(&self.database)
            .await?
            .ok_or(EngineError::Unauthorized)?;

        if !users::verify_password(password, &model.password_hash) {
            return Err(EngineError::Unauthorized);
        }
        Ok(User::from(model))
    }

    /// Return the profile of a user.
    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        let model = self.require_user(&self.database, user_id).await?;
        Ok(User::from(model))
    }

    /// Update only the profile fields present in `update`.
    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> ResultEngine<User> {
        if update.is_empty() {
            return Err(EngineError::InvalidName(
                "provide at least one profile field".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let model = users::ActiveModel {
                id: ActiveValue::Unchanged(user_id),
                name: profile_field(update.name.as_deref()),
                business_name: profile_field(update.business_name.as_deref()),
                phone: profile_field(update.phone.as_deref()),
                email: profile_field(update.email.as_deref()),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Ok(User::from(model))
        })
    }
}
