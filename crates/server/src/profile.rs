//! The authenticated user's own profile.

use api_types::profile::{Profile, ProfileUpdate};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_profile(user: engine::User) -> Profile {
    Profile {
        id: user.id,
        username: user.username,
        name: user.name,
        business_name: user.business_name,
        phone: user.phone,
        email: user.email,
        created_at: user.created_at,
    }
}

pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<Profile>, ServerError> {
    let user = state.engine.user(user.id).await?;
    Ok(Json(map_profile(user)))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ServerError> {
    let update = engine::ProfileUpdate {
        name: payload.name,
        business_name: payload.business_name,
        phone: payload.phone,
        email: payload.email,
    };
    let user = state.engine.update_profile(user.id, update).await?;
    Ok(Json(map_profile(user)))
}
