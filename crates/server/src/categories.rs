//! Categories API endpoints.

use api_types::category::{CategoryList, CategoryNew, CategoryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        category_type: category.category_type.as_str().to_string(),
        created_at: category.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryList>, ServerError> {
    let categories = state
        .engine
        .categories(user.id)
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(CategoryList { categories }))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(user.id, &payload.name, &payload.category_type)
        .await?;

    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn delete(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
