//! Customers of the authenticated user.

use api_types::{
    Created,
    customer::{CustomerList, CustomerNew, CustomerView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{CustomerBalance, CustomerCmd};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_customer(entry: CustomerBalance) -> CustomerView {
    let CustomerBalance { customer, balance } = entry;
    CustomerView {
        id: customer.id,
        name: customer.name,
        phone: customer.phone,
        address: customer.address,
        created_at: customer.created_at,
        balance: balance.to_f64(),
    }
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<CustomerList>, ServerError> {
    let customers = state
        .engine
        .customers(user.id)
        .await?
        .into_iter()
        .map(map_customer)
        .collect();

    Ok(Json(CustomerList { customers }))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<CustomerNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let cmd = CustomerCmd {
        name: payload.name,
        phone: payload.phone,
        address: payload.address,
    };
    let customer = state.engine.create_customer(user.id, cmd).await?;

    Ok((StatusCode::CREATED, Json(Created { id: customer.id })))
}

pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerView>, ServerError> {
    let customer = state.engine.customer(user.id, id).await?;
    Ok(Json(map_customer(customer)))
}

pub async fn delete(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_customer(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
