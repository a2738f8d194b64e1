//! Ledger of a single customer.

use api_types::ledger::{LedgerEntryNew, LedgerEntryView, LedgerView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{LedgerEntry, LedgerEntryCmd};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_entry(entry: LedgerEntry) -> Result<LedgerEntryView, ServerError> {
    let amount = entry.amount()?;
    Ok(LedgerEntryView {
        id: entry.id,
        customer_id: entry.customer_id,
        entry_type: entry.entry_type.as_str().to_string(),
        amount: amount.to_f64(),
        note: entry.note,
        entry_date: entry.entry_date,
    })
}

pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<LedgerView>, ServerError> {
    let ledger = state.engine.ledger(user.id, customer_id).await?;
    let entries = ledger
        .entries
        .into_iter()
        .map(map_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(LedgerView {
        entries,
        balance: ledger.balance.to_f64(),
    }))
}

pub async fn append(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(customer_id): Path<Uuid>,
    Json(payload): Json<LedgerEntryNew>,
) -> Result<(StatusCode, Json<LedgerEntryView>), ServerError> {
    let mut cmd = LedgerEntryCmd::new(customer_id, payload.entry_type, payload.amount.into_raw());
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }
    if let Some(entry_date) = payload.entry_date {
        cmd = cmd.entry_date(entry_date.with_timezone(&Utc));
    }

    let entry = state.engine.append_ledger_entry(user.id, cmd).await?;
    tracing::info!(
        customer_id = %entry.customer_id,
        entry_type = %entry.entry_type,
        amount = %entry.amount,
        "ledger entry appended"
    );

    Ok((StatusCode::CREATED, Json(map_entry(entry)?)))
}

/// Entries are immutable: editing one is not supported.
pub async fn update(
    Extension(_user): Extension<engine::User>,
    Path((_customer_id, _entry_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    Err(ServerError::NotImplemented("ledger entry update"))
}

pub async fn delete(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path((customer_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_ledger_entry(user.id, customer_id, entry_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
