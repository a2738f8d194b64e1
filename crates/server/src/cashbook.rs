//! Cashbook entries and their aggregates.

use api_types::{
    cashbook::{CashbookEntries, CashbookEntryNew, CashbookEntryView, CashbookQuery, CashbookSummary},
    category::CategorySummary,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{CashbookEntry, CashbookEntryCmd, CashbookFilter};

use crate::{ServerError, server::ServerState};

fn map_entry(entry: CashbookEntry) -> Result<CashbookEntryView, ServerError> {
    let amount = entry.amount()?;
    Ok(CashbookEntryView {
        id: entry.id,
        amount: amount.to_f64(),
        entry_type: entry.entry_type.as_str().to_string(),
        category: entry.category,
        payment_mode: entry.payment_mode.as_str().to_string(),
        entry_date: entry.entry_date,
        attachment_url: entry.attachment_url,
    })
}

fn map_summary(summary: engine::CashbookSummary) -> CashbookSummary {
    CashbookSummary {
        total_balance: summary.total_balance.to_f64(),
        todays_balance: summary.todays_balance.to_f64(),
        online_balance: summary.online_balance.to_f64(),
        cash_balance: summary.cash_balance.to_f64(),
        todays_online_balance: summary.todays_online_balance.to_f64(),
        todays_cash_balance: summary.todays_cash_balance.to_f64(),
    }
}

fn map_category_summary(summary: engine::CategorySummary) -> CategorySummary {
    CategorySummary {
        name: summary.name,
        id: summary.id,
        total_in: summary.total_in.to_f64(),
        total_out: summary.total_out.to_f64(),
        balance: summary.balance.to_f64(),
        last_entry_date: summary.last_entry_date,
        entries_count: summary.entries_count,
    }
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Query(query): Query<CashbookQuery>,
) -> Result<Json<CashbookEntries>, ServerError> {
    let filter = CashbookFilter {
        from: query.from.map(|from| from.with_timezone(&Utc)),
        to: query.to.map(|to| to.with_timezone(&Utc)),
        category: query.category,
    };
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(ServerError::Generic(
            "`from` must not be after `to`".to_string(),
        ));
    }

    let entries = state
        .engine
        .cashbook_entries(user.id, &filter)
        .await?
        .into_iter()
        .map(map_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(CashbookEntries { entries }))
}

pub async fn add(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<CashbookEntryNew>,
) -> Result<(StatusCode, Json<CashbookEntryView>), ServerError> {
    let mut cmd = CashbookEntryCmd::new(
        payload.entry_type,
        payload.amount.into_raw(),
        payload.payment_mode,
    );
    if let Some(category) = payload.category {
        cmd = cmd.category(category);
    }
    if let Some(entry_date) = payload.entry_date {
        cmd = cmd.entry_date(entry_date.with_timezone(&Utc));
    }
    if let Some(url) = payload.attachment_url {
        cmd = cmd.attachment_url(url);
    }

    let entry = state.engine.add_cashbook_entry(user.id, cmd).await?;
    tracing::info!(
        entry_type = %entry.entry_type,
        payment_mode = %entry.payment_mode,
        amount = %entry.amount,
        "cashbook entry added"
    );

    Ok((StatusCode::CREATED, Json(map_entry(entry)?)))
}

pub async fn summary(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<CashbookSummary>, ServerError> {
    let summary = state.engine.cashbook_summary(user.id).await?;
    Ok(Json(map_summary(summary)))
}

pub async fn categories(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategorySummary>>, ServerError> {
    let rollup = state
        .engine
        .category_rollup(user.id)
        .await?
        .into_iter()
        .map(map_category_summary)
        .collect();

    Ok(Json(rollup))
}
