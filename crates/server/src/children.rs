//! Children API endpoints (read only)

use api_types::{
    child::Child,
    expense::Expense,
    totals::{CurrencyTotal, TotalsSnapshot},
};
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    ServerError,
    expenses::{expense_view, map_currency},
    server::ServerState,
};

/// Handle requests for listing every child
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Child>>, ServerError> {
    let children = state
        .engine
        .list_children()
        .await?
        .into_iter()
        .map(|child| Child {
            id: child.id,
            name: child.name,
        })
        .collect();

    Ok(Json(children))
}

/// Handle requests for the expense history of a child, newest first
pub async fn expenses(
    State(state): State<ServerState>,
    child_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<Expense>>, ServerError> {
    let Path(child_id) = child_id?;
    let expenses = state
        .engine
        .expenses_for_child(child_id)
        .await?
        .into_iter()
        .map(expense_view)
        .collect();

    Ok(Json(expenses))
}

/// Handle requests for the totals snapshot of a child
pub async fn total(
    State(state): State<ServerState>,
    child_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<TotalsSnapshot>, ServerError> {
    let Path(child_id) = child_id?;
    let totals = state.engine.child_totals(child_id).await?;

    let currency_totals = totals
        .per_currency
        .iter()
        .map(|(currency, amount)| {
            let total = amount.to_major();
            (
                map_currency(*currency),
                CurrencyTotal {
                    total,
                    total_gbp: currency.to_gbp(total),
                },
            )
        })
        .collect();

    Ok(Json(TotalsSnapshot {
        child_id: totals.child_id,
        total_amount: totals.total.to_major(),
        total_cash: totals.cash.to_major(),
        total_card: totals.card.to_major(),
        currency_totals,
        grand_total_gbp: totals.grand_total_gbp(),
    }))
}
