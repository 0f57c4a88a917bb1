//! Expenses API endpoints (admin only)

use api_types::expense::{Expense, ExpenseDeleted, ExpenseNew, ExpenseUpdate};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use chrono::Utc;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_currency(currency: engine::Currency) -> api_types::Currency {
    match currency {
        engine::Currency::Gbp => api_types::Currency::Gbp,
        engine::Currency::Eur => api_types::Currency::Eur,
        engine::Currency::Mad => api_types::Currency::Mad,
    }
}

fn engine_currency(currency: api_types::Currency) -> engine::Currency {
    match currency {
        api_types::Currency::Gbp => engine::Currency::Gbp,
        api_types::Currency::Eur => engine::Currency::Eur,
        api_types::Currency::Mad => engine::Currency::Mad,
    }
}

fn map_category(category: engine::Category) -> api_types::Category {
    match category {
        engine::Category::Cash => api_types::Category::Cash,
        engine::Category::Card => api_types::Category::Card,
    }
}

fn engine_category(category: api_types::Category) -> engine::Category {
    match category {
        api_types::Category::Cash => engine::Category::Cash,
        api_types::Category::Card => engine::Category::Card,
    }
}

pub(crate) fn expense_view(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        amount: expense.amount.to_major(),
        description: expense.description,
        date: expense.date.fixed_offset(),
        child_id: expense.child_id,
        category: map_category(expense.category),
        currency: map_currency(expense.currency),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Json(payload) = payload?;
    let expense = state
        .engine
        .create_expense(engine::NewExpense {
            child_id: payload.child_id,
            amount: payload.amount,
            description: payload.description,
            date: payload.date.with_timezone(&Utc),
            category: payload.category.map(engine_category),
            currency: payload.currency.map(engine_currency),
        })
        .await?;

    tracing::info!(
        expense_id = expense.id,
        child_id = expense.child_id,
        "expense added"
    );
    Ok(Json(expense_view(expense)))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let expense = state
        .engine
        .update_expense(
            id,
            engine::ExpensePatch {
                amount: payload.amount,
                description: payload.description,
                category: payload.category.map(engine_category),
                currency: payload.currency.map(engine_currency),
                date: payload.date.map(|dt| dt.with_timezone(&Utc)),
                child_id: payload.child_id,
            },
        )
        .await?;

    tracing::info!(expense_id = id, "expense updated");
    Ok(Json(expense_view(expense)))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ExpenseDeleted>, ServerError> {
    let Path(id) = id?;
    state.engine.delete_expense(id).await?;

    tracing::info!(expense_id = id, "expense deleted");
    Ok(Json(ExpenseDeleted {
        status: "success".to_string(),
        id,
    }))
}
