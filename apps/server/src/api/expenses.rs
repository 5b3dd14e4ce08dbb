use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use familybudget_core::expenses::{Expense, ExpenseUpdate, NewExpense};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_expenses(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Expense>>> {
    Ok(Json(state.expense_service.get_expenses(&user_id)?))
}

async fn create_expense(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut expense): Json<NewExpense>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    expense.user_id = user_id;
    let created = state.expense_service.create_expense(expense).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_expense(
    Path((user_id, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(mut expense): Json<ExpenseUpdate>,
) -> ApiResult<Json<Expense>> {
    expense.id = id;
    expense.user_id = user_id;
    Ok(Json(state.expense_service.update_expense(expense).await?))
}

async fn delete_expense(
    Path((user_id, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.expense_service.delete_expense(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses/{user_id}", get(get_expenses).post(create_expense))
        .route(
            "/expenses/{user_id}/{id}",
            put(update_expense).delete(delete_expense),
        )
}
