use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use familybudget_core::incomes::{Income, IncomeUpdate, NewIncome};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_incomes(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Income>>> {
    Ok(Json(state.income_service.get_incomes(&user_id)?))
}

async fn create_income(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut income): Json<NewIncome>,
) -> ApiResult<(StatusCode, Json<Income>)> {
    income.user_id = user_id;
    let created = state.income_service.create_income(income).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_income(
    Path((user_id, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(mut income): Json<IncomeUpdate>,
) -> ApiResult<Json<Income>> {
    income.id = id;
    income.user_id = user_id;
    Ok(Json(state.income_service.update_income(income).await?))
}

async fn delete_income(
    Path((user_id, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.income_service.delete_income(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/incomes/{user_id}", get(get_incomes).post(create_income))
        .route(
            "/incomes/{user_id}/{id}",
            put(update_income).delete(delete_income),
        )
}
