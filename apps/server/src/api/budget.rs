use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use familybudget_core::budget::{
    Budget, BudgetCategory, BudgetCategoryUpdate, BudgetInput, NewBudgetCategory,
};

use crate::{error::ApiResult, main_lib::AppState};

/// Returns `null` when the user has no budget.
async fn get_budget(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<Budget>>> {
    Ok(Json(state.budget_service.get_budget(&user_id)?))
}

async fn upsert_budget(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(input): Json<BudgetInput>,
) -> ApiResult<Json<Budget>> {
    Ok(Json(
        state.budget_service.upsert_budget(&user_id, input).await?,
    ))
}

async fn delete_budget(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_categories(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetCategory>>> {
    Ok(Json(state.budget_service.get_categories(&user_id)?))
}

async fn add_category(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(category): Json<NewBudgetCategory>,
) -> ApiResult<(StatusCode, Json<BudgetCategory>)> {
    let created = state.budget_service.add_category(&user_id, category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_category(
    Path((user_id, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(mut category): Json<BudgetCategoryUpdate>,
) -> ApiResult<Json<BudgetCategory>> {
    category.id = id;
    Ok(Json(
        state
            .budget_service
            .update_category(&user_id, category)
            .await?,
    ))
}

async fn delete_category(
    Path((user_id, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_category(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/budget/{user_id}",
            get(get_budget).put(upsert_budget).delete(delete_budget),
        )
        .route(
            "/budget/{user_id}/categories",
            get(get_categories).post(add_category),
        )
        .route(
            "/budget/{user_id}/categories/{id}",
            put(update_category).delete(delete_category),
        )
}
