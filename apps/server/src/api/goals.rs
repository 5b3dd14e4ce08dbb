use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use familybudget_core::goals::{
    ContributionInput, ContributionResult, Goal, GoalAlert, GoalUpdate, NewGoal,
};
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
struct AlertsResponse {
    alerts: Vec<GoalAlert>,
}

/// Alerts are evaluated against the server's local wall clock.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

async fn get_goals(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Goal>>> {
    Ok(Json(state.goal_service.get_goals(&user_id)?))
}

async fn create_goal(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    goal.user_id = user_id;
    let created = state.goal_service.create_goal(goal).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_goal(
    Path((user_id, goal_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(mut goal): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    goal.id = goal_id;
    goal.user_id = user_id;
    Ok(Json(state.goal_service.update_goal(goal).await?))
}

async fn delete_goal(
    Path((user_id, goal_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user_id, &goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn contribute(
    Path((user_id, goal_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(input): Json<ContributionInput>,
) -> ApiResult<Json<ContributionResult>> {
    let result = state
        .goal_service
        .contribute(&user_id, &goal_id, input.amount, local_now())
        .await?;
    Ok(Json(result))
}

async fn check_alerts(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AlertsResponse>> {
    let alerts = state
        .goal_service
        .check_alerts(&user_id, local_now())
        .await?;
    Ok(Json(AlertsResponse { alerts }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals/{user_id}", get(get_goals).post(create_goal))
        .route("/goals/{user_id}/check-alerts", get(check_alerts))
        .route(
            "/goals/{user_id}/{goal_id}",
            put(update_goal).delete(delete_goal),
        )
        .route("/goals/{user_id}/{goal_id}/contribute", put(contribute))
}
