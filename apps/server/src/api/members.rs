use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use familybudget_core::members::{ChildLimits, Member, NewMember};

use crate::{error::ApiResult, main_lib::AppState};

async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(member): Json<NewMember>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let created = state.member_service.create_member(member).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_member(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Member>> {
    Ok(Json(state.member_service.get_member(&id)?))
}

async fn get_children(
    Path(parent_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Member>>> {
    Ok(Json(state.member_service.get_children(&parent_id)?))
}

async fn add_child(
    Path(parent_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(child): Json<NewMember>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let created = state.member_service.add_child(&parent_id, child).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn set_child_limits(
    Path((parent_id, child_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(limits): Json<ChildLimits>,
) -> ApiResult<Json<Member>> {
    Ok(Json(
        state
            .member_service
            .set_child_limits(&parent_id, &child_id, limits)
            .await?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/members", post(create_member))
        .route("/members/{id}", get(get_member))
        .route(
            "/members/{parent_id}/children",
            get(get_children).post(add_child),
        )
        .route(
            "/members/{parent_id}/children/{child_id}/limits",
            put(set_child_limits),
        )
}
