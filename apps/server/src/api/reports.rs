use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use familybudget_core::reports::MonthlyReport;

use crate::{error::ApiResult, main_lib::AppState};

async fn get_monthly_report(
    Path((user_id, month)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MonthlyReport>> {
    Ok(Json(
        state.report_service.get_monthly_report(&user_id, &month)?,
    ))
}

async fn export_monthly_report(
    Path((user_id, month)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let csv = state
        .report_service
        .export_monthly_report_csv(&user_id, &month)?;
    let disposition = format!("attachment; filename=\"report-{}.csv\"", month);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/reports/{user_id}/report/{month}",
            get(get_monthly_report),
        )
        .route(
            "/reports/{user_id}/report/{month}/export",
            get(export_monthly_report),
        )
}
