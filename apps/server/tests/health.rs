mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_router, send};

#[tokio::test]
async fn health_and_readiness_report_ok() {
    let (app, _tmp) = build_test_router().await;

    for uri in ["/api/v1/healthz", "/api/v1/readyz"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _tmp) = build_test_router().await;
    let (status, _) = send(&app, Method::GET, "/api/v1/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
