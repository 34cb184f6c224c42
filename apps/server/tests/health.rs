use axum::{body::Body, http::Request};
use stockledger_server::{api::app_router, build_state, config::Config};
use tempfile::tempdir;
use tower::ServiceExt;

#[tokio::test]
async fn healthz_works() {
    let tmp = tempdir().unwrap();
    let config = Config {
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    for uri in ["/api/v1/healthz", "/api/v1/readyz"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
