//! Callback API integration tests
//!
//! Drives the local HTTP API at the router level with `oneshot`
//! requests; no socket is bound and the remote feed is never contacted.

use axum::body::Body;
use http::{Request, StatusCode, header};
use pelican_agent::routes;
use pelican_agent::{AppState, Config};
use tower::ServiceExt;

fn test_state(dir: &std::path::Path) -> AppState {
    let config = Config::with_overrides(
        // Never contacted by these tests
        "http://localhost:9/api",
        "test-token",
        dir.join("labels").to_string_lossy().into_owned(),
        dir.join("assets").to_string_lossy().into_owned(),
    );
    AppState::initialize(&config).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = routes::build_app(test_state(dir.path()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_serve_label_by_basename() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());

    let path = state
        .service
        .storage()
        .persist(9, "<html><body>hello label</body></html>")
        .unwrap();
    let basename = path.file_name().unwrap().to_str().unwrap().to_string();

    let app = routes::build_app(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{basename}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("hello label"));
}

#[tokio::test]
async fn test_serve_unknown_label_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = routes::build_app(test_state(dir.path()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/no-such-label.html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_print_label_rejects_malformed_body() {
    let dir = tempfile::tempdir().unwrap();
    let app = routes::build_app(test_state(dir.path()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/print-label")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_print_label_renders_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    let app = routes::build_app(state.clone());

    let order = serde_json::json!({
        "id": 7,
        "nama": "Ali",
        "no_fon": "011-2223344",
        "alamat": "Jalan Satu",
        "tarikh": "2025-11-02",
        "items": [{"name": "Nasi Lemak", "quantity": 2}],
        "jumlah_bayaran": 15.0,
        "bayaran_status": "Belum"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/print-label")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(order.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["message"].as_str().unwrap().contains("Order #7"));

    // The artifact landed in the output directory with the expected name
    let artifact = std::fs::read_dir(state.service.storage().output_dir())
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            name.starts_with("order-7-") && name.ends_with(".html")
        });
    assert!(artifact.is_some());

    let html = std::fs::read_to_string(artifact.unwrap().path()).unwrap();
    assert!(html.contains("RM 15.00"));
    assert!(html.contains("20251102007"));
}
