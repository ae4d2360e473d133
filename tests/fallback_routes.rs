//! Router behaviour driven in-process, without a socket.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use license_relay::{HttpServer, RelayConfig};
use tower::ServiceExt;

async fn call(method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let server = HttpServer::new(RelayConfig::default()).unwrap();
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = server.router().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn unmatched_paths_are_bare_404() {
    for uri in ["/unknown", "/", "/ill-api/extra", "/colo"] {
        let (status, body) = call(Method::GET, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn wrong_method_on_known_path_is_bare_404() {
    for (method, uri) in [
        (Method::POST, "/ill-api"),
        (Method::DELETE, "/colo-api"),
        (Method::GET, "/cali-api"),
        (Method::PUT, "/health"),
    ] {
        let (status, body) = call(method.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert!(body.is_empty(), "{method} {uri}");
    }
}

#[tokio::test]
async fn health_reports_version() {
    let (status, body) = call(Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn validation_runs_before_upstream() {
    // Default config points at the real registries; a 400 proves no call was needed.
    let (status, body) = call(Method::GET, "/ill-api").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["errors"][0]["field"], "q");
}
