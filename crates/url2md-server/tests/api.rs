//! End-to-end API tests: router driven in-process against a wiremock upstream

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use url2md_server::{create_router, AppState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Example</title></head>
<body>
    <main>
        <h1>Hello World</h1>
        <p>Converted <strong>content</strong> for the tests.</p>
    </main>
</body>
</html>"#;

fn app() -> axum::Router {
    create_router(AppState::new(), "public")
}

async fn post(route: &str, body: Value) -> Response<Body> {
    app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(route)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn error_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn mock_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_missing_url_is_rejected_on_both_endpoints() {
    for route in ["/api/convert", "/api/convert-simple"] {
        for body in [json!({}), json!({"url": ""})] {
            let response = post(route, body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let error = error_body(response).await;
            assert_eq!(error["error"], "URL is required");
            assert!(error["message"].as_str().unwrap().contains("valid URL"));
        }
    }
}

#[tokio::test]
async fn test_unreadable_body_is_treated_as_missing_url() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/convert-simple")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await["error"], "URL is required");
}

#[tokio::test]
async fn test_malformed_url_is_rejected_on_both_endpoints() {
    for route in ["/api/convert", "/api/convert-simple"] {
        let response = post(route, json!({"url": "not a url"})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await["error"], "Invalid URL format");
    }
}

#[tokio::test]
async fn test_upstream_status_is_mirrored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    for route in ["/api/convert", "/api/convert-simple"] {
        let response = post(route, json!({"url": format!("{}/gone", server.uri())})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error = error_body(response).await;
        assert_eq!(error["error"], "Failed to fetch URL");
        assert!(error["message"].as_str().unwrap().contains("404"));
    }
}

#[tokio::test]
async fn test_non_html_content_type_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    for route in ["/api/convert", "/api/convert-simple"] {
        let response = post(route, json!({"url": format!("{}/data", server.uri())})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = error_body(response).await;
        assert_eq!(error["error"], "Unsupported content type");
        assert!(error["message"]
            .as_str()
            .unwrap()
            .contains("application/json"));
    }
}

#[tokio::test]
async fn test_streaming_conversion_succeeds() {
    let server = MockServer::start().await;
    mock_page(&server).await;

    let response = post("/api/convert", json!({"url": server.uri()})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );

    let markdown = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!markdown.is_empty());
    assert!(markdown.contains("# Hello World"));
    assert!(markdown.contains("**content**"));
}

#[tokio::test]
async fn test_buffered_conversion_succeeds() {
    let server = MockServer::start().await;
    mock_page(&server).await;

    let url = server.uri();
    let response = post("/api/convert-simple", json!({"url": url})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(payload["success"], true);
    assert_eq!(payload["url"], url);
    assert_eq!(payload["contentType"], "text/html; charset=utf-8");
    assert!(payload["markdown"]
        .as_str()
        .unwrap()
        .contains("# Hello World"));

    let timestamp = payload["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_streamed_and_buffered_outputs_match() {
    let server = MockServer::start().await;
    mock_page(&server).await;

    let streamed = {
        let response = post("/api/convert", json!({"url": server.uri()})).await;
        String::from_utf8(body_bytes(response).await).unwrap()
    };
    let buffered = {
        let response = post("/api/convert-simple", json!({"url": server.uri()})).await;
        let payload: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        payload["markdown"].as_str().unwrap().to_string()
    };
    assert_eq!(streamed, buffered);
}

#[tokio::test]
async fn test_empty_upstream_body_is_reported_on_streaming_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("", "text/html"))
        .mount(&server)
        .await;

    let response = post("/api/convert", json!({"url": format!("{}/empty", server.uri())})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_body(response).await["error"], "No content received");
}

#[tokio::test]
async fn test_unreachable_upstream_is_a_server_error() {
    let response = post("/api/convert-simple", json!({"url": "http://127.0.0.1:1/"})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = error_body(response).await;
    assert_eq!(error["error"], "Server error");
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("An unexpected error occurred"));
}
