//! HTTP surface: routing, degrade path and CORS

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use common::*;
use hooprag::api::build_router;
use hooprag::api::AppState;
use hooprag::api::ChatResponse;
use hooprag::embeddings::Embedder;
use hooprag::llm::TextGenerator;
use hooprag::models::Evidence;
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:4200";

async fn app(embedder: Arc<dyn Embedder>, generator: Arc<dyn TextGenerator>, timeout: Duration) -> Router {
    let config = test_config();
    let rag = service(&config, Arc::new(nba_store()), embedder, generator).await;
    build_router(AppState::new(Arc::new(rag), timeout), ORIGIN).unwrap()
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn chat_response(app: Router, body: &str) -> (StatusCode, ChatResponse) {
    let response = app.oneshot(chat_request(body)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = app(
        FixedEmbedder::new(vec![1.0, 0.0, 0.0]),
        ScriptedGenerator::new("unused"),
        Duration::from_secs(5),
    )
    .await;

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_chat_answers_with_evidence() {
    let app = app(
        FixedEmbedder::new(vec![1.0, 0.0, 0.0]),
        ScriptedGenerator::new(" the Boston Celtics won 110-108."),
        Duration::from_secs(5),
    )
    .await;

    let (status, body) =
        chat_response(app, r#"{"question": "What was the final score of game 15?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.answer, " the Boston Celtics won 110-108.");
    assert_eq!(body.evidence, vec![Evidence::game(15)]);
}

#[tokio::test]
async fn test_provider_failure_degrades_to_ok_response() {
    let app = app(
        Arc::new(DownEmbedder),
        ScriptedGenerator::new("unused"),
        Duration::from_secs(5),
    )
    .await;

    let (status, body) = chat_response(app, r#"{"question": "Who won game 15?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body
        .answer
        .starts_with("Sorry, I encountered an error processing your question: "));
    assert!(body.answer.contains("connection refused"));
    assert!(body.evidence.is_empty());
}

#[tokio::test]
async fn test_timeout_degrades_to_ok_response() {
    let app = app(
        FixedEmbedder::new(vec![1.0, 0.0, 0.0]),
        ScriptedGenerator::slow("too late", Duration::from_secs(10)),
        Duration::from_millis(50),
    )
    .await;

    let (status, body) = chat_response(app, r#"{"question": "Who won game 15?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.answer,
        "Sorry, I encountered an error processing your question: request timed out after 50ms"
    );
    assert!(body.evidence.is_empty());
}

#[tokio::test]
async fn test_missing_question_field_is_rejected() {
    let app = app(
        FixedEmbedder::new(vec![1.0, 0.0, 0.0]),
        ScriptedGenerator::new("unused"),
        Duration::from_secs(5),
    )
    .await;

    let response = app.oneshot(chat_request(r#"{"q": "hi"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin_only() {
    let app = app(
        FixedEmbedder::new(vec![1.0, 0.0, 0.0]),
        ScriptedGenerator::new("unused"),
        Duration::from_secs(5),
    )
    .await;

    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/chat")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(preflight(ORIGIN)).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let response = app.clone().oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
