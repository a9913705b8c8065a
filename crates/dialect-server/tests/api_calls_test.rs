use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use dialect_gateway::{CallGateway, TelephonyConfig, VoiceApiConfig};
use dialect_server::{app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Spawns a throwaway voice-API upstream and returns its call endpoint.
async fn spawn_voice_upstream(status: StatusCode, body: Value, delay: Duration) -> String {
    let router = Router::new().route(
        "/api/calls",
        post(move |Json(_payload): Json<Value>| {
            let body = body.clone();
            async move {
                tokio::time::sleep(delay).await;
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/calls")
}

fn setup_app(voice_endpoint: &str, telephony: Option<TelephonyConfig>) -> Router {
    let voice = VoiceApiConfig::new("test-key").with_endpoint(voice_endpoint);
    let state = AppState {
        gateway: Arc::new(CallGateway::new(voice, telephony)),
        client_dir: "client/dist".to_string(),
    };
    app(state)
}

fn call_request(body: Value) -> Request<Body> {
    Request::builder()
        .uri("/api/calls")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn web_call_body() -> Value {
    json!({
        "systemPrompt": "You are a barista.",
        "model": "fixie-ai/ultravox-70B",
        "medium": { "type": "web" }
    })
}

#[tokio::test]
async fn health_check_returns_ok() {
    let endpoint = spawn_voice_upstream(StatusCode::OK, json!({}), Duration::ZERO).await;
    let app = setup_app(&endpoint, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn web_call_relays_the_voice_response() {
    let body = json!({ "callId": "uv-1", "joinUrl": "https://x/y" });
    let endpoint = spawn_voice_upstream(StatusCode::OK, body.clone(), Duration::ZERO).await;
    let app = setup_app(&endpoint, None);

    let response = app.oneshot(call_request(web_call_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, body);
}

#[tokio::test]
async fn telephony_without_credentials_maps_to_configuration_error() {
    let endpoint = spawn_voice_upstream(StatusCode::OK, json!({}), Duration::ZERO).await;
    let app = setup_app(&endpoint, None);

    let body = json!({
        "systemPrompt": "You are a barista.",
        "model": "fixie-ai/ultravox-70B",
        "medium": { "type": "telephony", "config": { "phoneNumber": "+15551234567" } }
    });
    let response = app.oneshot(call_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Error processing call request");
    assert_eq!(json["code"], "configuration");
    assert!(json["details"]
        .as_str()
        .unwrap()
        .contains("credentials not configured"));
}

#[tokio::test]
async fn upstream_failure_maps_to_upstream_error() {
    let endpoint = spawn_voice_upstream(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": "busy" }),
        Duration::ZERO,
    )
    .await;
    let app = setup_app(&endpoint, None);

    let response = app.oneshot(call_request(web_call_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["code"], "upstream");
    assert!(json["details"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn duplicate_call_in_flight_maps_to_conflict() {
    let endpoint = spawn_voice_upstream(
        StatusCode::OK,
        json!({ "callId": "uv-1", "joinUrl": "https://x/y" }),
        Duration::from_millis(300),
    )
    .await;
    let app = setup_app(&endpoint, None);

    let body = json!({
        "systemPrompt": "You are a barista.",
        "model": "fixie-ai/ultravox-70B",
        "selectedTools": [
            { "toolName": "createProfile", "parameterOverrides": { "callId": "call-42" } }
        ],
        "medium": { "type": "web" }
    });

    let first = {
        let app = app.clone();
        let body = body.clone();
        tokio::spawn(async move { app.oneshot(call_request(body)).await })
    };

    // Give the first request time to claim the key and reach the mock.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = app.oneshot(call_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Error processing call request");
    assert_eq!(json["code"], "in_flight");

    let first = first.await.unwrap().unwrap();
    assert_eq!(first.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let endpoint = spawn_voice_upstream(StatusCode::OK, json!({}), Duration::ZERO).await;
    let app = setup_app(&endpoint, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/calls")
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
