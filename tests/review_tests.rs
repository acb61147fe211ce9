use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use softstore::review::{ReviewClient, ReviewSettings, fallback};

// ── Stub Gemini endpoint ────────────────────────────────────────────────

#[derive(Clone)]
enum Reply {
    Json(Value),
    Status(StatusCode, &'static str),
    Slow(Duration, Value),
}

#[derive(Clone)]
struct Stub {
    reply: Reply,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Captured>>>,
}

#[derive(Clone, Debug)]
struct Captured {
    call: String,
    api_key: Option<String>,
    body: Value,
}

async fn generate(
    State(stub): State<Stub>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    *stub.last.lock().unwrap() = Some(Captured {
        call,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    });

    match stub.reply {
        Reply::Json(v) => Json(v).into_response(),
        Reply::Status(code, text) => (code, text).into_response(),
        Reply::Slow(delay, v) => {
            tokio::time::sleep(delay).await;
            Json(v).into_response()
        }
    }
}

async fn serve(reply: Reply) -> (String, Stub) {
    let stub = Stub {
        reply,
        hits: Arc::new(AtomicUsize::new(0)),
        last: Arc::new(Mutex::new(None)),
    };
    let router = Router::new()
        .route("/v1beta/models/{call}", post(generate))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), stub)
}

fn client(api_url: &str, api_key: Option<&str>) -> ReviewClient {
    ReviewClient::new(ReviewSettings {
        api_key: api_key.map(String::from),
        model: "gemini-2.5-flash".into(),
        api_url: api_url.into(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn candidate_text(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn review_json() -> Value {
    json!({
        "summary": "A versatile media player.",
        "pros": ["Plays nearly everything", "Free", "No ads"],
        "cons": ["Dated interface"],
        "safetyScore": 96,
        "alternativeApps": ["mpv", "MPC-HC", "PotPlayer"],
        "technicalOpinion": "Mature codebase with a strong security record."
    })
}

// ── Tests ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_no_key_makes_no_request() {
    let (url, stub) = serve(Reply::Json(candidate_text(&review_json().to_string()))).await;

    let review = client(&url, None).fetch("VLC Media Player", "Windows").await;

    assert_eq!(review, fallback::unconfigured("VLC Media Player", "Windows"));
    assert_eq!(stub.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_valid_response_is_parsed() {
    let (url, stub) = serve(Reply::Json(candidate_text(&review_json().to_string()))).await;

    let review = client(&url, Some("test-key")).fetch("VLC Media Player", "Windows").await;

    assert_eq!(review.summary, "A versatile media player.");
    assert_eq!(review.pros.len(), 3);
    assert_eq!(review.cons, ["Dated interface"]);
    assert_eq!(review.safety_score, 96);
    assert_eq!(review.alternative_apps, ["mpv", "MPC-HC", "PotPlayer"]);
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_request_carries_key_prompt_and_schema() {
    let (url, stub) = serve(Reply::Json(candidate_text(&review_json().to_string()))).await;

    client(&url, Some("test-key")).fetch("Zoom", "Mac").await;

    let captured = stub.last.lock().unwrap().clone().unwrap();
    assert_eq!(captured.call, "gemini-2.5-flash:generateContent");
    assert_eq!(captured.api_key.as_deref(), Some("test-key"));

    let prompt = captured.body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"Zoom\" on Mac"));

    let config = &captured.body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["type"], "OBJECT");
    assert_eq!(config["responseSchema"]["required"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_text_split_across_parts() {
    let text = review_json().to_string();
    let (head, tail) = text.split_at(text.len() / 2);
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": head }, { "text": tail }] } }]
    });
    let (url, _stub) = serve(Reply::Json(body)).await;

    let review = client(&url, Some("k")).fetch("VLC Media Player", "Windows").await;
    assert_eq!(review.safety_score, 96);
}

#[tokio::test]
async fn test_server_error_gives_unavailable() {
    let (url, stub) = serve(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR, "boom")).await;

    let review = client(&url, Some("k")).fetch("Zoom", "Windows").await;

    assert_eq!(review, fallback::unavailable("Zoom"));
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rejected_key_gives_unavailable() {
    let (url, _stub) = serve(Reply::Status(StatusCode::FORBIDDEN, "API key not valid")).await;
    let review = client(&url, Some("bad")).fetch("Zoom", "Windows").await;
    assert_eq!(review, fallback::unavailable("Zoom"));
}

#[tokio::test]
async fn test_malformed_text_gives_unavailable() {
    let (url, _stub) = serve(Reply::Json(candidate_text("this is not json"))).await;
    let review = client(&url, Some("k")).fetch("Steam", "Windows").await;
    assert_eq!(review, fallback::unavailable("Steam"));
}

#[tokio::test]
async fn test_missing_field_gives_unavailable() {
    let mut partial = review_json();
    partial.as_object_mut().unwrap().remove("safetyScore");
    let (url, _stub) = serve(Reply::Json(candidate_text(&partial.to_string()))).await;

    let review = client(&url, Some("k")).fetch("Steam", "Windows").await;
    assert_eq!(review, fallback::unavailable("Steam"));
}

#[tokio::test]
async fn test_no_candidates_gives_unavailable() {
    let (url, _stub) = serve(Reply::Json(json!({ "candidates": [] }))).await;
    let review = client(&url, Some("k")).fetch("Notion", "Web").await;
    assert_eq!(review, fallback::unavailable("Notion"));

    let (url, _stub) = serve(Reply::Json(json!({ "promptFeedback": { "blockReason": "OTHER" } }))).await;
    let review = client(&url, Some("k")).fetch("Notion", "Web").await;
    assert_eq!(review, fallback::unavailable("Notion"));
}

#[tokio::test]
async fn test_out_of_range_score_is_clamped() {
    let mut v = review_json();
    v["safetyScore"] = json!(250);
    let (url, _stub) = serve(Reply::Json(candidate_text(&v.to_string()))).await;

    let review = client(&url, Some("k")).fetch("VLC Media Player", "Windows").await;
    assert_eq!(review.safety_score, 100);
}

#[tokio::test]
async fn test_unreachable_service_gives_unavailable() {
    // Bind then drop to get a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let review = client(&format!("http://{addr}"), Some("k")).fetch("Zoom", "Windows").await;
    assert_eq!(review, fallback::unavailable("Zoom"));
}

#[tokio::test]
async fn test_timeout_gives_unavailable() {
    let (url, _stub) = serve(Reply::Slow(
        Duration::from_secs(2),
        candidate_text(&review_json().to_string()),
    ))
    .await;

    let client = ReviewClient::new(ReviewSettings {
        api_key: Some("k".into()),
        model: "gemini-2.5-flash".into(),
        api_url: url,
        timeout: Duration::from_millis(200),
    })
    .unwrap();

    let review = client.fetch("Zoom", "Windows").await;
    assert_eq!(review, fallback::unavailable("Zoom"));
}
