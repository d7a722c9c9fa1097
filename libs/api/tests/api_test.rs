use api::{serve, Config};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-test:generateContent";

async fn router(mock_server: &MockServer, api_key: Option<&str>) -> Router {
    let config = Config::from_toml(&format!(
        r#"
[gemini]
base_url = "{}"
model = "gemini-test"

[server]
allowed_origins = ["*"]
"#,
        mock_server.uri()
    ))
    .unwrap();

    serve(&config, api_key.map(str::to_string)).await.unwrap()
}

fn answer(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    }))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn read_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&read_body(response).await).unwrap()
}

#[tokio::test]
async fn test_health_without_api_key() {
    // Arrange
    let mock_server = MockServer::start().await;
    let router = router(&mock_server, None).await;

    // Act
    let response = router
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["gemini"], "missing");
    assert_eq!(body["services"]["speech"], "mock");
    assert_eq!(body["endpoints"].as_array().unwrap().len(), 13);
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_health_with_api_key() {
    let mock_server = MockServer::start().await;
    let router = router(&mock_server, Some("test-key")).await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["gemini"], "configured");
}

#[tokio::test]
async fn test_generate_story() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("a clever crow"))
        .respond_with(answer("Once upon a time, a clever crow..."))
        .expect(1)
        .mount(&mock_server)
        .await;
    let router = router(&mock_server, Some("test-key")).await;

    // Act
    let response = router
        .oneshot(post(
            "/stories",
            json!({
                "prompt": "a clever crow",
                "language": "English",
                "grade": "3",
                "subject": "Science"
            }),
        ))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "story": "Once upon a time, a clever crow..." })
    );
}

#[tokio::test]
async fn test_model_failure_hides_cause() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("internal quota details"),
        )
        .mount(&mock_server)
        .await;
    let router = router(&mock_server, Some("test-key")).await;

    let response = router
        .oneshot(post(
            "/stories",
            json!({
                "prompt": "a river",
                "language": "Hindi",
                "grade": "2",
                "subject": "Geography"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(read_body(response).await).unwrap();
    assert_eq!(body, "Failed to generate story");
}

#[tokio::test]
async fn test_empty_answer_is_a_failure() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })))
        .mount(&mock_server)
        .await;
    let router = router(&mock_server, Some("test-key")).await;

    // Act
    let response = router
        .oneshot(post(
            "/translate",
            json!({ "text": "Good night", "targetLanguage": "Bengali" }),
        ))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(read_body(response).await).unwrap();
    assert_eq!(body, "Failed to translate content");
}

#[tokio::test]
async fn test_explain_concept_passes_parsed_object_through() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer(
            "```json\n{\"explanation\": \"Plants make food from light.\", \"funFact\": 7}\n```",
        ))
        .mount(&mock_server)
        .await;
    let router = router(&mock_server, Some("test-key")).await;

    // Act
    let response = router
        .oneshot(post(
            "/concepts/explain",
            json!({
                "question": "What is photosynthesis?",
                "difficulty": "easy",
                "language": "English"
            }),
        ))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "explanation": "Plants make food from light.", "funFact": 7 })
    );
}

#[tokio::test]
async fn test_explain_concept_falls_back_on_prose() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("Photosynthesis is how plants cook."))
        .mount(&mock_server)
        .await;
    let router = router(&mock_server, Some("test-key")).await;

    let response = router
        .oneshot(post(
            "/concepts/explain",
            json!({
                "question": "What is photosynthesis?",
                "difficulty": "easy",
                "language": "English"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({
            "explanation": "Photosynthesis is how plants cook.",
            "visualAids": [],
            "activities": [],
            "assessmentQuestions": [],
            "nextTopics": []
        })
    );
}

#[tokio::test]
async fn test_unknown_game_type_skips_model() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(answer("{}"))
        .expect(0)
        .mount(&mock_server)
        .await;
    let router = router(&mock_server, Some("test-key")).await;

    // Act
    let response = router
        .oneshot(post(
            "/games",
            json!({
                "gameType": "chess",
                "subject": "Math",
                "grade": "4",
                "language": "English",
                "difficulty": "easy"
            }),
        ))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(read_body(response).await).unwrap();
    assert_eq!(body, "Failed to generate educational game");
}

#[tokio::test]
async fn test_worksheet_fails_when_one_grade_fails() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("Grade 5"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("1. Count the mangoes."))
        .mount(&mock_server)
        .await;
    let router = router(&mock_server, Some("test-key")).await;

    // Act
    let response = router
        .oneshot(post(
            "/worksheets/differentiated",
            json!({
                "topic": "Counting",
                "subject": "Math",
                "grades": ["4", "5"],
                "language": "English",
                "difficulty": "easy"
            }),
        ))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(read_body(response).await).unwrap();
    assert_eq!(body, "Failed to generate differentiated worksheet");
}

#[tokio::test]
async fn test_synthesize_speech_is_a_placeholder() {
    let mock_server = MockServer::start().await;
    let router = router(&mock_server, None).await;

    let response = router
        .oneshot(post(
            "/speech/synthesize",
            json!({
                "text": "Namaste",
                "languageCode": "hi-IN",
                "voiceName": "hi-IN-Standard-A"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["audioUrl"], "data:audio/mp3;base64,");
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let mock_server = MockServer::start().await;
    let router = router(&mock_server, Some("test-key")).await;

    let response = router
        .oneshot(post("/translate", json!({ "text": "hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route() {
    let mock_server = MockServer::start().await;
    let router = router(&mock_server, None).await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/nowhere")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
