use gemini::models::{
    text_generation::{GenerateContentRequest, Part, TextGeneration},
    Models,
};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(text: &str) -> GenerateContentRequest {
    GenerateContentRequest::user(vec![Part::Text {
        text: text.to_string(),
    }])
}

#[tokio::test]
async fn test_generate_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "A short story." }] },
                    "finishReason": "STOP"
                }]
            }),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let models = Models::new(
        &format!("{}/v1beta/", mock_server.uri()),
        "gemini-test",
        Some("test-key"),
    )
    .unwrap();

    let response = models.generate_content(request("Tell a story")).await;

    assert_eq!(response.unwrap().text().as_deref(), Some("A short story."));
}

#[tokio::test]
async fn test_generate_content_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string("quota exhausted"),
        )
        .mount(&mock_server)
        .await;

    let models =
        Models::new(&mock_server.uri(), "gemini-test", Some("test-key"))
            .unwrap();

    let error = models
        .generate_content(request("Tell a story"))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("429"));
}

#[tokio::test]
async fn test_generate_content_without_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header_exists("x-goog-api-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(403).set_body_string("missing api key"),
        )
        .mount(&mock_server)
        .await;

    let models = Models::new(&mock_server.uri(), "gemini-test", None).unwrap();

    assert!(!models.has_api_key());
    assert!(models.generate_content(request("Hello")).await.is_err());
}
