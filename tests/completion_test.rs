use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yandexgpt::{
    ClientConfig, CompletionOptions, Message, ReasoningOptions, YandexGptClient, YandexGptError,
    models,
};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new("test-folder")
        .with_completion_url(format!("{}/foundationModels/v1/completion", server.uri()))
        .with_image_generation_url(format!(
            "{}/foundationModels/v1/imageGenerationAsync",
            server.uri()
        ))
        .with_operations_url(format!("{}/operations", server.uri()))
        .with_iam_token_url(format!("{}/iam/v1/tokens", server.uri()))
}

async fn mount_iam(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/iam/v1/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "iamToken": "iam-test",
            "expiresAt": (chrono::Utc::now() + chrono::Duration::hours(12)).to_rfc3339(),
        })))
        .mount(server)
        .await;
}

fn completion_body() -> serde_json::Value {
    serde_json::json!({
        "result": {
            "alternatives": [{
                "message": {"role": "assistant", "text": "Rust is a systems language."},
                "status": "ALTERNATIVE_STATUS_FINAL"
            }],
            "usage": {"inputTextTokens": 5, "completionTokens": 7, "totalTokens": 12},
            "modelVersion": "23.10"
        }
    })
}

#[tokio::test]
async fn generate_text_parses_response() {
    let server = MockServer::start().await;
    mount_iam(&server).await;
    Mock::given(method("POST"))
        .and(path("/foundationModels/v1/completion"))
        .and(header("authorization", "Bearer iam-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = YandexGptClient::from_config("oauth-test", config_for(&server)).unwrap();
    let response = client
        .generate_text("Tell me about Rust", models::YANDEX_GPT_LITE, None)
        .await
        .unwrap();

    assert_eq!(
        response.result.alternatives[0].message.text,
        "Rust is a systems language."
    );
    assert_eq!(response.result.usage.total_tokens, 12);
    assert_eq!(response.result.model_version, "23.10");
}

#[tokio::test]
async fn default_options_are_sent_on_the_wire() {
    let server = MockServer::start().await;
    mount_iam(&server).await;
    Mock::given(method("POST"))
        .and(path("/foundationModels/v1/completion"))
        .and(body_partial_json(serde_json::json!({
            "modelUri": "gpt://test-folder/yandexgpt-lite",
            "completionOptions": {"stream": false, "temperature": 0.6, "maxTokens": 2000},
            "messages": [{"role": "user", "text": "hi"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = YandexGptClient::from_config("oauth-test", config_for(&server)).unwrap();
    client
        .generate_text("hi", models::YANDEX_GPT_LITE, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn reasoning_options_reach_the_wire() {
    let server = MockServer::start().await;
    mount_iam(&server).await;
    Mock::given(method("POST"))
        .and(path("/foundationModels/v1/completion"))
        .and(body_partial_json(serde_json::json!({
            "completionOptions": {
                "temperature": 0.1,
                "reasoningOptions": {"mode": "ENABLED_HIDDEN", "effort": "low"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = YandexGptClient::from_config("oauth-test", config_for(&server)).unwrap();
    let options = CompletionOptions::new()
        .with_temperature(0.1)
        .with_reasoning_options(ReasoningOptions {
            mode: "ENABLED_HIDDEN".to_string(),
            effort: Some("low".to_string()),
        });
    client
        .generate_from_messages(
            vec![Message::user("solve this")],
            models::YANDEX_GPT,
            Some(options),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_model_fails_before_any_http_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = YandexGptClient::from_config("oauth-test", config_for(&server)).unwrap();
    let err = client
        .generate_text("hello", "nonexistent", None)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(0));
    assert!(err.to_string().contains("invalid model: nonexistent"));
}

#[tokio::test]
async fn non_2xx_carries_the_server_message() {
    let server = MockServer::start().await;
    mount_iam(&server).await;
    Mock::given(method("POST"))
        .and(path("/foundationModels/v1/completion"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"message": "quota exceeded"})),
        )
        .mount(&server)
        .await;

    let client = YandexGptClient::from_config("oauth-test", config_for(&server)).unwrap();
    let err = client
        .generate_text("hello", models::YANDEX_GPT, None)
        .await
        .unwrap_err();

    match err {
        YandexGptError::Api { code, message, .. } => {
            assert_eq!(code, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_carried_verbatim() {
    let server = MockServer::start().await;
    mount_iam(&server).await;
    Mock::given(method("POST"))
        .and(path("/foundationModels/v1/completion"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream gone"))
        .mount(&server)
        .await;

    let client = YandexGptClient::from_config("oauth-test", config_for(&server)).unwrap();
    let err = client
        .generate_text("hello", models::YANDEX_GPT, None)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(502));
    assert!(err.to_string().contains("upstream gone"));
}
