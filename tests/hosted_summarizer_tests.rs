use repodoc::config::SummarizerConfig;
use repodoc::summarize::{HostedSummarizer, Summarizer};
use repodoc::Error;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/org/model";

fn summarizer(server: &MockServer, max_input_chars: usize) -> HostedSummarizer {
    HostedSummarizer::new(&SummarizerConfig {
        endpoint: format!("{}/models", server.uri()),
        model: "org/model".into(),
        token: Some("hf-token".into()),
        max_input_chars,
        timeout_secs: 5,
        ..SummarizerConfig::default()
    })
    .unwrap()
}

async fn respond_with(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_summary_text_answer() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([{"summary_text": " A widget service. "}])),
    )
    .await;

    let summary = summarizer(&server, 2048)
        .summarize("Project: widget")
        .await
        .unwrap();
    assert_eq!(summary, "A widget service.");
}

#[tokio::test]
async fn test_generated_text_answer() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([{"generated_text": "Builds widgets."}])),
    )
    .await;

    let summary = summarizer(&server, 2048)
        .summarize("Project: widget")
        .await
        .unwrap();
    assert_eq!(summary, "Builds widgets.");
}

#[tokio::test]
async fn test_error_status_is_upstream_error_with_message() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(503).set_body_json(json!({"error": "Model org/model is currently loading"})),
    )
    .await;

    let err = summarizer(&server, 2048)
        .summarize("Project: widget")
        .await
        .unwrap_err();

    match &err {
        Error::Upstream {
            service,
            status,
            message,
        } => {
            assert_eq!(*service, "Summarizer");
            assert_eq!(*status, 503);
            assert_eq!(message, "Model org/model is currently loading");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_blank_or_missing_answer_is_upstream_error() {
    for body in [json!([{"summary_text": "   "}]), json!([])] {
        let server = MockServer::start().await;
        respond_with(&server, ResponseTemplate::new(200).set_body_json(body)).await;

        let err = summarizer(&server, 2048)
            .summarize("Project: widget")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream { service: "Summarizer", .. }));
    }
}

#[tokio::test]
async fn test_request_carries_token_and_truncated_prefixed_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("Authorization", "Bearer hf-token"))
        .and(body_partial_json(json!({
            "inputs": "summarize: Project: ",
            "parameters": {"max_length": 150, "num_beams": 4, "early_stopping": true},
            "options": {"wait_for_model": true}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"summary_text": "ok"}])))
        .expect(1)
        .mount(&server)
        .await;

    let summary = summarizer(&server, 20)
        .summarize("Project: widget\nDescription: Makes widgets\n")
        .await
        .unwrap();
    assert_eq!(summary, "ok");
}
