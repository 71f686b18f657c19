//! `OpenAiClassifier` against a local `wiremock` server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crm_social_assistant::analysis::{Classifier, OpenAiClassifier, ReplyRequest, Sentiment};
use crm_social_assistant::config::OpenAiConfig;
use crm_social_assistant::Error;

fn config(server: &MockServer, api_key: Option<&str>) -> OpenAiConfig {
    OpenAiConfig {
        model: "gpt-test".to_string(),
        base_url: format!("{}/v1", server.uri()),
        timeout_secs: 5,
        api_key: api_key.map(str::to_string),
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn classify_parses_json_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"sentiment":"Positive","is_lead":true,"suggested_action":"Create lead in CRM and reply with pricing info."}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = OpenAiClassifier::new(&config(&server, Some("sk-test")));
    let verdict = classifier
        .classify("How much is the pro plan?", "buyer1")
        .await
        .expect("verdict");

    assert_eq!(verdict.sentiment, Sentiment::Positive);
    assert!(verdict.is_lead);
    assert_eq!(
        verdict.suggested_action,
        "Create lead in CRM and reply with pricing info."
    );
}

#[tokio::test]
async fn prose_completion_is_classification_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("This looks like a positive lead to me!")),
        )
        .mount(&server)
        .await;

    let classifier = OpenAiClassifier::new(&config(&server, Some("sk-test")));
    let err = classifier.classify("hello", "someone").await.unwrap_err();
    assert!(matches!(err, Error::ClassificationFailure(_)), "got {err:?}");
}

#[tokio::test]
async fn quota_error_is_classification_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "You exceeded your current quota", "type": "insufficient_quota" }
        })))
        .mount(&server)
        .await;

    let classifier = OpenAiClassifier::new(&config(&server, Some("sk-test")));
    let err = classifier.classify("hello", "someone").await.unwrap_err();
    match err {
        Error::ClassificationFailure(msg) => assert!(msg.contains("429"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_api_key_fails_at_first_use_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let classifier = OpenAiClassifier::new(&config(&server, None));
    let err = classifier.classify("hello", "someone").await.unwrap_err();
    match err {
        Error::ClassificationFailure(msg) => assert!(msg.contains("OPENAI_API_KEY"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn generate_reply_returns_free_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("  Hi @buyer1! Happy to set up a demo this week.  ")),
        )
        .mount(&server)
        .await;

    let classifier = OpenAiClassifier::new(&config(&server, Some("sk-test")));
    let reply = classifier
        .generate_reply(&ReplyRequest {
            text: "Do you offer demos?",
            author: "buyer1",
            sentiment: Sentiment::Neutral,
            is_lead: true,
            suggested_action: "Offer a demo",
        })
        .await
        .expect("reply");
    assert_eq!(reply, "Hi @buyer1! Happy to set up a demo this week.");
}

#[tokio::test]
async fn reply_failure_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let classifier = OpenAiClassifier::new(&config(&server, Some("bad")));
    let err = classifier
        .generate_reply(&ReplyRequest {
            text: "hi",
            author: "x",
            sentiment: Sentiment::Neutral,
            is_lead: false,
            suggested_action: "",
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UpstreamUnavailable {
            service: "openai",
            ..
        }
    ));
}
