// HTTP-level tests for the public router without opening sockets.
// Requests go through tower::ServiceExt::oneshot against stub collaborators.

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt as _;

use crm_social_assistant::analysis::RuleClassifier;
use crm_social_assistant::crm::CrmSink;
use crm_social_assistant::mentions::FixtureSource;
use crm_social_assistant::pipeline::EnrichmentPipeline;
use crm_social_assistant::web::{self, state::AppState};
use crm_social_assistant::{Error, Result};

const BODY_LIMIT: usize = 1024 * 1024;

/// Records every create call; fails them all when `fail` is set.
#[derive(Default)]
struct RecordingCrm {
    created: Mutex<Vec<(String, Value)>>,
    fail: bool,
}

#[async_trait]
impl CrmSink for RecordingCrm {
    async fn create(&self, model: &str, values: Value) -> Result<i64> {
        if self.fail {
            return Err(Error::upstream("odoo", "Access Denied"));
        }
        let mut created = self.created.lock().unwrap();
        created.push((model.to_string(), values));
        Ok(40 + created.len() as i64)
    }

    async fn search(&self, _model: &str, _domain: Value, _limit: Option<u32>) -> Result<Vec<i64>> {
        Ok(vec![41])
    }

    async fn read(&self, _model: &str, ids: &[i64], _fields: &[&str]) -> Result<Vec<Value>> {
        Ok(ids
            .iter()
            .map(|id| json!({"id": id, "name": "Lead from Twitter: buyer1", "contact_name": "buyer1", "description": false}))
            .collect())
    }
}

fn test_router_with(crm: Arc<RecordingCrm>) -> Router {
    let classifier = Arc::new(RuleClassifier);
    let pipeline = EnrichmentPipeline::new(
        Arc::new(FixtureSource),
        classifier.clone(),
        true,
        Duration::from_secs(5),
    );
    web::create_router(AppState::from_parts(pipeline, classifier, crm))
}

fn test_router() -> Router {
    test_router_with(Arc::new(RecordingCrm::default()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("every response is JSON");
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET")
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST")
}

#[tokio::test]
async fn create_lead_without_fields_is_400() {
    let (status, body) = send(test_router(), post_json("/create-lead", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "contact_name and description are required.");
}

#[tokio::test]
async fn create_lead_with_malformed_body_is_400() {
    let req = Request::builder()
        .method("POST")
        .uri("/create-lead")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(test_router(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "contact_name and description are required.");
}

#[tokio::test]
async fn create_lead_writes_crm_record() {
    let crm = Arc::new(RecordingCrm::default());
    let (status, body) = send(
        test_router_with(crm.clone()),
        post_json(
            "/create-lead",
            json!({"contact_name": "buyer1", "description": "Asked about enterprise pricing"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Lead created successfully");
    assert_eq!(body["lead_id"], 41);

    let created = crm.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0, "crm.lead");
    assert_eq!(created[0].1["name"], "Lead from Twitter: buyer1");
    assert_eq!(created[0].1["contact_name"], "buyer1");
}

#[tokio::test]
async fn crm_failure_is_500_with_details() {
    let crm = Arc::new(RecordingCrm {
        fail: true,
        ..Default::default()
    });
    let (status, body) = send(
        test_router_with(crm),
        post_json("/create-lead", json!({"contact_name": "a", "description": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create lead.");
    assert_eq!(body["details"], "Access Denied");
}

#[tokio::test]
async fn schedule_post_validates_and_creates_draft() {
    let (status, body) = send(
        test_router(),
        post_json("/schedule-post", json!({"message": "Launch day!"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "message and social_account_id are required.");

    let crm = Arc::new(RecordingCrm::default());
    let (status, body) = send(
        test_router_with(crm.clone()),
        post_json(
            "/schedule-post",
            json!({"message": "Launch day!", "social_account_id": 3}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Social post created successfully");
    assert_eq!(body["post_id"], 41);

    let created = crm.created.lock().unwrap();
    assert_eq!(created[0].0, "social.post");
    assert_eq!(created[0].1["state"], "draft");
    assert_eq!(created[0].1["account_ids"], json!([[6, 0, [3]]]));
}

#[tokio::test]
async fn analyze_mentions_for_instagram_uses_vibe() {
    let (status, body) = send(test_router(), get("/analyze-mentions?platform=instagram")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["platform"], "instagram");
    assert_eq!(body["persona"]["name"], "Vibe");

    let mentions = body["mentions"].as_array().unwrap();
    assert_eq!(body["count"], mentions.len());
    assert!(!mentions.is_empty());
    for m in mentions {
        assert!(m["ai_analysis"]["persona_insight"].is_string());
        assert_eq!(m["ai_analysis"]["persona_name"], "Vibe");
        assert!(m["ai_analysis"]["is_lead"].is_boolean());
        assert_eq!(m["platform"], "instagram");
    }
}

#[tokio::test]
async fn analyze_mentions_defaults_to_twitter() {
    let (status, body) = send(test_router(), get("/analyze-mentions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["platform"], "twitter");
    assert_eq!(body["persona"]["name"], "Echo");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn mock_endpoint_serves_sample_batch() {
    let (status, body) = send(test_router(), get("/analyze-mentions-mock")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["author_username"], "potential_customer");
    assert_eq!(items[0]["ai_analysis"]["sentiment"], "Positive");
    assert_eq!(items[0]["ai_analysis"]["is_lead"], true);
}

#[tokio::test]
async fn generate_reply_uses_sales_branch() {
    let (status, body) = send(
        test_router(),
        post_json(
            "/generate-reply",
            json!({
                "tweet_text": "What's the pricing for your enterprise plan?",
                "author_username": "buyer1",
                "sentiment": "Neutral",
                "is_lead": true,
                "suggested_action": "Create lead in CRM"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author_username"], "buyer1");
    assert_eq!(body["original_tweet"], "What's the pricing for your enterprise plan?");
    assert_eq!(body["context"]["is_lead"], true);
    let reply = body["suggested_reply"].as_str().unwrap();
    assert!(reply.contains("@buyer1"));
    assert!(reply.contains("demo"));
}

#[tokio::test]
async fn generate_reply_requires_text_and_author() {
    let (status, body) = send(
        test_router(),
        post_json("/generate-reply", json!({"tweet_text": "hi", "author_username": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "tweet_text and author_username are required.");
}

#[tokio::test]
async fn personas_listing_is_stable() {
    let (status, first) = send(test_router(), get("/personas")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send(test_router(), get("/personas")).await;

    assert_eq!(first["total_personas"], 4);
    assert_eq!(first["total_personas"], second["total_personas"]);
    assert_eq!(
        first["available_platforms"],
        json!(["twitter", "linkedin", "instagram", "facebook"])
    );
    assert_eq!(first["available_platforms"], second["available_platforms"]);
    assert_eq!(first["personas"]["facebook"]["name"], "Harmony");
}

#[tokio::test]
async fn persona_lookup_flags_default() {
    let (status, body) = send(test_router(), get("/personas/made-up-platform")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_default"], true);
    assert_eq!(body["persona"]["name"], "Echo");

    let (_, body) = send(test_router(), get("/personas/linkedin")).await;
    assert_eq!(body["is_default"], false);
    assert_eq!(body["platform"], "linkedin");
    assert_eq!(body["persona"]["name"], "Sterling");
}

#[tokio::test]
async fn leads_listing_reads_crm_records() {
    let (status, body) = send(test_router(), get("/leads?limit=500")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["leads"][0]["id"], 41);
    assert_eq!(body["leads"][0]["contact_name"], "buyer1");
    assert!(body["leads"][0]["description"].is_null());
}

#[tokio::test]
async fn bad_query_string_is_json_400() {
    let resp = test_router()
        .oneshot(get("/leads?limit=abc"))
        .await
        .expect("oneshot");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers()["content-type"],
        "application/json"
    );
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid query parameters"));
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn generate_reply_accepts_lowercase_sentiment() {
    let (status, body) = send(
        test_router(),
        post_json(
            "/generate-reply",
            json!({"tweet_text": "I love this tool", "author_username": "fan", "sentiment": "positive"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["context"]["sentiment"], "Positive");
    assert!(body["suggested_reply"]
        .as_str()
        .unwrap()
        .starts_with("Thank you so much @fan!"));
}

#[tokio::test]
async fn generate_reply_names_an_invalid_sentiment() {
    let (status, body) = send(
        test_router(),
        post_json(
            "/generate-reply",
            json!({"tweet_text": "hi", "author_username": "fan", "sentiment": "Mixed"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "sentiment must be Positive, Negative or Neutral, got 'Mixed'."
    );
}
