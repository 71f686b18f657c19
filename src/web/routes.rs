use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::error::ApiError;
use super::state::AppState;
use crate::analysis::{EnrichedMention, ReplyRequest, Sentiment};
use crate::crm::{self, LeadRecord, NewLead};
use crate::mentions::{fixtures, Platform};
use crate::personas::{self, Persona};

type ApiResult<T> = Result<T, ApiError>;

/// Treats empty strings like absent fields.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Unwraps a JSON body; a malformed one is reported with the route's
/// validation message.
fn body<T>(payload: Result<Json<T>, JsonRejection>, message: &str) -> ApiResult<T> {
    payload.map(|Json(b)| b).map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::bad_request(message)
    })
}

/// Unwraps query parameters; a bad query string is a 400 with a JSON body.
fn params<T>(query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    query.map(|Query(q)| q).map_err(|rejection| {
        let text = rejection.body_text();
        warn!("Rejected query string: {}", text);
        ApiError::bad_request(format!("Invalid query parameters: {text}"))
    })
}

#[derive(Deserialize)]
pub struct AnalyzeQuery {
    platform: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    platform: Platform,
    mentions: Vec<EnrichedMention>,
    persona: &'static Persona,
    count: usize,
    timestamp: DateTime<Utc>,
}

pub async fn analyze_mentions(
    State(state): State<AppState>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let query = params(query)?;
    let requested = query.platform.unwrap_or_default();
    let lookup = personas::get_persona(&requested);
    info!(
        "Received request to /analyze-mentions (platform: {}, source: {})",
        lookup.platform,
        state.pipeline.source_name()
    );

    let mentions = state
        .pipeline
        .analyze_mentions(lookup.platform)
        .await
        .map_err(|e| ApiError::from_error("Failed to analyze mentions.", e))?;

    Ok(Json(AnalyzeResponse {
        platform: lookup.platform,
        count: mentions.len(),
        mentions,
        persona: lookup.persona,
        timestamp: Utc::now(),
    }))
}

pub async fn analyze_mentions_mock() -> Json<Vec<EnrichedMention>> {
    info!("Received request to /analyze-mentions-mock, serving sample data");
    Json(fixtures::sample_analyzed())
}

#[derive(Deserialize)]
pub struct ReplyBody {
    tweet_text: Option<String>,
    author_username: Option<String>,
    sentiment: Option<String>,
    is_lead: Option<bool>,
    suggested_action: Option<String>,
}

#[derive(Serialize)]
pub struct ReplyContext {
    sentiment: Sentiment,
    is_lead: bool,
    suggested_action: String,
}

#[derive(Serialize)]
pub struct ReplyResponse {
    original_tweet: String,
    author_username: String,
    suggested_reply: String,
    context: ReplyContext,
    timestamp: DateTime<Utc>,
}

pub async fn generate_reply(
    State(state): State<AppState>,
    payload: Result<Json<ReplyBody>, JsonRejection>,
) -> ApiResult<Json<ReplyResponse>> {
    const REQUIRED: &str = "tweet_text and author_username are required.";
    let req = body(payload, REQUIRED)?;

    let (Some(text), Some(author)) = (present(req.tweet_text), present(req.author_username))
    else {
        info!("Validation failed for /generate-reply: missing parameters");
        return Err(ApiError::bad_request(REQUIRED));
    };
    info!("Received request to /generate-reply for @{}", author);

    let sentiment = match present(req.sentiment) {
        Some(raw) => raw
            .parse::<Sentiment>()
            .map_err(|e| ApiError::from_error("Invalid sentiment.", e))?,
        None => Sentiment::Neutral,
    };

    let context = ReplyContext {
        sentiment,
        is_lead: req.is_lead.unwrap_or(false),
        suggested_action: req.suggested_action.unwrap_or_default(),
    };

    let suggested_reply = state
        .classifier
        .generate_reply(&ReplyRequest {
            text: &text,
            author: &author,
            sentiment: context.sentiment,
            is_lead: context.is_lead,
            suggested_action: &context.suggested_action,
        })
        .await
        .map_err(|e| ApiError::from_error("Failed to generate reply.", e))?;

    Ok(Json(ReplyResponse {
        original_tweet: text,
        author_username: author,
        suggested_reply,
        context,
        timestamp: Utc::now(),
    }))
}

#[derive(Deserialize)]
pub struct CreateLeadBody {
    contact_name: Option<String>,
    description: Option<String>,
    platform: Option<String>,
}

#[derive(Serialize)]
pub struct CreateLeadResponse {
    message: &'static str,
    lead_id: i64,
}

pub async fn create_lead(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeadBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateLeadResponse>)> {
    const REQUIRED: &str = "contact_name and description are required.";
    let req = body(payload, REQUIRED)?;

    let (Some(contact_name), Some(description)) =
        (present(req.contact_name), present(req.description))
    else {
        info!("Validation failed for /create-lead: missing parameters");
        return Err(ApiError::bad_request(REQUIRED));
    };
    info!("Received request to /create-lead for {}", contact_name);

    let (platform, _) = Platform::resolve(req.platform.as_deref().unwrap_or_default());
    let lead = NewLead::new(platform, &contact_name, &description);
    let lead_id = crm::create_lead(state.crm.as_ref(), &lead)
        .await
        .map_err(|e| ApiError::from_error("Failed to create lead.", e))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLeadResponse {
            message: "Lead created successfully",
            lead_id,
        }),
    ))
}

#[derive(Deserialize)]
pub struct SchedulePostBody {
    message: Option<String>,
    social_account_id: Option<i64>,
}

#[derive(Serialize)]
pub struct SchedulePostResponse {
    message: &'static str,
    post_id: i64,
}

pub async fn schedule_post(
    State(state): State<AppState>,
    payload: Result<Json<SchedulePostBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SchedulePostResponse>)> {
    const REQUIRED: &str = "message and social_account_id are required.";
    let req = body(payload, REQUIRED)?;

    let (Some(message), Some(account_id)) = (
        present(req.message),
        req.social_account_id.filter(|id| *id > 0),
    ) else {
        return Err(ApiError::bad_request(REQUIRED));
    };
    info!("Received request to /schedule-post for account {}", account_id);

    let post_id = crm::schedule_post(state.crm.as_ref(), &message, account_id)
        .await
        .map_err(|e| ApiError::from_error("Failed to create social post.", e))?;

    Ok((
        StatusCode::CREATED,
        Json(SchedulePostResponse {
            message: "Social post created successfully",
            post_id,
        }),
    ))
}

#[derive(Deserialize)]
pub struct LeadsQuery {
    contact_name: Option<String>,
    limit: Option<u32>,
}

#[derive(Serialize)]
pub struct LeadsResponse {
    leads: Vec<LeadRecord>,
    count: usize,
    timestamp: DateTime<Utc>,
}

pub async fn list_leads(
    State(state): State<AppState>,
    query: Result<Query<LeadsQuery>, QueryRejection>,
) -> ApiResult<Json<LeadsResponse>> {
    let query = params(query)?;
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let contact_name = present(query.contact_name);
    info!("Received request to /leads (limit {})", limit);

    let leads = crm::list_leads(state.crm.as_ref(), contact_name.as_deref(), limit)
        .await
        .map_err(|e| ApiError::from_error("Failed to fetch leads.", e))?;

    Ok(Json(LeadsResponse {
        count: leads.len(),
        leads,
        timestamp: Utc::now(),
    }))
}

#[derive(Serialize)]
pub struct PersonasResponse {
    personas: BTreeMap<&'static str, &'static Persona>,
    total_personas: usize,
    available_platforms: Vec<&'static str>,
    timestamp: DateTime<Utc>,
}

fn available_platforms() -> Vec<&'static str> {
    Platform::ALL.iter().map(|p| p.as_str()).collect()
}

pub async fn list_personas() -> Json<PersonasResponse> {
    let personas: BTreeMap<_, _> = Platform::ALL
        .iter()
        .map(|p| (p.as_str(), personas::get_persona(p.as_str()).persona))
        .collect();

    Json(PersonasResponse {
        total_personas: personas.len(),
        personas,
        available_platforms: available_platforms(),
        timestamp: Utc::now(),
    })
}

#[derive(Serialize)]
pub struct PersonaResponse {
    platform: String,
    persona: &'static Persona,
    is_default: bool,
    available_platforms: Vec<&'static str>,
    timestamp: DateTime<Utc>,
}

pub async fn get_persona(Path(platform): Path<String>) -> Json<PersonaResponse> {
    let lookup = personas::get_persona(&platform);
    if lookup.is_default {
        info!("Unknown persona platform '{}', using {}", platform, lookup.platform);
    }

    Json(PersonaResponse {
        platform,
        persona: lookup.persona,
        is_default: lookup.is_default,
        available_platforms: available_platforms(),
        timestamp: Utc::now(),
    })
}
