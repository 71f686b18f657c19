use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use super::types::Verdict;
use super::{Classifier, ReplyRequest};
use crate::config::OpenAiConfig;
use crate::error::{Error, Result};

pub struct OpenAiClassifier {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

const CLASSIFY_PROMPT: &str = r#"You are a lead qualification analyst for a software company's social media team. Read the mention below and judge it.

Fields to produce:
- sentiment: exactly one of "Positive", "Negative" or "Neutral".
- is_lead: a lead is a mention expressing interest, pricing/feature/demo questions, or competitive comparison; venting, support requests, or generic comments are not leads.
- suggested_action: one concrete next step for the social media manager, e.g. "Create lead in CRM and reply with pricing info.", "Reply with a link to the support documentation.", "Thank the user for their positive feedback."

Respond ONLY with a single JSON object and nothing else:
{"sentiment": "<Positive|Negative|Neutral>", "is_lead": <true|false>, "suggested_action": "<string>"}"#;

const REPLY_PROMPT: &str = "You write short, friendly public replies on behalf of a software company's social media team. Address the author by their @handle, stay under 280 characters, and output only the reply text.";

impl OpenAiClassifier {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn complete(&self, messages: Vec<Message>, json_only: bool) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::upstream("openai", "OPENAI_API_KEY is not set"))?;

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: 0.2,
            response_format: json_only.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::upstream("openai", format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(
                "openai",
                format!("API returned {status}: {body}"),
            ));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream("openai", format!("unreadable response: {e}")))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| Error::upstream("openai", "empty completion"))
    }
}

#[async_trait]
impl Classifier for OpenAiClassifier {
    async fn classify(&self, text: &str, author: &str) -> Result<Verdict> {
        info!("Analyzing mention from @{}: \"{}\"", author, text);

        let prompt = format!(
            "{}\n\nMention from user \"{}\":\n---\n{}\n---",
            CLASSIFY_PROMPT, author, text
        );
        let messages = vec![Message {
            role: "user",
            content: prompt,
        }];

        let verdict = self
            .complete(messages, true)
            .await
            .and_then(|raw| Verdict::from_model_json(&raw))
            .map_err(|e| {
                error!("Failed to classify mention from @{}: {}", author, e);
                match e {
                    Error::ClassificationFailure(_) => e,
                    other => Error::ClassificationFailure(other.to_string()),
                }
            })?;

        info!(
            "Analysis complete for @{}: {} (lead: {})",
            author, verdict.sentiment, verdict.is_lead
        );
        Ok(verdict)
    }

    async fn generate_reply(&self, request: &ReplyRequest<'_>) -> Result<String> {
        info!("Generating reply for mention from @{}", request.author);

        let context = format!(
            "Mention from @{}:\n\"{}\"\n\nSentiment: {}\nPotential lead: {}\nRecommended action: {}",
            request.author,
            request.text,
            request.sentiment,
            request.is_lead,
            request.suggested_action
        );
        let messages = vec![
            Message {
                role: "system",
                content: REPLY_PROMPT.to_string(),
            },
            Message {
                role: "user",
                content: context,
            },
        ];

        let reply = self.complete(messages, false).await?;
        Ok(reply.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
