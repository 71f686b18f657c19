use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, info, warn};

use super::types::{Mention, Platform};
use super::MentionSource;
use crate::config::TwitterConfig;
use crate::error::{Error, Result};

/// Live mention timeline from the Twitter API v2.
pub struct TwitterSource {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
    account_id: Option<String>,
}

#[derive(Deserialize)]
struct MentionsResponse {
    data: Option<Vec<Tweet>>,
    includes: Option<Includes>,
    /// Partial errors. A reply with only errors is a failed call.
    #[serde(default)]
    errors: Vec<ApiProblem>,
}

#[derive(Deserialize)]
struct ApiProblem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ApiProblem {
    fn message(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("unspecified error")
    }
}

#[derive(Deserialize)]
struct Tweet {
    id: String,
    text: String,
    // Always requested through tweet.fields.
    created_at: DateTime<Utc>,
    author_id: Option<String>,
}

#[derive(Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Deserialize)]
struct User {
    id: String,
    username: String,
}

#[derive(Deserialize)]
struct MeResponse {
    data: User,
}

impl TwitterSource {
    pub fn new(config: &TwitterConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
            account_id: config.account_id.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let token = self
            .bearer_token
            .as_deref()
            .ok_or_else(|| Error::SourceUnavailable("TWITTER_BEARER_TOKEN is not set".into()))?;

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("Twitter request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::SourceUnavailable(format!(
                "Twitter API returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("unreadable Twitter response: {e}")))
    }

    /// Configured account id, or the authenticated account as a fallback.
    async fn resolve_account_id(&self) -> Result<String> {
        if let Some(id) = &self.account_id {
            return Ok(id.clone());
        }
        let me: MeResponse = self.get("/2/users/me", &[]).await?;
        info!("Resolved monitored account @{} ({})", me.data.username, me.data.id);
        Ok(me.data.id)
    }

    async fn fetch_mentions(&self) -> Result<Vec<Mention>> {
        let user_id = self.resolve_account_id().await?;
        info!("Fetching mentions for user ID {}", user_id);

        let path = format!("/2/users/{user_id}/mentions");
        let response: MentionsResponse = self
            .get(
                &path,
                &[
                    ("tweet.fields", "created_at,author_id,text"),
                    ("expansions", "author_id"),
                ],
            )
            .await?;

        if response.data.is_none() {
            if let Some(problem) = response.errors.first() {
                return Err(Error::SourceUnavailable(format!(
                    "Twitter API error: {}",
                    problem.message()
                )));
            }
        }
        for problem in &response.errors {
            warn!("Twitter API reported a partial error: {}", problem.message());
        }

        let usernames: HashMap<String, String> = response
            .includes
            .map(|i| i.users)
            .unwrap_or_default()
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let mut seen = HashSet::new();
        let mentions: Vec<Mention> = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|t| {
                if t.text.trim().is_empty() || !seen.insert(t.id.clone()) {
                    debug!("Skipping empty or duplicate tweet {}", t.id);
                    return false;
                }
                true
            })
            .map(|t| {
                let author_id = t.author_id.unwrap_or_default();
                Mention {
                    author_username: usernames.get(&author_id).cloned(),
                    id: t.id,
                    text: t.text,
                    created_at: t.created_at,
                    author_id,
                    platform: Platform::Twitter,
                    engagement: None,
                    precomputed: None,
                }
            })
            .collect();

        info!("Found {} mentions", mentions.len());
        Ok(mentions)
    }
}

#[async_trait]
impl MentionSource for TwitterSource {
    async fn fetch(&self, platform: Platform) -> Result<Vec<Mention>> {
        if platform != Platform::Twitter {
            return Err(Error::SourceUnavailable(format!(
                "live mentions are only available for twitter, not {platform}"
            )));
        }

        self.fetch_mentions().await.inspect_err(|e| {
            error!("Error fetching Twitter mentions: {}", e);
        })
    }

    fn name(&self) -> &'static str {
        "twitter"
    }
}
