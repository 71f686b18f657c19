use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::analysis::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Twitter,
    Linkedin,
    Instagram,
    Facebook,
}

impl Platform {
    /// Fixed ordering used wherever platforms are listed.
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Instagram,
        Platform::Facebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Linkedin => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
        }
    }

    /// Exact-match lookup of a platform key.
    pub fn from_key(key: &str) -> Option<Platform> {
        Self::ALL.into_iter().find(|p| p.as_str() == key)
    }

    /// Like `from_key`, but falls back to the default platform. The flag is
    /// `true` when the fallback was used.
    pub fn resolve(key: &str) -> (Platform, bool) {
        match Self::from_key(key) {
            Some(platform) => (platform, false),
            None => (Platform::default(), true),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        }
    }

    pub fn is_pressing(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Critical)
    }
}

/// Audience metadata attached to fixture mentions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub followers: u64,
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_urgency: Option<Urgency>,
    /// Platform-specific profile details (job title, influencer tier, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: String,
    pub author_username: Option<String>,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<Engagement>,
    /// Verdict shipped with fixture data; the pipeline uses it instead of a
    /// classifier call.
    #[serde(skip)]
    pub precomputed: Option<Verdict>,
}

impl Mention {
    /// Handle used when addressing the author; falls back to the raw id.
    pub fn handle(&self) -> &str {
        self.author_username.as_deref().unwrap_or(&self.author_id)
    }
}
