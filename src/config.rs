use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub openai: OpenAiConfig,
    pub twitter: TwitterConfig,
    pub odoo: OdooConfig,
    pub pipeline: PipelineConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    // Loaded from env
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-1106".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 20,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    pub base_url: String,
    // Loaded from env
    #[serde(skip)]
    pub bearer_token: Option<String>,
    #[serde(skip)]
    pub account_id: Option<String>,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twitter.com".to_string(),
            bearer_token: None,
            account_id: None,
        }
    }
}

/// Odoo connection settings. Everything comes from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OdooConfig {
    #[serde(skip)]
    pub url: Option<String>,
    #[serde(skip)]
    pub db: Option<String>,
    #[serde(skip)]
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Fixture,
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    #[default]
    Rules,
    Openai,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceKind,
    pub classifier: ClassifierKind,
    pub personas: bool,
    pub classify_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Fixture,
            classifier: ClassifierKind::Rules,
            personas: true,
            classify_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl AppConfig {
    /// Reads `.env`, then `config.toml` (or `CONFIG_PATH`) if it exists, then
    /// overlays credentials from the environment. Missing credentials are not
    /// an error here; they fail at first use.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let mut config = if path.exists() {
            let config_text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_toml(&config_text)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            AppConfig::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn apply_env(&mut self) {
        self.openai.api_key = env_opt("OPENAI_API_KEY");
        self.twitter.bearer_token = env_opt("TWITTER_BEARER_TOKEN");
        self.twitter.account_id = env_opt("TWITTER_ACCOUNT_ID_TO_MONITOR");
        self.odoo.url = env_opt("ODOO_URL");
        self.odoo.db = env_opt("ODOO_DB");
        self.odoo.username = env_opt("ODOO_USERNAME");
        self.odoo.password = env_opt("ODOO_PASSWORD");
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
