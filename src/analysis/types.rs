use serde::{Deserialize, Serialize};

use super::sentiment::Sentiment;
use crate::error::{Error, Result};
use crate::mentions::Mention;
use crate::personas::PersonaAnnotation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub sentiment: Sentiment,
    /// Is this a potential sales lead?
    pub is_lead: bool,
    /// Concrete next step for the social media manager
    pub suggested_action: String,
}

/// Wire shape of a model completion. Anything else is rejected.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct VerdictContract {
    sentiment: Sentiment,
    is_lead: bool,
    suggested_action: String,
}

impl Verdict {
    pub fn new(sentiment: Sentiment, is_lead: bool, suggested_action: impl Into<String>) -> Self {
        Self {
            sentiment,
            is_lead,
            suggested_action: suggested_action.into(),
        }
    }

    /// Strictly parses a JSON-only model completion. There is no partial
    /// result: a parse error, a missing or extra field, or an empty action is
    /// a `ClassificationFailure`.
    pub fn from_model_json(raw: &str) -> Result<Self> {
        let parsed: VerdictContract = serde_json::from_str(raw.trim())
            .map_err(|e| Error::ClassificationFailure(format!("invalid verdict JSON: {e}")))?;

        if parsed.suggested_action.trim().is_empty() {
            return Err(Error::ClassificationFailure(
                "verdict has an empty suggested_action".to_string(),
            ));
        }

        Ok(Self {
            sentiment: parsed.sentiment,
            is_lead: parsed.is_lead,
            suggested_action: parsed.suggested_action,
        })
    }
}

/// Verdict plus the optional persona block, rendered as `ai_analysis`.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    #[serde(flatten)]
    pub verdict: Verdict,
    #[serde(flatten)]
    pub persona: Option<PersonaAnnotation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrichedMention {
    #[serde(flatten)]
    pub mention: Mention,
    pub ai_analysis: Analysis,
}

impl EnrichedMention {
    pub fn new(mention: Mention, verdict: Verdict) -> Self {
        Self {
            mention,
            ai_analysis: Analysis {
                verdict,
                persona: None,
            },
        }
    }
}
