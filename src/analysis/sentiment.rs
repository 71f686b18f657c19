use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Sentiment of a mention as judged by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

#[cfg(test)]
impl Sentiment {
    pub fn all() -> &'static [Sentiment] {
        &[Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lenient parse for caller input; case and surrounding space are ignored.
impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(Error::Validation(format!(
                "sentiment must be Positive, Negative or Neutral, got '{}'.",
                s.trim()
            ))),
        }
    }
}
