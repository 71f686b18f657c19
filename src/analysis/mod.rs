pub mod openai;
pub mod rules;
pub mod sentiment;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ClassifierKind, OpenAiConfig};
use crate::error::Result;

pub use openai::OpenAiClassifier;
pub use rules::RuleClassifier;
pub use sentiment::Sentiment;
pub use types::{Analysis, EnrichedMention, Verdict};

/// Inputs for reply generation: the mention plus the verdict it received.
#[derive(Debug, Clone)]
pub struct ReplyRequest<'a> {
    pub text: &'a str,
    pub author: &'a str,
    pub sentiment: Sentiment,
    pub is_lead: bool,
    pub suggested_action: &'a str,
}

/// Classification and reply capability. The model-backed and the keyword
/// rule implementations are interchangeable behind this trait.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str, author: &str) -> Result<Verdict>;

    async fn generate_reply(&self, request: &ReplyRequest<'_>) -> Result<String>;

    fn name(&self) -> &'static str;
}

pub fn build_classifier(kind: ClassifierKind, config: &OpenAiConfig) -> Arc<dyn Classifier> {
    match kind {
        ClassifierKind::Rules => Arc::new(RuleClassifier),
        ClassifierKind::Openai => Arc::new(OpenAiClassifier::new(config)),
    }
}
