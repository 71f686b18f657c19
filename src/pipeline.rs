//! Mention enrichment: fetch, classify every mention concurrently, then
//! attach persona annotations.

use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::analysis::{Classifier, EnrichedMention, Verdict};
use crate::error::{Error, Result};
use crate::mentions::{Mention, MentionSource, Platform};
use crate::personas;

pub struct EnrichmentPipeline {
    source: Arc<dyn MentionSource>,
    classifier: Arc<dyn Classifier>,
    personas: bool,
    classify_timeout: Duration,
}

impl EnrichmentPipeline {
    pub fn new(
        source: Arc<dyn MentionSource>,
        classifier: Arc<dyn Classifier>,
        personas: bool,
        classify_timeout: Duration,
    ) -> Self {
        Self {
            source,
            classifier,
            personas,
            classify_timeout,
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Enriched mentions for `platform`, in source order.
    ///
    /// Classification requests are issued all at once. The first failure
    /// fails the whole batch; there are no partial results.
    pub async fn analyze_mentions(&self, platform: Platform) -> Result<Vec<EnrichedMention>> {
        let mentions = self.source.fetch(platform).await?;
        info!(
            "Classifying {} {} mentions with {}",
            mentions.len(),
            platform,
            self.classifier.name()
        );

        let verdicts = try_join_all(mentions.iter().map(|m| self.verdict_for(m))).await?;

        let enriched = mentions
            .into_iter()
            .zip(verdicts)
            .map(|(mention, verdict)| {
                let persona = self
                    .personas
                    .then(|| personas::annotate_mention(platform.as_str(), &mention, &verdict));
                let mut item = EnrichedMention::new(mention, verdict);
                item.ai_analysis.persona = persona;
                item
            })
            .collect::<Vec<_>>();

        let leads = enriched
            .iter()
            .filter(|e| e.ai_analysis.verdict.is_lead)
            .count();
        info!("Enriched {} mentions ({} leads)", enriched.len(), leads);
        Ok(enriched)
    }

    async fn verdict_for(&self, mention: &Mention) -> Result<Verdict> {
        if let Some(verdict) = &mention.precomputed {
            return Ok(verdict.clone());
        }

        let call = self.classifier.classify(&mention.text, mention.handle());
        match tokio::time::timeout(self.classify_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Classification of mention {} timed out", mention.id);
                Err(Error::ClassificationFailure(format!(
                    "timed out after {}s",
                    self.classify_timeout.as_secs()
                )))
            }
        }
    }
}
