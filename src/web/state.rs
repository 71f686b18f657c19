use std::sync::Arc;
use std::time::Duration;

use crate::analysis::{build_classifier, Classifier};
use crate::config::AppConfig;
use crate::crm::{CrmSink, OdooClient};
use crate::mentions::build_source;
use crate::pipeline::EnrichmentPipeline;

/// Read-only handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EnrichmentPipeline>,
    pub classifier: Arc<dyn Classifier>,
    pub crm: Arc<dyn CrmSink>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let classifier = build_classifier(config.pipeline.classifier, &config.openai);
        let source = build_source(config.pipeline.source, &config.twitter);
        let pipeline = EnrichmentPipeline::new(
            source,
            classifier.clone(),
            config.pipeline.personas,
            Duration::from_secs(config.pipeline.classify_timeout_secs),
        );

        Self {
            pipeline: Arc::new(pipeline),
            classifier,
            crm: Arc::new(OdooClient::new(&config.odoo)),
        }
    }

    pub fn from_parts(
        pipeline: EnrichmentPipeline,
        classifier: Arc<dyn Classifier>,
        crm: Arc<dyn CrmSink>,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            classifier,
            crm,
        }
    }
}
