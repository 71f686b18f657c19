pub mod fixtures;
pub mod twitter;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{SourceKind, TwitterConfig};
use crate::error::Result;

pub use fixtures::FixtureSource;
pub use twitter::TwitterSource;
pub use types::{Engagement, Mention, Platform, Urgency};

/// Where mentions come from. Live and fixture strategies yield the same shape.
#[async_trait]
pub trait MentionSource: Send + Sync {
    async fn fetch(&self, platform: Platform) -> Result<Vec<Mention>>;

    fn name(&self) -> &'static str;
}

pub fn build_source(kind: SourceKind, config: &TwitterConfig) -> Arc<dyn MentionSource> {
    match kind {
        SourceKind::Fixture => Arc::new(FixtureSource),
        SourceKind::Live => Arc::new(TwitterSource::new(config)),
    }
}
