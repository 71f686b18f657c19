use anyhow::Result;
use tracing::info;

use crm_social_assistant::config::AppConfig;
use crm_social_assistant::web::{self, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crm_social_assistant=info".into()),
        )
        .init();

    info!("Loading configuration...");
    let config = AppConfig::load()?;

    let app_state = AppState::new(&config);
    info!(
        "Mention source: {}, classifier: {}, personas: {}",
        app_state.pipeline.source_name(),
        app_state.pipeline.classifier_name(),
        config.pipeline.personas
    );

    let router = web::create_router(app_state);
    let addr = format!("{}:{}", config.web.host, config.web.port);
    info!("Backend service listening at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
