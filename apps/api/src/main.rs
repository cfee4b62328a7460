use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use talentlens_api::config::Config;
use talentlens_api::llm_client::{CompletionClient, OpenAiTransport};
use talentlens_api::routes::build_router;
use talentlens_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentLens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let transport = OpenAiTransport::new(&config.openai_base_url, config.ai_request_timeout)?;
    let completion = CompletionClient::new(Arc::new(transport), config.ai_settings());
    if completion.is_available() {
        info!(
            "Completion client initialized (model: {}, timeout: {:?})",
            completion.model(),
            config.ai_request_timeout
        );
    } else {
        warn!("OPENAI_API_KEY is not set; AI features are disabled");
    }

    let state = AppState {
        completion,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
