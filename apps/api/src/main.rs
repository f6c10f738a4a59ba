use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_typeset::config::Config;
use resume_typeset::layout::HelveticaMeasure;
use resume_typeset::llm_client::{self, LlmClient};
use resume_typeset::pipeline::{HintProvider, LlmHintProvider};
use resume_typeset::routes::build_router;
use resume_typeset::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-typeset v{}", env!("CARGO_PKG_VERSION"));

    // Structuring hints are optional; without a key every request is classified heuristically.
    let hint_provider: Option<Arc<dyn HintProvider>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.hint_timeout)?;
            info!(
                "Hint provider initialized (model: {}, timeout: {:?})",
                llm_client::MODEL,
                config.hint_timeout
            );
            Some(Arc::new(LlmHintProvider(llm)))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set, hint provider disabled");
            None
        }
    };

    let geometry = config.page_size.geometry();
    info!("Default page: {:?} ({}x{}pt)", config.page_size, geometry.width, geometry.height);

    let state = AppState {
        config: config.clone(),
        hint_provider,
        measure: Arc::new(HelveticaMeasure),
        geometry,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
