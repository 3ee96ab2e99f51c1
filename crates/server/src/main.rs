use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ferryman_core::{
    create_credential, load_config, validate_config, AzureBlobClient, BlobStore, RelayPipeline,
    TranscodeRunner,
};

use ferryman_server::api::create_router;
use ferryman_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("FERRYMAN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Credential provider: {:?}", config.credentials.provider);
    info!("Storage endpoint suffix: {}", config.storage.endpoint_suffix);

    // Create credential provider
    let credential =
        create_credential(&config.credentials).context("Failed to create credential provider")?;
    info!("Using credential provider: {}", credential.provider_name());

    // Create blob store client
    let store: Arc<dyn BlobStore> = Arc::new(AzureBlobClient::new(config.storage.clone()));

    // Create transcode runner. The binary is resolved again on every relay,
    // so a binary deployed after startup is picked up without a restart.
    let transcoder = TranscodeRunner::new(config.transcoder.clone());
    match transcoder.resolve_binary() {
        Ok(path) => info!("Transcoding binary found at {:?}", path),
        Err(e) => warn!("Transcoding binary not found at startup: {}", e),
    }

    // Create relay pipeline
    let pipeline = RelayPipeline::new(store, credential, transcoder);

    // Create app state
    let app_state = Arc::new(AppState::new(config.clone(), pipeline));

    // Create router
    let app = create_router(app_state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
