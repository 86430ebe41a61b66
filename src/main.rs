use review_feedback_api::api::{self, AppState};
use review_feedback_api::config::AppConfig;
use review_feedback_api::enrichment::FeedbackEnricher;
use review_feedback_api::storage::ReviewStore;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("🚀 Starting Review Feedback API");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Storage: {}", config.storage.backend);
    info!("   - Model: {}", config.llm.model);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Initialize feedback enricher
    let enricher = Arc::new(FeedbackEnricher::new(config.llm.clone())?);

    // Initialize review storage
    info!("💾 Initializing review storage...");
    let store = ReviewStore::from_config(&config.storage).await?;
    match &store {
        ReviewStore::File(file) => match file.list_all().await {
            Ok(reviews) => info!("✅ File storage ready at {:?} ({} reviews)", file.path(), reviews.len()),
            Err(e) => error!("Failed to read file storage: {}", e),
        },
        ReviewStore::Document(_) => info!(
            "✅ Document storage ready ({}/{})",
            config.storage.database, config.storage.collection
        ),
    }

    let state = AppState {
        store: Arc::new(store),
        enricher,
    };

    let app = api::router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /                 - Liveness");
    info!("   GET  /health           - Health check");
    info!("   POST /api/reviews      - Submit review");
    info!("   GET  /api/reviews      - List reviews");
    info!("   GET  /api/analytics    - Rating analytics");
    info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
