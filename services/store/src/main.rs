use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use common::{
    DocumentStore, PgDocumentStore,
    database::{self, DatabaseConfig},
};
use store::{
    AppState,
    config::ServerConfig,
    jwt::{JwtConfig, JwtService},
    password::PasswordHasher,
    routes,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, the environment may already be set
    dotenvy::dotenv().ok();

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "store=info,common=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting store service");

    let server_config = ServerConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;

    // Initialize database connection pool
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::ensure_schema(&pool).await?;

    let jwt_service = JwtService::new(jwt_config)?;
    let document_store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool.clone()));
    let app_state = AppState::new(document_store, jwt_service, PasswordHasher::new())?;

    info!("Store service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = server_config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Store service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database::close_pool(&pool).await;
    info!("Store service stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
