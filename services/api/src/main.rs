use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use api::{AppState, create_router};
use common::{
    database::{DatabaseConfig, health_check, init_pool},
    jwt::{JwtConfig, JwtService},
    settings::ServerConfig,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Tokens are issued by the auth service; this one only verifies them
    let jwt_service = JwtService::new(JwtConfig::from_env()?)?;

    let app = create_router(AppState::new(pool, jwt_service));

    let server_config = ServerConfig::from_env("API", 3001)?;
    let listener = TcpListener::bind(server_config.bind_address()).await?;
    info!("API service listening on {}", server_config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
