use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use portfolio_api::config::{self, design_file::load_design_system};
use portfolio_api::database::models::DesignSystemConfig;
use portfolio_api::database::{DatabaseManager, Stores};
use portfolio_api::is_production;
use portfolio_api::services::ContactRelay;
use portfolio_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    info!("Starting Portfolio API in {:?} mode", config.environment);

    let stores = match config.database.url {
        Some(_) => {
            let pool = DatabaseManager::connect(&config.database).await?;
            if config.database.run_migrations {
                DatabaseManager::migrate(&pool).await?;
            }
            Stores::postgres(pool)
        }
        None if is_production!() => {
            anyhow::bail!("DATABASE_URL must be set in production");
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store (data is lost on exit)");
            Stores::memory()
        }
    };

    let fallback_design = match &config.design.system_file {
        Some(path) => load_design_system(path)
            .with_context(|| format!("loading design system file {}", path.display()))?,
        None => DesignSystemConfig::default(),
    };

    let contact = ContactRelay::new(config.contact.clone())?;
    let state = AppState::new(stores, fallback_design, config.api.clone(), contact);
    let router = app(state, &config.security);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Portfolio API listening on http://{}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
