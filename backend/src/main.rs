//! Order service entry-point: loads settings, prepares the database and
//! serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use order_service::inbound::http::health::HealthState;
use order_service::outbound::persistence::{
    DbPool, MigrationError, PoolError, run_pending_migrations_async,
};
use order_service::settings::{ServiceSettings, SettingsError};

use server::{ServerConfig, create_server};

/// Exit status reported when the database cannot be initialised.
const DATABASE_INIT_EXIT_CODE: i32 = 4;

#[derive(Debug, thiserror::Error)]
enum DatabaseInitError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

async fn init_database(settings: &ServiceSettings) -> Result<DbPool, DatabaseInitError> {
    let pool_config = settings.pool_config()?;
    if settings.run_migrations() {
        let applied = run_pending_migrations_async(pool_config.database_url().to_owned()).await?;
        info!(applied, "database migrations complete");
    }
    Ok(DbPool::new(pool_config).await?)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let db_pool = match init_database(&settings).await {
        Ok(pool) => pool,
        Err(err) => {
            error!(error = %err, "database initialisation failed");
            std::process::exit(DATABASE_INIT_EXIT_CODE);
        }
    };

    let config = ServerConfig::new(bind_addr, db_pool);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "order service listening");
    server.await
}
