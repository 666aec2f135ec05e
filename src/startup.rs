use std::time::Duration;

use crate::{config::Config, error::AppError};

/// Timeout applied to every outbound request to the backend API and rank oracles.
const HTTP_TIMEOUT_SECONDS: u64 = 15;

/// Installs the global tracing subscriber.
///
/// Log levels come from `RUST_LOG` when set, otherwise `info` for this crate and
/// `warn` for the Discord gateway internals which are chatty at info level.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the bot can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the shared HTTP client used for the backend API and rank lookups.
///
/// Redirects are disabled so a misconfigured `API_URL` can never forward the
/// static authorization token to another host.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Client ready to be cloned into services
/// - `Err(AppError::ReqwestErr)` - TLS backend failed to initialize
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
        .user_agent(concat!("evobot/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}
