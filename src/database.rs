use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use crate::{config::DatabaseConfig, error::Result};

/// Database connection pool type
pub type DbPool = sqlx::PgPool;

/// Database connection type - supports both pool connections and transactions
/// Use `conn.as_mut()` for pool connections, `tx.as_mut()` for transactions
pub type DbConn = sqlx::PgConnection;

/// Opens the process-wide connection pool.
///
/// The pool is created once by the composition root and shared by every
/// request for the lifetime of the process.
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.connection_string().expose_secret())
        .await?;

    tracing::info!(
        host = %config.host,
        max_connections = config.max_connections,
        "Database pool established"
    );

    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn migrate(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
