//! Embedded schema migrations.
//!
//! The SQL under `backend/migrations` is compiled into the binary so the
//! server and the seeding tool can bring a database up to date without the
//! Diesel CLI.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking migration task did not complete.
    #[error("migration task aborted: {message}")]
    Task { message: String },
}

/// Apply pending migrations on a dedicated synchronous connection.
///
/// Returns the number of migrations applied.
///
/// # Errors
///
/// [`MigrationError::Connect`] when the database is unreachable and
/// [`MigrationError::Apply`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "migration applied");
    }
    Ok(applied.len())
}

/// [`run_pending_migrations`] on the blocking thread pool.
///
/// # Errors
///
/// As [`run_pending_migrations`], plus [`MigrationError::Task`] when the
/// blocking task panics or is cancelled.
pub async fn run_pending_migrations_async(database_url: String) -> Result<usize, MigrationError> {
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unreachable_database_is_a_connect_error() {
        let result = run_pending_migrations("postgres://nobody@127.0.0.1:1/orders");
        assert!(matches!(result, Err(MigrationError::Connect { .. })));
    }
}
