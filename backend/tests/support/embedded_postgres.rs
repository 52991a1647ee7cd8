//! Database provisioning on the embedded PostgreSQL cluster.
//!
//! Resets go through the synchronous `postgres` client because
//! `DROP DATABASE` cannot run inside a transaction. Schemas come from the
//! service's own embedded migrations.

use order_service::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

/// `postgres::Error` displays server errors as a bare `db error`; surface
/// the SQLSTATE and message instead.
fn describe(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db) => match db.detail() {
            Some(detail) => format!("{:?}: {} ({detail})", db.code(), db.message()),
            None => format!("{:?}: {}", db.code(), db.message()),
        },
        None => error.to_string(),
    }
}

/// Drop and recreate `name`, returning its connection URL.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<String, String> {
    let connection = cluster.connection();
    let mut admin = Client::connect(&connection.database_url("postgres"), NoTls)
        .map_err(|err| describe(&err))?;
    admin
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE); CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| describe(&err))?;
    Ok(connection.database_url(name))
}

/// Apply all pending migrations to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<usize, String> {
    run_pending_migrations(url).map_err(|err| err.to_string())
}
