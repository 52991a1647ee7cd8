//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ORDERS_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_RUN_MIGRATIONS: bool = true;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The configured host is not an IP address.
    #[error("invalid bind host '{host}'")]
    InvalidHost { host: String },
    /// No database URL was configured.
    #[error("database_url is not configured (set ORDERS_DATABASE_URL)")]
    MissingDatabaseUrl,
}

/// Runtime settings of the order service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ORDERS")]
pub struct ServiceSettings {
    /// Interface to bind; defaults to all IPv4 interfaces.
    pub host: Option<String>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept warm.
    pub pool_min_idle: Option<u32>,
    /// Apply embedded migrations before serving; defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl ServiceSettings {
    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref() {
            None => DEFAULT_HOST,
            Some(host) => host
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidHost {
                    host: host.to_owned(),
                })?,
        };
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Whether embedded migrations run before the server starts.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(DEFAULT_RUN_MIGRATIONS)
    }

    /// Configured database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Connection pool configuration for the configured database.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "ORDERS_HOST",
        "ORDERS_PORT",
        "ORDERS_DATABASE_URL",
        "ORDERS_POOL_MAX_SIZE",
        "ORDERS_POOL_MIN_IDLE",
        "ORDERS_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("order-service")])
            .expect("config should load")
    }

    fn cleared_env() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(settings.run_migrations, None);
        assert!(settings.run_migrations());
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut env = cleared_env();
        env.extend([
            ("ORDERS_HOST", Some("127.0.0.1".to_owned())),
            ("ORDERS_PORT", Some("9090".to_owned())),
            (
                "ORDERS_DATABASE_URL",
                Some("postgres://localhost/orders".to_owned()),
            ),
            ("ORDERS_POOL_MAX_SIZE", Some("4".to_owned())),
            ("ORDERS_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);
        let _guard = lock_env(env);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal address")
        );
        assert!(!settings.run_migrations());
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.min_idle(), Some(DEFAULT_POOL_MIN_IDLE));
    }

    #[rstest]
    fn run_migrations_can_be_enabled_explicitly() {
        let mut env = cleared_env();
        env.push(("ORDERS_RUN_MIGRATIONS", Some("true".to_owned())));
        let _guard = lock_env(env);

        let settings = load_from_empty_args();
        assert_eq!(settings.run_migrations, Some(true));
        assert!(settings.run_migrations());
    }

    #[rstest]
    #[case("localhost")]
    #[case("not an address")]
    fn hostnames_are_rejected(#[case] host: &str) {
        let settings = ServiceSettings {
            host: Some(host.to_owned()),
            port: None,
            database_url: None,
            pool_max_size: None,
            pool_min_idle: None,
            run_migrations: None,
        };
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost {
                host: host.to_owned()
            })
        );
    }
}
