#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]
//! Insert deterministic fake orders into a PostgreSQL database.
//!
//! # Examples
//! ```sh
//! cargo run --bin seed-orders -- --database-url postgres://localhost/orders --count 25
//! ```

use std::env;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use order_factory::{OrderFactory, OrderSeed};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use order_service::domain::OrderDraft;
use order_service::domain::ports::OrderRepository;
use order_service::outbound::persistence::{
    DbPool, DieselOrderRepository, PoolConfig, run_pending_migrations_async,
};

/// `seed-orders` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-orders",
    about = "Populate the order tables with deterministic sample data",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Number of orders to insert.
    #[arg(long, default_value_t = 10)]
    count: usize,
    /// Seed for the generator; equal seeds produce equal orders.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Skip applying pending migrations first.
    #[arg(long)]
    skip_migrations: bool,
}

fn init_tracing() {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main(CliArgs::parse()))
}

async fn async_main(args: CliArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;
    if !args.skip_migrations {
        run_pending_migrations_async(database_url.clone())
            .await
            .wrap_err("apply migrations")?;
    }

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("create database pool")?;
    let repository = DieselOrderRepository::new(pool);

    let seeds = OrderFactory::new(args.seed)
        .orders(args.count)
        .wrap_err("generate orders")?;
    for seed in &seeds {
        let draft = seed_to_draft(seed)?;
        let order = repository
            .create(&draft)
            .await
            .wrap_err("insert order")?;
        info!(order_id = order.id(), customer_id = order.customer_id(), "seeded order");
    }

    info!(inserted = seeds.len(), seed = args.seed, "seeding complete");
    Ok(())
}

/// Route the generated order through the same wire contract the API accepts.
fn seed_to_draft(seed: &OrderSeed) -> Result<OrderDraft> {
    let body = serde_json::to_value(seed).wrap_err("serialise generated order")?;
    OrderDraft::deserialize(&body).map_err(|err| eyre!("generated order rejected: {err}"))
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    let url = match explicit {
        Some(value) => value,
        None => env::var("DATABASE_URL")
            .map_err(|_| eyre!("database URL missing: set --database-url or DATABASE_URL"))?,
    };
    if url.trim().is_empty() {
        return Err(eyre!("database URL must not be empty"));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generated_orders_satisfy_the_wire_contract() {
        let seeds = OrderFactory::new(7).orders(5).expect("orders");
        for seed in &seeds {
            let draft = seed_to_draft(seed).expect("valid draft");
            assert_eq!(draft.customer_id, seed.customer_id);
            assert_eq!(draft.items().len(), seed.order_items.len());
        }
    }

    #[rstest]
    fn repeated_tracing_init_is_tolerated() {
        init_tracing();
        init_tracing();
    }

    #[rstest]
    fn empty_database_url_is_rejected() {
        assert!(resolve_database_url(Some("  ".to_owned())).is_err());
    }

    #[rstest]
    fn defaults_match_documented_values() {
        let args = CliArgs::try_parse_from(["seed-orders"]).expect("defaults parse");
        assert_eq!(args.count, 10);
        assert_eq!(args.seed, 42);
        assert!(!args.skip_migrations);
    }
}
