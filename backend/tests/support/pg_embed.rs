//! Embedded PostgreSQL bootstrap for integration tests.
//!
//! Unless `PG_RUNTIME_DIR` and `PG_DATA_DIR` are both provided, each cluster
//! gets private install and data directories under
//! `<target>/pg-embed/orders-<pid>-<uuid>`. Bootstraps hold a process-wide
//! lock since they rewrite those environment variables.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static BOOTSTRAP: Mutex<()> = Mutex::new(());

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// Substrings of download failures worth another attempt.
const TRANSIENT_PATTERNS: [&str; 6] = [
    "connection reset",
    "connection refused",
    "timed out",
    "timeout",
    "temporarily unavailable",
    "dns error",
];

fn is_transient(error: &str) -> bool {
    let lowered = error.to_lowercase();
    TRANSIENT_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

fn cluster_root() -> PathBuf {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target"),
        PathBuf::from,
    );
    target
        .join("pg-embed")
        .join(format!("orders-{}-{}", std::process::id(), Uuid::new_v4().simple()))
}

/// Install and data directories for a fresh cluster.
fn private_dirs() -> std::io::Result<[(&'static str, Option<String>); 2]> {
    let root = cluster_root();
    let install = root.join("install");
    let data = root.join("data");
    std::fs::create_dir_all(&install)?;
    std::fs::create_dir_all(&data)?;
    Ok([
        ("PG_RUNTIME_DIR", Some(install.to_string_lossy().into_owned())),
        ("PG_DATA_DIR", Some(data.to_string_lossy().into_owned())),
    ])
}

/// Start a [`TestCluster`], retrying transient download failures with
/// exponential backoff.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP.lock().unwrap_or_else(|err| err.into_inner());

    let preset =
        std::env::var_os("PG_RUNTIME_DIR").is_some() && std::env::var_os("PG_DATA_DIR").is_some();
    let _env = if preset {
        None
    } else {
        let vars = private_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env(vars))
    };

    let mut attempt = 0;
    loop {
        let error = match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => format!("{err:?}"),
        };
        if attempt == MAX_RETRIES || !is_transient(&error) {
            return Err(error);
        }
        let delay = Duration::from_millis(RETRY_DELAY_MS << attempt);
        eprintln!("pg-embed: retrying in {delay:?} after transient error: {error}");
        std::thread::sleep(delay);
        attempt += 1;
    }
}
