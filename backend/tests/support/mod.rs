//! Shared helpers for integration suites that need a real PostgreSQL.
//!
//! Each test gets its own temporary database on the shared embedded cluster
//! provided by `pg-embed-setup-unpriv`. Databases are cloned from a template
//! that carries the current migrations, keyed by a hash of the migrations
//! directory so schema edits produce a fresh template.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;
use uuid::Uuid;

use storefront::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Pool and runtime bound to one migrated temporary database.
///
/// Field order matters: the pool closes before the runtime stops, and the
/// database is dropped last.
pub struct PgHarness {
    pub pool: DbPool,
    pub runtime: Runtime,
    _database: TemporaryDatabase,
}

impl PgHarness {
    /// Run `future` to completion on the harness runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn template_name() -> Result<String, String> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(dir).map_err(|err| format!("hash migrations: {err}"))?;
    let short = hash.get(..8).unwrap_or(&hash);
    Ok(format!("storefront_template_{short}"))
}

fn ensure_template(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String, String> {
    let name = template_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&name);
        runtime
            .block_on(run_pending_migrations(url.to_string()))
            .map_err(|err| err.to_string())?;
    }
    Ok(name)
}

/// Provision a migrated database on the shared cluster with a small pool.
pub fn provision() -> Result<PgHarness, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| format!("cluster: {err:?}"))?;
    let template = ensure_template(cluster, &runtime)?;
    let database = cluster
        .temporary_database_from_template(
            format!("test_{}", Uuid::new_v4().simple()).as_str(),
            template.as_str(),
        )
        .map_err(|err| format!("clone template: {err:?}"))?;
    let url = database.url().to_string();

    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(url).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(PgHarness {
        pool,
        runtime,
        _database: database,
    })
}

/// True when `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip quietly when the cluster is opted out, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
