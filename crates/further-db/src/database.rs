use std::sync::{Arc, OnceLock, Weak};

use further_core::{AppError, DatabaseConfig};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::PoolSettings;
use crate::models::Models;
use crate::probe::{PROBE_TIMEOUT, PingProbe, Probe};

/// Central database facade: owns the connection pool and vends models.
///
/// Only [`Database::open`] hands one out, and only after the liveness probe
/// succeeded.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    idle_cap: Option<Arc<IdleCap>>,
}

/// Bounds how many connections the pool keeps idle.
///
/// Consulted on every release; the release hook holds only a weak reference,
/// so the pool does not keep itself alive through its own hook.
struct IdleCap {
    max_idle: usize,
    pool: OnceLock<PgPool>,
}

impl IdleCap {
    /// Returns true if a connection being released may stay idle.
    ///
    /// Concurrent releases can each see the last free slot, so the bound may
    /// be overshot by the number of simultaneous releases.
    fn admits_idle(&self) -> bool {
        match self.pool.get() {
            Some(pool) => pool.num_idle() < self.max_idle,
            None => true,
        }
    }
}

impl Database {
    /// Open the pool and confirm the database answers within [`PROBE_TIMEOUT`].
    pub async fn open(config: &DatabaseConfig) -> Result<Self, AppError> {
        Self::open_with_probe(config, &PingProbe).await
    }

    /// Open the pool, running `probe` once as the liveness check.
    ///
    /// Configuration errors are returned before the probe runs. If the probe
    /// fails or misses its deadline, the pool is closed before returning.
    pub async fn open_with_probe<P: Probe>(
        config: &DatabaseConfig,
        probe: &P,
    ) -> Result<Self, AppError> {
        let settings = PoolSettings::from_config(config)?;
        let db = Self::build(settings);

        match tokio::time::timeout(PROBE_TIMEOUT, probe.probe(&db.pool)).await {
            Ok(Ok(())) => Ok(db),
            Ok(Err(e)) => {
                db.close().await;
                Err(AppError::ProbeConnectivityFailure(e.to_string()))
            }
            Err(_) => {
                db.close().await;
                Err(AppError::ProbeTimeout(PROBE_TIMEOUT))
            }
        }
    }

    /// Build a lazy pool; no connection is made until first use.
    fn build(settings: PoolSettings) -> Self {
        let options = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .idle_timeout(settings.idle_timeout);

        if !settings.caps_idle() {
            let pool = options.connect_lazy_with(settings.connect_options);
            return Self {
                pool,
                idle_cap: None,
            };
        }

        let cap = Arc::new(IdleCap {
            max_idle: settings.max_idle as usize,
            pool: OnceLock::new(),
        });
        let hook_cap: Weak<IdleCap> = Arc::downgrade(&cap);

        let pool = options
            .after_release(move |_conn, _meta| {
                let keep = hook_cap.upgrade().is_none_or(|cap| cap.admits_idle());
                Box::pin(async move { Ok(keep) })
            })
            .connect_lazy_with(settings.connect_options);
        let _ = cap.pool.set(pool.clone());

        Self {
            pool,
            idle_cap: Some(cap),
        }
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            idle_cap: None,
        }
    }

    /// Get a [`Models`] facade backed by this pool.
    pub fn models(&self) -> Models {
        Models::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection and stop the pool's background tasks.
    ///
    /// Safe to call more than once.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Idle bound in force, if it can ever bind.
    pub fn idle_limit(&self) -> Option<usize> {
        self.idle_cap.as_ref().map(|cap| cap.max_idle)
    }
}
