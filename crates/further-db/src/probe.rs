use std::future::Future;
use std::time::Duration;

use sqlx::{Connection, PgPool};

/// Deadline for the startup liveness probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Confirms a freshly built pool can reach the database.
pub trait Probe: Send + Sync {
    fn probe(&self, pool: &PgPool) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

/// Checks out one connection and pings it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingProbe;

impl Probe for PingProbe {
    async fn probe(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        let mut conn = pool.acquire().await?;
        conn.ping().await
    }
}
