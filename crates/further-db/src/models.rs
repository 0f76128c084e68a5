use further_core::AppError;
use sqlx::PgPool;

/// Entry point for model queries, backed by the shared pool.
#[derive(Clone)]
pub struct Models {
    pool: PgPool,
}

impl Models {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
