use further_core::DatabaseConfig;
use further_db::Database;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// Spins up a PostgreSQL container and returns its connection string.
///
/// The `ContainerAsync` must be kept in scope for the test duration;
/// dropping it stops the container.
pub async fn start_postgres() -> (String, ContainerAsync<GenericImage>) {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "further_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let dsn = format!("postgresql://postgres:postgres@{host}:{port}/further_test");
    (dsn, container)
}

pub fn db_config(dsn: &str) -> DatabaseConfig {
    DatabaseConfig {
        dsn: dsn.to_string(),
        max_open_conns: 25,
        max_idle_conns: 25,
        max_idle_time: "15m".to_string(),
    }
}

/// Open the database, retrying while the container finishes starting up.
pub async fn open_when_ready(config: &DatabaseConfig) -> Database {
    const MAX_RETRIES: u32 = 30;
    let mut retries = 0;
    loop {
        match Database::open(config).await {
            Ok(db) => return db,
            Err(e) => {
                retries += 1;
                if retries >= MAX_RETRIES {
                    panic!("Failed to open database after {MAX_RETRIES} retries: {e}");
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    }
}
