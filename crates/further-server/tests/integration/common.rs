use further_core::{AppError, Config, Logger};
use further_server::bootstrap;
use further_server::state::Application;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// Spins up a PostgreSQL container and returns its connection string.
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

pub fn resolve(args: &[String]) -> Config {
    let mut argv = vec!["api".to_string()];
    argv.extend_from_slice(args);
    Config::resolve(argv, |_| None).expect("valid flags")
}

pub fn quiet_logger() -> Logger {
    Logger::new(std::io::sink, tracing::Level::INFO)
}

/// Assemble the application, retrying while the container finishes starting up.
pub async fn assemble_when_ready(config: &Config) -> Application {
    const MAX_RETRIES: u32 = 30;
    let mut last: Option<AppError> = None;
    for _ in 0..MAX_RETRIES {
        match bootstrap::assemble(config.clone(), quiet_logger()).await {
            Ok(app) => return app,
            Err(e) => last = Some(e),
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    panic!("Failed to assemble application after {MAX_RETRIES} retries: {last:?}");
}
