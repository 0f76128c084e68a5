//! Structured JSON logging.
//!
//! [`Logger`] owns a [`Dispatch`] bound to one output stream and level. It is
//! cloned into the application context; [`Logger::install`] makes it the
//! process-wide default so spans from the HTTP layer land in the same stream.

use tracing::dispatcher::SetGlobalDefaultError;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Level};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    level: Level,
}

impl Logger {
    /// JSON logger writing entries at `level` and above to `writer`.
    pub fn new<W>(writer: W, level: Level) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::default().add_directive(LevelFilter::from_level(level).into());
        Self::with_filter(writer, level, filter)
    }

    /// Like [`Logger::new`], but `RUST_LOG` may refine the filter.
    pub fn from_env<W>(writer: W, level: Level) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .from_env_lossy();
        Self::with_filter(writer, level, filter)
    }

    fn with_filter<W>(writer: W, level: Level, filter: EnvFilter) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_target(false)
            .with_env_filter(filter)
            .with_writer(writer)
            .finish();

        Self {
            dispatch: Dispatch::new(subscriber),
            level,
        }
    }

    /// Make this logger the global default.
    pub fn install(&self) -> Result<(), SetGlobalDefaultError> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("level", &self.level).finish()
    }
}
