use std::sync::Arc;

use further_core::{Config, Logger, Mailer};
use further_db::{Database, Models};

/// Application context shared by every route handler via `State<Arc<Application>>`.
///
/// Built once after the pool is open and kept until the process exits.
pub struct Application {
    pub config: Arc<Config>,
    pub db: Database,
    pub logger: Logger,
    pub models: Models,
    pub mailer: Mailer,
}

impl Application {
    /// Wire already constructed collaborators together. Opens nothing.
    pub fn assemble(config: Arc<Config>, db: Database, logger: Logger) -> Self {
        let models = db.models();
        let mailer = Mailer::new(&config.smtp);
        Self {
            config,
            db,
            logger,
            models,
            mailer,
        }
    }
}
