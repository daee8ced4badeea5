use std::path::PathBuf;
use std::sync::Arc;

use log::Logger;

use crate::config::get_variable;
use crate::db::Db;

/// Everything a route needs, cloned into each one.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub db: Arc<dyn Db + Send + Sync>,
    pub config: Arc<Config>,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, db: Arc<dyn Db + Send + Sync>, config: Config) -> Self {
        Self {
            logger,
            db,
            config: Arc::new(config),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// The first path segment of the rating routes, without slashes.
    pub(crate) ratings_path: String,

    /// The newline-delimited list of forbidden words.
    pub(crate) blocklist_path: PathBuf,
}

impl Config {
    pub fn new(ratings_path: impl Into<String>, blocklist_path: impl Into<PathBuf>) -> Self {
        Self {
            ratings_path: ratings_path.into(),
            blocklist_path: blocklist_path.into(),
        }
    }

    /// Reads `BACKEND_RATINGS_PATH` and `BACKEND_BLOCKLIST_PATH`.
    pub fn from_env() -> Self {
        Config::new(
            get_variable("BACKEND_RATINGS_PATH"),
            get_variable("BACKEND_BLOCKLIST_PATH"),
        )
    }
}
