//! A helper program to initialize the database for testing.
//!
//! Every `*.sql` file in `./migrations` is executed once, in lexical
//! order. The migrations only use `CREATE TABLE IF NOT EXISTS`, so
//! running this repeatedly is harmless.

use std::env;
use std::path::PathBuf;

use sqlx::mysql::MySqlPool;
use sqlx::Executor;

use log::{debug, info, initialize_logger};

const MIGRATION_DIR: &str = "./migrations";

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let logger = initialize_logger();
    let connection_string = env::var("BACKEND_DB_CONNECTION_STRING")
        .expect("could not read BACKEND_DB_CONNECTION_STRING");

    debug!(logger, "Connecting to database...");

    let pool = MySqlPool::connect(&connection_string)
        .await
        .expect("could not connect to database");

    let migrations = find_migrations().await;
    debug!(logger, "Running migrations..."; "count" => migrations.len());

    for path in migrations {
        let sql = tokio::fs::read_to_string(&path)
            .await
            .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));

        pool.execute(sql.as_str())
            .await
            .unwrap_or_else(|e| panic!("failed to run {}: {}", path.display(), e));

        info!(logger, "Applied migration"; "path" => %path.display());
    }

    debug!(logger, "Completed initialization.");
}

async fn find_migrations() -> Vec<PathBuf> {
    let mut entries = tokio::fs::read_dir(MIGRATION_DIR)
        .await
        .expect("could not list migrations");

    let mut paths = Vec::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .expect("could not read migration entry")
    {
        let path = entry.path();

        if path.extension().map_or(false, |e| e == "sql") {
            paths.push(path);
        }
    }

    paths.sort();
    paths
}
