use std::sync::Mutex;

use slog::Drain;
use slog::Fuse;
use slog_async::Async;
use slog_json::Json;

pub use slog::{debug, error, info, o, trace, warn, Logger};

/// Builds the root logger: JSON lines on stderr, written from a background
/// thread, tagged with the build information of the running binary.
pub fn initialize_logger() -> Logger {
    let drain = Mutex::new(Json::default(std::io::stderr())).map(Fuse);

    // honour `RUST_LOG` filters when built with `env_logging`
    #[cfg(feature = "env_logging")]
    let drain = slog_envlogger::new(drain).fuse();

    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, root_values())
}

fn root_values() -> slog::OwnedKV<impl slog::SendSyncRefUnwindSafeKV + 'static> {
    o!(
        "service" => info::SERVICE,
        "version" => info::VERSION,
        "revision" => info::REVISION,
        "build_timestamp" => info::BUILD_TIMESTAMP,
    )
}
