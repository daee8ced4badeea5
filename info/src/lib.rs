//! Build information baked into every binary and log line.

/// The crate version of the service.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The source revision, if `VOICES_BACKEND_REVISION` was set at build time.
pub const REVISION: Option<&str> = option_env!("VOICES_BACKEND_REVISION");

/// When the binary was built, if `VOICES_BACKEND_BUILD_TIMESTAMP` was set at
/// build time.
pub const BUILD_TIMESTAMP: Option<&str> = option_env!("VOICES_BACKEND_BUILD_TIMESTAMP");

/// The service name attached to the root logger.
pub const SERVICE: &str = "voices-backend";
