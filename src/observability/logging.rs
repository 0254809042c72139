use std::ffi::OsString;
use std::path::PathBuf;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_DIR_ENV: &str = "AUTHORITY_LOG_DIR";

const DEFAULT_LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "authority.log";
const DEFAULT_FILTER: &str = "authority_registry=info,authority=info,warn";

fn log_dir(configured: Option<OsString>) -> PathBuf {
    configured
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

/// Install the global subscriber.
///
/// Human-readable events go to stderr, keeping stdout free for command output.
/// JSON events also go to a daily-rotated file under `$AUTHORITY_LOG_DIR`
/// (default `logs/`). `RUST_LOG` replaces the default filter.
///
/// The returned guard flushes the file writer when dropped, so hold it until exit.
/// `None` means the log directory could not be created and only stderr is active.
pub fn init_logging() -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let dir = log_dir(std::env::var_os(LOG_DIR_ENV));
    let (file_layer, guard, dir_error) = match std::fs::create_dir_all(&dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(e) = dir_error {
        warn!(dir = %dir.display(), error = %e, "File logging disabled");
    }
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_defaults_when_unset_or_blank() {
        assert_eq!(log_dir(None), PathBuf::from("logs"));
        assert_eq!(log_dir(Some(OsString::new())), PathBuf::from("logs"));
        assert_eq!(
            log_dir(Some(OsString::from("/var/log/authority"))),
            PathBuf::from("/var/log/authority")
        );
    }
}
