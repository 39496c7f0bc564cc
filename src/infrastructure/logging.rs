//! Debug log setup
//!
//! When `debug` is on, tracing output goes to `~/.claude/ccbell.log` through a
//! size-rotated appender. Every failure here is swallowed: logging must never
//! stop a notification.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Rotate once the log reaches 1 MiB
pub const MAX_LOG_SIZE: u64 = 1024 * 1024;

/// Rotated files kept next to the live log
pub const ROTATE_COUNT: usize = 3;

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "CCBELL_LOG";

/// Appender that flushes after every write.
///
/// The global subscriber is never dropped, so buffered lines would be lost
/// when the process exits.
struct FlushingAppender(BasicRollingFileAppender);

impl Write for FlushingAppender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.0.write(buf)?;
        self.0.flush()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// Create the log file if needed and restrict it to the owner.
fn prepare_log_file(log_path: &Path) -> io::Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = std::fs::OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(log_path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    drop(file);

    Ok(())
}

/// Install the file subscriber. Returns false if logging stays off.
pub fn init_debug_log(log_path: &Path) -> bool {
    if prepare_log_file(log_path).is_err() {
        return false;
    }

    let appender = match BasicRollingFileAppender::new(
        log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_SIZE),
        ROTATE_COUNT,
    ) {
        Ok(appender) => appender,
        Err(_) => return false,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .with_env_var(LOG_FILTER_ENV)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(FlushingAppender(appender)))
        .try_init()
        .is_ok()
}
