//! Process-wide structured logging, initialized once by the CLI binary.
//! Library consumers that embed the engine without the `cli` feature never
//! pay for this.

use std::path::Path;
use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Initializes logging once for the whole process. `filter` is used unless
/// `RUST_LOG` is set in the environment, in which case that takes priority.
/// Idempotent: later calls are no-ops.
pub fn init_logging<P: AsRef<Path>>(log_path: P, filter: &str) {
    INIT.get_or_init(|| {
        let path = log_path.as_ref();
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("open log file");

        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let _ = GUARD.set(guard);

        let env_filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let subscriber = fmt()
            .with_env_filter(env_filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
