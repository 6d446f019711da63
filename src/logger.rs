// src/logger.rs
use std::{path::Path, sync::OnceLock};
use tracing_subscriber::{EnvFilter, fmt};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Default filter when neither `RUST_LOG` nor a filter argument is given.
pub const DEFAULT_FILTER: &str = "chess_master=info";

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Append to a file, creating parent directories as needed.
    File(&'a Path),
    Stderr,
}

/// Initialize logging once for the whole process.
/// - `target`: file (e.g. "logs/session.log") or stderr
/// - `filter`: e.g. "chess_master::session=debug"
///
/// Returns an error only if the log file cannot be opened.
pub fn init_logging(target: LogTarget<'_>, filter: &str) -> std::io::Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let (non_blocking, guard, ansi) = match target {
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (writer, guard, false)
        }
        LogTarget::Stderr => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            (writer, guard, true)
        }
    };

    INIT.get_or_init(|| {
        // Keep the guard alive for the program lifetime
        let _ = GUARD.set(guard);

        // RUST_LOG wins over the argument
        let env_filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        };

        let subscriber = fmt()
            .with_env_filter(env_filter)
            .with_ansi(ansi)
            .with_target(true)
            .with_line_number(true)
            .with_writer(non_blocking)
            .finish();

        // Another global subscriber may already be installed (tests)
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
    Ok(())
}
