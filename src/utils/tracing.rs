use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(not(feature = "file-log"))]
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_level(true)
        .with_target(true);

    if subscriber.try_init().is_ok() {
        tracing::info!("tracing initialized");
    }
}

#[cfg(feature = "file-log")]
mod file {
    use std::{path::PathBuf, sync::Mutex};

    use tracing_appender::non_blocking::WorkerGuard;

    static TRACING_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

    pub(super) fn log_dir() -> PathBuf {
        crate::config::config_dir()
            .map(|dir| dir.join("logs"))
            .unwrap_or_else(|_| PathBuf::from("./logs"))
    }

    pub(super) fn store_tracing_guard(guard: WorkerGuard) {
        if let Ok(mut slot) = TRACING_GUARD.lock() {
            *slot = Some(guard);
        }
    }
}

/// Logs to stderr and to a daily file under the config directory.
#[cfg(feature = "file-log")]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let dir = file::log_dir();
    let file_appender = tracing_appender::rolling::daily(&dir, "lang-fix.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let initialized = tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    file::store_tracing_guard(guard);
    if initialized {
        tracing::info!(dir = %dir.display(), "tracing initialized");
    }
}
