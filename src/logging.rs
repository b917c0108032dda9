use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE: &str = "musictui.log";

/// Keeps the background log writer alive; flushes on drop.
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
}

pub fn default_log_dir() -> PathBuf {
    ProjectDirs::from("dev", "musictui", "musictui")
        .map(|p| p.data_local_dir().join("logs"))
        .unwrap_or_else(fallback_log_dir)
}

fn fallback_log_dir() -> PathBuf {
    std::env::temp_dir().join("musictui-logs")
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    match directives {
        Some(s) if !s.trim().is_empty() => {
            EnvFilter::try_new(s).unwrap_or_else(|_| EnvFilter::new("info"))
        }
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

/// Installs a file-only subscriber. The terminal belongs to the TUI, so nothing is
/// written to stdout or stderr.
pub fn init(cfg: LogConfig) -> LogGuard {
    let log_dir = cfg.dir.unwrap_or_else(default_log_dir);

    let log_dir = match fs::create_dir_all(&log_dir) {
        Ok(()) => log_dir,
        Err(_) => fallback_log_dir(),
    };
    let _ = fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer);

    let subscriber = tracing_subscriber::registry()
        .with(filter_from(cfg.filter.as_deref()))
        .with(file_layer);

    let _ = subscriber.try_init();
    tracing::info!(log_dir = %log_dir.display(), "tracing initialised");

    LogGuard(Some(guard))
}
