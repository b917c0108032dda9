use clap::Parser;
use musictui::app::{PlaybackState, shared};
use musictui::automation::{OsascriptChannel, Scripts};
use musictui::core::{PollerConfig, WorkerConfig, spawn_command_worker, spawn_poller};
use musictui::error::AppError;
use musictui::features::Remote;
use musictui::logging;
use musictui::messages::AppEvent;
use musictui::settings::{default_settings_path, load_required_settings, load_settings};
use musictui::ui::{Cli, Glyphs, TuiConfig, run_tui};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const POLLER_GRACE: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        println!("This TUI must be run in a real terminal.");
        return Ok(());
    }

    let _log_guard = logging::init(logging::LogConfig {
        dir: cli.log_dir.clone(),
        filter: cli.log_filter.clone(),
    });

    let (settings_path, settings) = match cli.config.clone() {
        Some(path) => {
            let settings = load_required_settings(&path).inspect_err(|e| {
                tracing::error!(err = %e, "settings file named on the command line is unusable");
            })?;
            (path, settings)
        }
        None => {
            let path = default_settings_path();
            let settings = load_settings(&path);
            (path, settings)
        }
    };
    tracing::info!(
        settings = %settings_path.display(),
        app = %settings.app_name,
        "musictui starting"
    );

    let glyphs = Glyphs::detect(cli.glyph_override().or(settings.ascii));

    let channel = OsascriptChannel::new(settings.osascript_path.clone(), settings.channel_timeout());
    let remote = Arc::new(Remote::new(channel, Scripts::new(&settings.app_name)));
    let state = shared(PlaybackState::default());
    let (tx_evt, rx_evt) = mpsc::channel::<AppEvent>(64);

    let cancel = CancellationToken::new();
    let poller = spawn_poller(
        Arc::clone(&remote),
        state.clone(),
        PollerConfig::from(&settings),
        tx_evt.clone(),
        cancel.clone(),
    );
    let (tx_cmd, worker) = spawn_command_worker(
        Arc::clone(&remote),
        state.clone(),
        WorkerConfig::from(&settings),
        tx_evt,
    );

    let result = run_tui(state, TuiConfig::new(&settings, glyphs), tx_cmd, rx_evt).await;

    cancel.cancel();
    if tokio::time::timeout(POLLER_GRACE, poller).await.is_err() {
        tracing::warn!("poller did not stop in time");
    }
    // The command sender was moved into the TUI and is dropped by now.
    if tokio::time::timeout(POLLER_GRACE, worker).await.is_err() {
        tracing::warn!("command worker did not stop in time");
    }
    tracing::info!("musictui stopped");

    result.map_err(AppError::from)
}
