use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;

use crate::app::SharedState;
use crate::automation::AutomationChannel;
use crate::error::Failure;
use crate::features::transport::{self, Verb};
use crate::features::{Remote, diagnostics, fetch, tracks, volume};
use crate::messages::{AppCommand, AppEvent, Notice};
use crate::settings::AppSettings;

/// Commands buffered between the UI and the worker.
pub const COMMAND_QUEUE: usize = 64;
const LANE_QUEUE: usize = 16;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub concurrency: usize,
    pub volume_step: u8,
    pub mute_fallback: u8,
    pub dump_path: PathBuf,
}

impl From<&AppSettings> for WorkerConfig {
    fn from(s: &AppSettings) -> Self {
        Self {
            concurrency: s.command_concurrency.max(1),
            volume_step: s.volume_step,
            mute_fallback: s.mute_fallback_volume,
            dump_path: diagnostics::default_dump_path(),
        }
    }
}

/// Runs one command to completion and describes the outcome.
pub async fn execute<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
    config: &WorkerConfig,
    cmd: AppCommand,
) -> AppEvent {
    let action = cmd.action();
    let step = i32::from(config.volume_step);
    let result: Result<Notice, Failure> = match cmd {
        AppCommand::PlayPause => transport::send_verb(remote, Verb::PlayPause).await,
        AppCommand::Play => transport::send_verb(remote, Verb::Play).await,
        AppCommand::Pause => transport::send_verb(remote, Verb::Pause).await,
        AppCommand::Stop => transport::send_verb(remote, Verb::Stop).await,
        AppCommand::Next => transport::send_verb(remote, Verb::Next).await,
        AppCommand::Previous => transport::send_verb(remote, Verb::Previous).await,
        AppCommand::PlayPlaylist { name } => transport::play_playlist(remote, &name).await,
        AppCommand::OpenPlaylist { name } => tracks::open_playlist(remote, state, &name).await,
        AppCommand::PlayTrack {
            playlist,
            index,
            name,
        } => tracks::play_track(remote, &playlist, index, &name).await,
        AppCommand::ToggleShuffle => transport::toggle_shuffle(remote, state).await,
        AppCommand::CycleRepeat => transport::cycle_repeat(remote, state).await,
        AppCommand::VolumeUp => volume::step(remote, state, step).await,
        AppCommand::VolumeDown => volume::step(remote, state, -step).await,
        AppCommand::ToggleMute => volume::toggle_mute(remote, state, config.mute_fallback).await,
        AppCommand::SeekBy { seconds } => transport::seek(remote, state, seconds).await,
        AppCommand::Refresh => refresh(remote, state).await,
        AppCommand::DumpUi => diagnostics::dump_ui(remote, &config.dump_path).await,
    };
    match result {
        Ok(notice) => AppEvent::Notice(notice),
        Err(failure) => {
            tracing::warn!(?action, err = %failure, "command failed");
            AppEvent::failed(action, failure)
        }
    }
}

/// Out-of-band playlists + now-playing fetch; the poller's schedule is untouched.
async fn refresh<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<Notice, Failure> {
    let count = fetch::sync_playlists(remote, state).await?;
    fetch::sync_now_playing(remote, state).await?;
    Ok(match count {
        Some(n) => Notice::PlaylistsLoaded(n),
        None => Notice::NotRunning,
    })
}

/// Starts the command worker. Independent commands each run on their own task, at
/// most `config.concurrency` at a time. Store-dependent commands share one lane and
/// run in arrival order. The worker ends when every sender is dropped.
pub fn spawn_command_worker<C: AutomationChannel>(
    remote: Arc<Remote<C>>,
    state: SharedState,
    config: WorkerConfig,
    tx_evt: mpsc::Sender<AppEvent>,
) -> (mpsc::Sender<AppCommand>, JoinHandle<()>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<AppCommand>(COMMAND_QUEUE);

    let handle = tokio::spawn(async move {
        let semaphore = Arc::new(Semaphore::new(config.concurrency));
        let config = Arc::new(config);
        tracing::info!(concurrency = config.concurrency, "command worker started");

        let (tx_lane, lane) = spawn_sequential_lane(
            Arc::clone(&remote),
            state.clone(),
            Arc::clone(&config),
            tx_evt.clone(),
        );

        while let Some(cmd) = rx_cmd.recv().await {
            tracing::debug!(?cmd, "command received");
            if cmd.is_sequential() {
                match tx_lane.try_send(cmd) {
                    Ok(()) => {}
                    Err(TrySendError::Full(cmd)) => {
                        tracing::warn!(?cmd, "sequential lane full, dropping command");
                        let _ = tx_evt.send(AppEvent::Notice(Notice::Busy)).await;
                    }
                    Err(TrySendError::Closed(_)) => break,
                }
                continue;
            }
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };
            let remote = Arc::clone(&remote);
            let state = state.clone();
            let config = Arc::clone(&config);
            let tx_evt = tx_evt.clone();
            tokio::spawn(async move {
                let _permit = permit;
                let evt = execute(&remote, &state, &config, cmd).await;
                let _ = tx_evt.send(evt).await;
            });
        }

        drop(tx_lane);
        if let Err(e) = lane.await {
            tracing::warn!(err = %e, "sequential lane ended abnormally");
        }
        tracing::info!("command worker stopped");
    });

    (tx_cmd, handle)
}

/// One task that runs read-modify-write commands strictly one after another.
fn spawn_sequential_lane<C: AutomationChannel>(
    remote: Arc<Remote<C>>,
    state: SharedState,
    config: Arc<WorkerConfig>,
    tx_evt: mpsc::Sender<AppEvent>,
) -> (mpsc::Sender<AppCommand>, JoinHandle<()>) {
    let (tx_lane, mut rx_lane) = mpsc::channel::<AppCommand>(LANE_QUEUE);
    let handle = tokio::spawn(async move {
        while let Some(cmd) = rx_lane.recv().await {
            let evt = execute(&remote, &state, &config, cmd).await;
            let _ = tx_evt.send(evt).await;
        }
    });
    (tx_lane, handle)
}
