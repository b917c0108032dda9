use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::app::{SharedState, lock};
use crate::automation::AutomationChannel;
use crate::domain::UpNextSource;
use crate::error::Failure;
use crate::features::{Remote, fetch, queue, up_next};
use crate::messages::{Action, AppEvent, Notice};
use crate::settings::AppSettings;

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
    /// Playlists are re-fetched on every Nth steady cycle.
    pub playlist_every: u32,
    pub up_next_order: Vec<UpNextSource>,
    /// Queue entries read per cycle; 0 skips the read.
    pub queue_length: usize,
}

impl From<&AppSettings> for PollerConfig {
    fn from(s: &AppSettings) -> Self {
        Self {
            interval: s.poll_interval(),
            playlist_every: s.playlist_refresh_every.max(1),
            up_next_order: s.up_next_strategies.clone(),
            queue_length: s.queue_length,
        }
    }
}

/// Result of one pass over the fetchers.
#[derive(Debug, Default, PartialEq)]
pub struct Cycle {
    /// `Some` when playlists were fetched: their count, or `None` if the app is not running.
    pub playlists: Option<Option<usize>>,
    /// First failure of the cycle; later ones are only logged.
    pub failure: Option<Failure>,
}

impl Cycle {
    fn record(&mut self, result: Result<(), Failure>) {
        if let Err(e) = result {
            if self.failure.is_none() {
                self.failure = Some(e);
            } else {
                tracing::debug!(err = %e, "additional poll failure suppressed");
            }
        }
    }
}

/// Fetches everything once and applies each result to the store as it arrives.
pub async fn sync_cycle<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
    config: &PollerConfig,
    with_playlists: bool,
) -> Cycle {
    let mut cycle = Cycle::default();
    if with_playlists {
        match fetch::sync_playlists(remote, state).await {
            Ok(count) => cycle.playlists = Some(count),
            Err(e) => cycle.record(Err(e)),
        }
    }
    cycle.record(fetch::sync_now_playing(remote, state).await);
    up_next::sync_up_next(remote, state, &config.up_next_order).await;
    queue::sync_queue(remote, state, config.queue_length).await;
    cycle.record(fetch::sync_shuffle(remote, state).await);
    cycle.record(fetch::sync_volume(remote, state).await);
    cycle.record(fetch::sync_repeat(remote, state).await);
    cycle.record(fetch::sync_current_playlist(remote, state).await);
    cycle
}

async fn report(tx_evt: &mpsc::Sender<AppEvent>, cycle: Cycle, announce_playlists: bool) {
    if let Some(count) = cycle.playlists.filter(|_| announce_playlists) {
        let notice = match count {
            Some(n) => Notice::PlaylistsLoaded(n),
            None => Notice::NotRunning,
        };
        let _ = tx_evt.send(AppEvent::Notice(notice)).await;
    }
    if let Some(failure) = cycle.failure {
        tracing::warn!(err = %failure, "poll cycle failed");
        let _ = tx_evt.send(AppEvent::failed(Action::Poll, failure)).await;
    }
}

/// Starts the background poller. It stops within one interval of `cancel` firing.
pub fn spawn_poller<C: AutomationChannel>(
    remote: Arc<Remote<C>>,
    state: SharedState,
    config: PollerConfig,
    tx_evt: mpsc::Sender<AppEvent>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(
            interval_ms = config.interval.as_millis() as u64,
            playlist_every = config.playlist_every,
            "poller started"
        );

        let initial = tokio::select! {
            _ = cancel.cancelled() => return,
            c = sync_cycle(&remote, &state, &config, true) => c,
        };
        lock(&state).playlists_loaded = true;
        report(&tx_evt, initial, true).await;

        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        let mut cycles: u32 = 0;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            cycles = cycles.wrapping_add(1);
            let with_playlists = cycles % config.playlist_every == 0;
            tracing::trace!(cycles, with_playlists, "poll tick");

            let cycle = tokio::select! {
                _ = cancel.cancelled() => break,
                c = sync_cycle(&remote, &state, &config, with_playlists) => c,
            };
            report(&tx_evt, cycle, false).await;
        }
        tracing::info!("poller stopped");
    })
}
