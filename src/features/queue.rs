//! The app's play queue, read from its "playing next" panel.
//!
//! Unlike playlist adjacency this follows shuffle order and manual queueing. It needs
//! Accessibility permission; without it the read fails and the last queue stays shown.

use super::Remote;
use crate::app::{SharedState, lock};
use crate::automation::AutomationChannel;
use crate::automation::reply::ERR_PREFIX;
use crate::domain::UpNextTrack;

const GONE: [&str; 2] = ["NO_PROCESS", "NO_WINDOW"];

/// `None` when the script trapped an error and the previous queue should stand.
pub fn parse_queue(out: &str, max: usize) -> Option<Vec<UpNextTrack>> {
    if out.starts_with(ERR_PREFIX) {
        return None;
    }
    if GONE.contains(&out) {
        return Some(Vec::new());
    }
    Some(
        out.lines()
            .filter_map(|line| {
                let (name, artist) = line.split_once('\t')?;
                Some(UpNextTrack {
                    name: name.trim().to_owned(),
                    artist: artist.split('\t').next().unwrap_or_default().trim().to_owned(),
                    album: None,
                })
            })
            .take(max)
            .collect(),
    )
}

/// Refreshes the stored queue. Failures are logged and keep what was there.
pub async fn sync_queue<C: AutomationChannel>(remote: &Remote<C>, state: &SharedState, max: usize) {
    if max == 0 {
        return;
    }
    let parsed = match remote.run(&remote.scripts().queue(max)).await {
        Ok(out) => parse_queue(&out, max),
        Err(e) => {
            tracing::debug!(err = %e, "queue read failed");
            None
        }
    };
    if let Some(queue) = parsed {
        lock(state).queue = queue;
    }
}
