use std::time::Instant;

use super::Remote;
use crate::app::{SharedState, lock};
use crate::automation::reply::{NOT_RUNNING, STOPPED};
use crate::automation::{AutomationChannel, parse_number};
use crate::domain::{PlayerStatus, RepeatMode, Shuffle, TrackInfo, Volume};
use crate::error::Failure;

/// Maps a now-playing reply to a track record.
pub fn parse_now_playing(out: &str) -> TrackInfo {
    match out {
        STOPPED => return TrackInfo::with_state(PlayerStatus::Stopped),
        NOT_RUNNING => return TrackInfo::with_state(PlayerStatus::NotRunning),
        "" => return TrackInfo::with_state(PlayerStatus::Unknown),
        _ => {}
    }
    let parts: Vec<&str> = out.split('\n').collect();
    if parts.len() < 4 {
        return TrackInfo::with_state(PlayerStatus::Stopped);
    }
    let mut track = TrackInfo {
        name: parts[0].trim().to_owned(),
        artist: parts[1].trim().to_owned(),
        album: parts[2].trim().to_owned(),
        state: PlayerStatus::parse(parts[3]),
        ..TrackInfo::default()
    };
    if parts.len() >= 6 {
        track.duration = parse_number(parts[4]).max(0.0);
        track.position = parse_number(parts[5]);
        track.clamp_position();
    }
    track
}

/// `None` when the app is not running.
pub fn parse_playlists(out: &str) -> Option<Vec<String>> {
    if out.is_empty() || out == NOT_RUNNING {
        return None;
    }
    Some(
        out.split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect(),
    )
}

pub fn parse_volume(out: &str) -> Volume {
    if out.trim().is_empty() {
        return Volume::UNKNOWN;
    }
    Volume::new(parse_number(out).round() as i64)
}

pub async fn now_playing<C: AutomationChannel>(remote: &Remote<C>) -> Result<TrackInfo, Failure> {
    let out = remote.run(&remote.scripts().now_playing()).await?;
    Ok(parse_now_playing(&out))
}

pub async fn playlists<C: AutomationChannel>(
    remote: &Remote<C>,
) -> Result<Option<Vec<String>>, Failure> {
    let out = remote.run(&remote.scripts().playlists()).await?;
    Ok(parse_playlists(&out))
}

pub async fn shuffle<C: AutomationChannel>(remote: &Remote<C>) -> Result<Shuffle, Failure> {
    let out = remote.run(&remote.scripts().shuffle_state()).await?;
    Ok(Shuffle::parse(&out))
}

pub async fn volume<C: AutomationChannel>(remote: &Remote<C>) -> Result<Volume, Failure> {
    let out = remote.run(&remote.scripts().volume()).await?;
    Ok(parse_volume(&out))
}

pub async fn repeat<C: AutomationChannel>(remote: &Remote<C>) -> Result<RepeatMode, Failure> {
    let out = remote.run(&remote.scripts().repeat_mode()).await?;
    Ok(RepeatMode::parse(&out))
}

pub async fn current_playlist<C: AutomationChannel>(
    remote: &Remote<C>,
) -> Result<String, Failure> {
    remote.run(&remote.scripts().current_playlist()).await
}

// ---- store application ---------------------------------------------------------------

pub async fn sync_now_playing<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<(), Failure> {
    let track = now_playing(remote).await?;
    lock(state).apply_track(track, Instant::now());
    Ok(())
}

/// Refreshes the playlist list; returns its length, or `None` when the app is not running.
pub async fn sync_playlists<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<Option<usize>, Failure> {
    let fetched = playlists(remote).await?;
    let mut st = lock(state);
    Ok(match fetched {
        Some(list) => {
            let n = list.len();
            st.set_playlists(list);
            Some(n)
        }
        None => {
            st.clear_playlists();
            None
        }
    })
}

pub async fn sync_shuffle<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<(), Failure> {
    let value = shuffle(remote).await?;
    lock(state).shuffle = value;
    Ok(())
}

pub async fn sync_volume<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<(), Failure> {
    let value = volume(remote).await?;
    lock(state).volume = value;
    Ok(())
}

pub async fn sync_repeat<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<(), Failure> {
    let value = repeat(remote).await?;
    lock(state).repeat = value;
    Ok(())
}

pub async fn sync_current_playlist<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<(), Failure> {
    let name = current_playlist(remote).await?;
    lock(state).current_playlist = name;
    Ok(())
}
