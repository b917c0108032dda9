use std::time::Instant;

use super::Remote;
use super::fetch;
use crate::app::{SharedState, lock};
use crate::automation::AutomationChannel;
use crate::automation::reply::{NOT_RUNNING, trapped_error};
use crate::domain::{Shuffle, clamp_position};
use crate::error::Failure;
use crate::messages::Notice;

/// Single-verb transport commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    PlayPause,
    Play,
    Pause,
    Stop,
    Next,
    Previous,
}

impl Verb {
    fn script_verb(self) -> &'static str {
        match self {
            Self::PlayPause => "playpause",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Next => "next track",
            Self::Previous => "previous track",
        }
    }

    fn notice(self) -> Notice {
        match self {
            Self::PlayPause => Notice::Toggled,
            Self::Play => Notice::Played,
            Self::Pause => Notice::Paused,
            Self::Stop => Notice::Stopped,
            Self::Next => Notice::NextTrack,
            Self::Previous => Notice::PreviousTrack,
        }
    }
}

pub async fn send_verb<C: AutomationChannel>(
    remote: &Remote<C>,
    verb: Verb,
) -> Result<Notice, Failure> {
    remote.run(&remote.scripts().tell(verb.script_verb())).await?;
    Ok(verb.notice())
}

pub async fn play_playlist<C: AutomationChannel>(
    remote: &Remote<C>,
    name: &str,
) -> Result<Notice, Failure> {
    remote.run(&remote.scripts().play_playlist(name)).await?;
    Ok(Notice::PlayingPlaylist(name.to_owned()))
}

/// Flips shuffle on the current playlist, falling back to the global setting.
pub async fn toggle_shuffle<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<Notice, Failure> {
    let out = remote.run(&remote.scripts().toggle_shuffle()).await?;
    if let Some(failure) = trapped_error(&out) {
        tracing::warn!(reply = %out, "shuffle toggle rejected");
        return Err(failure);
    }
    if out == NOT_RUNNING {
        return Ok(Notice::NotRunning);
    }
    let value = match Shuffle::parse(&out) {
        Shuffle::Unknown => fetch::shuffle(remote).await.unwrap_or(Shuffle::Unknown),
        known => known,
    };
    lock(state).shuffle = value;
    Ok(Notice::Shuffle(value))
}

/// Advances repeat off → all → one → off.
pub async fn cycle_repeat<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
) -> Result<Notice, Failure> {
    let next = lock(state).repeat.cycled();
    remote
        .run(&remote.scripts().set_repeat(next.script_value()))
        .await?;
    lock(state).repeat = next;
    Ok(Notice::Repeat(next))
}

/// Moves the playhead by `delta` seconds, clamped to the track.
pub async fn seek<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
    delta: f64,
) -> Result<Notice, Failure> {
    let (status, position, duration) = {
        let st = lock(state);
        (st.track.state, st.track.position, st.track.duration)
    };
    if !status.has_transport() {
        return Ok(Notice::NothingToSeek);
    }
    let target = clamp_position(position + delta, duration);
    remote.run(&remote.scripts().set_position(target)).await?;
    lock(state).set_position(target, Instant::now());
    Ok(Notice::Seeked { seconds: delta })
}
