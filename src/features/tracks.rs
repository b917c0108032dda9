use super::Remote;
use crate::app::{SharedState, lock};
use crate::automation::{AutomationChannel, parse_number};
use crate::domain::PlaylistTrack;
use crate::error::Failure;
use crate::messages::Notice;

/// Reply of the track listing when the app is closed or the playlist is gone.
const NONE: &str = "NONE";

/// Parses `name<TAB>artist<TAB>duration` lines. A track's index is its line number, so a
/// malformed line never shifts the tracks after it.
pub fn parse_playlist_tracks(out: &str) -> Vec<PlaylistTrack> {
    if out.is_empty() || out == NONE {
        return Vec::new();
    }
    out.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let mut parts = line.split('\t');
            let (name, artist, duration) = (parts.next()?, parts.next()?, parts.next()?);
            Some(PlaylistTrack {
                name: name.to_owned(),
                artist: artist.to_owned(),
                duration: parse_number(duration).max(0.0),
                index: i + 1,
            })
        })
        .collect()
}

pub async fn playlist_tracks<C: AutomationChannel>(
    remote: &Remote<C>,
    playlist: &str,
) -> Result<Vec<PlaylistTrack>, Failure> {
    let out = remote.run(&remote.scripts().playlist_tracks(playlist)).await?;
    Ok(parse_playlist_tracks(&out))
}

/// Fills the open track view for `playlist`. A failed fetch still ends the loading
/// state, so the view shows an empty list rather than waiting forever.
pub async fn open_playlist<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
    playlist: &str,
) -> Result<Notice, Failure> {
    let fetched = playlist_tracks(remote, playlist).await;
    let mut st = lock(state);
    match fetched {
        Ok(tracks) => {
            let count = tracks.len();
            if !st.apply_tracks(playlist, tracks) {
                tracing::debug!(playlist, "track view closed before tracks arrived");
            }
            Ok(Notice::TracksLoaded {
                playlist: playlist.to_owned(),
                count,
            })
        }
        Err(failure) => {
            st.apply_tracks(playlist, Vec::new());
            Err(failure)
        }
    }
}

pub async fn play_track<C: AutomationChannel>(
    remote: &Remote<C>,
    playlist: &str,
    index: usize,
    name: &str,
) -> Result<Notice, Failure> {
    remote.run(&remote.scripts().play_track(playlist, index)).await?;
    Ok(Notice::PlayingTrack(name.to_owned()))
}
