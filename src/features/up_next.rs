//! Up-next resolution over an ordered list of strategies.
//!
//! The UI probe reads the first row of the app's queue table through the accessibility
//! tree; it needs Accessibility permission and silently yields nothing without it. The
//! playlist strategy asks the app for the track after the current one in the current
//! playlist, which ignores shuffle and manual queueing but works everywhere.

use super::Remote;
use crate::app::{SharedState, lock};
use crate::automation::AutomationChannel;
use crate::automation::reply::{END, ERR_PREFIX, NOT_RUNNING, STOPPED, UNKNOWN};
use crate::domain::{UpNext, UpNextGap, UpNextSource, UpNextTrack};

const UI_SENTINELS: [&str; 3] = ["NO_PROCESS", "NO_WINDOW", "NO_TEXT"];

pub fn parse_ui_probe(out: &str) -> UpNext {
    if out.is_empty() || out.starts_with(ERR_PREFIX) || UI_SENTINELS.contains(&out) {
        return UpNext::Unavailable(UpNextGap::Unknown);
    }
    let mut lines = out.split('\n').map(str::trim);
    let name = lines.next().unwrap_or_default().to_owned();
    let artist = lines.next().unwrap_or_default().to_owned();
    UpNext::Found(UpNextTrack {
        name,
        artist,
        album: None,
    })
}

pub fn parse_playlist_adjacency(out: &str) -> UpNext {
    match out {
        STOPPED => return UpNext::Unavailable(UpNextGap::Stopped),
        NOT_RUNNING => return UpNext::Unavailable(UpNextGap::NotRunning),
        END => return UpNext::EndOfPlaylist,
        UNKNOWN | "" => return UpNext::Unavailable(UpNextGap::Unknown),
        _ => {}
    }
    let parts: Vec<&str> = out.split('\n').map(str::trim).collect();
    match parts.as_slice() {
        [name, artist, album, ..] => UpNext::Found(UpNextTrack {
            name: (*name).to_owned(),
            artist: (*artist).to_owned(),
            album: Some((*album).to_owned()),
        }),
        _ => UpNext::Unavailable(UpNextGap::Unknown),
    }
}

/// Runs one strategy. Channel failures become `Unavailable(Error)` and are not reported.
pub async fn probe<C: AutomationChannel>(remote: &Remote<C>, source: UpNextSource) -> UpNext {
    let script = match source {
        UpNextSource::UiProbe => remote.scripts().up_next_ui(),
        UpNextSource::PlaylistAdjacency => remote.scripts().up_next_playlist(),
    };
    let Ok(out) = remote.run(&script).await else {
        return UpNext::Unavailable(UpNextGap::Error);
    };
    match source {
        UpNextSource::UiProbe => parse_ui_probe(&out),
        UpNextSource::PlaylistAdjacency => parse_playlist_adjacency(&out),
    }
}

/// Tries `order` until a strategy is conclusive; otherwise the last answer stands.
pub async fn resolve<C: AutomationChannel>(
    remote: &Remote<C>,
    order: &[UpNextSource],
) -> (UpNext, Option<UpNextSource>) {
    let mut outcome = (UpNext::default(), None);
    for &source in order {
        let result = probe(remote, source).await;
        let done = result.is_conclusive();
        outcome = (result, Some(source));
        if done {
            break;
        }
    }
    outcome
}

pub async fn sync_up_next<C: AutomationChannel>(
    remote: &Remote<C>,
    state: &SharedState,
    order: &[UpNextSource],
) {
    let (up_next, source) = resolve(remote, order).await;
    let mut st = lock(state);
    st.up_next = up_next;
    st.up_next_source = source;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::ChannelReply;
    use crate::features::test_support::{remote, store};

    const DEFAULT_ORDER: [UpNextSource; 2] =
        [UpNextSource::UiProbe, UpNextSource::PlaylistAdjacency];

    #[test]
    fn ui_probe_needs_text() {
        assert_eq!(
            parse_ui_probe("NO_WINDOW"),
            UpNext::Unavailable(UpNextGap::Unknown)
        );
        assert_eq!(
            parse_ui_probe("ERR:-1719:Invalid index."),
            UpNext::Unavailable(UpNextGap::Unknown)
        );
        assert_eq!(
            parse_ui_probe("Blue in Green"),
            UpNext::Found(UpNextTrack {
                name: "Blue in Green".into(),
                artist: String::new(),
                album: None,
            })
        );
    }

    #[test]
    fn playlist_adjacency_sentinels() {
        assert_eq!(parse_playlist_adjacency("END"), UpNext::EndOfPlaylist);
        assert_eq!(
            parse_playlist_adjacency("STOPPED"),
            UpNext::Unavailable(UpNextGap::Stopped)
        );
        assert_eq!(
            parse_playlist_adjacency("NOT_RUNNING"),
            UpNext::Unavailable(UpNextGap::NotRunning)
        );
        assert_eq!(
            parse_playlist_adjacency("only\ntwo"),
            UpNext::Unavailable(UpNextGap::Unknown)
        );
        assert_eq!(
            parse_playlist_adjacency("So What\nMiles Davis\nKind of Blue"),
            UpNext::Found(UpNextTrack {
                name: "So What".into(),
                artist: "Miles Davis".into(),
                album: Some("Kind of Blue".into()),
            })
        );
    }

    #[tokio::test]
    async fn ui_probe_wins_when_it_finds_a_track() {
        let remote = remote();
        remote
            .channel()
            .respond_ok(remote.scripts().up_next_ui(), "Freddie Freeloader\nMiles Davis");

        let (up_next, source) = resolve(&remote, &DEFAULT_ORDER).await;
        assert!(matches!(up_next, UpNext::Found(ref t) if t.name == "Freddie Freeloader"));
        assert_eq!(source, Some(UpNextSource::UiProbe));
        assert_eq!(remote.channel().sent_count(&remote.scripts().up_next_playlist()), 0);
    }

    #[tokio::test]
    async fn falls_back_to_playlist_adjacency() {
        let remote = remote();
        remote
            .channel()
            .respond(
                remote.scripts().up_next_ui(),
                ChannelReply::new("", "System Events got an error: not authorized", 1),
            )
            .respond_ok(remote.scripts().up_next_playlist(), "END");

        let (up_next, source) = resolve(&remote, &DEFAULT_ORDER).await;
        assert_eq!(up_next, UpNext::EndOfPlaylist);
        assert_eq!(source, Some(UpNextSource::PlaylistAdjacency));
    }

    #[tokio::test]
    async fn last_unavailable_answer_stands() {
        let remote = remote();
        remote
            .channel()
            .respond_ok(remote.scripts().up_next_ui(), "NO_TEXT")
            .respond_ok(remote.scripts().up_next_playlist(), "STOPPED");

        let state = store();
        sync_up_next(&remote, &state, &DEFAULT_ORDER).await;
        let st = lock(&state);
        assert_eq!(st.up_next, UpNext::Unavailable(UpNextGap::Stopped));
        assert_eq!(st.up_next_source, Some(UpNextSource::PlaylistAdjacency));
    }

    #[tokio::test]
    async fn order_is_configurable() {
        let remote = remote();
        remote
            .channel()
            .respond_ok(remote.scripts().up_next_playlist(), "A\nB\nC")
            .respond_ok(remote.scripts().up_next_ui(), "X\nY");

        let (up_next, source) = resolve(&remote, &[UpNextSource::PlaylistAdjacency]).await;
        assert!(matches!(up_next, UpNext::Found(ref t) if t.name == "A"));
        assert_eq!(source, Some(UpNextSource::PlaylistAdjacency));
        assert_eq!(remote.channel().sent_count(&remote.scripts().up_next_ui()), 0);
    }
}
