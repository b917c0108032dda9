use std::fmt;
use std::path::PathBuf;

use crate::domain::{RepeatMode, Shuffle};
use crate::error::Failure;

/// Work the UI hands to the command worker.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    PlayPause,
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    PlayPlaylist { name: String },
    /// Loads the tracks of a playlist into the open track view.
    OpenPlaylist { name: String },
    PlayTrack {
        playlist: String,
        index: usize,
        name: String,
    },
    ToggleShuffle,
    CycleRepeat,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    /// Positive seeks forward.
    SeekBy { seconds: f64 },
    Refresh,
    DumpUi,
}

impl AppCommand {
    pub fn action(&self) -> Action {
        match self {
            Self::PlayPause | Self::Play | Self::Pause | Self::Stop => Action::Transport,
            Self::Next | Self::Previous => Action::Transport,
            Self::PlayPlaylist { .. } => Action::PlayPlaylist,
            Self::OpenPlaylist { .. } => Action::Tracks,
            Self::PlayTrack { .. } => Action::PlayTrack,
            Self::ToggleShuffle => Action::Shuffle,
            Self::CycleRepeat => Action::Repeat,
            Self::VolumeUp | Self::VolumeDown => Action::Volume,
            Self::ToggleMute => Action::Mute,
            Self::SeekBy { .. } => Action::Seek,
            Self::Refresh => Action::Refresh,
            Self::DumpUi => Action::DumpUi,
        }
    }

    /// Commands that read the store before writing it back. They must not overlap
    /// with one another, or two of them start from the same value.
    pub fn is_sequential(&self) -> bool {
        matches!(
            self,
            Self::ToggleShuffle
                | Self::CycleRepeat
                | Self::VolumeUp
                | Self::VolumeDown
                | Self::ToggleMute
                | Self::SeekBy { .. }
        )
    }
}

/// What was being attempted when a round-trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Poll,
    Refresh,
    Transport,
    PlayPlaylist,
    Tracks,
    PlayTrack,
    Shuffle,
    Repeat,
    Volume,
    Mute,
    Seek,
    DumpUi,
}

impl Action {
    fn failed_text(self) -> &'static str {
        match self {
            Self::Poll | Self::Refresh | Self::Transport | Self::PlayPlaylist | Self::PlayTrack => {
                "AppleScript failed."
            }
            Self::Tracks => "Failed to load tracks.",
            Self::Shuffle => "Shuffle failed.",
            Self::Repeat => "Repeat toggle failed.",
            Self::Volume => "Volume change failed.",
            Self::Mute => "Mute toggle failed.",
            Self::Seek => "Seek failed.",
            Self::DumpUi => "Failed to dump UI. Ensure Accessibility is enabled.",
        }
    }
}

/// Successful or locally-decided outcome of a command or fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Toggled,
    Played,
    Paused,
    Stopped,
    NextTrack,
    PreviousTrack,
    PlayingPlaylist(String),
    PlayingTrack(String),
    NoPlaylists,
    NoTracks,
    TracksLoaded { playlist: String, count: usize },
    Shuffle(Shuffle),
    Repeat(RepeatMode),
    Volume(u8),
    VolumeUnavailable,
    Muted,
    Unmuted(u8),
    Seeked { seconds: f64 },
    NothingToSeek,
    PlaylistsLoaded(usize),
    NotRunning,
    UiDumpSaved(PathBuf),
    UiDumpWriteFailed,
    /// A command was dropped because the queue in front of it was full.
    Busy,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toggled => f.write_str("Toggled play/pause."),
            Self::Played => f.write_str("Play."),
            Self::Paused => f.write_str("Pause."),
            Self::Stopped => f.write_str("Stop."),
            Self::NextTrack => f.write_str("Next track."),
            Self::PreviousTrack => f.write_str("Previous track."),
            Self::PlayingPlaylist(name) => write!(f, "Playing playlist: {name}"),
            Self::PlayingTrack(name) => write!(f, "Playing: {name}"),
            Self::NoPlaylists => f.write_str("No playlists found."),
            Self::NoTracks => f.write_str("No tracks."),
            Self::TracksLoaded { playlist, count } => write!(f, "{playlist}: {count} tracks."),
            Self::Shuffle(Shuffle::On) => f.write_str("Shuffle on."),
            Self::Shuffle(Shuffle::Off) => f.write_str("Shuffle off."),
            Self::Shuffle(Shuffle::Unknown) => f.write_str("Toggled shuffle."),
            Self::Repeat(mode) => write!(f, "Repeat: {mode}."),
            Self::Volume(level) => write!(f, "Volume: {level}%."),
            Self::VolumeUnavailable => f.write_str("Volume unavailable."),
            Self::Muted => f.write_str("Muted."),
            Self::Unmuted(level) => write!(f, "Unmuted ({level}%)."),
            Self::Seeked { seconds } => {
                let direction = if *seconds > 0.0 { "forward" } else { "back" };
                write!(f, "Seek {direction} {}s.", seconds.abs() as i64)
            }
            Self::NothingToSeek => f.write_str("Nothing to seek."),
            Self::PlaylistsLoaded(n) => write!(f, "Loaded {n} playlists."),
            Self::NotRunning => f.write_str("Music app is not running."),
            Self::UiDumpSaved(path) => write!(f, "UI dump saved: {}", path.display()),
            Self::UiDumpWriteFailed => f.write_str("Failed to write UI dump."),
            Self::Busy => f.write_str("Busy, command dropped."),
        }
    }
}

/// Outcomes flowing back to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Notice(Notice),
    Failed { action: Action, failure: Failure },
}

impl AppEvent {
    pub fn failed(action: Action, failure: Failure) -> Self {
        Self::Failed { action, failure }
    }

    /// The status-line text for this outcome.
    pub fn status_text(&self) -> String {
        match self {
            Self::Notice(notice) => notice.to_string(),
            Self::Failed { failure, action } => match failure {
                Failure::PermissionDenied => failure.to_string(),
                Failure::TimedOut => "AppleScript timed out.".to_owned(),
                Failure::Script { stderr, .. } if !stderr.is_empty() => stderr.clone(),
                Failure::Script { .. } => action.failed_text().to_owned(),
            },
        }
    }
}

impl From<Notice> for AppEvent {
    fn from(notice: Notice) -> Self {
        Self::Notice(notice)
    }
}
