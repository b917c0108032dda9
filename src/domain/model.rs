use std::fmt;

/// Player state as reported by the external application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
    NotRunning,
    Unknown,
}

impl PlayerStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "playing" => Self::Playing,
            "paused" => Self::Paused,
            "stopped" => Self::Stopped,
            "not_running" => Self::NotRunning,
            _ => Self::Unknown,
        }
    }

    /// Whether a transport bar and interpolated position make sense.
    pub fn has_transport(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::NotRunning => "Not running",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackInfo {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub state: PlayerStatus,
    /// Seconds; 0 means unknown or no track.
    pub duration: f64,
    /// Seconds, kept within `[0, duration]` whenever `duration > 0`.
    pub position: f64,
}

impl TrackInfo {
    pub fn with_state(state: PlayerStatus) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn clamp_position(&mut self) {
        self.position = clamp_position(self.position, self.duration);
    }
}

pub fn clamp_position(position: f64, duration: f64) -> f64 {
    if !position.is_finite() || position < 0.0 {
        return 0.0;
    }
    if duration > 0.0 {
        position.min(duration)
    } else {
        position
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpNextTrack {
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
}

/// One entry of a playlist, as listed in the drill-down view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistTrack {
    pub name: String,
    pub artist: String,
    pub duration: f64,
    /// 1-based position in the playlist, as the app addresses it.
    pub index: usize,
}

/// Why no up-next track could be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpNextGap {
    #[default]
    Unknown,
    Error,
    Stopped,
    NotRunning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpNext {
    Found(UpNextTrack),
    EndOfPlaylist,
    Unavailable(UpNextGap),
}

impl Default for UpNext {
    fn default() -> Self {
        Self::Unavailable(UpNextGap::Unknown)
    }
}

impl UpNext {
    /// A strategy result that should stop the fallback chain.
    pub fn is_conclusive(&self) -> bool {
        matches!(self, Self::Found(_) | Self::EndOfPlaylist)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpNextSource {
    UiProbe,
    PlaylistAdjacency,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shuffle {
    On,
    Off,
    #[default]
    Unknown,
}

impl Shuffle {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "true" => Self::On,
            "false" => Self::Off,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepeatMode {
    Off,
    One,
    All,
    #[default]
    Unknown,
}

impl RepeatMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Self::Off,
            "one" => Self::One,
            "all" => Self::All,
            _ => Self::Unknown,
        }
    }

    /// off → all → one → off; an unknown mode counts as off.
    pub fn cycled(self) -> Self {
        match self {
            Self::Off | Self::Unknown => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    pub fn script_value(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::All => "all",
            Self::Off | Self::Unknown => "off",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::One => "one",
            Self::All => "all",
            Self::Unknown => "-",
        })
    }
}

/// Output volume, 0–100 when known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Volume(Option<u8>);

impl Volume {
    pub const UNKNOWN: Self = Self(None);

    pub fn new(level: i64) -> Self {
        if level < 0 {
            Self(None)
        } else {
            Self(Some(level.min(100) as u8))
        }
    }

    pub fn level(self) -> Option<u8> {
        self.0
    }

    pub fn adjusted(level: u8, delta: i32) -> u8 {
        (i32::from(level) + delta).clamp(0, 100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_off_all_one() {
        assert_eq!(RepeatMode::Off.cycled(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycled(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycled(), RepeatMode::Off);
        assert_eq!(RepeatMode::Unknown.cycled(), RepeatMode::All);
    }

    #[test]
    fn volume_clamps_to_range() {
        assert_eq!(Volume::new(-1), Volume::UNKNOWN);
        assert_eq!(Volume::new(150).level(), Some(100));
        assert_eq!(Volume::adjusted(98, 5), 100);
        assert_eq!(Volume::adjusted(3, -5), 0);
    }

    #[test]
    fn position_is_clamped_to_duration() {
        assert_eq!(clamp_position(250.0, 200.0), 200.0);
        assert_eq!(clamp_position(-3.0, 200.0), 0.0);
        assert_eq!(clamp_position(12.0, 0.0), 12.0);
    }

    #[test]
    fn player_status_parses_case_insensitively() {
        assert_eq!(PlayerStatus::parse("Playing"), PlayerStatus::Playing);
        assert_eq!(PlayerStatus::parse("PAUSED"), PlayerStatus::Paused);
        assert_eq!(PlayerStatus::parse("fast forwarding"), PlayerStatus::Unknown);
    }
}
