use crate::messages::AppCommand;
use ratatui::layout::Rect;

use super::glyphs::Glyphs;

/// Clickable transport controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Control {
    Prev,
    Play,
    Pause,
    Stop,
    Next,
    Shuffle,
    Repeat,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Self::Prev,
        Self::Play,
        Self::Pause,
        Self::Stop,
        Self::Next,
        Self::Shuffle,
        Self::Repeat,
    ];

    pub fn command(self) -> AppCommand {
        match self {
            Self::Prev => AppCommand::Previous,
            Self::Play => AppCommand::Play,
            Self::Pause => AppCommand::Pause,
            Self::Stop => AppCommand::Stop,
            Self::Next => AppCommand::Next,
            Self::Shuffle => AppCommand::ToggleShuffle,
            Self::Repeat => AppCommand::CycleRepeat,
        }
    }

    pub fn label(self, glyphs: &Glyphs) -> &'static str {
        match (self, glyphs.ascii) {
            (Self::Prev, false) => "⏮ Prev",
            (Self::Play, false) => "▶ Play",
            (Self::Pause, false) => "⏸ Pause",
            (Self::Stop, false) => "■ Stop",
            (Self::Next, false) => "⏭ Next",
            (Self::Shuffle, false) => "⇆ Shuffle",
            (Self::Repeat, false) => "↻ Repeat",
            (Self::Prev, true) => "|< Prev",
            (Self::Play, true) => "> Play",
            (Self::Pause, true) => "|| Pause",
            (Self::Stop, true) => "[] Stop",
            (Self::Next, true) => ">| Next",
            (Self::Shuffle, true) => "~ Shuffle",
            (Self::Repeat, true) => "R Repeat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PlaylistGeometry {
    /// Clickable rows of the list, one entry per row. Any panel border is
    /// already excluded, so every column of the area counts.
    pub area: Rect,
    /// Filtered index shown on the first row.
    pub start: usize,
    pub len: usize,
}

/// Screen regions recorded by the last frame, consulted by the mouse handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct HitMap {
    pub controls: Vec<(Control, Rect)>,
    pub playlist: Option<PlaylistGeometry>,
}

impl HitMap {
    pub fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        self.controls
            .iter()
            .find(|(_, r)| row == r.y && column >= r.x && column < r.right())
            .map(|(c, _)| *c)
    }

    /// Filtered index of the playlist row under the pointer.
    pub fn playlist_row_at(&self, column: u16, row: u16) -> Option<usize> {
        let geo = self.playlist?;
        let a = geo.area;
        if row < a.y || row >= a.bottom() || column < a.x || column >= a.right() {
            return None;
        }
        let index = geo.start + usize::from(row - a.y);
        (index < geo.len).then_some(index)
    }

    pub fn page_rows(&self) -> usize {
        self.playlist
            .map_or(1, |g| usize::from(g.area.height).max(1))
    }
}
