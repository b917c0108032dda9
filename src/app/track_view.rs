use super::filter::clamp_index;
use crate::domain::PlaylistTrack;

/// The drill-down list of one playlist's tracks, replacing the playlist list while open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackView {
    pub playlist: String,
    pub tracks: Vec<PlaylistTrack>,
    /// False until the first fetch for this playlist has finished.
    pub loaded: bool,
    pub selected: usize,
}

impl TrackView {
    pub fn opening(playlist: impl Into<String>) -> Self {
        Self {
            playlist: playlist.into(),
            ..Self::default()
        }
    }

    pub fn set_tracks(&mut self, tracks: Vec<PlaylistTrack>) {
        self.tracks = tracks;
        self.loaded = true;
        self.selected = clamp_index(self.selected, self.tracks.len());
    }

    pub fn selected_track(&self) -> Option<&PlaylistTrack> {
        self.tracks.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.selected = clamp_index(self.selected.saturating_add_signed(delta), self.tracks.len());
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }

    /// Rows past the last track are ignored.
    pub fn select_row(&mut self, row: usize) -> bool {
        let hit = row < self.tracks.len();
        if hit {
            self.selected = row;
        }
        hit
    }
}
