use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::filter::{clamp_index, filter_playlists};
use super::track_view::TrackView;
use crate::domain::{
    PlayerStatus, PlaylistTrack, RepeatMode, Shuffle, TrackInfo, UpNext, UpNextSource,
    UpNextTrack, Volume, clamp_position,
};

pub const READY: &str = "Ready";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub set_at: Instant,
}

/// Everything the dashboard displays.
///
/// One instance lives for the whole process behind a [`SharedState`] handle. Writers apply
/// each fetch or command result inside a single lock scope, so a reader never sees fields
/// mixed from two different polls.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub track: TrackInfo,

    pub playlists: Vec<String>,
    pub playlists_loaded: bool,
    /// Index into the filtered view.
    pub selected_index: usize,

    pub shuffle: Shuffle,
    pub repeat: RepeatMode,
    pub volume: Volume,
    pub pre_mute_volume: Option<u8>,

    pub current_playlist: String,
    pub up_next: UpNext,
    pub up_next_source: Option<UpNextSource>,
    /// The app's own play queue, as far as it could be read.
    pub queue: Vec<UpNextTrack>,

    pub status: Option<StatusLine>,
    /// When `track.position` was last sampled or advanced.
    pub last_position_time: Option<Instant>,

    pub search_query: String,
    pub search_active: bool,

    pub track_view: Option<TrackView>,
}

pub type SharedState = Arc<Mutex<PlaybackState>>;

pub fn shared(state: PlaybackState) -> SharedState {
    Arc::new(Mutex::new(state))
}

/// Locks the store. A writer that panicked mid-update cannot leave a torn record behind
/// (every update is a plain field assignment), so poisoning is ignored.
pub fn lock(state: &SharedState) -> MutexGuard<'_, PlaybackState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl PlaybackState {
    // ---- authoritative samples -------------------------------------------------------

    pub fn apply_track(&mut self, mut track: TrackInfo, now: Instant) {
        track.clamp_position();
        self.track = track;
        self.last_position_time = Some(now);
    }

    pub fn set_playlists(&mut self, playlists: Vec<String>) {
        self.playlists = playlists;
        self.playlists_loaded = true;
        self.clamp_selection();
    }

    pub fn clear_playlists(&mut self) {
        self.playlists.clear();
        self.playlists_loaded = true;
        self.selected_index = 0;
    }

    pub fn set_position(&mut self, position: f64, now: Instant) {
        self.track.position = clamp_position(position, self.track.duration);
        self.last_position_time = Some(now);
    }

    // ---- interpolation ---------------------------------------------------------------

    /// Advances the displayed position by wall-clock time since the last sample.
    pub fn interpolate(&mut self, now: Instant) {
        if self.track.state != PlayerStatus::Playing || self.track.duration <= 0.0 {
            return;
        }
        if let Some(last) = self.last_position_time {
            let elapsed = now.saturating_duration_since(last).as_secs_f64();
            self.track.position = clamp_position(self.track.position + elapsed, self.track.duration);
        }
        self.last_position_time = Some(now);
    }

    // ---- status line -----------------------------------------------------------------

    pub fn set_status(&mut self, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusLine {
            text: text.into(),
            set_at: now,
        });
    }

    pub fn expire_status(&mut self, now: Instant, ttl: Duration) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.set_at) >= ttl)
        {
            self.status = None;
        }
    }

    pub fn status_text(&self) -> &str {
        self.status.as_ref().map_or(READY, |s| s.text.as_str())
    }

    // ---- filtered view & selection ---------------------------------------------------

    pub fn active_query(&self) -> &str {
        if self.search_active {
            &self.search_query
        } else {
            ""
        }
    }

    pub fn filtered(&self) -> Vec<(usize, &str)> {
        filter_playlists(&self.playlists, self.active_query())
    }

    pub fn filtered_len(&self) -> usize {
        if self.active_query().is_empty() {
            self.playlists.len()
        } else {
            self.filtered().len()
        }
    }

    pub fn clamp_selection(&mut self) {
        self.selected_index = clamp_index(self.selected_index, self.filtered_len());
    }

    /// The highlighted playlist as `(unfiltered index, name)`.
    pub fn selected_playlist(&self) -> Option<(usize, String)> {
        self.filtered()
            .get(self.selected_index)
            .map(|(i, name)| (*i, (*name).to_owned()))
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.filtered_len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let target = self.selected_index.saturating_add_signed(delta);
        self.selected_index = clamp_index(target, len);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.filtered_len().saturating_sub(1);
    }

    /// Selects a row of the filtered view; rows past the end are ignored.
    pub fn select_filtered_row(&mut self, row: usize) -> bool {
        if row < self.filtered_len() {
            self.selected_index = row;
            true
        } else {
            false
        }
    }

    // ---- track drill-down ------------------------------------------------------------

    /// Opens the track list for `playlist`; its tracks arrive with a later fetch.
    pub fn open_track_view(&mut self, playlist: &str) {
        self.track_view = Some(TrackView::opening(playlist));
    }

    pub fn close_track_view(&mut self) {
        self.track_view = None;
    }

    /// Stores fetched tracks if `playlist` is still the one on screen.
    pub fn apply_tracks(&mut self, playlist: &str, tracks: Vec<PlaylistTrack>) -> bool {
        match self.track_view.as_mut().filter(|v| v.playlist == playlist) {
            Some(view) => {
                view.set_tracks(tracks);
                true
            }
            None => false,
        }
    }

    // ---- search mode -----------------------------------------------------------------

    pub fn begin_search(&mut self) {
        self.search_active = true;
        self.search_query.clear();
        self.clamp_selection();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected_index = 0;
    }

    pub fn pop_search_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.selected_index = 0;
        }
    }

    /// Leaves search mode, keeping the highlighted playlist selected in the full list.
    pub fn cancel_search(&mut self) {
        let keep = self.selected_playlist().map(|(i, _)| i);
        self.search_active = false;
        self.search_query.clear();
        self.selected_index = keep.unwrap_or(self.selected_index);
        self.clamp_selection();
    }

    /// Leaves search mode and returns the playlist to play, if any matched.
    pub fn commit_search(&mut self) -> Option<String> {
        let chosen = self.selected_playlist();
        self.search_active = false;
        self.search_query.clear();
        match chosen {
            Some((index, name)) => {
                self.selected_index = index;
                Some(name)
            }
            None => {
                self.clamp_selection();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(duration: f64, position: f64) -> TrackInfo {
        TrackInfo {
            name: "Song".to_owned(),
            state: PlayerStatus::Playing,
            duration,
            position,
            ..TrackInfo::default()
        }
    }

    fn with_playlists(names: &[&str]) -> PlaybackState {
        let mut st = PlaybackState::default();
        st.set_playlists(names.iter().map(|s| s.to_string()).collect());
        st
    }

    #[test]
    fn interpolation_advances_by_elapsed_time() {
        let t0 = Instant::now();
        let mut st = PlaybackState::default();
        st.apply_track(playing(200.0, 45.0), t0);

        st.interpolate(t0 + Duration::from_secs(2));
        assert!((st.track.position - 47.0).abs() < 1e-6);
    }

    #[test]
    fn interpolation_is_idempotent_at_zero_elapsed() {
        let t0 = Instant::now();
        let mut st = PlaybackState::default();
        st.apply_track(playing(200.0, 45.0), t0);
        st.interpolate(t0);
        st.interpolate(t0);
        assert_eq!(st.track.position, 45.0);
    }

    #[test]
    fn interpolation_is_monotone_and_clamped() {
        let t0 = Instant::now();
        let mut st = PlaybackState::default();
        st.apply_track(playing(10.0, 8.0), t0);
        let mut last = st.track.position;
        for step in 1..=10 {
            st.interpolate(t0 + Duration::from_millis(500 * step));
            assert!(st.track.position >= last);
            last = st.track.position;
        }
        assert_eq!(st.track.position, 10.0);
    }

    #[test]
    fn interpolation_never_moves_when_not_playing() {
        let t0 = Instant::now();
        for state in [
            PlayerStatus::Paused,
            PlayerStatus::Stopped,
            PlayerStatus::NotRunning,
            PlayerStatus::Unknown,
        ] {
            let mut st = PlaybackState::default();
            let mut track = playing(200.0, 45.0);
            track.state = state;
            st.apply_track(track, t0);
            st.interpolate(t0 + Duration::from_secs(5));
            assert_eq!(st.track.position, 45.0, "{state:?}");
        }
    }

    #[test]
    fn interpolation_needs_a_known_duration() {
        let t0 = Instant::now();
        let mut st = PlaybackState::default();
        st.apply_track(playing(0.0, 0.0), t0);
        st.interpolate(t0 + Duration::from_secs(3));
        assert_eq!(st.track.position, 0.0);
    }

    #[test]
    fn status_expires_after_ttl() {
        let t0 = Instant::now();
        let mut st = PlaybackState::default();
        assert_eq!(st.status_text(), READY);
        st.set_status("Volume: 45%.", t0);
        st.expire_status(t0 + Duration::from_secs(4), Duration::from_secs(5));
        assert_eq!(st.status_text(), "Volume: 45%.");
        st.expire_status(t0 + Duration::from_secs(5), Duration::from_secs(5));
        assert_eq!(st.status_text(), READY);
    }

    #[test]
    fn selection_clamps_after_list_shrinks() {
        let mut st = with_playlists(&["a", "b", "c", "d"]);
        st.selected_index = 3;
        st.set_playlists(vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(st.selected_index, 1);
        st.set_playlists(Vec::new());
        assert_eq!(st.selected_index, 0);
    }

    #[test]
    fn selection_moves_are_clamped_at_both_ends() {
        let mut st = with_playlists(&["a", "b", "c"]);
        st.move_selection(-1);
        assert_eq!(st.selected_index, 0);
        st.move_selection(10);
        assert_eq!(st.selected_index, 2);
        st.move_selection(1);
        assert_eq!(st.selected_index, 2);
        st.select_first();
        assert_eq!(st.selected_index, 0);
        st.select_last();
        assert_eq!(st.selected_index, 2);
    }

    #[test]
    fn search_commit_plays_first_match_and_restores_full_index() {
        let mut st = with_playlists(&["Jazz Hits", "Rock", "Jazz Classics"]);
        st.selected_index = 1;
        st.begin_search();
        for c in "jazz".chars() {
            st.push_search_char(c);
        }
        let names: Vec<&str> = st.filtered().into_iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["Jazz Hits", "Jazz Classics"]);

        assert_eq!(st.commit_search().as_deref(), Some("Jazz Hits"));
        assert!(!st.search_active);
        assert!(st.search_query.is_empty());
        assert_eq!(st.selected_index, 0);
    }

    #[test]
    fn search_navigation_maps_back_to_unfiltered_index() {
        let mut st = with_playlists(&["Jazz Hits", "Rock", "Jazz Classics"]);
        st.begin_search();
        st.push_search_char('j');
        st.move_selection(1);
        assert_eq!(
            st.selected_playlist(),
            Some((2, "Jazz Classics".to_owned()))
        );
        st.cancel_search();
        assert_eq!(st.selected_index, 2);
        assert_eq!(st.filtered_len(), 3);
    }

    #[test]
    fn refresh_during_search_keeps_selection_inside_the_filtered_view() {
        let mut st = with_playlists(&["Jazz Hits", "Rock", "Jazz Classics"]);
        st.begin_search();
        for c in "jazz".chars() {
            st.push_search_char(c);
        }
        st.move_selection(1);
        assert_eq!(st.selected_index, 1);

        st.set_playlists(vec!["Jazz Hits".to_owned(), "Rock".to_owned()]);
        assert!(st.search_active);
        assert_eq!(st.filtered_len(), 1);
        assert_eq!(st.selected_index, 0);
        assert_eq!(st.selected_playlist(), Some((0, "Jazz Hits".to_owned())));

        st.set_playlists(vec!["Rock".to_owned()]);
        assert_eq!(st.filtered_len(), 0);
        assert_eq!(st.selected_index, 0);
        assert_eq!(st.selected_playlist(), None);
    }

    #[test]
    fn late_tracks_for_a_closed_view_are_dropped() {
        let mut st = with_playlists(&["Jazz Hits", "Rock"]);
        st.open_track_view("Jazz Hits");
        st.close_track_view();
        st.open_track_view("Rock");

        let stale = vec![PlaylistTrack {
            name: "So What".into(),
            index: 1,
            ..PlaylistTrack::default()
        }];
        assert!(!st.apply_tracks("Jazz Hits", stale));
        let view = st.track_view.as_ref().expect("view open");
        assert!(!view.loaded);

        assert!(st.apply_tracks("Rock", Vec::new()));
        assert!(st.track_view.as_ref().is_some_and(|v| v.loaded));
    }

    #[test]
    fn search_without_matches_keeps_selection_valid() {
        let mut st = with_playlists(&["Jazz Hits", "Rock"]);
        st.begin_search();
        for c in "polka".chars() {
            st.push_search_char(c);
        }
        assert_eq!(st.filtered_len(), 0);
        assert_eq!(st.selected_playlist(), None);
        assert_eq!(st.commit_search(), None);
        assert_eq!(st.selected_index, 0);
    }

    #[test]
    fn backspace_widens_the_view() {
        let mut st = with_playlists(&["Jazz Hits", "Rock"]);
        st.begin_search();
        st.push_search_char('r');
        st.push_search_char('x');
        assert_eq!(st.filtered_len(), 0);
        st.pop_search_char();
        assert_eq!(st.filtered_len(), 1);
        st.pop_search_char();
        st.pop_search_char();
        assert_eq!(st.filtered_len(), 2);
    }

    #[test]
    fn shared_lock_survives_poisoning() {
        let state = shared(PlaybackState::default());
        let clone = Arc::clone(&state);
        let _ = std::thread::spawn(move || {
            let _guard = clone.lock().expect("lock");
            panic!("writer died");
        })
        .join();
        lock(&state).volume = Volume::new(30);
        assert_eq!(lock(&state).volume.level(), Some(30));
    }
}
