pub mod filter;
pub mod state;
pub mod track_view;

pub use filter::filter_playlists;
pub use state::{PlaybackState, READY, SharedState, StatusLine, lock, shared};
pub use track_view::TrackView;
