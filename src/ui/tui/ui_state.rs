use super::glyphs::Glyphs;
use super::hitmap::HitMap;
use std::time::Instant;

/// UI-local state that never enters the shared store.
#[derive(Debug, Clone)]
pub(super) struct UiState {
    pub help_visible: bool,
    /// Regions drawn by the most recent frame.
    pub hitmap: HitMap,
    pub seek_step: f64,
    pub glyphs: Glyphs,
    pub started: Instant,
}

impl UiState {
    pub fn new(glyphs: Glyphs, seek_step: f64) -> Self {
        Self {
            help_visible: false,
            hitmap: HitMap::default(),
            seek_step,
            glyphs,
            started: Instant::now(),
        }
    }
}
