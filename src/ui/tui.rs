mod event_loop;
mod glyphs;
mod guard;
mod header;
mod hitmap;
mod keyboard;
mod layout;
mod mouse;
mod now_playing;
mod overlays;
mod playlists_view;
mod sidebar;
mod status_bar;
mod styles;
mod tracks_view;
mod ui_state;
mod utils;
mod views;
mod widgets;

pub use glyphs::{Glyphs, use_ascii};

use crate::app::SharedState;
use crate::messages::{AppCommand, AppEvent};
use crate::settings::AppSettings;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy)]
pub struct TuiConfig {
    /// Upper bound on how long one frame waits for input.
    pub tick: Duration,
    pub status_clear: Duration,
    pub seek_step: f64,
    pub glyphs: Glyphs,
}

impl TuiConfig {
    pub fn new(settings: &AppSettings, glyphs: Glyphs) -> Self {
        Self {
            tick: settings.tick(),
            status_clear: settings.status_clear(),
            seek_step: f64::from(settings.seek_step_secs),
            glyphs,
        }
    }
}

/// Runs the dashboard until the user quits. Blocks on terminal input between frames.
pub async fn run_tui(
    state: SharedState,
    config: TuiConfig,
    tx: mpsc::Sender<AppCommand>,
    rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    event_loop::run_tui_internal(state, config, tx, rx).await
}
