use super::TuiConfig;
use super::guard::TuiGuard;
use super::hitmap::HitMap;
use super::keyboard::handle_key;
use super::mouse::handle_mouse;
use super::ui_state::UiState;
use super::views::{RenderCtx, draw_ui};
use crate::app::{SharedState, lock};
use crate::messages::{AppCommand, AppEvent};
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Instant;
use tokio::sync::mpsc;

pub(super) async fn run_tui_internal(
    state: SharedState,
    config: TuiConfig,
    tx: mpsc::Sender<AppCommand>,
    mut rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    let _guard = TuiGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut ui = UiState::new(config.glyphs, config.seek_step);
    tracing::info!(ascii = ui.glyphs.ascii, "tui started");

    loop {
        let now = Instant::now();
        // One lock scope per frame: apply outcomes, advance the clock, take a snapshot.
        let snapshot = {
            let mut st = lock(&state);
            while let Ok(evt) = rx.try_recv() {
                st.set_status(evt.status_text(), now);
            }
            st.interpolate(now);
            st.expire_status(now, config.status_clear);
            st.clone()
        };

        let ctx = RenderCtx {
            glyphs: ui.glyphs,
            anim_ms: now.duration_since(ui.started).as_millis(),
        };
        let help_visible = ui.help_visible;
        let mut hitmap = HitMap::default();
        terminal.draw(|f| hitmap = draw_ui(f, &snapshot, &ctx, help_visible))?;
        ui.hitmap = hitmap;

        if event::poll(config.tick)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(&mut ui, &state, key, &tx) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&ui, &state, mouse, &tx),
                _ => {}
            }
        }
    }

    tracing::info!("tui exiting");
    Ok(())
}
