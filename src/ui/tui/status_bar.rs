use super::styles;
use super::utils::{put, width};
use super::views::RenderCtx;
use crate::app::PlaybackState;
use crate::domain::PlayerStatus;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

const HELP_HINT: &str = "? help ";

pub(super) fn status_line(snap: &PlaybackState, ctx: &RenderCtx) -> String {
    let g = &ctx.glyphs;
    let indicator = match snap.track.state {
        PlayerStatus::Playing => g.status_playing,
        PlayerStatus::Paused => g.status_paused,
        PlayerStatus::Stopped => g.status_stopped,
        _ => " ",
    };
    format!(" {indicator}  {}", snap.status_text())
}

pub(super) fn draw_status_bar(buf: &mut Buffer, area: Rect, snap: &PlaybackState, ctx: &RenderCtx) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let bar = styles::status_bar();
    let w = usize::from(area.width);
    put(buf, area.x, area.y, &" ".repeat(w - 1), bar);

    let line = status_line(snap, ctx);
    put(buf, area.x, area.y, &line, bar);
    if w > width(&line) + HELP_HINT.len() + 2 {
        put(buf, area.right() - HELP_HINT.len() as u16 - 1, area.y, HELP_HINT, bar);
    }
}
