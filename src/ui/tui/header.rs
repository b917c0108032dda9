use super::styles;
use super::utils::{put, width};
use super::views::RenderCtx;
use crate::app::PlaybackState;
use crate::domain::PlayerStatus;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

const EQ_FRAMES: [&str; 6] = [
    "▁▃▅▇▅▃",
    "▃▅▇▅▃▁",
    "▅▇▅▃▁▃",
    "▇▅▃▁▃▅",
    "▅▃▁▃▅▇",
    "▃▁▃▅▇▅",
];

pub(super) fn indicator(status: PlayerStatus, ctx: &RenderCtx) -> String {
    if ctx.glyphs.ascii {
        return match status {
            PlayerStatus::Playing => ">>> playing",
            PlayerStatus::Paused => "|| paused",
            _ => ". stopped",
        }
        .to_owned();
    }
    match status {
        PlayerStatus::Playing => {
            let frame = (ctx.anim_ms / 250) as usize % EQ_FRAMES.len();
            format!("{} playing", EQ_FRAMES[frame])
        }
        PlayerStatus::Paused => {
            let glyph = if (ctx.anim_ms / 1000) % 2 == 0 { "◐" } else { "◑" };
            format!("{glyph} paused")
        }
        _ => "○ stopped".to_owned(),
    }
}

pub(super) fn draw_header(buf: &mut Buffer, area: Rect, snap: &PlaybackState, ctx: &RenderCtx) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let bar = styles::header_bar();
    put(buf, area.x, area.y, &" ".repeat(usize::from(area.width)), bar);

    let left = ctx.glyphs.app_title;
    put(buf, area.x, area.y, left, bar);

    let right = format!(" {} ", indicator(snap.track.state, ctx));
    let (lw, rw) = (width(left), width(&right));
    if usize::from(area.width) > lw + rw + 1 {
        let x = area.right() - rw as u16 - 1;
        put(buf, x, area.y, &right, bar);
    }
}
