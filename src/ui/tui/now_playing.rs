use super::hitmap::{Control, HitMap};
use super::layout::NOW_PLAYING_HEIGHT;
use super::styles;
use super::utils::{capitalize, fmt_time, put, truncate, width};
use super::views::RenderCtx;
use super::widgets::{draw_progress_bar, progress_cells};
use crate::app::PlaybackState;
use crate::domain::{PlayerStatus, Shuffle};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

const MIN_BAR_WIDTH: usize = 8;

/// `● Playing   ⇆ On   ↻ All   ♪ 72%`
pub(super) fn chips_text(snap: &PlaybackState, ctx: &RenderCtx) -> String {
    let g = &ctx.glyphs;
    let state_glyph = match snap.track.state {
        PlayerStatus::Playing => g.chip_playing,
        PlayerStatus::Paused => g.chip_paused,
        _ => g.chip_idle,
    };
    let shuffle = match snap.shuffle {
        Shuffle::On => "On",
        Shuffle::Off => "Off",
        Shuffle::Unknown => "-",
    };
    let repeat = capitalize(&snap.repeat.to_string());
    let volume = snap
        .volume
        .level()
        .map(|v| format!("   {} {v}%", g.chip_volume))
        .unwrap_or_default();
    format!(
        "{state_glyph} {}   {} {shuffle}   {} {repeat}{volume}",
        snap.track.state.label(),
        g.chip_shuffle,
        g.chip_repeat
    )
}

pub(super) fn draw_now_playing(
    buf: &mut Buffer,
    area: Rect,
    snap: &PlaybackState,
    ctx: &RenderCtx,
    hitmap: &mut HitMap,
) {
    if area.height < 3 || area.width < 10 {
        return;
    }
    let track = &snap.track;
    let text_x = area.x + 1;
    let tw = usize::from(area.width - 2);
    let accent = styles::accent(track.state);

    if !track.state.has_transport() {
        let msg = if track.state == PlayerStatus::NotRunning {
            "Music app not running."
        } else {
            "Nothing playing."
        };
        put(buf, text_x, area.y + 1, msg, styles::dim());
        return;
    }

    let name = if track.name.is_empty() { "Untitled" } else { track.name.as_str() };
    put(buf, text_x, area.y, truncate(name, tw), styles::bright());

    let artist = if track.artist.is_empty() { "Unknown" } else { track.artist.as_str() };
    let album = if track.album.is_empty() { "Unknown" } else { track.album.as_str() };
    let byline = format!("{artist}{}{album}", ctx.glyphs.separator);
    put(buf, text_x, area.y + 1, truncate(&byline, tw), styles::dim());

    if area.height > 4 {
        put(buf, text_x, area.y + 3, truncate(&chips_text(snap, ctx), tw), accent);
    }

    if area.height >= NOW_PLAYING_HEIGHT {
        draw_controls(buf, text_x, area.y + 4, tw, ctx, hitmap);
    }

    draw_progress(buf, text_x, area.bottom() - 1, tw, snap, ctx);
}

fn draw_controls(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    tw: usize,
    ctx: &RenderCtx,
    hitmap: &mut HitMap,
) {
    let limit = usize::from(x) + tw;
    let mut cx = usize::from(x);
    for control in Control::ALL {
        let label = control.label(&ctx.glyphs);
        let w = width(label);
        if cx + w > limit {
            break;
        }
        put(buf, cx as u16, y, label, styles::bright());
        hitmap
            .controls
            .push((control, Rect::new(cx as u16, y, w as u16, 1)));
        cx += w + 2;
    }
}

fn draw_progress(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    tw: usize,
    snap: &PlaybackState,
    ctx: &RenderCtx,
) {
    let track = &snap.track;
    let left = fmt_time(track.position);
    let right = fmt_time(track.duration);
    let bar_w = tw.saturating_sub(width(&left) + width(&right) + 2);
    if bar_w < MIN_BAR_WIDTH {
        put(buf, x, y, &format!("{left} / {right}"), styles::dim());
        return;
    }
    put(buf, x, y, &left, styles::dim());
    let bar_x = x + width(&left) as u16 + 1;
    let cells = progress_cells(track.position, track.duration, bar_w);
    let filled = styles::accent(track.state).add_modifier(ratatui::style::Modifier::BOLD);
    draw_progress_bar(buf, bar_x, y, cells, &ctx.glyphs, filled);
    put(buf, bar_x + bar_w as u16 + 1, y, &right, styles::dim());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RepeatMode, Volume};
    use crate::ui::tui::glyphs::Glyphs;

    #[test]
    fn chips_show_every_scalar() {
        let mut snap = PlaybackState::default();
        snap.track.state = PlayerStatus::Playing;
        snap.shuffle = Shuffle::On;
        snap.repeat = RepeatMode::All;
        snap.volume = Volume::new(72);
        let ctx = RenderCtx {
            glyphs: Glyphs::UNICODE,
            anim_ms: 0,
        };
        assert_eq!(chips_text(&snap, &ctx), "● Playing   ⇆ On   ↻ All   ♪ 72%");
    }

    #[test]
    fn chips_hide_unknown_volume() {
        let snap = PlaybackState::default();
        let ctx = RenderCtx {
            glyphs: Glyphs::ASCII,
            anim_ms: 0,
        };
        assert_eq!(chips_text(&snap, &ctx), ". Stopped   ~ -   R -");
    }
}
