use super::hitmap::{HitMap, PlaylistGeometry};
use super::styles;
use super::utils::{put, truncate, width};
use super::views::RenderCtx;
use crate::app::PlaybackState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// First filtered index shown so that `selected` stays on screen.
pub(super) fn scroll_start(selected: usize, rows: usize) -> usize {
    (selected + 1).saturating_sub(rows)
}

pub(super) fn draw_playlists(
    buf: &mut Buffer,
    area: Rect,
    snap: &PlaybackState,
    ctx: &RenderCtx,
    hitmap: &mut HitMap,
) {
    if area.height < 1 || area.width < 10 {
        return;
    }
    let cx = area.x + 2;
    let tw = usize::from(area.width - 4);
    let rows = usize::from(area.height);
    let dim = styles::dim();

    if snap.playlists.is_empty() {
        let msg = if snap.playlists_loaded {
            "No playlists."
        } else {
            "Loading..."
        };
        put(buf, cx, area.y, truncate(msg, tw), dim);
        return;
    }
    let filtered = snap.filtered();
    if filtered.is_empty() {
        put(buf, cx, area.y, "No matches.", dim);
        return;
    }

    let selected = snap.selected_index.min(filtered.len() - 1);
    let start = scroll_start(selected, rows);
    hitmap.playlist = Some(PlaylistGeometry {
        area,
        start,
        len: filtered.len(),
    });

    let accent = styles::accent(snap.track.state);
    let glyphs = &ctx.glyphs;
    for (row, (index, (_, name))) in filtered
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .enumerate()
    {
        let y = area.y + row as u16;
        let is_current = !snap.current_playlist.is_empty() && *name == snap.current_playlist;
        if index == selected {
            let text = format!("{}{name}", glyphs.selected);
            let text = truncate(&text, tw);
            let padded = format!("{text}{}", " ".repeat(tw - width(text)));
            put(buf, cx, y, &padded, styles::selected(snap.track.state));
        } else if is_current {
            put(buf, cx, y, truncate(&format!("{}{name}", glyphs.playing_mark), tw), accent);
        } else {
            put(buf, cx, y, truncate(&format!("  {name}"), tw), ratatui::style::Style::default());
        }
    }

    if filtered.len() > rows && area.height > 2 {
        let track_x = area.right() - 1;
        let thumb_h = (rows * rows / filtered.len()).max(1);
        let span = (filtered.len() - rows).max(1);
        let thumb_pos = (rows - thumb_h) * start / span;
        for i in thumb_pos..(thumb_pos + thumb_h).min(rows) {
            put(buf, track_x, area.y + i as u16, glyphs.box_v, accent.add_modifier(ratatui::style::Modifier::DIM));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_visible() {
        assert_eq!(scroll_start(0, 5), 0);
        assert_eq!(scroll_start(4, 5), 0);
        assert_eq!(scroll_start(5, 5), 1);
        assert_eq!(scroll_start(19, 5), 15);
    }
}
