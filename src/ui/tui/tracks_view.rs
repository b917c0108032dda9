use super::hitmap::{HitMap, PlaylistGeometry};
use super::playlists_view::scroll_start;
use super::styles;
use super::utils::{fmt_time, put, truncate, width};
use super::views::RenderCtx;
use crate::app::{PlaybackState, TrackView};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Title of the library panel while a track view is open.
pub(super) fn tracks_title(view: &TrackView) -> String {
    if view.loaded {
        format!("{} {}", view.playlist, view.tracks.len())
    } else {
        view.playlist.clone()
    }
}

/// One playlist's tracks with durations on the right. Row hit-testing shares the
/// playlist geometry slot, since only one of the two lists is ever on screen.
pub(super) fn draw_tracks(
    buf: &mut Buffer,
    area: Rect,
    view: &TrackView,
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

    if !view.loaded {
        put(buf, cx, area.y, truncate("Loading tracks...", tw), dim);
        return;
    }
    if view.tracks.is_empty() {
        put(buf, cx, area.y, "No tracks.", dim);
        return;
    }

    let selected = view.selected.min(view.tracks.len() - 1);
    let start = scroll_start(selected, rows);
    hitmap.playlist = Some(PlaylistGeometry {
        area,
        start,
        len: view.tracks.len(),
    });

    let glyphs = &ctx.glyphs;
    let accent = styles::accent(snap.track.state);
    let in_playing_list = view.playlist == snap.current_playlist;
    for (row, (index, track)) in view
        .tracks
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .enumerate()
    {
        let y = area.y + row as u16;
        let is_playing = in_playing_list && !track.name.is_empty() && track.name == snap.track.name;
        let mark = if index == selected {
            glyphs.selected
        } else if is_playing {
            glyphs.playing_mark
        } else {
            "  "
        };
        let time = fmt_time(track.duration);
        let room = tw.saturating_sub(width(&time) + 1);
        let label = format!("{mark}{}", track.name);
        let label = truncate(&label, room);

        let style = if index == selected {
            styles::selected(snap.track.state)
        } else if is_playing {
            accent
        } else {
            Style::default()
        };
        let gap = " ".repeat(tw.saturating_sub(width(label) + width(&time)));
        put(buf, cx, y, &format!("{label}{gap}{time}"), style);
        if index != selected {
            put(buf, cx + tw.saturating_sub(width(&time)) as u16, y, &time, dim);
        }
    }
}
