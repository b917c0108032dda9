use super::styles;
use super::utils::{put, truncate};
use super::views::RenderCtx;
use crate::app::PlaybackState;
use crate::domain::UpNext;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;

const HINTS: [(&str, &str); 4] = [
    ("space", "play/pause"),
    ("n/p", "next/prev"),
    ("+/-", "volume"),
    ("/", "search"),
];

/// Up next, the playlist it comes from, the app's queue and a few key hints.
pub(super) fn draw_sidebar(buf: &mut Buffer, area: Rect, snap: &PlaybackState, _ctx: &RenderCtx) {
    if area.height < 2 || area.width < 12 {
        return;
    }
    let cx = area.x + 2;
    let tw = usize::from(area.width - 3);
    let bottom = area.bottom();
    let dim = styles::dim();
    let mut y = area.y;

    match &snap.up_next {
        UpNext::Found(next) => {
            let name = if next.name.is_empty() { "Untitled" } else { next.name.as_str() };
            put(buf, cx, y, truncate(name, tw), styles::bright());
            y += 1;
            if y < bottom {
                let artist = if next.artist.is_empty() { "Unknown" } else { next.artist.as_str() };
                put(buf, cx, y, truncate(artist, tw), dim);
                y += 1;
            }
        }
        UpNext::EndOfPlaylist => {
            put(buf, cx, y, "End of playlist", dim);
            y += 1;
        }
        UpNext::Unavailable(_) => {
            put(buf, cx, y, "-", dim);
            y += 1;
        }
    }

    y += 1;
    if y >= bottom {
        return;
    }
    if !snap.current_playlist.is_empty() {
        let from = format!("from {}", snap.current_playlist);
        put(buf, cx, y, truncate(&from, tw), dim);
        y += 1;
    }

    if !snap.queue.is_empty() && y + 1 < bottom {
        y += 1;
        put(buf, cx, y, "Queue", dim.add_modifier(Modifier::BOLD));
        y += 1;
        for (i, item) in snap.queue.iter().enumerate() {
            if y + 1 >= bottom {
                break;
            }
            let line = format!("{:>2}. {}", i + 1, item.name);
            put(buf, cx, y, truncate(&line, tw), styles::bright());
            put(buf, cx + 4, y + 1, truncate(&item.artist, tw.saturating_sub(4)), dim);
            y += 2;
        }
    }

    y += 1;
    let key_style = styles::accent(snap.track.state).add_modifier(Modifier::BOLD);
    for (key, desc) in HINTS {
        if y >= bottom {
            break;
        }
        put(buf, cx, y, &format!("{key:<6}"), key_style);
        put(buf, cx + 6, y, truncate(desc, tw.saturating_sub(6)), dim);
        y += 1;
    }
}
