use super::layout::centered_rect;
use super::styles;
use super::utils::{put, truncate};
use super::views::RenderCtx;
use crate::app::PlaybackState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;

const KEY_COLUMN: usize = 12;

const SECTIONS: [(&str, &[(&str, &str)]); 4] = [
    (
        "PLAYBACK",
        &[
            ("space", "Play / Pause"),
            ("n  p", "Next / Previous"),
            ("o  a  s", "Play / Pause / Stop"),
            ("x", "Shuffle"),
            ("v", "Repeat"),
        ],
    ),
    (
        "AUDIO",
        &[
            ("+ / -", "Volume up / down"),
            ("m", "Mute / Unmute"),
            ("< / >", "Seek back / forward"),
        ],
    ),
    (
        "NAVIGATION",
        &[
            ("j  k", "Move down / up"),
            ("enter", "Play playlist / track"),
            ("tab", "Show tracks / play list"),
            ("g  G", "Top / Bottom"),
            ("pgup pgdn", "Page up / down"),
            ("/", "Search"),
            ("esc", "Cancel search / back"),
        ],
    ),
    (
        "OTHER",
        &[
            ("r", "Refresh"),
            ("u", "Dump UI tree"),
            ("?", "Close help"),
            ("q", "Quit"),
        ],
    ),
];

fn content_lines() -> u16 {
    let lines: usize = SECTIONS.iter().map(|(_, keys)| keys.len() + 2).sum();
    (lines - 1) as u16
}

pub(super) fn draw_help_overlay(buf: &mut Buffer, area: Rect, snap: &PlaybackState, ctx: &RenderCtx) {
    let box_w = 48.min(area.width.saturating_sub(4));
    let box_h = (content_lines() + 4).min(area.height.saturating_sub(2));
    if box_w < 8 || box_h < 3 {
        return;
    }
    let popup = centered_rect(area, box_w, box_h);
    let accent = styles::accent(snap.track.state);
    let dim = styles::dim();
    let bright = styles::bright();
    let w = usize::from(box_w);

    for row in popup.top()..popup.bottom() {
        put(buf, popup.x, row, &" ".repeat(w), ratatui::style::Style::default());
    }
    let rule = ctx.glyphs.rule.repeat(w);
    put(buf, popup.x, popup.y, &rule, accent.add_modifier(Modifier::DIM));
    put(buf, popup.x, popup.bottom() - 1, &rule, accent.add_modifier(Modifier::DIM));
    put(buf, popup.x + 2, popup.y + 1, "Keyboard Shortcuts", bright);

    let last = popup.bottom() - 1;
    let cx = popup.x + 2;
    let mut y = popup.y + 3;
    for (title, keys) in SECTIONS {
        if y >= last {
            break;
        }
        put(buf, cx, y, title, accent.add_modifier(Modifier::BOLD));
        y += 1;
        for (key, desc) in keys {
            if y >= last {
                break;
            }
            put(buf, cx + 1, y, &format!("{key:<KEY_COLUMN$}"), bright);
            let room = w.saturating_sub(KEY_COLUMN + 4);
            put(buf, cx + 1 + KEY_COLUMN as u16, y, truncate(desc, room), dim);
            y += 1;
        }
        y += 1;
    }
}
