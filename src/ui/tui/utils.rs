use ratatui::buffer::Buffer;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// `m:ss`, or `--:--` when unknown.
pub(super) fn fmt_time(seconds: f64) -> String {
    if seconds.is_nan() || seconds <= 0.0 {
        return "--:--".to_owned();
    }
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Longest prefix of `text` that fits in `max` columns.
pub(super) fn truncate(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            return &text[..i];
        }
        used += w;
    }
    text
}

pub(super) fn width(text: &str) -> usize {
    text.width()
}

pub(super) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Writes `text` at `(x, y)`, clipped to the buffer. On the bottom row the last column
/// is never written.
pub(super) fn put(buf: &mut Buffer, x: u16, y: u16, text: &str, style: ratatui::style::Style) {
    let area = buf.area;
    if y < area.top() || y >= area.bottom() || x < area.left() || x >= area.right() {
        return;
    }
    let mut room = usize::from(area.right() - x);
    if y == area.bottom() - 1 {
        room = room.saturating_sub(1);
    }
    let clipped = truncate(text, room);
    if !clipped.is_empty() {
        buf.set_stringn(x, y, clipped, room, style);
    }
}
