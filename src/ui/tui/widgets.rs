use super::glyphs::Glyphs;
use super::styles;
use super::utils::{put, width};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ProgressCells {
    pub filled: usize,
    pub head: bool,
    pub empty: usize,
}

/// Splits `width` cells into played / playhead / remaining.
pub(super) fn progress_cells(position: f64, duration: f64, width: usize) -> ProgressCells {
    if duration <= 0.0 || width == 0 {
        return ProgressCells {
            filled: 0,
            head: false,
            empty: width,
        };
    }
    let ratio = (position / duration).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).floor() as usize).min(width);
    let head = filled < width;
    ProgressCells {
        filled,
        head,
        empty: width - filled - usize::from(head),
    }
}

pub(super) fn draw_progress_bar(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    cells: ProgressCells,
    glyphs: &Glyphs,
    filled_style: Style,
) {
    let mut cx = x;
    put(buf, cx, y, &glyphs.progress_filled.repeat(cells.filled), filled_style);
    cx = cx.saturating_add(cells.filled as u16);
    if cells.head {
        put(buf, cx, y, glyphs.progress_head, styles::bright());
        cx = cx.saturating_add(1);
    }
    put(buf, cx, y, &glyphs.progress_empty.repeat(cells.empty), styles::dim());
}

/// Rounded (or ASCII) frame with an inline title: `╭─ Title ───╮`.
pub(super) fn draw_panel_border(
    buf: &mut Buffer,
    area: Rect,
    title: &str,
    title_style: Style,
    glyphs: &Glyphs,
) {
    if area.height < 2 || area.width < 4 {
        return;
    }
    let w = usize::from(area.width);
    let dim = styles::dim();
    let top = if title.is_empty() {
        format!("{}{}{}", glyphs.box_tl, glyphs.box_h.repeat(w - 2), glyphs.box_tr)
    } else {
        let fill = w.saturating_sub(width(title) + 5);
        format!(
            "{}{} {title} {}{}",
            glyphs.box_tl,
            glyphs.box_h,
            glyphs.box_h.repeat(fill),
            glyphs.box_tr
        )
    };
    put(buf, area.x, area.y, super::utils::truncate(&top, w), dim);
    if !title.is_empty() {
        let room = w.saturating_sub(5);
        put(
            buf,
            area.x + 3,
            area.y,
            super::utils::truncate(title, room),
            title_style,
        );
    }
    for row in 1..area.height - 1 {
        put(buf, area.x, area.y + row, glyphs.box_v, dim);
        put(buf, area.right() - 1, area.y + row, glyphs.box_v, dim);
    }
    let bottom = format!("{}{}{}", glyphs.box_bl, glyphs.box_h.repeat(w - 2), glyphs.box_br);
    put(buf, area.x, area.bottom() - 1, &bottom, dim);
}
