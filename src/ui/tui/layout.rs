use ratatui::layout::{Constraint, Layout, Rect};

const PAD_X: u16 = 2;
const MIN_HEIGHT: u16 = 10;
const MIN_CONTENT_WIDTH: u16 = 20;
const NOW_PLAYING_TOP: u16 = 3;
pub(super) const NOW_PLAYING_HEIGHT: u16 = 7;
const MIN_PANEL_HEIGHT: u16 = 4;
const WIDE_MIN_WIDTH: u16 = 55;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Lower {
    /// Bordered Library/Search panel beside the Up Next sidebar.
    Wide { library: Rect, up_next: Rect },
    /// Unbordered title row over a playlist-only list.
    Narrow { title: Rect, list: Rect },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ScreenLayout {
    pub header: Rect,
    pub status: Rect,
    pub now_playing: Option<Rect>,
    pub lower: Option<Lower>,
}

pub(super) fn compute_layout(area: Rect) -> ScreenLayout {
    let header = Rect::new(area.x, area.y, area.width, area.height.min(1));
    let status = Rect::new(
        area.x,
        area.bottom().saturating_sub(1),
        area.width,
        area.height.min(1),
    );
    let content_w = area.width.saturating_sub(PAD_X * 2);
    if area.height < MIN_HEIGHT || content_w < MIN_CONTENT_WIDTH {
        return ScreenLayout {
            header,
            status,
            now_playing: None,
            lower: None,
        };
    }

    // Never reaches the status row.
    let np_h = NOW_PLAYING_HEIGHT.min(area.height - NOW_PLAYING_TOP - 1);
    let now_playing = Rect::new(area.x + PAD_X, area.y + NOW_PLAYING_TOP, content_w, np_h);

    let panel_top = NOW_PLAYING_TOP + NOW_PLAYING_HEIGHT + 1;
    let panel_h = area.height.saturating_sub(1).saturating_sub(panel_top);
    let lower = (panel_h >= MIN_PANEL_HEIGHT).then(|| {
        let panels = Rect::new(area.x + PAD_X, area.y + panel_top, content_w, panel_h);
        if area.width >= WIDE_MIN_WIDTH {
            let [library, up_next] =
                Layout::horizontal([Constraint::Length(content_w / 2), Constraint::Fill(1)])
                    .areas(panels);
            Lower::Wide { library, up_next }
        } else {
            let [title, list] =
                Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(panels);
            Lower::Narrow {
                title: Rect {
                    x: title.x + 1,
                    width: title.width.saturating_sub(1),
                    ..title
                },
                list,
            }
        }
    });

    ScreenLayout {
        header,
        status,
        now_playing: Some(now_playing),
        lower,
    }
}

/// Interior of a bordered panel.
pub(super) fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_terminals_get_header_and_status_only() {
        for (w, h) in [(80, 9), (23, 30), (0, 0), (1, 1)] {
            let l = compute_layout(Rect::new(0, 0, w, h));
            assert_eq!(l.now_playing, None, "{w}x{h}");
            assert_eq!(l.lower, None, "{w}x{h}");
        }
    }

    #[test]
    fn header_and_status_pin_first_and_last_rows() {
        let l = compute_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(l.header, Rect::new(0, 0, 80, 1));
        assert_eq!(l.status, Rect::new(0, 23, 80, 1));
        assert_eq!(l.now_playing, Some(Rect::new(2, 3, 76, 7)));
    }

    #[test]
    fn wide_terminals_split_panels_side_by_side() {
        let l = compute_layout(Rect::new(0, 0, 80, 24));
        let Some(Lower::Wide { library, up_next }) = l.lower else {
            panic!("expected wide layout, got {:?}", l.lower);
        };
        assert_eq!(library, Rect::new(2, 11, 38, 12));
        assert_eq!(up_next, Rect::new(40, 11, 38, 12));
    }

    #[test]
    fn narrow_terminals_stack_a_title_over_the_list() {
        let l = compute_layout(Rect::new(0, 0, 40, 24));
        let Some(Lower::Narrow { title, list }) = l.lower else {
            panic!("expected narrow layout, got {:?}", l.lower);
        };
        assert_eq!(title, Rect::new(3, 11, 35, 1));
        assert_eq!(list, Rect::new(2, 12, 36, 11));
    }

    #[test]
    fn short_panels_are_dropped() {
        // 11 + 4 rows of panel + status needs 16 rows.
        assert!(compute_layout(Rect::new(0, 0, 80, 15)).lower.is_none());
        assert!(compute_layout(Rect::new(0, 0, 80, 16)).lower.is_some());
    }

    #[test]
    fn now_playing_never_touches_the_status_row() {
        for h in 10..30 {
            let l = compute_layout(Rect::new(0, 0, 60, h));
            let np = l.now_playing.expect("now playing region");
            assert!(np.bottom() <= l.status.y, "height {h}");
            if let Some(Lower::Wide { library, .. }) = l.lower {
                assert!(library.bottom() <= l.status.y);
            }
        }
    }
}
