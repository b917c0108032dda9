use super::glyphs::Glyphs;
use super::header::draw_header;
use super::hitmap::HitMap;
use super::layout::{Lower, compute_layout, inner};
use super::now_playing::draw_now_playing;
use super::overlays::draw_help_overlay;
use super::playlists_view::draw_playlists;
use super::sidebar::draw_sidebar;
use super::status_bar::draw_status_bar;
use super::styles;
use super::tracks_view::{draw_tracks, tracks_title};
use super::utils::put;
use super::widgets::draw_panel_border;
use crate::app::PlaybackState;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Per-frame rendering inputs that are not part of the store.
#[derive(Debug, Clone, Copy)]
pub(super) struct RenderCtx {
    pub glyphs: Glyphs,
    /// Milliseconds since the UI started; drives animations.
    pub anim_ms: u128,
}

impl RenderCtx {
    fn cursor_visible(&self) -> bool {
        (self.anim_ms / 500) % 2 == 0
    }
}

pub(super) fn library_title(snap: &PlaybackState, ctx: &RenderCtx) -> String {
    if let Some(view) = &snap.track_view {
        tracks_title(view)
    } else if snap.search_active {
        let cursor = if ctx.cursor_visible() {
            ctx.glyphs.search_cursor
        } else {
            " "
        };
        format!("Search: {}{cursor}", snap.search_query)
    } else {
        format!("Library {}", snap.filtered_len())
    }
}

/// The playlist list, or the open playlist's tracks in its place.
fn draw_library(
    buf: &mut Buffer,
    area: Rect,
    snap: &PlaybackState,
    ctx: &RenderCtx,
    hitmap: &mut HitMap,
) {
    match &snap.track_view {
        Some(view) => draw_tracks(buf, area, view, snap, ctx, hitmap),
        None => draw_playlists(buf, area, snap, ctx, hitmap),
    }
}

/// Draws one frame from `snap` and returns the clickable regions it produced.
pub(super) fn draw_ui(
    f: &mut Frame,
    snap: &PlaybackState,
    ctx: &RenderCtx,
    help_visible: bool,
) -> HitMap {
    let area = f.area();
    let layout = compute_layout(area);
    let buf = f.buffer_mut();
    let mut hitmap = HitMap::default();

    draw_header(buf, layout.header, snap, ctx);
    draw_status_bar(buf, layout.status, snap, ctx);

    if let Some(np) = layout.now_playing {
        draw_now_playing(buf, np, snap, ctx, &mut hitmap);
    }

    match layout.lower {
        Some(Lower::Wide { library, up_next }) => {
            let title = library_title(snap, ctx);
            draw_panel_border(buf, library, &title, styles::accent(snap.track.state), &ctx.glyphs);
            draw_panel_border(buf, up_next, "Up Next", styles::dim(), &ctx.glyphs);
            draw_library(buf, inner(library), snap, ctx, &mut hitmap);
            draw_sidebar(buf, inner(up_next), snap, ctx);
        }
        Some(Lower::Narrow { title, list }) => {
            put(buf, title.x, title.y, &library_title(snap, ctx), styles::dim());
            draw_library(buf, list, snap, ctx, &mut hitmap);
        }
        None => {}
    }

    if help_visible {
        draw_help_overlay(buf, area, snap, ctx);
    }
    hitmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerStatus, TrackInfo, UpNext, UpNextTrack, Volume};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_owned()))
            .collect()
    }

    fn screen(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample_state() -> PlaybackState {
        let mut st = PlaybackState::default();
        st.apply_track(
            TrackInfo {
                name: "So What".into(),
                artist: "Miles Davis".into(),
                album: "Kind of Blue".into(),
                state: PlayerStatus::Playing,
                duration: 200.0,
                position: 45.0,
            },
            Instant::now(),
        );
        st.set_playlists(vec!["Library".into(), "Jazz Hits".into(), "Rock".into()]);
        st.current_playlist = "Jazz Hits".into();
        st.volume = Volume::new(72);
        st.up_next = UpNext::Found(UpNextTrack {
            name: "Freddie Freeloader".into(),
            artist: "Miles Davis".into(),
            album: None,
        });
        st
    }

    fn render(w: u16, h: u16, st: &PlaybackState, help: bool) -> (Buffer, HitMap) {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).expect("terminal");
        let ctx = RenderCtx {
            glyphs: Glyphs::ASCII,
            anim_ms: 0,
        };
        let mut hitmap = HitMap::default();
        terminal
            .draw(|f| hitmap = draw_ui(f, st, &ctx, help))
            .expect("draw");
        (terminal.backend().buffer().clone(), hitmap)
    }

    #[test]
    fn wide_frame_shows_every_region() {
        let (buf, hitmap) = render(80, 24, &sample_state(), false);
        let text = screen(&buf);
        assert!(row_text(&buf, 0).starts_with(" Apple Music"));
        assert!(row_text(&buf, 0).contains(">>> playing"));
        assert!(text.contains("So What"));
        assert!(text.contains("Miles Davis  -  Kind of Blue"));
        assert!(text.contains("> Playing   ~ -   R -   # 72%"));
        assert!(text.contains("0:45"));
        assert!(text.contains("3:20"));
        assert!(text.contains("Library 3"));
        assert!(text.contains("Up Next"));
        assert!(text.contains("Freddie Freeloader"));
        assert!(text.contains("from Jazz Hits"));
        assert!(row_text(&buf, 23).starts_with(" >  Ready"));
        assert!(row_text(&buf, 23).contains("? help"));
        assert_eq!(hitmap.controls.len(), 7);
        assert!(hitmap.playlist.is_some());
    }

    #[test]
    fn bottom_right_cell_stays_blank() {
        let mut st = sample_state();
        st.set_status("x".repeat(200), Instant::now());
        for (w, h) in [(80, 24), (30, 12), (20, 5)] {
            let (buf, _) = render(w, h, &st, false);
            assert_eq!(buf.cell((w - 1, h - 1)).map(|c| c.symbol()), Some(" "), "{w}x{h}");
        }
    }

    #[test]
    fn tiny_terminal_draws_header_and_status_only() {
        let (buf, hitmap) = render(40, 8, &sample_state(), false);
        let text = screen(&buf);
        assert!(!text.contains("So What"));
        assert!(row_text(&buf, 7).contains("Ready"));
        assert!(hitmap.controls.is_empty());
    }

    #[test]
    fn narrow_frame_stacks_list_without_sidebar() {
        let (buf, _) = render(40, 24, &sample_state(), false);
        let text = screen(&buf);
        assert!(text.contains("Library 3"));
        assert!(!text.contains("Up Next"));
        assert!(text.contains("# Jazz Hits"));
    }

    #[test]
    fn narrow_list_is_clickable_edge_to_edge() {
        let (_, hitmap) = render(40, 24, &sample_state(), false);
        let geo = hitmap.playlist.expect("list geometry");
        let list = geo.area;
        assert_eq!(hitmap.playlist_row_at(list.x, list.y), Some(0));
        assert_eq!(hitmap.playlist_row_at(list.right() - 1, list.y + 2), Some(2));
        assert_eq!(hitmap.playlist_row_at(list.x, list.y + 3), None);
    }

    #[test]
    fn wide_list_excludes_the_panel_border() {
        let (_, hitmap) = render(80, 24, &sample_state(), false);
        let list = hitmap.playlist.expect("list geometry").area;
        assert_eq!(hitmap.playlist_row_at(list.x - 1, list.y), None);
        assert_eq!(hitmap.playlist_row_at(list.x, list.y), Some(0));
    }

    #[test]
    fn search_title_and_empty_filter() {
        let mut st = sample_state();
        st.begin_search();
        for c in "polka".chars() {
            st.push_search_char(c);
        }
        let (buf, _) = render(80, 24, &st, false);
        let text = screen(&buf);
        assert!(text.contains("Search: polka|"));
        assert!(text.contains("No matches."));
    }

    #[test]
    fn open_track_view_replaces_the_playlists() {
        let mut st = sample_state();
        st.open_track_view("Jazz Hits");
        let (buf, _) = render(80, 24, &st, false);
        assert!(screen(&buf).contains("Loading tracks..."));

        st.apply_tracks(
            "Jazz Hits",
            vec![crate::domain::PlaylistTrack {
                name: "Freddie Freeloader".into(),
                artist: "Miles Davis".into(),
                duration: 589.0,
                index: 2,
            }],
        );
        let (buf, hitmap) = render(80, 24, &st, false);
        let text = screen(&buf);
        assert!(text.contains("Jazz Hits 1"));
        assert!(text.contains("9:49"));
        assert!(!text.contains("Library 3"));
        assert_eq!(hitmap.playlist.map(|g| g.len), Some(1));
    }

    #[test]
    fn sidebar_lists_the_queue() {
        let mut st = sample_state();
        st.queue = vec![
            UpNextTrack {
                name: "Blue in Green".into(),
                artist: "Bill Evans".into(),
                album: None,
            },
            UpNextTrack {
                name: "All Blues".into(),
                artist: "Miles Davis".into(),
                album: None,
            },
        ];
        let (buf, _) = render(80, 30, &st, false);
        let text = screen(&buf);
        assert!(text.contains("Queue"));
        assert!(text.contains(" 1. Blue in Green"));
        assert!(text.contains(" 2. All Blues"));
    }

    #[test]
    fn loading_message_before_first_fetch() {
        let (buf, _) = render(80, 24, &PlaybackState::default(), false);
        let text = screen(&buf);
        assert!(text.contains("Loading..."));
        assert!(text.contains("Nothing playing."));
    }

    #[test]
    fn help_overlay_lists_sections() {
        let (buf, _) = render(80, 40, &sample_state(), true);
        let text = screen(&buf);
        for section in ["Keyboard Shortcuts", "PLAYBACK", "AUDIO", "NAVIGATION", "OTHER"] {
            assert!(text.contains(section), "{section}");
        }
    }
}
