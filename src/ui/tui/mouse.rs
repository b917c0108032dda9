use super::keyboard::submit;
use super::ui_state::UiState;
use crate::app::{SharedState, lock};
use crate::messages::AppCommand;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// Resolves a mouse event against the last frame's hit map. Selection changes are
/// applied to the store directly; a clicked control yields its command.
pub(super) fn dispatch_mouse(
    ui: &UiState,
    state: &SharedState,
    mouse: MouseEvent,
) -> Option<AppCommand> {
    if ui.help_visible {
        return None;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(control) = ui.hitmap.control_at(mouse.column, mouse.row) {
                return Some(control.command());
            }
            if let Some(row) = ui.hitmap.playlist_row_at(mouse.column, mouse.row) {
                let mut st = lock(state);
                match st.track_view.as_mut() {
                    Some(view) => view.select_row(row),
                    None => st.select_filtered_row(row),
                };
            }
            None
        }
        MouseEventKind::ScrollUp => {
            scroll(state, -1);
            None
        }
        MouseEventKind::ScrollDown => {
            scroll(state, 1);
            None
        }
        _ => None,
    }
}

/// The wheel moves whichever list is on screen.
fn scroll(state: &SharedState, delta: isize) {
    let mut st = lock(state);
    match st.track_view.as_mut() {
        Some(view) => view.move_selection(delta),
        None => st.move_selection(delta),
    }
}

pub(super) fn handle_mouse(
    ui: &UiState,
    state: &SharedState,
    mouse: MouseEvent,
    tx: &mpsc::Sender<AppCommand>,
) {
    if let Some(cmd) = dispatch_mouse(ui, state, mouse) {
        tracing::debug!(?cmd, "mouse command");
        submit(state, tx, cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{PlaybackState, shared};
    use crate::domain::PlaylistTrack;
    use crate::ui::tui::glyphs::Glyphs;
    use crate::ui::tui::hitmap::{Control, PlaylistGeometry};
    use crate::ui::tui::keyboard::{KeyOutcome, dispatch_key};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::layout::Rect;
    use std::time::Instant;

    fn enter() -> KeyEvent {
        KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn setup() -> (UiState, SharedState) {
        let mut ui = UiState::new(Glyphs::ASCII, 10.0);
        ui.hitmap.controls = vec![
            (Control::Prev, Rect::new(3, 7, 7, 1)),
            (Control::Play, Rect::new(12, 7, 6, 1)),
        ];
        ui.hitmap.playlist = Some(PlaylistGeometry {
            area: Rect::new(3, 12, 36, 5),
            start: 0,
            len: 3,
        });
        let mut st = PlaybackState::default();
        st.set_playlists(vec!["a".into(), "b".into(), "c".into()]);
        (ui, shared(st))
    }

    #[tokio::test]
    async fn clicking_a_control_sends_its_command() {
        let (ui, state) = setup();
        let (tx, mut rx) = mpsc::channel::<AppCommand>(8);

        handle_mouse(&ui, &state, event(MouseEventKind::Down(MouseButton::Left), 13, 7), &tx);
        assert!(matches!(rx.try_recv(), Ok(AppCommand::Play)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn clicking_with_a_full_queue_reports_busy() {
        let (ui, state) = setup();
        let (tx, mut rx) = mpsc::channel::<AppCommand>(1);
        tx.try_send(AppCommand::Next).expect("fill the queue");

        handle_mouse(&ui, &state, event(MouseEventKind::Down(MouseButton::Left), 13, 7), &tx);
        assert_eq!(lock(&state).status_text(), "Busy, command dropped.");
        assert!(matches!(rx.try_recv(), Ok(AppCommand::Next)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn clicking_a_row_selects_it() {
        let (ui, state) = setup();
        let cmd = dispatch_mouse(&ui, &state, event(MouseEventKind::Down(MouseButton::Left), 10, 14));
        assert!(cmd.is_none());
        assert_eq!(lock(&state).selected_index, 2);

        // Past the last playlist.
        dispatch_mouse(&ui, &state, event(MouseEventKind::Down(MouseButton::Left), 10, 16));
        assert_eq!(lock(&state).selected_index, 2);
    }

    #[test]
    fn clicking_a_filtered_row_then_enter_plays_that_playlist() {
        let (mut ui, _) = setup();
        let mut st = PlaybackState::default();
        st.set_playlists(vec![
            "Jazz Hits".into(),
            "Rock".into(),
            "Jazz Classics".into(),
        ]);
        st.begin_search();
        for c in "jazz".chars() {
            st.push_search_char(c);
        }
        let state = shared(st);
        ui.hitmap.playlist = Some(PlaylistGeometry {
            area: Rect::new(3, 12, 36, 5),
            start: 0,
            len: 2,
        });

        dispatch_mouse(&ui, &state, event(MouseEventKind::Down(MouseButton::Left), 10, 13));
        assert_eq!(lock(&state).selected_index, 1);
        // Row 2 is past the filtered view even though the full list has three entries.
        dispatch_mouse(&ui, &state, event(MouseEventKind::Down(MouseButton::Left), 10, 14));
        assert_eq!(lock(&state).selected_index, 1);

        let outcome = {
            let mut st = lock(&state);
            dispatch_key(&mut ui, &mut st, enter(), Instant::now())
        };
        assert_eq!(
            outcome,
            KeyOutcome::Command(AppCommand::PlayPlaylist {
                name: "Jazz Classics".into()
            })
        );
        assert_eq!(lock(&state).selected_index, 2);
    }

    #[test]
    fn wheel_moves_selection() {
        let (ui, state) = setup();
        dispatch_mouse(&ui, &state, event(MouseEventKind::ScrollDown, 0, 0));
        dispatch_mouse(&ui, &state, event(MouseEventKind::ScrollDown, 0, 0));
        dispatch_mouse(&ui, &state, event(MouseEventKind::ScrollUp, 0, 0));
        assert_eq!(lock(&state).selected_index, 1);
    }

    #[test]
    fn clicks_and_wheel_follow_the_track_view() {
        let (ui, state) = setup();
        {
            let mut st = lock(&state);
            st.open_track_view("a");
            st.apply_tracks(
                "a",
                (1..=4)
                    .map(|index| PlaylistTrack {
                        name: format!("t{index}"),
                        index,
                        ..PlaylistTrack::default()
                    })
                    .collect(),
            );
        }

        dispatch_mouse(&ui, &state, event(MouseEventKind::Down(MouseButton::Left), 10, 14));
        dispatch_mouse(&ui, &state, event(MouseEventKind::ScrollDown, 0, 0));
        let st = lock(&state);
        assert_eq!(st.track_view.as_ref().map(|v| v.selected), Some(3));
        assert_eq!(st.selected_index, 0);
    }

    #[test]
    fn ignored_while_help_is_open() {
        let (mut ui, state) = setup();
        ui.help_visible = true;
        let cmd = dispatch_mouse(&ui, &state, event(MouseEventKind::Down(MouseButton::Left), 13, 7));
        assert!(cmd.is_none());
    }
}
