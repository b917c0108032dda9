use super::ui_state::UiState;
use crate::app::{PlaybackState, SharedState, lock};
use crate::messages::{AppCommand, Notice};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// What a key press resolved to once the store has been updated.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum KeyOutcome {
    Quit,
    Command(AppCommand),
    Handled,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

/// Applies a key to UI and store state. Runs under the store lock, so it must not block.
pub(super) fn dispatch_key(
    ui: &mut UiState,
    st: &mut PlaybackState,
    key: KeyEvent,
    now: Instant,
) -> KeyOutcome {
    if is_ctrl_c(&key) {
        return KeyOutcome::Quit;
    }

    if ui.help_visible {
        if matches!(key.code, KeyCode::Char('q')) {
            return KeyOutcome::Quit;
        }
        ui.help_visible = false;
        return KeyOutcome::Handled;
    }

    if st.search_active {
        return dispatch_search_key(st, key, now);
    }
    if let Some(outcome) = dispatch_track_key(ui, st, &key, now) {
        return outcome;
    }

    let command = match key.code {
        KeyCode::Char('q' | 'Q') => return KeyOutcome::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            st.move_selection(1);
            return KeyOutcome::Handled;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            st.move_selection(-1);
            return KeyOutcome::Handled;
        }
        KeyCode::Char('g') | KeyCode::Home => {
            st.select_first();
            return KeyOutcome::Handled;
        }
        KeyCode::Char('G') | KeyCode::End => {
            st.select_last();
            return KeyOutcome::Handled;
        }
        KeyCode::PageDown => {
            st.move_selection(ui.hitmap.page_rows() as isize);
            return KeyOutcome::Handled;
        }
        KeyCode::PageUp => {
            st.move_selection(-(ui.hitmap.page_rows() as isize));
            return KeyOutcome::Handled;
        }
        KeyCode::Enter => match st.selected_playlist() {
            Some((_, name)) => AppCommand::PlayPlaylist { name },
            None => {
                st.set_status(Notice::NoPlaylists.to_string(), now);
                return KeyOutcome::Handled;
            }
        },
        KeyCode::Tab => match st.selected_playlist() {
            Some((_, name)) => {
                st.open_track_view(&name);
                AppCommand::OpenPlaylist { name }
            }
            None => {
                st.set_status(Notice::NoPlaylists.to_string(), now);
                return KeyOutcome::Handled;
            }
        },
        KeyCode::Char(' ') => AppCommand::PlayPause,
        KeyCode::Char('n' | 'N') => AppCommand::Next,
        KeyCode::Char('p' | 'P') => AppCommand::Previous,
        KeyCode::Char('o') => AppCommand::Play,
        KeyCode::Char('a') => AppCommand::Pause,
        KeyCode::Char('s') => AppCommand::Stop,
        KeyCode::Char('x') => AppCommand::ToggleShuffle,
        KeyCode::Char('v') => AppCommand::CycleRepeat,
        KeyCode::Char('+' | '=') => AppCommand::VolumeUp,
        KeyCode::Char('-') => AppCommand::VolumeDown,
        KeyCode::Char('m') => AppCommand::ToggleMute,
        KeyCode::Left | KeyCode::Char('<') => AppCommand::SeekBy {
            seconds: -ui.seek_step,
        },
        KeyCode::Right | KeyCode::Char('>') => AppCommand::SeekBy {
            seconds: ui.seek_step,
        },
        KeyCode::Char('/') => {
            st.begin_search();
            return KeyOutcome::Handled;
        }
        KeyCode::Char('r') => {
            st.set_status("Refreshing...", now);
            AppCommand::Refresh
        }
        KeyCode::Char('u') => AppCommand::DumpUi,
        KeyCode::Char('?') => {
            ui.help_visible = true;
            return KeyOutcome::Handled;
        }
        _ => return KeyOutcome::Handled,
    };
    KeyOutcome::Command(command)
}

/// Keys that mean something else while a playlist's tracks are shown. `None` lets the
/// key fall through to the normal bindings, so transport keys keep working.
fn dispatch_track_key(
    ui: &UiState,
    st: &mut PlaybackState,
    key: &KeyEvent,
    now: Instant,
) -> Option<KeyOutcome> {
    let view = st.track_view.as_mut()?;
    let page = ui.hitmap.page_rows() as isize;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => view.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => view.move_selection(-1),
        KeyCode::Char('g') | KeyCode::Home => view.select_first(),
        KeyCode::Char('G') | KeyCode::End => view.select_last(),
        KeyCode::PageDown => view.move_selection(page),
        KeyCode::PageUp => view.move_selection(-page),
        KeyCode::Enter => {
            let chosen = view.selected_track().map(|t| AppCommand::PlayTrack {
                playlist: view.playlist.clone(),
                index: t.index,
                name: t.name.clone(),
            });
            return Some(match chosen {
                Some(cmd) => KeyOutcome::Command(cmd),
                None => {
                    st.set_status(Notice::NoTracks.to_string(), now);
                    KeyOutcome::Handled
                }
            });
        }
        KeyCode::Tab => {
            return Some(KeyOutcome::Command(AppCommand::PlayPlaylist {
                name: view.playlist.clone(),
            }));
        }
        KeyCode::Esc | KeyCode::Backspace => st.close_track_view(),
        // No searching inside a track list.
        KeyCode::Char('/') => {}
        _ => return None,
    }
    Some(KeyOutcome::Handled)
}

fn dispatch_search_key(st: &mut PlaybackState, key: KeyEvent, now: Instant) -> KeyOutcome {
    match key.code {
        KeyCode::Esc => st.cancel_search(),
        KeyCode::Enter => {
            return match st.commit_search() {
                Some(name) => KeyOutcome::Command(AppCommand::PlayPlaylist { name }),
                None => {
                    st.set_status(Notice::NoPlaylists.to_string(), now);
                    KeyOutcome::Handled
                }
            };
        }
        KeyCode::Backspace => st.pop_search_char(),
        KeyCode::Up => st.move_selection(-1),
        KeyCode::Down => st.move_selection(1),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            st.push_search_char(c)
        }
        _ => {}
    }
    KeyOutcome::Handled
}

/// Queues a command without waiting. A full queue drops the command and says so
/// on the status line instead of stalling the frame loop.
pub(super) fn submit(state: &SharedState, tx: &mpsc::Sender<AppCommand>, cmd: AppCommand) {
    match tx.try_send(cmd) {
        Ok(()) => {}
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(?cmd, "command queue full");
            lock(state).set_status(Notice::Busy.to_string(), Instant::now());
        }
        Err(TrySendError::Closed(cmd)) => tracing::debug!(?cmd, "command worker gone"),
    }
}

/// Returns `true` when the UI should exit.
pub(super) fn handle_key(
    ui: &mut UiState,
    state: &SharedState,
    key: KeyEvent,
    tx: &mpsc::Sender<AppCommand>,
) -> bool {
    // Some terminals report both press and release; act on press/repeat only.
    if matches!(key.kind, KeyEventKind::Release) {
        return false;
    }

    let outcome = {
        let mut st = lock(state);
        dispatch_key(ui, &mut st, key, Instant::now())
    };
    match outcome {
        KeyOutcome::Quit => true,
        KeyOutcome::Command(cmd) => {
            tracing::debug!(?cmd, "key command");
            submit(state, tx, cmd);
            false
        }
        KeyOutcome::Handled => false,
    }
}
