mod actions;
mod menu;
mod state;
mod tasks;
pub use menu::{ContextMenuState, MenuEntry};
pub use state::*;

use actions::{handle_action, handle_mouse};
use menu::handle_menu_key;
use tasks::{spawn_load_note, spawn_load_snapshot};

#[cfg(test)]
pub(crate) mod test_helpers;

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::deck::QueueSnapshot;
use crate::error::{ErrorInfo, ErrorPopup, Result};
use crate::keys::KeybindingMap;
use crate::queue::QueueEvent;

const TICK: Duration = Duration::from_millis(250);

/// Idle ticks between background snapshot reloads (30s).
const RELOAD_TICKS: u32 = 120;

fn dispatch_load_request(
    request: LoadRequest,
    config: &AppConfig,
    tx: &mpsc::UnboundedSender<AppMessage>,
) {
    match request {
        LoadRequest::Note(note) => {
            let file = config.note_path(&note);
            spawn_load_note(note, file, tx);
        }
        LoadRequest::Snapshot => spawn_load_snapshot(config.queue.snapshot.clone(), tx),
    }
}

/// Route a key press: popups swallow keys first, then the keybinding map.
pub fn handle_key(
    state: &mut AppState,
    key: &KeyEvent,
    keybindings: &KeybindingMap,
) -> Option<LoadRequest> {
    state.refresh_counter = 0;
    if state.error_popup.is_some() {
        state.error_popup = None;
        None
    } else if state.show_help {
        state.show_help = false;
        None
    } else if state.context_menu.is_some() {
        handle_menu_key(state, key)
    } else {
        let action = keybindings.resolve(key)?;
        handle_action(state, action)
    }
}

/// A fresh snapshot replaces the item lists; a rename upstream is what
/// produces one, so the queue sees it as a rename trigger.
pub fn handle_snapshot_loaded(state: &mut AppState, snapshot: QueueSnapshot) {
    state.queue.load_snapshot(&snapshot);
    state.apply_event(QueueEvent::FileRenamed);
    if state.loading {
        state.status_message = None;
    }
    state.loading = false;
    tracing::info!(
        decks = snapshot.decks.len(),
        rows = state.rows.len(),
        "review queue loaded"
    );
}

pub fn handle_note_loaded(state: &mut AppState, path: String, content: String) {
    state.preview = Some(NotePreview {
        path: path.clone(),
        content,
    });
    state.status_message = None;
    state.apply_event(QueueEvent::FileOpened(Some(path)));
}

pub fn handle_error(state: &mut AppState, error: ErrorInfo) {
    state.loading = false;
    state.status_message = None;
    state.error_popup = Some(ErrorPopup::from_error_info(&error));
}

/// Count an idle tick; true when the snapshot is due for a background reload.
pub fn on_tick(state: &mut AppState) -> bool {
    state.refresh_counter += 1;
    if state.refresh_counter >= RELOAD_TICKS && !state.loading {
        state.refresh_counter = 0;
        state.loading = true;
        return true;
    }
    false
}

pub async fn run(config: &AppConfig, terminal: &mut DefaultTerminal) -> Result<()> {
    let keybindings =
        KeybindingMap::from_preset(&config.keybindings.preset, &config.keybindings.bindings)?;

    let snapshot_name = config
        .queue
        .snapshot
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.queue.snapshot.display().to_string());
    let mut state = AppState::new(
        config.queue_settings(),
        &snapshot_name,
        keybindings.hints(),
        keybindings.help_lines(),
    );
    state.sidebar_width_percent = config.ui.sidebar_width_percent;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();

    spawn_load_snapshot(config.queue.snapshot.clone(), &tx);

    // Spawn event reader task
    let event_tx = tx.clone();
    let mouse = config.ui.mouse;
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            let msg = match reader.next().await {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    AppMessage::Key(key)
                }
                Some(Ok(Event::Mouse(m))) if mouse => AppMessage::Mouse(m),
                Some(Err(_)) | None => break,
                _ => continue,
            };
            if event_tx.send(msg).is_err() {
                break;
            }
        }
    });

    // Spawn tick timer
    let tick_tx = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        loop {
            interval.tick().await;
            if tick_tx.send(AppMessage::Tick).is_err() {
                break;
            }
        }
    });

    tracing::info!(snapshot = %config.queue.snapshot.display(), "review queue started");

    loop {
        terminal.draw(|frame| {
            state.viewport = frame.area();
            crate::ui::render(frame, &state);
        })?;

        if let Some(msg) = rx.recv().await {
            let request = match msg {
                AppMessage::Key(key) => handle_key(&mut state, &key, &keybindings),
                AppMessage::Mouse(mouse) => handle_mouse(&mut state, &mouse),
                AppMessage::SnapshotLoaded(snapshot) => {
                    handle_snapshot_loaded(&mut state, snapshot);
                    None
                }
                AppMessage::NoteLoaded { path, content } => {
                    handle_note_loaded(&mut state, path, content);
                    None
                }
                AppMessage::Error(err) => {
                    handle_error(&mut state, err);
                    None
                }
                AppMessage::Tick => on_tick(&mut state).then_some(LoadRequest::Snapshot),
            };
            if let Some(req) = request {
                dispatch_load_request(req, config, &tx);
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
