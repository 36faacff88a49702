use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::deck::{DeckEntry, ItemEntry, QueueSnapshot, ScheduledEntry};
use crate::queue::{QueueEvent, QueueSettings};

use super::{handle_note_loaded, AppState};

const HOUR_MS: i64 = 3600 * 1000;

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn new_entry(path: &str) -> ItemEntry {
    ItemEntry {
        path: path.into(),
        name: None,
    }
}

fn scheduled_entry(path: &str, due: i64) -> ScheduledEntry {
    ScheduledEntry {
        path: path.into(),
        name: None,
        due,
    }
}

/// Two decks with due times half a day off the hour boundaries, so the
/// relative labels hold for the wall clock the app state reads.
pub fn make_snapshot(now_ms: i64) -> QueueSnapshot {
    QueueSnapshot {
        decks: vec![
            DeckEntry {
                name: "Physics".into(),
                new: vec![],
                scheduled: vec![scheduled_entry("notes/kepler.md", now_ms + 12 * HOUR_MS)],
            },
            DeckEntry {
                name: "Default".into(),
                new: vec![new_entry("notes/fresh.md")],
                scheduled: vec![
                    scheduled_entry("notes/ohm.md", now_ms - 36 * HOUR_MS),
                    scheduled_entry("notes/volt.md", now_ms - 12 * HOUR_MS),
                    scheduled_entry("notes/amp.md", now_ms + 12 * HOUR_MS),
                ],
            },
        ],
    }
}

/// Loaded state with every branch collapsed: rows are just the two decks.
pub fn test_state() -> AppState {
    let mut state = AppState::new(QueueSettings::default(), "queue.json", vec![], vec![]);
    state.queue.load_snapshot(&make_snapshot(Utc::now().timestamp_millis()));
    state.apply_event(QueueEvent::FileRenamed);
    state.loading = false;
    state.status_message = None;
    state
}

/// Simulate the host finishing a note load.
pub fn open_note(state: &mut AppState, path: &str) {
    handle_note_loaded(state, path.to_string(), format!("contents of {}", path));
}
