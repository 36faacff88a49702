use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::deck::Item;
use crate::queue::MenuPosition;

use super::actions::open_leaf;
use super::state::{AppState, LoadRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Open,
    ShowPath,
    Close,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 3] = [MenuEntry::Open, MenuEntry::ShowPath, MenuEntry::Close];

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Open => "Open",
            MenuEntry::ShowPath => "Show path",
            MenuEntry::Close => "Close",
        }
    }
}

/// Per-note menu opened by secondary activation of a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuState {
    pub deck: String,
    pub item: Item,
    pub at: MenuPosition,
    pub selected: usize,
}

impl ContextMenuState {
    pub fn new(deck: &str, item: Item, at: MenuPosition) -> Self {
        Self {
            deck: deck.to_string(),
            item,
            at,
            selected: 0,
        }
    }

    pub fn entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.selected.min(MenuEntry::ALL.len() - 1)]
    }
}

pub(super) fn handle_menu_key(state: &mut AppState, key: &KeyEvent) -> Option<LoadRequest> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
            state.context_menu = None;
            None
        }
        (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            if let Some(menu) = &mut state.context_menu {
                menu.selected = menu.selected.saturating_sub(1);
            }
            None
        }
        (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            if let Some(menu) = &mut state.context_menu {
                if menu.selected + 1 < MenuEntry::ALL.len() {
                    menu.selected += 1;
                }
            }
            None
        }
        (KeyModifiers::NONE, KeyCode::Enter) => {
            let menu = state.context_menu.take()?;
            select_entry(state, menu)
        }
        _ => None,
    }
}

fn select_entry(state: &mut AppState, menu: ContextMenuState) -> Option<LoadRequest> {
    match menu.entry() {
        MenuEntry::Open => open_leaf(state, &menu.deck, &menu.item),
        MenuEntry::ShowPath => {
            state.status_message = Some(menu.item.path);
            None
        }
        MenuEntry::Close => None,
    }
}
