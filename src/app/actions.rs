use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::deck::Item;
use crate::keys::preset::Action;
use crate::queue::{MenuPosition, QueueEvent};
use crate::tree::{find_leaf_row, RowTarget, TreeRow};
use crate::ui;

use super::menu::ContextMenuState;
use super::state::{AppState, HostRequest, LoadRequest};

pub fn handle_action(state: &mut AppState, action: &Action) -> Option<LoadRequest> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            None
        }
        Action::MoveUp => {
            state.selected = state.selected.saturating_sub(1);
            None
        }
        Action::MoveDown => {
            if state.selected + 1 < state.rows.len() {
                state.selected += 1;
            }
            None
        }
        Action::Top => {
            state.selected = 0;
            None
        }
        Action::Bottom => {
            state.selected = state.rows.len().saturating_sub(1);
            None
        }
        Action::Activate => activate_selected(state),
        Action::Collapse => {
            let row = state.selected_row()?.clone();
            match &row.target {
                RowTarget::Branch {
                    label,
                    collapsed: false,
                    ..
                } => {
                    state.queue.set_expanded(&row.deck, label, false);
                    state.refresh_tree();
                }
                _ => select_parent(state, &row),
            }
            None
        }
        Action::Expand => {
            let row = state.selected_row()?.clone();
            match &row.target {
                RowTarget::Branch {
                    label,
                    collapsed: true,
                    ..
                } => {
                    state.queue.set_expanded(&row.deck, label, true);
                    state.refresh_tree();
                }
                RowTarget::Branch { .. } => {
                    let child = state
                        .rows
                        .get(state.selected + 1)
                        .is_some_and(|next| next.depth > row.depth);
                    if child {
                        state.selected += 1;
                    }
                }
                RowTarget::Leaf { .. } => {}
            }
            None
        }
        Action::ContextMenu => {
            let row = state.selected_row()?.clone();
            let tree = ui::sidebar::tree_area(sidebar_rect(state));
            let at = ui::sidebar::row_anchor(tree, state.selected, row.depth);
            show_menu(state, &row, at);
            None
        }
        Action::JumpToActive => {
            jump_to_active(state);
            None
        }
        Action::Reload => {
            if state.loading {
                return None;
            }
            state.loading = true;
            state.status_message = Some("Reloading queue...".into());
            Some(LoadRequest::Snapshot)
        }
        Action::Help => {
            state.show_help = true;
            None
        }
        Action::Exit => {
            if state.status_message.take().is_none() && state.preview.take().is_some() {
                state.apply_event(QueueEvent::FileOpened(None));
            }
            None
        }
    }
}

/// Left click selects and activates a row, right click opens the menu for a leaf.
pub(super) fn handle_mouse(state: &mut AppState, mouse: &MouseEvent) -> Option<LoadRequest> {
    let button = match mouse.kind {
        MouseEventKind::Down(button) => button,
        _ => return None,
    };
    state.refresh_counter = 0;

    if state.context_menu.take().is_some() || state.show_help || state.error_popup.is_some() {
        state.show_help = false;
        state.error_popup = None;
        return None;
    }

    let tree = ui::sidebar::tree_area(sidebar_rect(state));
    let index = ui::sidebar::row_at(
        tree,
        state.selected,
        state.rows.len(),
        mouse.column,
        mouse.row,
    )?;
    state.selected = index;

    match button {
        MouseButton::Left => activate_selected(state),
        MouseButton::Right => {
            let row = state.rows[index].clone();
            let at = MenuPosition {
                x: mouse.column,
                y: mouse.row,
            };
            show_menu(state, &row, at);
            None
        }
        MouseButton::Middle => None,
    }
}

/// Primary activation of a leaf through the queue; the host request it
/// produces becomes a note load.
pub(super) fn open_leaf(state: &mut AppState, deck: &str, item: &Item) -> Option<LoadRequest> {
    state.queue.activate_leaf(deck, item, &mut state.requests);
    drain_host_requests(state, deck)
}

fn activate_selected(state: &mut AppState) -> Option<LoadRequest> {
    let row = state.selected_row()?.clone();
    match &row.target {
        RowTarget::Leaf { item, .. } => open_leaf(state, &row.deck, item),
        RowTarget::Branch { label, .. } => {
            state.queue.activate_branch(&row.deck, label);
            state.refresh_tree();
            None
        }
    }
}

fn show_menu(state: &mut AppState, row: &TreeRow, at: MenuPosition) {
    if let RowTarget::Leaf { item, .. } = &row.target {
        state
            .queue
            .secondary_activate_leaf(item, at, &mut state.requests);
        drain_host_requests(state, &row.deck);
    }
}

fn drain_host_requests(state: &mut AppState, deck: &str) -> Option<LoadRequest> {
    let mut load = None;
    for request in state.take_requests() {
        match request {
            HostRequest::Open { item, .. } => {
                state.status_message = Some(format!("Opening {}...", item.name));
                load = Some(LoadRequest::Note(item.path));
            }
            HostRequest::ShowMenu { item, at } => {
                state.context_menu = Some(ContextMenuState::new(deck, item, at));
            }
        }
    }
    load
}

fn select_parent(state: &mut AppState, row: &TreeRow) {
    if let Some(parent) = state.rows[..state.selected]
        .iter()
        .rposition(|r| r.depth < row.depth)
    {
        state.selected = parent;
    }
}

/// Re-deliver the open note so its path is forced open again, then select it.
fn jump_to_active(state: &mut AppState) {
    let Some(active) = state.queue.active().map(str::to_string) else {
        state.status_message = Some("No note is open".into());
        return;
    };
    state.apply_event(QueueEvent::FileOpened(Some(active.clone())));
    match find_leaf_row(&state.rows, &active) {
        Some(row) => state.selected = row,
        None => state.status_message = Some("The open note is not in the queue".into()),
    }
}

fn sidebar_rect(state: &AppState) -> ratatui::layout::Rect {
    ui::layout(state.viewport, state.sidebar_width_percent).sidebar
}
