use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use ratatui::layout::Rect;

use crate::bucket::days_ahead;
use crate::deck::Item;
use crate::error::{ErrorInfo, ErrorPopup};
use crate::queue::{MenuPosition, QueueEvent, QueueHost, QueueSettings, ReviewQueue};
use crate::tree::{find_leaf_row, QueueTree, RowTarget, TreeRow};

use super::menu::ContextMenuState;

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    SnapshotLoaded(crate::deck::QueueSnapshot),
    NoteLoaded { path: String, content: String },
    Error(ErrorInfo),
    Tick,
}

/// Work the event loop hands to background tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    Note(String),
    Snapshot,
}

/// Requests the review queue makes of the terminal host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    Open { deck: String, item: Item },
    ShowMenu { item: Item, at: MenuPosition },
}

#[derive(Debug, Default)]
pub struct HostRequests(pub Vec<HostRequest>);

impl QueueHost for HostRequests {
    fn open_item(&mut self, deck: &str, item: &Item) {
        self.0.push(HostRequest::Open {
            deck: deck.to_string(),
            item: item.clone(),
        });
    }

    fn show_item_menu(&mut self, item: &Item, at: MenuPosition) {
        self.0.push(HostRequest::ShowMenu {
            item: item.clone(),
            at,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotePreview {
    pub path: String,
    pub content: String,
}

/// Totals shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueCounts {
    pub due: usize,
    pub new: usize,
}

pub struct AppState {
    pub queue: ReviewQueue,
    pub tree: QueueTree,
    pub rows: Vec<TreeRow>,
    pub selected: usize,
    pub preview: Option<NotePreview>,
    pub snapshot_name: String,
    pub date_display: String,
    pub loading: bool,
    pub status_message: Option<String>,
    pub hints: Vec<(String, &'static str)>,
    pub help_lines: Vec<(String, &'static str)>,
    pub should_quit: bool,
    pub show_help: bool,
    pub context_menu: Option<ContextMenuState>,
    pub error_popup: Option<ErrorPopup>,
    pub refresh_counter: u32,
    pub sidebar_width_percent: u8,
    /// Terminal area of the last frame, for mouse hit-testing.
    pub viewport: Rect,
    pub(super) requests: HostRequests,
}

impl AppState {
    pub fn new(
        settings: QueueSettings,
        snapshot_name: &str,
        hints: Vec<(String, &'static str)>,
        help_lines: Vec<(String, &'static str)>,
    ) -> Self {
        let now = Local::now();
        Self {
            queue: ReviewQueue::new(settings),
            tree: QueueTree::default(),
            rows: Vec::new(),
            selected: 0,
            preview: None,
            snapshot_name: snapshot_name.to_string(),
            date_display: now.format("%b %d, %Y").to_string(),
            loading: true,
            status_message: Some("Loading review queue...".into()),
            hints,
            help_lines,
            should_quit: false,
            show_help: false,
            context_menu: None,
            error_popup: None,
            refresh_counter: 0,
            sidebar_width_percent: 40,
            viewport: Rect::default(),
            requests: HostRequests::default(),
        }
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.selected)
    }

    /// Deliver a trigger to the queue and rebuild at the current local time.
    pub fn apply_event(&mut self, event: QueueEvent) {
        self.apply_event_at(event, &Local::now());
    }

    pub fn apply_event_at<Tz>(&mut self, event: QueueEvent, now: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let follow_active = matches!(event, QueueEvent::FileOpened(Some(_)));
        let tree = self.queue.handle_event(event, now);
        self.replace_tree(tree, follow_active);
    }

    /// Redraw from the current fold state, without forcing the active path.
    pub fn refresh_tree(&mut self) {
        self.refresh_tree_at(&Local::now());
    }

    pub fn refresh_tree_at<Tz>(&mut self, now: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let tree = self.queue.render(now);
        self.replace_tree(tree, false);
    }

    fn replace_tree(&mut self, tree: QueueTree, follow_active: bool) {
        let previous = self.selected_row().map(row_key);
        self.tree = tree;
        self.rows = self.tree.visible_rows();

        let active_row = self
            .queue
            .active()
            .and_then(|path| find_leaf_row(&self.rows, path));
        let kept_row = previous.and_then(|key| self.rows.iter().position(|r| row_key(r) == key));

        self.selected = match (follow_active, active_row, kept_row) {
            (true, Some(row), _) => row,
            (_, _, Some(row)) => row,
            _ => self.selected.min(self.rows.len().saturating_sub(1)),
        };
    }

    /// Scheduled items due today or earlier, and new items, across all decks.
    pub fn queue_counts(&self, now_ms: i64) -> QueueCounts {
        self.queue
            .decks()
            .fold(QueueCounts::default(), |mut counts, deck| {
                counts.new += deck.new_items.len();
                counts.due += deck
                    .scheduled
                    .iter()
                    .filter(|s| days_ahead(s.due, now_ms) <= 0)
                    .count();
                counts
            })
    }

    pub(super) fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests.0)
    }
}

/// Identity of a row across rebuilds.
fn row_key(row: &TreeRow) -> (String, bool, String) {
    match &row.target {
        RowTarget::Branch { label, .. } => (row.deck.clone(), true, label.clone()),
        RowTarget::Leaf { item, .. } => (row.deck.clone(), false, item.path.clone()),
    }
}
