//! Rebuild driver for the review queue tree.
//!
//! Every trigger runs one full, synchronous rebuild: bucket each deck's
//! scheduled items, force open the path to the active item, then assemble the
//! tree from the fold state. The fold state is the only thing that survives
//! between rebuilds.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::active::resolve_active_path;
use crate::bucket::{build_buckets, BucketLabels};
use crate::deck::{Deck, Item, QueueSnapshot};
use crate::tree::{assemble_deck, QueueTree};

pub const DEFAULT_MAX_DAYS_AHEAD: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSettings {
    pub max_days_ahead: i64,
    pub labels: BucketLabels,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            max_days_ahead: DEFAULT_MAX_DAYS_AHEAD,
            labels: BucketLabels::default(),
        }
    }
}

/// Signals from the host that cause a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    FileOpened(Option<String>),
    FileRenamed,
}

/// Screen anchor for a context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuPosition {
    pub x: u16,
    pub y: u16,
}

/// Capabilities the host application lends to the queue.
pub trait QueueHost {
    fn open_item(&mut self, deck: &str, item: &Item);
    fn show_item_menu(&mut self, item: &Item, at: MenuPosition);
}

#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    decks: BTreeMap<String, Deck>,
    active: Option<String>,
    settings: QueueSettings,
    last_selected_deck: Option<String>,
}

impl ReviewQueue {
    pub fn new(settings: QueueSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn from_snapshot(settings: QueueSettings, snapshot: &QueueSnapshot) -> Self {
        let mut queue = Self::new(settings);
        queue.load_snapshot(snapshot);
        queue
    }

    /// Replace every deck's items with the snapshot's.
    ///
    /// Decks that survive keep their fold state; new decks start fully
    /// collapsed and decks missing from the snapshot are dropped. A deck name
    /// listed twice has its items merged, scheduled items kept in due order.
    pub fn load_snapshot(&mut self, snapshot: &QueueSnapshot) {
        let mut previous = std::mem::take(&mut self.decks);

        for entry in &snapshot.decks {
            let new_items = entry.new.iter().map(|e| e.to_item());
            let scheduled = entry.scheduled.iter().map(|e| e.to_scheduled());

            if let Some(deck) = self.decks.get_mut(&entry.name) {
                tracing::warn!(
                    deck = %entry.name,
                    "duplicate deck in snapshot, merging items"
                );
                deck.new_items.extend(new_items);
                deck.scheduled.extend(scheduled);
                deck.scheduled.sort_by_key(|s| s.due);
                continue;
            }

            let mut deck =
                Deck::with_items(&entry.name, new_items.collect(), scheduled.collect());
            if let Some(old) = previous.remove(&entry.name) {
                deck.folds = old.folds;
            }
            self.decks.insert(entry.name.clone(), deck);
        }

        tracing::debug!(
            decks = self.decks.len(),
            dropped = previous.len(),
            "loaded review queue snapshot"
        );
    }

    /// Add or replace a deck, keeping the deck's own fold state.
    pub fn insert_deck(&mut self, deck: Deck) {
        self.decks.insert(deck.name.clone(), deck);
    }

    pub fn decks(&self) -> impl Iterator<Item = &Deck> {
        self.decks.values()
    }

    pub fn deck(&self, name: &str) -> Option<&Deck> {
        self.decks.get(name)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set_active(&mut self, active: Option<String>) {
        self.active = active;
    }

    pub fn settings(&self) -> &QueueSettings {
        &self.settings
    }

    pub fn last_selected_deck(&self) -> Option<&str> {
        self.last_selected_deck.as_deref()
    }

    pub fn handle_event<Tz>(&mut self, event: QueueEvent, now: &DateTime<Tz>) -> QueueTree
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match event {
            QueueEvent::FileOpened(path) => self.active = path,
            QueueEvent::FileRenamed => {}
        }
        self.rebuild(now)
    }

    /// Recompute the whole tree, first forcing open the path to the active
    /// item.
    ///
    /// Repeating a rebuild with the same inputs yields the same tree and the
    /// same fold state.
    pub fn rebuild<Tz>(&mut self, now: &DateTime<Tz>) -> QueueTree
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.expand_active_path(now);
        let tree = self.render(now);
        tracing::debug!(
            decks = tree.decks.len(),
            nodes = tree.node_count(),
            active = ?self.active,
            "rebuilt review queue"
        );
        tree
    }

    /// Assemble the tree from the current fold state without forcing
    /// anything open. Used to redraw after a branch toggle.
    pub fn render<Tz>(&self, now: &DateTime<Tz>) -> QueueTree
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let now_ms = now.timestamp_millis();
        let tz = now.timezone();
        let labels = &self.settings.labels;
        let active = self.active.as_deref();

        let decks = self
            .decks
            .values()
            .map(|deck| {
                let buckets = build_buckets(
                    &deck.scheduled,
                    now_ms,
                    self.settings.max_days_ahead,
                    &tz,
                    labels,
                );
                assemble_deck(deck, &labels.new, &buckets, active)
            })
            .collect();

        QueueTree { decks }
    }

    fn expand_active_path<Tz>(&mut self, now: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let Some(active) = self.active.as_deref() else {
            return;
        };
        let now_ms = now.timestamp_millis();
        let tz = now.timezone();
        let labels = &self.settings.labels;

        for deck in self.decks.values_mut() {
            let buckets = build_buckets(
                &deck.scheduled,
                now_ms,
                self.settings.max_days_ahead,
                &tz,
                labels,
            );
            resolve_active_path(
                &deck.name,
                &labels.new,
                &deck.new_items,
                &buckets,
                Some(active),
                &mut deck.folds,
            );
        }
    }

    pub fn is_expanded(&self, deck: &str, label: &str) -> bool {
        self.decks
            .get(deck)
            .is_some_and(|d| d.folds.is_expanded(label))
    }

    pub fn set_expanded(&mut self, deck: &str, label: &str, expanded: bool) {
        if let Some(d) = self.decks.get_mut(deck) {
            d.folds.set_expanded(label, expanded);
        }
    }

    /// Primary activation of a leaf: remember the deck and ask the host to
    /// open the item.
    pub fn activate_leaf(&mut self, deck: &str, item: &Item, host: &mut impl QueueHost) {
        self.last_selected_deck = Some(deck.to_string());
        host.open_item(deck, item);
    }

    pub fn secondary_activate_leaf(
        &self,
        item: &Item,
        at: MenuPosition,
        host: &mut impl QueueHost,
    ) {
        host.show_item_menu(item, at);
    }

    /// Toggle a branch; returns whether it is now expanded.
    pub fn activate_branch(&mut self, deck: &str, label: &str) -> bool {
        match self.decks.get_mut(deck) {
            Some(d) => d.folds.toggle(label),
            None => false,
        }
    }
}
