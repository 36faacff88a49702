use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fold::FoldState;

/// A single note under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub path: String,
    pub name: String,
}

impl Item {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
        }
    }

    /// Item named after the file stem of its path.
    pub fn from_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: basename(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledItem {
    pub item: Item,
    /// Due moment in epoch milliseconds.
    pub due: i64,
}

impl ScheduledItem {
    pub fn new(item: Item, due: i64) -> Self {
        Self { item, due }
    }
}

/// A study collection and the expand state of its branches.
///
/// `scheduled` must be sorted by `due`, ascending. The scheduler that fills
/// the deck guarantees this; nothing here re-sorts it.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    pub name: String,
    pub new_items: Vec<Item>,
    pub scheduled: Vec<ScheduledItem>,
    pub folds: FoldState,
}

impl Deck {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_items(name: &str, new_items: Vec<Item>, scheduled: Vec<ScheduledItem>) -> Self {
        Self {
            name: name.to_string(),
            new_items,
            scheduled,
            folds: FoldState::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.new_items.is_empty() && self.scheduled.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.new_items.len() + self.scheduled.len()
    }
}

// --- Snapshot exported by the scheduler ---

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct QueueSnapshot {
    #[serde(default)]
    pub decks: Vec<DeckEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeckEntry {
    pub name: String,
    #[serde(default)]
    pub new: Vec<ItemEntry>,
    #[serde(default)]
    pub scheduled: Vec<ScheduledEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ItemEntry {
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduledEntry {
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
    pub due: i64,
}

impl QueueSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl ItemEntry {
    pub fn to_item(&self) -> Item {
        entry_item(&self.path, self.name.as_deref())
    }
}

impl ScheduledEntry {
    pub fn to_scheduled(&self) -> ScheduledItem {
        ScheduledItem::new(entry_item(&self.path, self.name.as_deref()), self.due)
    }
}

fn entry_item(path: &str, name: Option<&str>) -> Item {
    match name {
        Some(name) if !name.is_empty() => Item::new(path, name),
        _ => Item::from_path(path),
    }
}

/// File stem of a note path, or the whole path when it has none.
pub fn basename(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(path)
        .to_string()
}
