use std::collections::BTreeSet;

/// Expanded branch labels of one deck.
///
/// Labels are only unique within a deck, so every deck owns its own set. The
/// deck name itself is a valid label for the deck's root branch. Absent labels
/// read as collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldState {
    expanded: BTreeSet<String>,
}

impl FoldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, label: &str) -> bool {
        self.expanded.contains(label)
    }

    pub fn set_expanded(&mut self, label: &str, expanded: bool) {
        if expanded {
            if !self.expanded.contains(label) {
                self.expanded.insert(label.to_string());
            }
        } else {
            self.expanded.remove(label);
        }
    }

    pub fn force_expand(&mut self, label: &str) {
        self.set_expanded(label, true);
    }

    /// Flip a branch and return its new expanded state.
    pub fn toggle(&mut self, label: &str) -> bool {
        let expanded = !self.is_expanded(label);
        self.set_expanded(label, expanded);
        expanded
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
