use serde::Serialize;

use crate::bucket::Bucket;
use crate::deck::{Deck, Item};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    Branch(Branch),
    Leaf(Leaf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BranchKind {
    Deck,
    New,
    Due { due: i64, days_ahead: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub label: String,
    pub kind: BranchKind,
    pub collapsed: bool,
    pub hidden: bool,
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub item: Item,
    pub active: bool,
    pub hidden: bool,
}

/// One root branch per deck, in deck order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueTree {
    pub decks: Vec<Branch>,
}

/// Build the branch for one deck from its buckets and fold state.
///
/// Fold state is read, never written: any forced expansion for the active
/// item must already be applied.
pub fn assemble_deck(
    deck: &Deck,
    new_label: &str,
    buckets: &[Bucket<'_>],
    active: Option<&str>,
) -> Branch {
    let root_collapsed = !deck.folds.is_expanded(&deck.name);
    let child_hidden = root_collapsed;
    let mut children = Vec::new();

    if !deck.new_items.is_empty() {
        let collapsed = !deck.folds.is_expanded(new_label);
        let leaves = deck
            .new_items
            .iter()
            .map(|item| leaf(item, active, child_hidden || collapsed))
            .collect();
        children.push(TreeNode::Branch(Branch {
            label: new_label.to_string(),
            kind: BranchKind::New,
            collapsed,
            hidden: child_hidden,
            children: leaves,
        }));
    }

    for bucket in buckets {
        let collapsed = !deck.folds.is_expanded(&bucket.label);
        let leaves = bucket
            .items
            .iter()
            .map(|s| leaf(&s.item, active, child_hidden || collapsed))
            .collect();
        children.push(TreeNode::Branch(Branch {
            label: bucket.label.clone(),
            kind: BranchKind::Due {
                due: bucket.due,
                days_ahead: bucket.days_ahead,
            },
            collapsed,
            hidden: child_hidden,
            children: leaves,
        }));
    }

    Branch {
        label: deck.name.clone(),
        kind: BranchKind::Deck,
        collapsed: root_collapsed,
        hidden: false,
        children,
    }
}

fn leaf(item: &Item, active: Option<&str>, hidden: bool) -> TreeNode {
    TreeNode::Leaf(Leaf {
        item: item.clone(),
        active: active == Some(item.path.as_str()),
        hidden,
    })
}

// --- Flattening for cursor-driven renderers ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTarget {
    Branch {
        label: String,
        kind: BranchKind,
        collapsed: bool,
    },
    Leaf {
        item: Item,
        active: bool,
    },
}

/// A visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub deck: String,
    pub depth: usize,
    pub target: RowTarget,
}

impl TreeRow {
    pub fn text(&self) -> &str {
        match &self.target {
            RowTarget::Branch { label, .. } => label,
            RowTarget::Leaf { item, .. } => &item.name,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.target, RowTarget::Branch { .. })
    }
}

impl QueueTree {
    /// Pre-order list of nodes whose `hidden` flag is false.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for root in &self.decks {
            push_branch(&root.label, root, 0, &mut rows);
        }
        rows
    }

    pub fn node_count(&self) -> usize {
        self.decks.iter().map(count_branch).sum()
    }

    pub fn find_branch(&self, deck: &str, label: &str) -> Option<&Branch> {
        let root = self.decks.iter().find(|b| b.label == deck)?;
        if root.label == label {
            return Some(root);
        }
        root.children.iter().find_map(|child| match child {
            TreeNode::Branch(b) if b.label == label => Some(b),
            _ => None,
        })
    }

    /// Every leaf for `path`, with its deck name.
    pub fn find_leaves(&self, path: &str) -> Vec<(&str, &Leaf)> {
        let mut found = Vec::new();
        for root in &self.decks {
            collect_leaves(&root.label, root, path, &mut found);
        }
        found
    }
}

/// Row index of the leaf for `path`, if it is visible.
pub fn find_leaf_row(rows: &[TreeRow], path: &str) -> Option<usize> {
    rows.iter().position(|row| match &row.target {
        RowTarget::Leaf { item, .. } => item.path == path,
        RowTarget::Branch { .. } => false,
    })
}

fn push_branch(deck: &str, branch: &Branch, depth: usize, rows: &mut Vec<TreeRow>) {
    if branch.hidden {
        return;
    }
    rows.push(TreeRow {
        deck: deck.to_string(),
        depth,
        target: RowTarget::Branch {
            label: branch.label.clone(),
            kind: branch.kind.clone(),
            collapsed: branch.collapsed,
        },
    });
    for child in &branch.children {
        match child {
            TreeNode::Branch(b) => push_branch(deck, b, depth + 1, rows),
            TreeNode::Leaf(l) if !l.hidden => rows.push(TreeRow {
                deck: deck.to_string(),
                depth: depth + 1,
                target: RowTarget::Leaf {
                    item: l.item.clone(),
                    active: l.active,
                },
            }),
            TreeNode::Leaf(_) => {}
        }
    }
}

fn count_branch(branch: &Branch) -> usize {
    1 + branch
        .children
        .iter()
        .map(|child| match child {
            TreeNode::Branch(b) => count_branch(b),
            TreeNode::Leaf(_) => 1,
        })
        .sum::<usize>()
}

fn collect_leaves<'a>(
    deck: &'a str,
    branch: &'a Branch,
    path: &str,
    out: &mut Vec<(&'a str, &'a Leaf)>,
) {
    for child in &branch.children {
        match child {
            TreeNode::Branch(b) => collect_leaves(deck, b, path, out),
            TreeNode::Leaf(l) if l.item.path == path => out.push((deck, l)),
            TreeNode::Leaf(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::ScheduledItem;

    fn deck_with(new: &[&str], scheduled: &[(&str, i64)]) -> Deck {
        Deck::with_items(
            "D",
            new.iter().map(|p| Item::from_path(p)).collect(),
            scheduled
                .iter()
                .map(|(p, due)| ScheduledItem::new(Item::from_path(p), *due))
                .collect(),
        )
    }

    fn one_bucket<'a>(label: &str, items: &'a [ScheduledItem]) -> Bucket<'a> {
        Bucket {
            label: label.into(),
            due: items[0].due,
            days_ahead: 0,
            items,
        }
    }

    fn branch(node: &TreeNode) -> &Branch {
        match node {
            TreeNode::Branch(b) => b,
            TreeNode::Leaf(_) => panic!("expected branch"),
        }
    }

    fn leaf_of(node: &TreeNode) -> &Leaf {
        match node {
            TreeNode::Leaf(l) => l,
            TreeNode::Branch(_) => panic!("expected leaf"),
        }
    }

    #[test]
    fn empty_deck_has_bare_root() {
        let deck = Deck::new("Empty");
        let root = assemble_deck(&deck, "New", &[], None);
        assert_eq!(root.label, "Empty");
        assert!(root.children.is_empty());
        assert!(root.collapsed);
        assert!(!root.hidden);
    }

    #[test]
    fn new_branch_comes_first() {
        let deck = deck_with(&["a.md", "b.md"], &[("c.md", 5)]);
        let buckets = vec![one_bucket("Today", &deck.scheduled)];
        let root = assemble_deck(&deck, "New", &buckets, None);

        assert_eq!(root.children.len(), 2);
        let new = branch(&root.children[0]);
        assert_eq!(new.label, "New");
        assert_eq!(new.kind, BranchKind::New);
        assert_eq!(new.children.len(), 2);
        assert_eq!(leaf_of(&new.children[1]).item.path, "b.md");

        let today = branch(&root.children[1]);
        assert_eq!(today.label, "Today");
        assert_eq!(
            today.kind,
            BranchKind::Due {
                due: 5,
                days_ahead: 0
            }
        );
    }

    #[test]
    fn no_new_branch_without_new_items() {
        let deck = deck_with(&[], &[("c.md", 5)]);
        let buckets = vec![one_bucket("Today", &deck.scheduled)];
        let root = assemble_deck(&deck, "New", &buckets, None);
        assert_eq!(root.children.len(), 1);
        assert_eq!(branch(&root.children[0]).label, "Today");
    }

    #[test]
    fn collapsed_root_hides_everything_below() {
        let mut deck = deck_with(&["a.md"], &[]);
        deck.folds.force_expand("New");
        let root = assemble_deck(&deck, "New", &[], None);

        let new = branch(&root.children[0]);
        assert!(root.collapsed);
        assert!(new.hidden);
        assert!(!new.collapsed);
        assert!(leaf_of(&new.children[0]).hidden);
    }

    #[test]
    fn expanded_path_shows_leaves() {
        let mut deck = deck_with(&["a.md"], &[]);
        deck.folds.force_expand("D");
        deck.folds.force_expand("New");
        let root = assemble_deck(&deck, "New", &[], Some("a.md"));

        let new = branch(&root.children[0]);
        assert!(!new.hidden);
        let a = leaf_of(&new.children[0]);
        assert!(!a.hidden);
        assert!(a.active);
    }

    #[test]
    fn collapsed_bucket_hides_its_leaves_only() {
        let mut deck = deck_with(&["a.md"], &[("c.md", 5)]);
        deck.folds.force_expand("D");
        deck.folds.force_expand("New");
        let buckets = vec![one_bucket("Today", &deck.scheduled)];
        let root = assemble_deck(&deck, "New", &buckets, None);

        let today = branch(&root.children[1]);
        assert!(!today.hidden);
        assert!(today.collapsed);
        assert!(leaf_of(&today.children[0]).hidden);
        assert!(!leaf_of(&branch(&root.children[0]).children[0]).hidden);
    }

    #[test]
    fn visible_rows_skip_hidden_nodes() {
        let mut deck = deck_with(&["a.md", "b.md"], &[("c.md", 5)]);
        deck.folds.force_expand("D");
        deck.folds.force_expand("New");
        let buckets = vec![one_bucket("Today", &deck.scheduled)];
        let tree = QueueTree {
            decks: vec![assemble_deck(&deck, "New", &buckets, Some("b.md"))],
        };

        let rows = tree.visible_rows();
        let texts: Vec<&str> = rows.iter().map(|r| r.text()).collect();
        assert_eq!(texts, vec!["D", "New", "a", "b", "Today"]);
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 2, 1]);
        assert!(rows.iter().all(|r| r.deck == "D"));
        assert_eq!(find_leaf_row(&rows, "b.md"), Some(3));
        assert_eq!(find_leaf_row(&rows, "c.md"), None);
    }

    #[test]
    fn node_count_includes_hidden_nodes() {
        let deck = deck_with(&["a.md"], &[("c.md", 5), ("d.md", 5)]);
        let buckets = vec![one_bucket("Today", &deck.scheduled)];
        let tree = QueueTree {
            decks: vec![assemble_deck(&deck, "New", &buckets, None)],
        };
        // root + New + a + Today + c + d
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.visible_rows().len(), 1);
    }

    #[test]
    fn find_branch_and_leaves() {
        let deck = deck_with(&["a.md"], &[("c.md", 5)]);
        let buckets = vec![one_bucket("Today", &deck.scheduled)];
        let tree = QueueTree {
            decks: vec![assemble_deck(&deck, "New", &buckets, Some("c.md"))],
        };
        assert_eq!(tree.find_branch("D", "D").unwrap().kind, BranchKind::Deck);
        assert_eq!(tree.find_branch("D", "Today").unwrap().children.len(), 1);
        assert!(tree.find_branch("D", "Tomorrow").is_none());
        assert!(tree.find_branch("Other", "D").is_none());

        let leaves = tree.find_leaves("c.md");
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].0, "D");
        assert!(leaves[0].1.active);
    }
}
