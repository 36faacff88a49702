use crate::bucket::Bucket;
use crate::deck::Item;
use crate::fold::FoldState;

/// Force open every branch on the path to the active item.
///
/// Walks the new items and the rendered buckets of one deck. For each leaf
/// whose path equals `active`, the deck root and then the leaf's parent branch
/// are expanded. Branches leading to other leaves are left as they are.
/// Returns true if any leaf matched.
pub fn resolve_active_path(
    deck_name: &str,
    new_label: &str,
    new_items: &[Item],
    buckets: &[Bucket<'_>],
    active: Option<&str>,
    folds: &mut FoldState,
) -> bool {
    let Some(active) = active else {
        return false;
    };

    let mut matched = false;

    if new_items.iter().any(|item| item.path == active) {
        expand_path(folds, deck_name, new_label);
        matched = true;
    }

    for bucket in buckets {
        if bucket.items.iter().any(|s| s.item.path == active) {
            expand_path(folds, deck_name, &bucket.label);
            matched = true;
        }
    }

    if matched {
        tracing::debug!(deck = deck_name, active, "expanded path to active item");
    }
    matched
}

fn expand_path(folds: &mut FoldState, deck_name: &str, branch_label: &str) {
    folds.force_expand(deck_name);
    folds.force_expand(branch_label);
}
