pub mod active;
pub mod bucket;
pub mod deck;
pub mod error;
pub mod fold;
pub mod queue;
pub mod tree;

// Convenience re-exports
pub use bucket::{Bucket, BucketLabels};
pub use deck::{Deck, Item, QueueSnapshot, ScheduledItem};
pub use error::{QueueError, Result};
pub use fold::FoldState;
pub use queue::{MenuPosition, QueueEvent, QueueHost, QueueSettings, ReviewQueue};
pub use tree::{Branch, BranchKind, Leaf, QueueTree, RowTarget, TreeNode, TreeRow};
