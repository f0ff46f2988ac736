#![deny(missing_docs)]

//! An in-memory ordered index with lazy deletion.
//!
//! This crate provides [`Tree`], a binary search tree over any [`Ord`] key
//! type in which removal is split into two phases:
//!
//! 1. **Soft removal**: [`Tree::remove_soft`] marks the node holding a key as
//!    a tombstone. The node keeps its position, so no restructuring happens
//!    and re-inserting the same key simply revives it.
//!
//! 2. **Garbage collection**: [`Tree::collect_garbage`] walks the tree and
//!    physically unlinks every tombstoned node, leaving an ordinary binary
//!    search tree behind.
//!
//! Because tombstones linger between the two phases the tree keeps two
//! sizes. The *soft* size counts live keys and the *hard* size counts every
//! node. Queries come in matching pairs: the soft variants
//! ([`Tree::find_soft`], [`Tree::find_min_soft`], [`Tree::traverse_soft`],
//! ...) only see live keys while the hard variants see every node.
//!
//! Basic usage:
//!
//! ```
//! use dialog_lazy_tree::Tree;
//!
//! let mut tree: Tree<u32> = [5, 3, 8, 1, 4].into_iter().collect();
//!
//! // Soft removal leaves a tombstone behind
//! assert!(tree.remove_soft(&3));
//! assert_eq!(tree.soft_size(), 4);
//! assert_eq!(tree.hard_size(), 5);
//! assert!(!tree.contains_soft(&3));
//! assert!(tree.contains_hard(&3));
//!
//! // Live keys are visited in ascending order
//! let mut keys = Vec::new();
//! tree.traverse_soft(|key| keys.push(*key));
//! assert_eq!(keys, vec![1, 4, 5, 8]);
//!
//! // Garbage collection reclaims the tombstone
//! assert!(tree.collect_garbage());
//! assert_eq!(tree.hard_size(), 4);
//! assert!(!tree.collect_garbage());
//! ```
//!
//! Lookups that must produce a key report absence with
//! [`DialogLazyTreeError::NotFound`]:
//!
//! ```
//! use dialog_lazy_tree::{DialogLazyTreeError, Tree};
//!
//! let mut tree = Tree::new();
//! tree.insert("apple");
//! tree.remove_soft(&"apple");
//!
//! assert!(matches!(
//!     tree.find_soft(&"apple"),
//!     Err(DialogLazyTreeError::NotFound(_))
//! ));
//! assert_eq!(tree.find_hard(&"apple"), Ok(&"apple"));
//!
//! // Inserting a tombstoned key revives it without a new node
//! assert!(tree.insert("apple"));
//! assert_eq!(tree.hard_size(), 1);
//! ```
//!
//! The tree is not rebalanced and performs no internal locking. Callers that
//! share a tree between threads must serialize access to it themselves.

mod link;
pub use link::Link;

mod node;
pub use node::*;

mod iter;
pub use iter::*;

mod tree;
pub use tree::*;

mod error;
pub use error::*;
