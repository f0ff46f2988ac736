//! Structural checks shared by the integration tests.

use dialog_lazy_tree::{Node, Tree};

/// Counts gathered by walking every node of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Audit {
    /// Nodes that are not tombstoned.
    pub live: usize,
    /// All nodes, tombstoned or not.
    pub total: usize,
}

/// Walks `tree` node by node and recounts live and total nodes, checking
/// along the way that every key sits strictly between the bounds implied by
/// its ancestors.
///
/// Panics if the ordering is violated.
pub fn audit<E>(tree: &Tree<E>) -> Audit
where
    E: Ord + std::fmt::Debug,
{
    let mut audit = Audit { live: 0, total: 0 };
    let mut pending: Vec<(&Node<E>, Option<&E>, Option<&E>)> =
        tree.root().map(|root| (root, None, None)).into_iter().collect();

    while let Some((node, lower, upper)) = pending.pop() {
        let datum = node.datum();

        if let Some(lower) = lower {
            assert!(lower < datum, "{datum:?} is not greater than {lower:?}");
        }
        if let Some(upper) = upper {
            assert!(datum < upper, "{datum:?} is not less than {upper:?}");
        }

        audit.total += 1;
        if !node.is_deleted() {
            audit.live += 1;
        }

        pending.extend(node.left().map(|left| (left, lower, Some(datum))));
        pending.extend(node.right().map(|right| (right, Some(datum), upper)));
    }

    audit
}

/// Asserts that the incrementally maintained sizes of `tree` agree with a
/// full recount.
pub fn assert_consistent<E>(tree: &Tree<E>)
where
    E: Ord + std::fmt::Debug,
{
    let audit = audit(tree);

    assert_eq!(tree.soft_size(), audit.live, "soft size drifted");
    assert_eq!(tree.hard_size(), audit.total, "hard size drifted");
    assert!(tree.soft_size() <= tree.hard_size());
    assert_eq!(tree.iter_soft().count(), audit.live);
    assert_eq!(tree.iter_hard().count(), audit.total);
}

/// Collects the live keys of `tree` in traversal order.
pub fn soft_keys<E: Clone>(tree: &Tree<E>) -> Vec<E> {
    let mut keys = Vec::new();
    tree.traverse_soft(|key| keys.push(key.clone()));
    keys
}

/// Collects every key of `tree` in traversal order.
pub fn hard_keys<E: Clone>(tree: &Tree<E>) -> Vec<E> {
    let mut keys = Vec::new();
    tree.traverse_hard(|key| keys.push(key.clone()));
    keys
}
