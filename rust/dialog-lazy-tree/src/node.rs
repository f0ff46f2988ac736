use std::fmt;

use crate::{Link, link::duplicate};

/// A single entry of a [`Tree`](crate::Tree) together with the subtrees it
/// exclusively owns.
///
/// Nodes are plain data: they carry no reference back to the tree that owns
/// them and all mutation goes through the tree. A tombstoned node (see
/// [`Node::is_deleted`]) still occupies its position so that the ordering of
/// the surrounding nodes is unaffected.
pub struct Node<E> {
    pub(crate) datum: E,
    pub(crate) left: Link<E>,
    pub(crate) right: Link<E>,
    pub(crate) deleted: bool,
}

impl<E> Node<E> {
    /// Creates a live leaf holding `datum`.
    pub(crate) fn new(datum: E) -> Self {
        Self {
            datum,
            left: None,
            right: None,
            deleted: false,
        }
    }

    /// Returns the key held by this node.
    pub fn datum(&self) -> &E {
        &self.datum
    }

    /// Returns the subtree of keys smaller than this node's key.
    pub fn left(&self) -> Option<&Node<E>> {
        self.left.as_deref()
    }

    /// Returns the subtree of keys greater than this node's key.
    pub fn right(&self) -> Option<&Node<E>> {
        self.right.as_deref()
    }

    /// Returns true if this node has been lazily removed and is waiting for
    /// garbage collection.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<E: Clone> Clone for Node<E> {
    fn clone(&self) -> Self {
        Self {
            datum: self.datum.clone(),
            left: duplicate(&self.left),
            right: duplicate(&self.right),
            deleted: self.deleted,
        }
    }
}

// Shallow: children are reported by presence only, so formatting a deep
// subtree costs the same as formatting a leaf.
impl<E: fmt::Debug> fmt::Debug for Node<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("datum", &self.datum)
            .field("deleted", &self.deleted)
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::Node;

    #[test]
    fn it_creates_live_leaves() -> Result<()> {
        let node = Node::new(7u32);

        assert_eq!(node.datum(), &7);
        assert!(!node.is_deleted());
        assert!(node.is_leaf());
        assert!(node.left().is_none());
        assert!(node.right().is_none());

        Ok(())
    }

    #[test]
    fn it_clones_subtrees_deeply() -> Result<()> {
        let mut node = Node::new(2u32);
        node.left = Some(Box::new(Node::new(1)));
        node.right = Some(Box::new(Node::new(3)));

        let mut copy = node.clone();
        if let Some(left) = copy.left.as_mut() {
            left.deleted = true;
        }

        assert!(node.left().is_some_and(|left| !left.is_deleted()));
        assert!(copy.left().is_some_and(|left| left.is_deleted()));
        assert!(!copy.is_leaf());

        Ok(())
    }

    #[test]
    fn it_debugs_only_the_node_itself() -> Result<()> {
        let mut node = Node::new(2u32);
        node.right = Some(Box::new(Node::new(3)));
        node.deleted = true;

        assert_eq!(
            format!("{node:?}"),
            "Node { datum: 2, deleted: true, left: false, right: true }"
        );

        let mut chain = Node::new(0u32);
        for datum in 1..100_000 {
            let mut parent = Node::new(datum);
            parent.left = Some(Box::new(chain));
            chain = parent;
        }
        assert_eq!(
            format!("{chain:?}"),
            "Node { datum: 99999, deleted: false, left: true, right: false }"
        );
        assert_eq!(crate::link::release(Some(Box::new(chain))), 100_000);

        Ok(())
    }
}
