use std::{cmp::Ordering, fmt};

use tracing::{debug, trace};

use crate::{
    DialogLazyTreeError, Iter, Link, Node,
    link::{collect, duplicate, release, splice},
};

/// An ordered set of keys backed by an unbalanced binary search tree with
/// lazy deletion.
///
/// Removing a key with [`Tree::remove_soft`] only marks its node as a
/// tombstone; the node keeps its place in the tree until
/// [`Tree::collect_garbage`] (or [`Tree::remove_hard`]) physically unlinks
/// it. The tree therefore tracks two sizes:
///
/// - the *soft* size: the number of live keys
/// - the *hard* size: the number of nodes, live or tombstoned
///
/// Lookups, min/max queries and traversals come in a soft flavour that only
/// sees live keys and a hard flavour that sees every node.
///
/// The tree is never rebalanced, so inserting keys in sorted order produces a
/// tree whose height is linear in its size.
pub struct Tree<E> {
    root: Link<E>,
    soft_size: usize,
    hard_size: usize,
}

impl<E> Tree<E> {
    /// Creates a new, empty [`Tree`].
    pub fn new() -> Self {
        Self {
            root: None,
            soft_size: 0,
            hard_size: 0,
        }
    }

    /// Returns true if the tree holds no live keys.
    ///
    /// A tree that only holds tombstones is empty.
    pub fn is_empty(&self) -> bool {
        self.soft_size == 0
    }

    /// Returns the number of live keys.
    pub fn soft_size(&self) -> usize {
        self.soft_size
    }

    /// Returns the number of nodes in the tree, tombstones included.
    pub fn hard_size(&self) -> usize {
        self.hard_size
    }

    /// Returns the number of tombstoned nodes awaiting garbage collection.
    pub fn tombstones(&self) -> usize {
        self.hard_size - self.soft_size
    }

    /// Returns the root [`Node`] of this tree.
    ///
    /// Returns `None` if the tree has no nodes at all.
    pub fn root(&self) -> Option<&Node<E>> {
        self.root.as_deref()
    }

    /// Returns the number of edges on the longest path from the root to a
    /// leaf, counting tombstoned nodes.
    ///
    /// Returns `None` for a tree without nodes; a lone root has height
    /// `Some(0)`.
    pub fn height(&self) -> Option<usize> {
        let mut pending: Vec<(&Node<E>, usize)> =
            self.root().map(|root| (root, 0)).into_iter().collect();
        let mut height = None;

        while let Some((node, depth)) = pending.pop() {
            height = height.max(Some(depth));
            pending.extend(node.left().map(|child| (child, depth + 1)));
            pending.extend(node.right().map(|child| (child, depth + 1)));
        }

        height
    }

    /// Returns the smallest live key.
    pub fn find_min_soft(&self) -> Result<&E, DialogLazyTreeError> {
        Self::first_live(self.root(), Node::left, Node::right)
            .map(Node::datum)
            .ok_or_else(|| DialogLazyTreeError::not_found("tree has no live entries"))
    }

    /// Returns the largest live key.
    pub fn find_max_soft(&self) -> Result<&E, DialogLazyTreeError> {
        Self::first_live(self.root(), Node::right, Node::left)
            .map(Node::datum)
            .ok_or_else(|| DialogLazyTreeError::not_found("tree has no live entries"))
    }

    /// Returns the smallest key physically present, tombstoned or not.
    pub fn find_min_hard(&self) -> Result<&E, DialogLazyTreeError> {
        let mut node = self
            .root()
            .ok_or_else(|| DialogLazyTreeError::not_found("tree has no nodes"))?;

        while let Some(left) = node.left() {
            node = left;
        }

        Ok(node.datum())
    }

    /// Returns the largest key physically present, tombstoned or not.
    pub fn find_max_hard(&self) -> Result<&E, DialogLazyTreeError> {
        let mut node = self
            .root()
            .ok_or_else(|| DialogLazyTreeError::not_found("tree has no nodes"))?;

        while let Some(right) = node.right() {
            node = right;
        }

        Ok(node.datum())
    }

    /// Returns an in-order iterator over the live keys.
    pub fn iter_soft(&self) -> Iter<'_, E> {
        Iter::new(self.root(), false)
    }

    /// Returns an in-order iterator over every key, tombstones included.
    pub fn iter_hard(&self) -> Iter<'_, E> {
        Iter::new(self.root(), true)
    }

    /// Invokes `visitor` on each live key in ascending order.
    ///
    /// The tree is borrowed for the whole traversal, so the visitor cannot
    /// mutate it.
    pub fn traverse_soft<F>(&self, visitor: F)
    where
        F: FnMut(&E),
    {
        self.iter_soft().for_each(visitor)
    }

    /// Invokes `visitor` on every key in ascending order, tombstones
    /// included.
    pub fn traverse_hard<F>(&self, visitor: F)
    where
        F: FnMut(&E),
    {
        self.iter_hard().for_each(visitor)
    }

    /// Like [`Tree::traverse_soft`], but stops at the first error returned by
    /// `visitor` and hands it back to the caller.
    pub fn try_traverse_soft<F, Err>(&self, visitor: F) -> Result<(), Err>
    where
        F: FnMut(&E) -> Result<(), Err>,
    {
        self.iter_soft().try_for_each(visitor)
    }

    /// Like [`Tree::traverse_hard`], but stops at the first error returned by
    /// `visitor` and hands it back to the caller.
    pub fn try_traverse_hard<F, Err>(&self, visitor: F) -> Result<(), Err>
    where
        F: FnMut(&E) -> Result<(), Err>,
    {
        self.iter_hard().try_for_each(visitor)
    }

    /// Physically removes every tombstoned node.
    ///
    /// Subtrees are collected before their parent, so by the time a
    /// tombstoned node is spliced out its in-order successor is live. Once
    /// this returns, [`Tree::hard_size`] equals [`Tree::soft_size`].
    ///
    /// Returns true if any node was removed.
    pub fn collect_garbage(&mut self) -> bool {
        let (root, removed) = collect(self.root.take());
        self.root = root;
        self.hard_size -= removed;

        debug!(
            removed,
            soft_size = self.soft_size,
            hard_size = self.hard_size,
            "Collected garbage"
        );

        removed > 0
    }

    /// Removes every node and resets both sizes to zero.
    pub fn clear(&mut self) {
        let released = release(self.root.take());
        self.soft_size = 0;
        self.hard_size = 0;

        debug!(released, "Cleared tree");
    }

    /// Walks the tree in order, descending towards `near` first, and returns
    /// the first live node met.
    fn first_live<'a>(
        root: Option<&'a Node<E>>,
        near: fn(&Node<E>) -> Option<&Node<E>>,
        far: fn(&Node<E>) -> Option<&Node<E>>,
    ) -> Option<&'a Node<E>> {
        let mut stack = Vec::new();
        let mut next = root;

        loop {
            while let Some(node) = next {
                stack.push(node);
                next = near(node);
            }

            let node = stack.pop()?;
            if !node.deleted {
                return Some(node);
            }
            next = far(node);
        }
    }
}

impl<E> Tree<E>
where
    E: Ord,
{
    /// Returns the live key equal to `key`.
    ///
    /// A tombstoned match is reported as [`DialogLazyTreeError::NotFound`].
    pub fn find_soft(&self, key: &E) -> Result<&E, DialogLazyTreeError> {
        self.locate(key)
            .filter(|node| !node.deleted)
            .map(Node::datum)
            .ok_or_else(|| DialogLazyTreeError::not_found("no live entry matches the key"))
    }

    /// Returns the key equal to `key`, whether it is live or tombstoned.
    pub fn find_hard(&self, key: &E) -> Result<&E, DialogLazyTreeError> {
        self.locate(key)
            .map(Node::datum)
            .ok_or_else(|| DialogLazyTreeError::not_found("no entry matches the key"))
    }

    /// Returns true if `key` is present and live.
    pub fn contains_soft(&self, key: &E) -> bool {
        self.find_soft(key).is_ok()
    }

    /// Returns true if `key` is present, live or tombstoned.
    pub fn contains_hard(&self, key: &E) -> bool {
        self.find_hard(key).is_ok()
    }

    /// Inserts `datum` into the tree.
    ///
    /// If an equal key is tombstoned it is brought back to life in place,
    /// without allocating a new node. Returns true if the number of live
    /// keys changed.
    pub fn insert(&mut self, datum: E) -> bool {
        let mut link = &mut self.root;

        while let Some(node) = link {
            link = match datum.cmp(&node.datum) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    if !node.deleted {
                        return false;
                    }

                    node.deleted = false;
                    self.soft_size += 1;
                    trace!(soft_size = self.soft_size, "Resurrected tombstoned entry");
                    return true;
                }
            };
        }

        *link = Some(Box::new(Node::new(datum)));
        self.soft_size += 1;
        self.hard_size += 1;
        trace!(
            soft_size = self.soft_size,
            hard_size = self.hard_size,
            "Inserted entry"
        );

        true
    }

    /// Lazily removes `key` by marking its node as a tombstone.
    ///
    /// The node stays in place until garbage is collected. Returns true if
    /// `key` was present and live.
    pub fn remove_soft(&mut self, key: &E) -> bool {
        let mut link = &mut self.root;

        while let Some(node) = link {
            link = match key.cmp(&node.datum) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    if node.deleted {
                        return false;
                    }

                    node.deleted = true;
                    self.soft_size -= 1;
                    trace!(soft_size = self.soft_size, "Tombstoned entry");
                    return true;
                }
            };
        }

        false
    }

    /// Physically removes the node holding `key`, live or tombstoned.
    ///
    /// A node with two children is replaced by the smallest node of its right
    /// subtree. Returns true if a node was removed.
    pub fn remove_hard(&mut self, key: &E) -> bool {
        let Some(removed) = self.unlink(key) else {
            return false;
        };

        self.hard_size -= 1;
        if !removed.deleted {
            self.soft_size -= 1;
        }

        trace!(
            tombstone = removed.deleted,
            soft_size = self.soft_size,
            hard_size = self.hard_size,
            "Removed entry"
        );

        true
    }

    fn locate(&self, key: &E) -> Option<&Node<E>> {
        let mut next = self.root();

        while let Some(node) = next {
            next = match key.cmp(&node.datum) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }

        None
    }

    /// Detaches the node holding `key`, splicing its children back into the
    /// tree.
    ///
    /// The search path is taken apart on the way down and reassembled on the
    /// way up, so the walk holds no borrow into the tree.
    fn unlink(&mut self, key: &E) -> Option<Box<Node<E>>> {
        let mut path: Vec<(Box<Node<E>>, Ordering)> = Vec::new();
        let mut current = self.root.take();
        let mut removed = None;

        while let Some(mut node) = current.take() {
            match key.cmp(&node.datum) {
                Ordering::Less => {
                    current = node.left.take();
                    path.push((node, Ordering::Less));
                }
                Ordering::Greater => {
                    current = node.right.take();
                    path.push((node, Ordering::Greater));
                }
                Ordering::Equal => {
                    current = splice(&mut node);
                    removed = Some(node);
                    break;
                }
            }
        }

        let mut subtree = current;
        while let Some((mut parent, side)) = path.pop() {
            match side {
                Ordering::Less => parent.left = subtree,
                _ => parent.right = subtree,
            }
            subtree = Some(parent);
        }
        self.root = subtree;

        removed
    }
}

impl<E> Clone for Tree<E>
where
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: duplicate(&self.root),
            soft_size: self.soft_size,
            hard_size: self.hard_size,
        }
    }
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for Tree<E> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<E> fmt::Debug for Tree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("soft_size", &self.soft_size)
            .field("hard_size", &self.hard_size)
            .field("height", &self.height())
            .finish()
    }
}

impl<E> Extend<E> for Tree<E>
where
    E: Ord,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for datum in iter {
            self.insert(datum);
        }
    }
}

impl<E> FromIterator<E> for Tree<E>
where
    E: Ord,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, E> IntoIterator for &'a Tree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_soft()
    }
}
