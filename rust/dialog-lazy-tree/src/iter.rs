use std::iter::FusedIterator;

use crate::Node;

/// An in-order iterator over the keys of a [`Tree`](crate::Tree).
///
/// Created by [`Tree::iter_soft`](crate::Tree::iter_soft), which skips
/// tombstoned entries, and [`Tree::iter_hard`](crate::Tree::iter_hard), which
/// yields every physically present entry. Keys are yielded in ascending
/// order.
#[derive(Debug, Clone)]
pub struct Iter<'a, E> {
    stack: Vec<&'a Node<E>>,
    tombstones: bool,
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(root: Option<&'a Node<E>>, tombstones: bool) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            tombstones,
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut node: Option<&'a Node<E>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.descend(node.right());

            if self.tombstones || !node.is_deleted() {
                return Some(node.datum());
            }
        }

        None
    }
}

impl<E> FusedIterator for Iter<'_, E> {}
