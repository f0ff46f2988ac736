use crate::Node;

/// An owning reference to an optional subtree.
///
/// Every [`Node`] is owned by exactly one link: either its parent's `left` or
/// `right` field, or the root of the [`Tree`](crate::Tree).
pub type Link<E> = Option<Box<Node<E>>>;

/// Detaches the leftmost node of the subtree rooted at `node`.
///
/// Returns the remaining subtree along with the detached node. The detached
/// node keeps its tombstone flag; its `left` is always empty and its `right`
/// is cleared.
pub(crate) fn detach_min<E>(node: Box<Node<E>>) -> (Link<E>, Box<Node<E>>) {
    let mut spine = Vec::new();
    let mut min = node;

    while let Some(left) = min.left.take() {
        spine.push(min);
        min = left;
    }

    let mut rest = min.right.take();
    while let Some(mut parent) = spine.pop() {
        parent.left = rest;
        rest = Some(parent);
    }

    (rest, min)
}

/// Takes the children of `node` and returns the subtree that should occupy
/// its position once it is physically removed.
///
/// With two children the hard minimum of the right subtree is moved into the
/// vacated position, carrying its datum and tombstone flag with it.
pub(crate) fn splice<E>(node: &mut Node<E>) -> Link<E> {
    match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let (rest, mut successor) = detach_min(right);
            successor.left = Some(left);
            successor.right = rest;
            Some(successor)
        }
    }
}

/// Drops every node reachable from `link` without recursing per level.
///
/// Returns the number of nodes released.
pub(crate) fn release<E>(link: Link<E>) -> usize {
    let mut pending: Vec<Box<Node<E>>> = link.into_iter().collect();
    let mut released = 0;

    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
        released += 1;
    }

    released
}

/// Copies every node reachable from `link`, tombstones included, without
/// recursing per level.
pub(crate) fn duplicate<E: Clone>(link: &Link<E>) -> Link<E> {
    // Pre-order listing: every node is listed after its parent
    let mut order: Vec<(&Node<E>, Option<usize>, bool)> = Vec::new();
    let mut pending: Vec<(&Node<E>, Option<usize>, bool)> = link
        .as_deref()
        .map(|root| (root, None, false))
        .into_iter()
        .collect();

    while let Some((node, parent, is_left)) = pending.pop() {
        let index = order.len();
        order.push((node, parent, is_left));
        pending.extend(node.right().map(|right| (right, Some(index), false)));
        pending.extend(node.left().map(|left| (left, Some(index), true)));
    }

    let mut copies: Vec<Link<E>> = order
        .iter()
        .map(|(node, _, _)| {
            Some(Box::new(Node {
                datum: node.datum.clone(),
                left: None,
                right: None,
                deleted: node.deleted,
            }))
        })
        .collect();

    // Attach children to parents from the bottom of the listing upwards, so
    // each copy is complete by the time it is moved into its parent
    for index in (1..order.len()).rev() {
        let (_, parent, is_left) = order[index];
        let (Some(parent), Some(child)) = (parent, copies[index].take()) else {
            continue;
        };
        if let Some(parent) = copies[parent].as_mut() {
            if is_left {
                parent.left = Some(child);
            } else {
                parent.right = Some(child);
            }
        }
    }

    copies.into_iter().next().flatten()
}

enum Collect<E> {
    Visit(Link<E>),
    Splice(Box<Node<E>>),
}

/// Physically removes every tombstoned node reachable from `link`.
///
/// Children are collected before their parent is examined, so a tombstoned
/// node is only spliced out once its subtrees hold no tombstones. Returns the
/// rebuilt subtree and the number of nodes removed.
pub(crate) fn collect<E>(link: Link<E>) -> (Link<E>, usize) {
    let mut pending = vec![Collect::Visit(link)];
    let mut collected: Vec<Link<E>> = Vec::new();
    let mut removed = 0;

    while let Some(step) = pending.pop() {
        match step {
            Collect::Visit(None) => collected.push(None),
            Collect::Visit(Some(mut node)) => {
                let left = node.left.take();
                let right = node.right.take();
                pending.push(Collect::Splice(node));
                pending.push(Collect::Visit(right));
                pending.push(Collect::Visit(left));
            }
            Collect::Splice(mut node) => {
                node.right = collected.pop().flatten();
                node.left = collected.pop().flatten();
                if node.deleted {
                    collected.push(splice(&mut node));
                    removed += 1;
                } else {
                    collected.push(Some(node));
                }
            }
        }
    }

    (collected.pop().flatten(), removed)
}
