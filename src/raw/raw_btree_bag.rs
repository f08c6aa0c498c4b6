use alloc::string::String;
use core::fmt::Write as _;

use smallvec::smallvec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Key, Node};

/// Transient coordinates of one key occurrence: the node holding it and
/// the key's index inside that node. Produced by `search`, consumed by
/// `delete_at` within the same operation; never stored across operations.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Locator {
    node: Handle,
    index: usize,
}

/// The balancing core behind `BTreeBag`: arena-backed nodes plus the
/// split, rotate, and merge machinery.
///
/// A root always exists; an empty tree is an empty root leaf. The root
/// handle is swapped exactly when the height changes: a cascading split
/// that reaches the root grows the tree, a cascading merge that empties
/// the root shrinks it.
pub(crate) struct RawBTreeBag {
    nodes: Arena<Node>,
    root: Handle,
    /// Maximum children per node; maximum keys per node is `order - 1`.
    order: usize,
    /// ⌊(order − 1) / 2⌋; the fewest keys a non-root node may hold.
    min_keys: usize,
    len: usize,
}

impl RawBTreeBag {
    /// Creates an empty tree. The caller (`BTreeBag::new`) has already
    /// rejected `order <= 2`.
    pub(crate) fn new(order: usize) -> Self {
        debug_assert!(order > 2, "`RawBTreeBag::new()` - `order` must be > 2!");
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::leaf());
        Self {
            nodes,
            root,
            order,
            min_keys: (order - 1) / 2,
            len: 0,
        }
    }

    pub(crate) const fn order(&self) -> usize {
        self.order
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.alloc(Node::leaf());
        self.len = 0;
    }

    /// Locates one occurrence of `key` by iterative descent from the root.
    pub(crate) fn search(&self, key: Key) -> Option<Locator> {
        let mut current = self.root;
        loop {
            let node = self.nodes.get(current);
            let index = node.bisect(key);
            if index < node.key_count() && node.key(index) == key {
                return Some(Locator { node: current, index });
            }
            if node.is_leaf() {
                return None;
            }
            current = node.child(index);
        }
    }

    pub(crate) fn contains(&self, key: Key) -> bool {
        self.search(key).is_some()
    }

    /// Inserts `key`, keeping duplicates as separate entries.
    pub(crate) fn insert(&mut self, key: Key) {
        // Descend to the leaf that keeps the key sequence ordered. Equal
        // keys route left of their separator, so duplicates stay adjacent
        // in the in-order sequence.
        let mut current = self.root;
        loop {
            let node = self.nodes.get(current);
            if node.is_leaf() {
                break;
            }
            current = node.child(node.bisect(key));
        }

        let leaf = self.nodes.get_mut(current);
        let index = leaf.bisect(key);
        leaf.insert_key(index, key);
        let overflowed = leaf.key_count() == self.order;
        self.len += 1;

        if overflowed {
            self.split(current);
        }
    }

    /// Removes one occurrence of `key`; a no-op when it is absent.
    pub(crate) fn remove(&mut self, key: Key) {
        if let Some(locator) = self.search(key) {
            self.delete_at(locator);
        }
    }

    /// Removes the key occurrence identified by `locator`.
    pub(crate) fn delete_at(&mut self, locator: Locator) {
        let Locator { node, index } = locator;

        if self.nodes.get(node).is_leaf() {
            self.nodes.get_mut(node).remove_key(index);
            self.len -= 1;
            if node != self.root && self.nodes.get(node).key_count() < self.min_keys {
                self.rebalance(node);
            }
            return;
        }

        // Internal target: fill the slot with a boundary key pulled from an
        // adjacent subtree, then remove that key from the leaf that holds
        // it. Prefer the successor side when its leaf has surplus keys, so
        // the common case needs no rotate or merge at all.
        let successor_leaf = self.leftmost_leaf(self.nodes.get(node).child(index + 1));
        let (donor, donor_index) = if self.nodes.get(successor_leaf).key_count() > self.min_keys {
            (successor_leaf, 0)
        } else {
            let predecessor_leaf = self.rightmost_leaf(self.nodes.get(node).child(index));
            (predecessor_leaf, self.nodes.get(predecessor_leaf).key_count() - 1)
        };

        let boundary = self.nodes.get(donor).key(donor_index);
        self.nodes.get_mut(node).set_key(index, boundary);
        self.nodes.get_mut(donor).remove_key(donor_index);
        self.len -= 1;

        // The donor leaf, never the internal node, is what rebalances; the
        // fix propagates upward from there.
        if self.nodes.get(donor).key_count() < self.min_keys {
            self.rebalance(donor);
        }
    }

    /// Renders the tree as a fully parenthesized dump: every node prints
    /// as `[ (child0) key0 (child1) key1 … (childN) ]`, with `()` standing
    /// in for the absent children of a leaf.
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, &mut out);
        out
    }

    fn render_node(&self, handle: Handle, out: &mut String) {
        let node = self.nodes.get(handle);
        out.push('[');
        for (index, &key) in node.keys().iter().enumerate() {
            self.render_child(node, index, out);
            let _ = write!(out, " {key}");
        }
        self.render_child(node, node.key_count(), out);
        out.push_str(" ]");
    }

    fn render_child(&self, node: &Node, index: usize, out: &mut String) {
        if node.is_leaf() {
            out.push_str(" ()");
        } else {
            out.push_str(" (");
            self.render_node(node.child(index), out);
            out.push(')');
        }
    }

    /// Splits an overflowing node and walks the promoted median up the
    /// parent chain, growing the tree by one level if the cascade reaches
    /// the root.
    fn split(&mut self, handle: Handle) {
        let mut current = handle;
        loop {
            debug_assert_eq!(
                self.nodes.get(current).key_count(),
                self.order,
                "`RawBTreeBag::split()` - node is not overflowing!"
            );

            let median = self.order / 2;
            let (promoted, right_keys, right_children) = self.nodes.get_mut(current).split_off(median);
            let right = self.nodes.alloc(Node::from_parts(right_keys, right_children));
            self.relink_children(right, 0);

            match self.nodes.get(current).parent() {
                None => {
                    // Split at the root: a new root holds exactly the
                    // promoted key and the two halves.
                    let root = self.nodes.alloc(Node::from_parts(smallvec![promoted], smallvec![current, right]));
                    self.nodes.get_mut(current).link_parent(root, 0);
                    self.nodes.get_mut(right).link_parent(root, 1);
                    self.root = root;
                    return;
                }
                Some(parent) => {
                    let slot = self.nodes.get(current).slot();
                    let up = self.nodes.get_mut(parent);
                    up.insert_key(slot, promoted);
                    up.insert_child(slot + 1, right);
                    self.relink_children(parent, slot + 1);
                    if self.nodes.get(parent).key_count() < self.order {
                        return;
                    }
                    current = parent;
                }
            }
        }
    }

    /// Restores the minimum-key invariant on an underflowing non-root
    /// node. Guarded alternatives, first match wins: rotate in from the
    /// left sibling, rotate in from the right sibling, merge with a
    /// sibling. Only a merge shrinks the parent, so only a merge can
    /// cascade; a cascade that empties an internal root promotes the
    /// merged node and the tree loses a level.
    fn rebalance(&mut self, handle: Handle) {
        let mut current = handle;
        loop {
            debug_assert!(
                self.nodes.get(current).key_count() < self.min_keys,
                "`RawBTreeBag::rebalance()` - node is not underflowing!"
            );
            let parent = self
                .nodes
                .get(current)
                .parent()
                .expect("`RawBTreeBag::rebalance()` - root nodes are never rebalanced!");
            let slot = self.nodes.get(current).slot();

            if slot > 0 {
                let left = self.nodes.get(parent).child(slot - 1);
                if self.nodes.get(left).key_count() > self.min_keys {
                    self.rotate_from_left(parent, current, left, slot);
                    return;
                }
            }

            if slot + 1 < self.nodes.get(parent).child_count() {
                let right = self.nodes.get(parent).child(slot + 1);
                if self.nodes.get(right).key_count() > self.min_keys {
                    self.rotate_from_right(parent, current, right, slot);
                    return;
                }
            }

            // Merge around the separator to this node's left, or the first
            // separator when this node is the parent's first child.
            let separator = slot.saturating_sub(1);
            self.merge(parent, separator);

            if parent == self.root {
                if self.nodes.get(parent).key_count() == 0 {
                    // The root emptied out: promote its sole child.
                    let survivor = self.nodes.get(parent).child(0);
                    self.nodes.free(parent);
                    self.nodes.get_mut(survivor).clear_parent();
                    self.root = survivor;
                }
                return;
            }
            if self.nodes.get(parent).key_count() >= self.min_keys {
                return;
            }
            current = parent;
        }
    }

    /// Rotate left-to-right: the left sibling's last key ascends into the
    /// parent separator slot and the separator descends into `node`'s
    /// front. Internal nodes also hand over the sibling's last child.
    fn rotate_from_left(&mut self, parent: Handle, node: Handle, left: Handle, slot: usize) {
        let separator = self.nodes.get(parent).key(slot - 1);
        let ascending = self.nodes.get_mut(left).pop_key();
        self.nodes.get_mut(parent).set_key(slot - 1, ascending);
        self.nodes.get_mut(node).insert_key(0, separator);

        if !self.nodes.get(left).is_leaf() {
            let moved = self.nodes.get_mut(left).pop_child();
            self.nodes.get_mut(node).insert_child(0, moved);
            self.relink_children(node, 0);
        }
    }

    /// Rotate right-to-left, the mirror of `rotate_from_left`.
    fn rotate_from_right(&mut self, parent: Handle, node: Handle, right: Handle, slot: usize) {
        let separator = self.nodes.get(parent).key(slot);
        let ascending = self.nodes.get_mut(right).remove_key(0);
        self.nodes.get_mut(parent).set_key(slot, ascending);
        self.nodes.get_mut(node).push_key(separator);

        if !self.nodes.get(right).is_leaf() {
            let moved = self.nodes.get_mut(right).remove_child(0);
            let last = self.nodes.get(node).child_count();
            self.nodes.get_mut(node).push_child(moved);
            self.nodes.get_mut(moved).link_parent(node, last);
            self.relink_children(right, 0);
        }
    }

    /// Merges `children[separator]` with `children[separator + 1]` around
    /// the separator key, which descends into the surviving left node. The
    /// absorbed right node's arena slot is freed and the parent loses one
    /// key and one child.
    fn merge(&mut self, parent: Handle, separator: usize) {
        let left = self.nodes.get(parent).child(separator);
        let right = self.nodes.get(parent).child(separator + 1);

        let descending = self.nodes.get_mut(parent).remove_key(separator);
        self.nodes.get_mut(parent).remove_child(separator + 1);
        self.relink_children(parent, separator + 1);

        let first_adopted = self.nodes.get(left).child_count();
        let (sibling_keys, sibling_children) = self.nodes.take(right).into_parts();
        self.nodes.get_mut(left).absorb(descending, sibling_keys, sibling_children);
        self.relink_children(left, first_adopted);

        // One side was underfull and the other failed both rotate guards,
        // so the merged node fits.
        debug_assert!(
            self.nodes.get(left).key_count() <= self.order - 1,
            "`RawBTreeBag::merge()` - merged node overflows!"
        );
    }

    /// Rewrites the `parent`/`slot` links of `node`'s children from index
    /// `from` onward, after any mutation that shifted child slots.
    fn relink_children(&mut self, node: Handle, from: usize) {
        for index in from..self.nodes.get(node).child_count() {
            let child = self.nodes.get(node).child(index);
            self.nodes.get_mut(child).link_parent(node, index);
        }
    }

    fn leftmost_leaf(&self, from: Handle) -> Handle {
        let mut current = from;
        while !self.nodes.get(current).is_leaf() {
            current = self.nodes.get(current).child(0);
        }
        current
    }

    fn rightmost_leaf(&self, from: Handle) -> Handle {
        let mut current = from;
        loop {
            let node = self.nodes.get(current);
            if node.is_leaf() {
                return current;
            }
            current = node.child(node.child_count() - 1);
        }
    }
}
