use smallvec::SmallVec;

use super::handle::Handle;

/// Keys held by the tree. Fixed-width integers only; see the crate docs.
pub(crate) type Key = i64;

/// Inline capacity for per-node key and child storage. Trees with an order
/// at or below this never spill node storage onto the heap.
const INLINE: usize = 8;

pub(crate) type KeyVec = SmallVec<[Key; INLINE]>;
pub(crate) type ChildVec = SmallVec<[Handle; INLINE]>;

/// One B-tree block: a non-decreasing run of keys plus, for internal nodes,
/// the child handles that interleave them (`children.len() == keys.len() + 1`).
/// Leaves have no children.
///
/// The child slots are the sole owning references in the tree. `parent` and
/// `slot` (this node's index within `parent.children`) are non-owning
/// bookkeeping that lets splits and rebalances walk upward without a
/// recursion stack; they are kept consistent after every structural
/// mutation.
pub(crate) struct Node {
    keys: KeyVec,
    children: ChildVec,
    parent: Option<Handle>,
    slot: usize,
}

impl Node {
    /// A fresh, empty leaf. This is the shape of every root at construction.
    pub(crate) fn leaf() -> Self {
        Self {
            keys: KeyVec::new(),
            children: ChildVec::new(),
            parent: None,
            slot: 0,
        }
    }

    /// Assembles a node from already-ordered keys and children, unlinked
    /// from any parent. Used for the right sibling of a split and for new
    /// roots.
    pub(crate) fn from_parts(keys: KeyVec, children: ChildVec) -> Self {
        debug_assert!(
            children.is_empty() || children.len() == keys.len() + 1,
            "`Node::from_parts()` - children/keys length mismatch!"
        );
        Self {
            keys,
            children,
            parent: None,
            slot: 0,
        }
    }

    /// Tears the node down into its keys and children, for a merge.
    pub(crate) fn into_parts(self) -> (KeyVec, ChildVec) {
        (self.keys, self.children)
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> Key {
        self.keys[index]
    }

    pub(crate) fn set_key(&mut self, index: usize, key: Key) {
        self.keys[index] = key;
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children[index]
    }

    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot
    }

    pub(crate) fn link_parent(&mut self, parent: Handle, slot: usize) {
        self.parent = Some(parent);
        self.slot = slot;
    }

    /// Detaches the node from its parent; only ever done for a new root.
    pub(crate) fn clear_parent(&mut self) {
        self.parent = None;
        self.slot = 0;
    }

    /// Leftmost index with `keys[index] >= key`, or `key_count()` if every
    /// key is smaller. Duplicates therefore insert in front of their equals
    /// and lookups land on a node's first occurrence.
    #[inline]
    pub(crate) fn bisect(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    pub(crate) fn insert_key(&mut self, index: usize, key: Key) {
        self.keys.insert(index, key);
    }

    pub(crate) fn remove_key(&mut self, index: usize) -> Key {
        self.keys.remove(index)
    }

    pub(crate) fn push_key(&mut self, key: Key) {
        self.keys.push(key);
    }

    pub(crate) fn pop_key(&mut self) -> Key {
        self.keys.pop().expect("`Node::pop_key()` - node has no keys!")
    }

    pub(crate) fn insert_child(&mut self, index: usize, child: Handle) {
        self.children.insert(index, child);
    }

    pub(crate) fn remove_child(&mut self, index: usize) -> Handle {
        self.children.remove(index)
    }

    pub(crate) fn push_child(&mut self, child: Handle) {
        self.children.push(child);
    }

    pub(crate) fn pop_child(&mut self) -> Handle {
        self.children.pop().expect("`Node::pop_child()` - node has no children!")
    }

    /// Splits off the upper half for an overflow split: returns the
    /// promoted median key together with the keys and children that will
    /// form the right sibling. `self` keeps `keys[..median]` and (when
    /// internal) `children[..=median]`.
    pub(crate) fn split_off(&mut self, median: usize) -> (Key, KeyVec, ChildVec) {
        let right_keys: KeyVec = self.keys.drain(median + 1..).collect();
        let right_children: ChildVec = if self.is_leaf() {
            ChildVec::new()
        } else {
            self.children.drain(median + 1..).collect()
        };
        let promoted = self.pop_key();
        (promoted, right_keys, right_children)
    }

    /// Absorbs a right sibling's contents plus the separator pulled down
    /// from the parent. The caller re-links the adopted children.
    pub(crate) fn absorb(&mut self, separator: Key, mut sibling_keys: KeyVec, mut sibling_children: ChildVec) {
        self.keys.push(separator);
        self.keys.append(&mut sibling_keys);
        self.children.append(&mut sibling_children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_with(keys: &[Key]) -> Node {
        let mut node = Node::leaf();
        for &key in keys {
            node.push_key(key);
        }
        node
    }

    #[test]
    fn bisect_finds_leftmost_slot() {
        let node = leaf_with(&[2, 4, 4, 8]);
        assert_eq!(node.bisect(1), 0);
        assert_eq!(node.bisect(2), 0);
        assert_eq!(node.bisect(3), 1);
        assert_eq!(node.bisect(4), 1); // first of the duplicates
        assert_eq!(node.bisect(5), 3);
        assert_eq!(node.bisect(8), 3);
        assert_eq!(node.bisect(9), 4);
    }

    #[test]
    fn bisect_on_empty_node() {
        let node = Node::leaf();
        assert_eq!(node.bisect(0), 0);
    }

    #[test]
    fn split_off_promotes_the_median() {
        // Order 5 overflow: five keys, median index 2.
        let mut node = leaf_with(&[10, 20, 30, 40, 50]);
        let (promoted, right_keys, right_children) = node.split_off(2);
        assert_eq!(promoted, 30);
        assert_eq!(node.keys(), &[10, 20]);
        assert_eq!(right_keys.as_slice(), &[40, 50]);
        assert!(right_children.is_empty());
    }

    #[test]
    fn absorb_concatenates_around_separator() {
        let mut left = leaf_with(&[1]);
        let right = leaf_with(&[5, 7]);
        let (keys, children) = right.into_parts();
        left.absorb(3, keys, children);
        assert_eq!(left.keys(), &[1, 3, 5, 7]);
        assert!(left.is_leaf());
    }
}
