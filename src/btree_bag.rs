//! The public multiset index type.

use alloc::string::String;
use core::fmt;

use crate::error::{Error, Result};
use crate::raw::RawBTreeBag;

/// An ordered multiset of `i64` keys backed by a B-tree.
///
/// Duplicate keys are accepted as separate entries: inserting a key twice
/// and removing it once leaves one occurrence behind. Keys are kept in
/// sorted order inside nodes of bounded fan-out, every leaf sits at the
/// same depth, and all operations finish in O(log n) node visits.
///
/// The tree's *order* — the maximum number of children per node, fixed at
/// construction — must be greater than 2; nothing smaller leaves room for
/// a split to produce two non-empty halves around a promoted median.
///
/// # Examples
///
/// ```
/// use btree_bag::BTreeBag;
///
/// let mut bag = BTreeBag::new(3)?;
///
/// bag.insert(5);
/// bag.insert(3);
/// bag.insert(3); // kept as a second entry
/// assert_eq!(bag.len(), 3);
///
/// bag.remove(3); // drops exactly one occurrence
/// assert!(bag.contains(3));
///
/// bag.remove(3);
/// assert!(!bag.contains(3));
/// # Ok::<(), btree_bag::Error>(())
/// ```
pub struct BTreeBag {
    raw: RawBTreeBag,
}

impl BTreeBag {
    /// Creates an empty bag with the given node fan-out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`] when `order <= 2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree_bag::{BTreeBag, Error};
    ///
    /// assert!(BTreeBag::new(3).is_ok());
    /// assert_eq!(BTreeBag::new(2).unwrap_err(), Error::InvalidOrder(2));
    /// ```
    pub fn new(order: usize) -> Result<Self> {
        if order <= 2 {
            return Err(Error::InvalidOrder(order));
        }
        Ok(Self {
            raw: RawBTreeBag::new(order),
        })
    }

    /// The maximum number of children per node, as passed to [`new`].
    ///
    /// [`new`]: BTreeBag::new
    #[must_use]
    pub const fn order(&self) -> usize {
        self.raw.order()
    }

    /// The number of keys in the bag, counting duplicates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the bag holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Inserts `key`, keeping it alongside any equal entries already
    /// present. Never fails and is not idempotent.
    pub fn insert(&mut self, key: i64) {
        self.raw.insert(key);
    }

    /// Returns `true` if at least one occurrence of `key` is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree_bag::BTreeBag;
    ///
    /// let mut bag = BTreeBag::new(4)?;
    /// bag.insert(2);
    /// assert!(bag.contains(2));
    /// assert!(!bag.contains(4));
    /// # Ok::<(), btree_bag::Error>(())
    /// ```
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.raw.contains(key)
    }

    /// Removes one occurrence of `key`; a no-op when `key` is absent.
    pub fn remove(&mut self, key: i64) {
        self.raw.remove(key);
    }

    /// Drops every key, resetting the bag to an empty root leaf. The
    /// configured order is kept.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Renders the tree structure as a fully parenthesized string: every
    /// node prints as `[ (child0) key0 (child1) key1 … (childN) ]`, with
    /// `()` marking the absent children of a leaf. Intended for debugging
    /// and golden tests, not for parsing.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree_bag::BTreeBag;
    ///
    /// let mut bag = BTreeBag::new(3)?;
    /// assert_eq!(bag.render(), "[ () ]");
    ///
    /// bag.insert(5);
    /// bag.insert(3);
    /// assert_eq!(bag.render(), "[ () 3 () 5 () ]");
    /// # Ok::<(), btree_bag::Error>(())
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        self.raw.render()
    }
}

impl fmt::Display for BTreeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for BTreeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTreeBag")
            .field("order", &self.order())
            .field("len", &self.len())
            .field("tree", &self.render())
            .finish()
    }
}
