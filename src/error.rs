//! Error types for `btree_bag`.

use thiserror::Error;

/// Convenient result alias for fallible `btree_bag` operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by the public API.
///
/// Lookup misses are not errors: [`contains`](crate::BTreeBag::contains)
/// answers `false` and [`remove`](crate::BTreeBag::remove) is a no-op when
/// the key is absent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The requested order admits no valid B-tree geometry. An order of 2
    /// or less leaves no room for a split to produce two non-empty halves
    /// around a promoted median.
    #[error("invalid order {0}: a B-tree requires order > 2")]
    InvalidOrder(usize),
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn invalid_order_display() {
        let error = Error::InvalidOrder(2);
        assert_eq!(format!("{error}"), "invalid order 2: a B-tree requires order > 2");
    }
}
