//! An ordered multiset index backed by a B-tree.
//!
//! This crate provides [`BTreeBag`], a self-balancing ordered index over
//! `i64` keys. Unlike the standard library's set types it has *multiset*
//! semantics: duplicate keys are accepted as separate entries, and each
//! removal drops exactly one occurrence. The node fan-out (the tree's
//! *order*) is chosen at construction time rather than baked in at compile
//! time, which makes the type convenient for exercising balancing behavior
//! at small orders and for tuning fan-out against key volume.
//!
//! # Example
//!
//! ```
//! use btree_bag::BTreeBag;
//!
//! let mut bag = BTreeBag::new(3)?;
//! bag.insert(5);
//! bag.insert(3);
//! bag.insert(2);
//! bag.insert(3); // duplicate, kept as a separate entry
//!
//! assert!(bag.contains(3));
//! bag.remove(3);
//! assert!(bag.contains(3)); // one occurrence left
//! bag.remove(3);
//! assert!(!bag.contains(3));
//!
//! assert!(bag.contains(2));
//! assert!(!bag.contains(4));
//! # Ok::<(), btree_bag::Error>(())
//! ```
//!
//! # Guarantees
//!
//! - Every non-root node holds between ⌊(order−1)/2⌋ and order−1 keys.
//! - All leaves sit at the same depth; the tree only changes height at the
//!   root (a cascading split grows it, a cascading merge shrinks it).
//! - `insert`, `contains`, and `remove` are O(log n) node visits.
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other through stable handles.
//! A node's child slots are the sole owning references; the parent
//! back-link is a non-owning handle used only for slot bookkeeping and for
//! walking splits and rebalances up the tree iteratively, so no operation
//! recurses on the tree height.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod error;
mod raw;

pub mod btree_bag;

pub use btree_bag::BTreeBag;
pub use error::{Error, Result};
