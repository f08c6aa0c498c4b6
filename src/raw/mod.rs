mod arena;
mod handle;
mod node;
mod raw_btree_bag;

pub(crate) use raw_btree_bag::RawBTreeBag;
