//! An ordered set backed by a top-down splay tree, along with the arena allocator that stores its
//! nodes.

pub mod arena;
pub mod error;
pub mod splay_tree;
