use crate::arena::Handle;

/// A struct representing an internal node of a splay tree.
pub struct Node<T> {
    pub key: T,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            left: None,
            right: None,
        }
    }
}
