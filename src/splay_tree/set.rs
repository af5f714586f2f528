use crate::arena::Handle;
use crate::error::Result;
use crate::splay_tree::node::Node;
use crate::splay_tree::tree::{self, Arena};
use log::{debug, trace, warn};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using a top-down splay tree.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that recently
/// accessed keys are quick to access again. Every lookup, insertion, and removal "splays" the
/// accessed key (or the closest key to it) to the root of the tree, which gives amortized
/// `O(log n)` operations. Because lookups restructure the tree, `find`, `contains`, `min`, and
/// `max` take `&mut self`.
///
/// Nodes are stored in an arena owned by the set and refer to their children by index, so
/// cloning, clearing, and dropping never recurse through the tree.
///
/// # Examples
///
/// ```
/// use splay_collections::splay_tree::SplayTree;
///
/// let mut tree = SplayTree::new();
/// tree.insert(0);
/// tree.insert(3);
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.find(&0), Some(&0));
/// assert_eq!(tree.find(&1), None);
///
/// assert_eq!(tree.min(), Some(&0));
/// assert_eq!(tree.ceil(&2), Some(&3));
///
/// assert_eq!(tree.remove(&0), Some(0));
/// assert_eq!(tree.remove(&1), None);
/// ```
pub struct SplayTree<T> {
    arena: Arena<T>,
    root: Option<Handle>,
}

impl<T> SplayTree<T> {
    /// Constructs a new, empty `SplayTree<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let tree: SplayTree<u32> = SplayTree::new();
    /// ```
    pub fn new() -> Self {
        SplayTree {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Constructs a new, empty `SplayTree<T>` with room for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let tree: SplayTree<u32> = SplayTree::with_capacity(1024);
    /// assert!(tree.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        SplayTree {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Inserts a key into the tree and returns `true`. If the key already exists in the tree, the
    /// tree is left unchanged and `false` is returned. Either way the key ends up at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let SplayTree {
            ref mut arena,
            ref mut root,
        } = self;
        tree::insert(arena, root, key)
    }

    /// Inserts a key into the tree like `insert`, but returns an error instead of aborting if
    /// room for the new node cannot be allocated. Storage is only requested once the key is known
    /// to be absent, so inserting a duplicate never fails. On error the set of keys is unchanged,
    /// although the search will have splayed the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// assert_eq!(tree.try_insert(1).ok(), Some(true));
    /// assert_eq!(tree.try_insert(1).ok(), Some(false));
    /// ```
    pub fn try_insert(&mut self, key: T) -> Result<bool>
    where
        T: Ord,
    {
        let SplayTree {
            ref mut arena,
            ref mut root,
        } = self;
        if tree::find(arena, root, &key).is_some() {
            return Ok(false);
        }
        if let Err(err) = arena.try_reserve(1) {
            warn!("Unable to allocate splay tree node: {}", err);
            return Err(err);
        }
        tree::splice(arena, root, key);
        Ok(true)
    }

    /// Removes a key from the tree. If the key exists in the tree, it will return the removed
    /// key. Otherwise it will return `None`.
    ///
    /// The removed node's slot is kept for reuse by later insertions rather than returned to the
    /// allocator, so memory stays at the tree's peak size until the last key is removed or the
    /// tree is cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let SplayTree {
            ref mut arena,
            ref mut root,
        } = self;
        tree::remove(arena, root, key)
    }

    /// Returns a reference to the key in the tree that is equal to a particular key, splaying it
    /// to the root. Returns `None` if no such key exists, in which case the closest key visited
    /// by the search is splayed to the root instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.root(), Some(&1));
    /// assert_eq!(tree.find(&2), None);
    /// ```
    pub fn find<V>(&mut self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let handle = tree::find(&mut self.arena, &mut self.root, key)?;
        Some(&self.arena[handle].key)
    }

    /// Checks if a key exists in the tree. Like `find`, this splays the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the minimum key of the tree after splaying it to the root. Returns `None` if the
    /// tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.min(), Some(&1));
    /// assert_eq!(tree.root(), Some(&1));
    /// ```
    pub fn min(&mut self) -> Option<&T> {
        let handle = tree::min(&mut self.arena, &mut self.root)?;
        Some(&self.arena[handle].key)
    }

    /// Returns the maximum key of the tree after splaying it to the root. Returns `None` if the
    /// tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.max(), Some(&3));
    /// assert_eq!(tree.root(), Some(&3));
    /// ```
    pub fn max(&mut self) -> Option<&T> {
        let handle = tree::max(&mut self.arena, &mut self.root)?;
        Some(&self.arena[handle].key)
    }

    /// Returns the key at the root of the tree without splaying. Returns `None` if the tree is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.root(), Some(&3));
    /// ```
    pub fn root(&self) -> Option<&T> {
        self.root.map(|handle| &self.arena[handle].key)
    }

    /// Returns a key in the tree that is less than or equal to a particular key. Returns `None`
    /// if such a key does not exist. Note that `floor` does not splay the tree in order to use a
    /// non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.floor(&0), None);
    /// assert_eq!(tree.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::floor(&self.arena, self.root, key)
    }

    /// Returns a key in the tree that is greater than or equal to a particular key. Returns
    /// `None` if such a key does not exist. Note that `ceil` does not splay the tree in order to
    /// use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.ceil(&0), Some(&1));
    /// assert_eq!(tree.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::ceil(&self.arena, self.root, key)
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let tree: SplayTree<u32> = SplayTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears the tree, removing all keys and releasing their storage. The nodes are released in
    /// a single pass over the arena regardless of the shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.clear();
    /// assert_eq!(tree.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("Clearing splay tree with {} keys.", self.len());
        self.arena.clear();
        self.root = None;
    }

    /// Returns a deep copy of the tree like `clone`, but returns an error instead of aborting if
    /// room for the copied nodes cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    ///
    /// let mut copy = tree.try_clone().unwrap();
    /// copy.insert(2);
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(copy.len(), 2);
    /// ```
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        let mut arena = Arena::new();
        if let Err(err) = arena.try_reserve(self.len()) {
            warn!("Unable to allocate {} nodes for splay tree copy: {}", self.len(), err);
            return Err(err);
        }
        trace!("Copying splay tree with {} keys.", self.len());
        let root = tree::copy(&self.arena, self.root, &mut arena);
        Ok(SplayTree { arena, root })
    }

    /// Returns an iterator over the tree. The iterator will yield keys using in-order traversal.
    /// Iterating does not splay the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplayTreeIter<T> {
        SplayTreeIter {
            arena: &self.arena,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<T> Clone for SplayTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        trace!("Copying splay tree with {} keys.", self.len());
        let mut arena = Arena::with_capacity(self.len());
        let root = tree::copy(&self.arena, self.root, &mut arena);
        SplayTree { arena, root }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        trace!("Copying splay tree with {} keys.", source.len());
        self.arena.reserve(source.len());
        self.root = tree::copy(&source.arena, source.root, &mut self.arena);
    }
}

impl<T> IntoIterator for SplayTree<T> {
    type IntoIter = SplayTreeIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            arena: self.arena,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SplayTree<T>
where
    T: 'a,
{
    type IntoIter = SplayTreeIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `SplayTree<T>`.
///
/// This iterator traverses the keys of the tree in-order and yields owned keys.
pub struct SplayTreeIntoIter<T> {
    arena: Arena<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<T> Iterator for SplayTreeIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.current = self.arena[handle].left;
            self.stack.push(handle);
        }
        self.stack.pop().map(|handle| {
            let Node { key, right, .. } = self.arena.free(handle);
            self.current = right;
            key
        })
    }
}

/// An iterator for `SplayTree<T>`.
///
/// This iterator traverses the keys of the tree in-order and yields immutable references.
pub struct SplayTreeIter<'a, T>
where
    T: 'a,
{
    arena: &'a Arena<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, T> Iterator for SplayTreeIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(handle) = self.current {
            self.current = arena[handle].left;
            self.stack.push(handle);
        }
        self.stack.pop().map(|handle| {
            let node = &arena[handle];
            self.current = node.right;
            &node.key
        })
    }
}

impl<T> Default for SplayTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SplayTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = SplayTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for SplayTree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> PartialEq for SplayTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &SplayTree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for SplayTree<T> where T: Eq {}

impl<T> fmt::Debug for SplayTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
