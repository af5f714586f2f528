//! Fast, but limited allocator.

use crate::error::Result;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object allocated in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// Objects are stored contiguously in a single `Vec` and are addressed by `Handle`s, which are
/// plain indices. Freed blocks are threaded onto a free list and reused by later allocations, so
/// a handle stays valid until its object is freed or the arena is cleared. Dropping the arena
/// drops every live object without recursing through whatever structure the handles describe.
///
/// Storage can be reserved ahead of time with `reserve` or `try_reserve`. Once `additional`
/// blocks have been reserved, the next `additional` calls to `allocate` will not allocate.
///
/// # Examples
///
/// ```
/// use splay_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    blocks: Vec<Block<T>>,
    size: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: Handle) -> bool {
        handle.index < self.blocks.len()
    }

    fn vacant(&self) -> usize {
        self.blocks.len() - self.size
    }

    /// Constructs a new, empty `TypedArena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new();
    /// ```
    pub fn new() -> Self {
        TypedArena {
            head: None,
            blocks: Vec::new(),
            size: 0,
        }
    }

    /// Constructs a new, empty `TypedArena<T>` with room for at least `capacity` objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::with_capacity(1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        TypedArena {
            head: None,
            blocks: Vec::with_capacity(capacity),
            size: 0,
        }
    }

    /// Reserves room for at least `additional` more objects. Vacant blocks on the free list
    /// count towards the reservation.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena: TypedArena<u32> = TypedArena::new();
    /// arena.reserve(16);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let vacant = self.vacant();
        if additional > vacant {
            self.blocks.reserve(additional - vacant);
        }
    }

    /// Tries to reserve room for at least `additional` more objects. Returns an error instead of
    /// aborting if the allocator reports a failure. The arena is unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena: TypedArena<u32> = TypedArena::new();
    /// assert!(arena.try_reserve(16).is_ok());
    /// assert!(arena.try_reserve(usize::max_value()).is_err());
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let vacant = self.vacant();
        if additional > vacant {
            self.blocks.try_reserve(additional - vacant)?;
        }
        Ok(())
    }

    /// Allocates an object in the typed arena and returns a `Handle`. The `Handle` can later be
    /// used to retrieve mutable and immutable references to the object, and to deallocate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.size += 1;

        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Handle {
                    index: self.blocks.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_block = mem::replace(&mut self.blocks[handle.index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        handle
                    },
                    Block::Occupied(_) => unreachable!("free list points at an occupied block"),
                }
            },
        }
    }

    /// Deallocates an object in the typed arena and returns the object. Freed blocks are kept for
    /// reuse until the last live object is freed, at which point the storage is released.
    ///
    /// # Panics
    ///
    /// Panics if `handle` corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        if let Block::Vacant(_) = self.blocks[handle.index] {
            panic!("Error: attempting to free vacant block.");
        }
        let old_block = mem::replace(&mut self.blocks[handle.index], Block::Vacant(self.head.take()));
        self.head = Some(handle);
        self.size -= 1;
        if self.size == 0 {
            self.release();
        }
        match old_block {
            Block::Occupied(value) => value,
            Block::Vacant(_) => unreachable!("vacant blocks are rejected above"),
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the
    /// handle does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.blocks.get(handle.index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the handle
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the typed arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the typed arena holds no live objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every object in the typed arena and releases its storage. All outstanding handles
    /// become invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn clear(&mut self) {
        self.release();
        self.size = 0;
    }

    /// Returns the number of objects the typed arena can hold without reallocating, counting
    /// live objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::with_capacity(16);
    /// assert!(arena.capacity() >= 16);
    /// ```
    pub fn capacity(&self) -> usize {
        self.blocks.capacity()
    }

    // Hands the block buffer back to the allocator.
    fn release(&mut self) {
        self.blocks = Vec::new();
        self.head = None;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
