//! Immutable singly-linked list with structural sharing.
//!
//! Nodes live in a [`Bump`] arena and are never mutated after allocation, so
//! prepending is a single allocation and every older view of the list stays
//! valid. The whole list is freed when the arena is reset.
//!
//! Elements are held by reference and membership is decided by identity: two
//! equal but distinct values are different elements.
//!
//! # Example
//!
//! ```
//! use rs_asteroids::collections::PersistentList;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let (a, b) = (1, 1);
//!
//! let empty = PersistentList::empty();
//! let one = empty.prepend(&arena, &a);
//! let two = one.prepend(&arena, &b);
//!
//! assert_eq!(empty.size(), 0);
//! assert_eq!(one.size(), 1);
//! assert_eq!(two.size(), 2);
//! assert!(two.contains(&a));
//! assert!(!one.contains(&b)); // same value, different object
//! ```
use std::fmt;
use std::ptr;

use bumpalo::Bump;

use crate::utils::AsteroidError;

struct ListNode<'a, T> {
    head: &'a T,
    tail: PersistentList<'a, T>,
    size: usize,
}

/// An immutable list of `&'a T`, either empty or a head followed by a tail list.
pub struct PersistentList<'a, T> {
    node: Option<&'a ListNode<'a, T>>,
}

impl<'a, T> PersistentList<'a, T> {
    /// The empty list. Every empty list is the same value.
    pub const fn empty() -> Self {
        PersistentList { node: None }
    }

    /// Returns a new list with `elt` in front of `self`. `self` is left untouched
    /// and becomes the tail of the result.
    pub fn prepend(&self, arena: &'a Bump, elt: &'a T) -> PersistentList<'a, T> {
        let node: &'a ListNode<'a, T> = arena.alloc(ListNode {
            head: elt,
            tail: *self,
            size: self.size() + 1,
        });
        PersistentList { node: Some(node) }
    }

    /// The first element.
    ///
    /// # Errors
    ///
    /// Returns [`AsteroidError::EmptyCollection`] for the empty list.
    pub fn head(&self) -> Result<&'a T, AsteroidError> {
        self.node.map(|n| n.head).ok_or(AsteroidError::EmptyCollection)
    }

    /// Everything but the first element.
    ///
    /// # Errors
    ///
    /// Returns [`AsteroidError::EmptyCollection`] for the empty list.
    pub fn tail(&self) -> Result<PersistentList<'a, T>, AsteroidError> {
        self.node.map(|n| n.tail).ok_or(AsteroidError::EmptyCollection)
    }

    pub fn size(&self) -> usize {
        self.node.map_or(0, |n| n.size)
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// Returns true if this exact object (not merely an equal one) is in the list. O(size).
    pub fn contains(&self, elt: &T) -> bool {
        self.iter().any(|o| ptr::eq(o, elt))
    }

    /// Iterates from head to tail.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter { current: *self }
    }
}

impl<T> Clone for PersistentList<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PersistentList<'_, T> {}

impl<T> Default for PersistentList<'_, T> {
    fn default() -> Self {
        PersistentList::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Head-to-tail iterator over a [`PersistentList`].
pub struct Iter<'a, T> {
    current: PersistentList<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.current.node?;
        self.current = node.tail;
        Some(node.head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.current.size();
        (size, Some(size))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for PersistentList<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
