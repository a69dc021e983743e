//! Iteration and cursor traversal over the elements of a [`Tuple`].

use thunderdome::Index;

use crate::{error::Error, tuple::Tuple, value::Value};

/// An iterator over the payloads of a [`Tuple`], created by [`Tuple::iter`].
///
/// Each item is `None` exactly when the payload at that position is absent.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    tuple: &'a Tuple,
    next: Option<Index>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(tuple: &'a Tuple) -> Self {
        Iter {
            tuple,
            next: Some(tuple.root()),
            remaining: tuple.size(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Option<&'a Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tuple.node(self.next?);
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.value.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

/// A cursor over the elements of a [`Tuple`] which replaces payloads in place, created by
/// [`Tuple::cursor_mut`] or [`Tuple::cursor_mut_at`].
///
/// After the last element, the cursor wraps around to the first, so a tuple of known shape can be
/// refilled with a chain of [`set`](CursorMut::set) calls.
///
/// # Examples
///
/// ```
/// use linked_tuple::Tuple;
///
/// let mut tuple = Tuple::from_values(vec![1.0, 2.0, 3.0])?;
/// let _ = tuple.lock_size_as("point3d");
///
/// let mut cursor = tuple.cursor_mut();
/// let _ = cursor.set(4.0)?.set(5.0)?.set(6.0)?;
/// assert!(cursor.is_at_root());
/// let _ = cursor.set(7.0)?;
/// assert_eq!(cursor.position(), 1);
///
/// assert_eq!(tuple.to_string(), "(7, 5, 6)");
/// # Ok::<_, linked_tuple::Error>(())
/// ```
#[derive(Debug)]
pub struct CursorMut<'a> {
    tuple: &'a mut Tuple,
    node: Index,
    position: usize,
}

impl<'a> CursorMut<'a> {
    pub(crate) fn new(tuple: &'a mut Tuple, node: Index, position: usize) -> Self {
        CursorMut {
            tuple,
            node,
            position,
        }
    }

    /// The index of the element under the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the cursor is at the first element.
    pub fn is_at_root(&self) -> bool {
        self.node == self.tuple.root()
    }

    /// The payload under the cursor.
    pub fn current(&self) -> Option<&Value> {
        self.tuple.node(self.node).value.as_ref()
    }

    /// Replace the payload under the cursor, then move to the next element, wrapping around to
    /// the first after the last.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if `value` wraps a [`Tuple`], or
    /// [`Error::IncompatibleType`] if `value` is not of the same type as the payload it would
    /// replace. On error, neither the payload nor the cursor moves.
    pub fn set(&mut self, value: impl Into<Value>) -> Result<&mut Self, Error> {
        let _ = self.tuple.set_at(self.node, value.into())?;
        self.move_next();
        Ok(self)
    }

    /// Move to the next element, wrapping around to the first after the last.
    pub fn move_next(&mut self) {
        match self.tuple.node(self.node).next {
            Some(next) => {
                self.node = next;
                self.position += 1;
            }
            None => {
                self.node = self.tuple.root();
                self.position = 0;
            }
        }
    }
}
