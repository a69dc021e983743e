//! The [`Tuple`] chain and its structural operations.

use std::{
    any::Any,
    collections::hash_map::DefaultHasher,
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
    mem,
};

use thunderdome::{Arena, Index};
use tracing::{debug, trace};

use crate::{
    cursor::{CursorMut, Iter},
    duplicate::Duplicator,
    error::Error,
    value::Value,
};

/// One link of the chain: a payload, which is absent only after it has been removed from a
/// singleton, and the index of the following node.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) value: Option<Value>,
    pub(crate) next: Option<Index>,
}

/// A heterogeneous, singly-linked sequence of [`Value`]s.
///
/// A tuple always holds at least one element. Elements may be appended, inserted, removed and
/// replaced until the tuple is *size-locked*, after which only in-place replacement is allowed.
/// A size-locked tuple may carry a type name, under which it can be registered as a prototype in a
/// [`Registry`](crate::Registry).
///
/// Nodes live in an arena owned by the tuple; the first and last nodes are cached, so
/// [`first`](Tuple::first), [`last`](Tuple::last) and [`ap`](Tuple::ap) take constant time. Every
/// positional operation walks the chain from the front.
///
/// # Examples
///
/// ```
/// use linked_tuple::{Error, Tuple};
///
/// let mut tuple = Tuple::new("a")?;
/// let _ = tuple.ap(3)?.ap(true)?.ap(4.5)?;
/// assert_eq!(tuple.to_string(), "(a, 3, true, 4.5)");
/// assert_eq!(tuple.size(), 4);
///
/// let _ = tuple.lock_size_as("point4d");
/// assert!(matches!(tuple.ap(5), Err(Error::LockedSize)));
/// # Ok::<_, Error>(())
/// ```
pub struct Tuple {
    arena: Arena<Node>,
    root: Index,
    last: Index,
    locked_size: bool,
    type_name: Option<String>,
}

impl Tuple {
    /// Create a tuple holding the single element `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if `value` wraps a [`Tuple`].
    pub fn new(value: impl Into<Value>) -> Result<Self, Error> {
        let value = checked(value.into())?;
        Ok(Tuple::with_root(Some(value)))
    }

    /// Create a tuple holding `values`, in order.
    ///
    /// An empty sequence produces a singleton tuple whose only payload is absent. If the first
    /// value wraps a [`Tuple`], the result is likewise an absent singleton and the rest of the
    /// sequence is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if any value after the first wraps a [`Tuple`].
    ///
    /// ```
    /// use linked_tuple::{Tuple, Value};
    ///
    /// let tuple = Tuple::from_values(vec![1, 2, 3])?;
    /// assert_eq!(tuple.get(2)?, Some(&Value::Int(3)));
    ///
    /// let empty = Tuple::from_values(Vec::<Value>::new())?;
    /// assert_eq!(empty.size(), 1);
    /// assert_eq!(empty.get(0)?, None);
    /// # Ok::<_, linked_tuple::Error>(())
    /// ```
    pub fn from_values<I>(values: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut values = values.into_iter().map(Into::into);
        let mut tuple = match values.next() {
            None => return Ok(Tuple::with_root(None)),
            Some(first) if first.is_tuple() => {
                debug!("first value is a tuple; building an empty tuple instead");
                return Ok(Tuple::with_root(None));
            }
            Some(first) => Tuple::with_root(Some(first)),
        };
        for value in values {
            let _ = tuple.ap(value)?;
        }
        Ok(tuple)
    }

    fn with_root(value: Option<Value>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node { value, next: None });
        Tuple {
            arena,
            root,
            last: root,
            locked_size: false,
            type_name: None,
        }
    }

    /// Link a new node after the last one, without any checks.
    fn push_node(&mut self, value: Option<Value>) {
        let node = self.arena.insert(Node { value, next: None });
        self.arena[self.last].next = Some(node);
        self.last = node;
    }

    /// The number of elements, counting absent payloads.
    pub fn size(&self) -> usize {
        self.arena.len()
    }

    /// The first payload.
    pub fn first(&self) -> Option<&Value> {
        self.arena[self.root].value.as_ref()
    }

    /// The last payload.
    pub fn last(&self) -> Option<&Value> {
        self.arena[self.last].value.as_ref()
    }

    /// Append `value` as the new last element, returning the tuple for further appends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockedSize`] if the tuple is size-locked, or [`Error::InvalidValue`] if
    /// `value` wraps a [`Tuple`].
    pub fn ap(&mut self, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.check_unlocked()?;
        let value = checked(value.into())?;
        trace!(type_name = value.type_name(), "appending value");
        self.push_node(Some(value));
        Ok(self)
    }

    /// Insert `value` so that it becomes the element at `index`, shifting later elements back.
    /// Inserting at `index == self.size()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockedSize`] if the tuple is size-locked, [`Error::InvalidValue`] if
    /// `value` wraps a [`Tuple`], or [`Error::InvalidIndex`] if `index > self.size()`.
    ///
    /// ```
    /// use linked_tuple::Tuple;
    ///
    /// let mut tuple = Tuple::from_values(vec!["a", "b"])?;
    /// tuple.add(0, "x")?;
    /// tuple.add(3, "y")?;
    /// assert_eq!(tuple.to_string(), "(x, a, b, y)");
    /// # Ok::<_, linked_tuple::Error>(())
    /// ```
    pub fn add(&mut self, index: usize, value: impl Into<Value>) -> Result<(), Error> {
        self.check_unlocked()?;
        let value = checked(value.into())?;
        trace!(index, type_name = value.type_name(), "inserting value");

        if index == 0 {
            // The root keeps its place; its old payload moves into a new successor.
            let root = self.root;
            let displaced = self.arena[root].value.replace(value);
            let next = self.arena[root].next;
            let node = self.arena.insert(Node {
                value: displaced,
                next,
            });
            self.arena[root].next = Some(node);
            if self.last == root {
                self.last = node;
            }
        } else {
            let previous = self.seek(index - 1).ok_or(Error::InvalidIndex { index })?;
            let next = self.arena[previous].next;
            let node = self.arena.insert(Node {
                value: Some(value),
                next,
            });
            self.arena[previous].next = Some(node);
            if next.is_none() {
                self.last = node;
            }
        }
        Ok(())
    }

    /// The payload at `index`, which is `None` only if it has been removed from a singleton.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index >= self.size()`.
    pub fn get(&self, index: usize) -> Result<Option<&Value>, Error> {
        let node = self.node_at(index)?;
        Ok(self.arena[node].value.as_ref())
    }

    /// A mutable reference to the payload at `index` as a `T`, or `None` if the payload is absent
    /// or is not a `T`. The payload's type cannot be changed through this reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index >= self.size()`.
    ///
    /// ```
    /// use linked_tuple::{Object, Tuple};
    ///
    /// let mut tuple = Tuple::new(Object::cloneable(vec![1, 2]))?;
    /// tuple.downcast_mut::<Vec<i32>>(0)?.unwrap().push(3);
    /// assert_eq!(tuple.to_string(), "([1, 2, 3])");
    /// # Ok::<_, linked_tuple::Error>(())
    /// ```
    pub fn downcast_mut<T: Any>(&mut self, index: usize) -> Result<Option<&mut T>, Error> {
        let node = self.node_at(index)?;
        Ok(self.arena[node]
            .value
            .as_mut()
            .and_then(|value| value.downcast_mut()))
    }

    /// Remove the element at `index` and return its payload.
    ///
    /// Removing from a singleton leaves the tuple with one absent payload. Removing at
    /// `index == self.size()` removes nothing and returns `None`.
    ///
    /// Later payloads shift forward into the nodes of earlier ones, so a [`CursorMut`] positioned
    /// past `index` keeps its position but sees the value which used to follow it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockedSize`] if the tuple is size-locked, or [`Error::InvalidIndex`] if
    /// `index > self.size()`.
    pub fn remove(&mut self, index: usize) -> Result<Option<Value>, Error> {
        self.check_unlocked()?;
        trace!(index, "removing value");

        if index == 0 {
            let root = self.root;
            return Ok(match self.arena[root].next {
                Some(next) => self.shift_out(root, next),
                None => self.arena[root].value.take(),
            });
        }

        let previous = self.seek(index - 1).ok_or(Error::InvalidIndex { index })?;
        let target = match self.arena[previous].next {
            Some(target) => target,
            None => return Ok(None),
        };
        Ok(match self.arena[target].next {
            Some(next) => self.shift_out(target, next),
            None => {
                self.arena[previous].next = None;
                self.last = previous;
                self.arena.remove(target).and_then(|node| node.value)
            }
        })
    }

    /// Move the payload and link of `successor` into `node`, discard `successor`, and return the
    /// payload `node` held before.
    fn shift_out(&mut self, node: Index, successor: Index) -> Option<Value> {
        let Node { value, next } = self.arena.remove(successor)?;
        if self.last == successor {
            self.last = node;
        }
        let node = &mut self.arena[node];
        node.next = next;
        mem::replace(&mut node.value, value)
    }

    /// Replace the payload at `index` with `value`, returning the previous payload. This is
    /// allowed on size-locked tuples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index >= self.size()`, [`Error::InvalidValue`] if
    /// `value` wraps a [`Tuple`], or [`Error::IncompatibleType`] if `value` is not of the same
    /// type as the payload it would replace. The tuple is unchanged when an error is returned.
    ///
    /// ```
    /// use linked_tuple::{Error, Tuple};
    ///
    /// let mut tuple = Tuple::from_values(vec![1, 2])?;
    /// let _ = tuple.lock_size_as("pair");
    /// let _ = tuple.replace(1, 20)?;
    /// assert_eq!(tuple.to_string(), "(1, 20)");
    /// assert!(matches!(tuple.replace(1, "two"), Err(Error::IncompatibleType { .. })));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn replace(&mut self, index: usize, value: impl Into<Value>) -> Result<Option<Value>, Error> {
        let node = self.node_at(index)?;
        self.set_at(node, value.into())
    }

    /// Replace the payload of `node` after checking the replacement's type. An absent payload
    /// accepts a value of any type.
    pub(crate) fn set_at(&mut self, node: Index, value: Value) -> Result<Option<Value>, Error> {
        let value = checked(value)?;
        let slot = &mut self.arena[node].value;
        if let Some(existing) = slot {
            if !existing.accepts(&value) {
                return Err(Error::IncompatibleType {
                    existing: existing.type_name(),
                    replacement: value.type_name(),
                });
            }
        }
        Ok(slot.replace(value))
    }

    /// Lock the size of this tuple under a blank type name, which always leaves it untouched and
    /// returns `None`. A tuple is only ever locked together with a name, through
    /// [`lock_size_as`](Tuple::lock_size_as).
    ///
    /// ```
    /// use linked_tuple::Tuple;
    ///
    /// let mut tuple = Tuple::from_values(vec![1, 2])?;
    /// assert!(tuple.lock_size().is_none());
    /// assert!(!tuple.is_locked_size());
    /// let _ = tuple.ap(3)?;
    /// # Ok::<_, linked_tuple::Error>(())
    /// ```
    pub fn lock_size(&mut self) -> Option<&mut Self> {
        self.lock_size_as("")
    }

    /// Forbid any further change to the size of this tuple and name its shape `type_name`,
    /// replacing any previous name. Locking cannot be undone.
    ///
    /// Returns `None`, leaving the tuple untouched, if `type_name` is blank.
    ///
    /// ```
    /// use linked_tuple::Tuple;
    ///
    /// let mut tuple = Tuple::from_values(vec![1.0, 2.0])?;
    /// assert!(tuple.lock_size_as("  ").is_none());
    /// assert!(!tuple.is_locked_size());
    ///
    /// assert!(tuple.lock_size_as("point2d").is_some());
    /// assert_eq!(tuple.type_name(), Some("point2d"));
    /// # Ok::<_, linked_tuple::Error>(())
    /// ```
    pub fn lock_size_as(&mut self, type_name: impl Into<String>) -> Option<&mut Self> {
        let type_name = type_name.into();
        if type_name.trim().is_empty() {
            debug!("refusing to lock tuple under a blank type name");
            return None;
        }
        debug!(type_name = %type_name, "locking tuple size");
        self.locked_size = true;
        self.type_name = Some(type_name);
        Some(self)
    }

    /// Whether the size of this tuple is locked.
    pub fn is_locked_size(&self) -> bool {
        self.locked_size
    }

    /// The type name stamped by [`lock_size_as`](Tuple::lock_size_as), if any.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    fn check_unlocked(&self) -> Result<(), Error> {
        if self.locked_size {
            Err(Error::LockedSize)
        } else {
            Ok(())
        }
    }

    /// Produce an independent copy of this tuple, duplicating every payload by the capability its
    /// type declared. Lock state and type name are copied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotCloneable`] if any payload cannot be duplicated; no partial copy is
    /// returned.
    pub fn deep_clone(&self) -> Result<Tuple, Error> {
        self.deep_clone_with(&Duplicator::default())
    }

    /// Like [`deep_clone`](Tuple::deep_clone), but duplicating [`Opaque`](crate::Capability::Opaque)
    /// objects with the fallbacks registered in `duplicator`.
    pub fn deep_clone_with(&self, duplicator: &Duplicator) -> Result<Tuple, Error> {
        let mut values = self
            .iter()
            .map(|value| value.map(|value| duplicator.duplicate(value)).transpose());
        let first = values.next().unwrap_or(Ok(None))?;
        let mut clone = Tuple::with_root(first);
        for value in values {
            clone.push_node(value?);
        }
        clone.locked_size = self.locked_size;
        clone.type_name = self.type_name.clone();
        trace!(size = clone.size(), "cloned tuple");
        Ok(clone)
    }

    /// Like [`deep_clone`](Tuple::deep_clone), but returning `None` instead of an error.
    pub fn deep_clone_silent(&self) -> Option<Tuple> {
        self.deep_clone().ok()
    }

    /// The polynomial hash of this tuple's payloads: starting from 1, each payload's hash is added
    /// to 31 times the running total, with an absent payload counting as 0. Equal tuples have
    /// equal hash codes.
    pub fn hash_code(&self) -> u64 {
        self.iter().fold(1, |hash: u64, value| {
            hash.wrapping_mul(31)
                .wrapping_add(value.map_or(0, hash_value))
        })
    }

    /// Iterate over the payloads in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// A cursor at the first element, for replacing payloads in order.
    pub fn cursor_mut(&mut self) -> CursorMut<'_> {
        let root = self.root;
        CursorMut::new(self, root, 0)
    }

    /// A cursor at the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index >= self.size()`.
    pub fn cursor_mut_at(&mut self, index: usize) -> Result<CursorMut<'_>, Error> {
        let node = self.node_at(index)?;
        Ok(CursorMut::new(self, node, index))
    }

    pub(crate) fn root(&self) -> Index {
        self.root
    }

    pub(crate) fn node(&self, node: Index) -> &Node {
        &self.arena[node]
    }

    fn node_at(&self, index: usize) -> Result<Index, Error> {
        self.seek(index).ok_or(Error::InvalidIndex { index })
    }

    /// Walk `distance` links from the root.
    fn seek(&self, distance: usize) -> Option<Index> {
        let mut current = self.root;
        for _ in 0..distance {
            current = self.arena[current].next?;
        }
        Some(current)
    }
}

fn checked(value: Value) -> Result<Value, Error> {
    if value.is_tuple() {
        Err(Error::InvalidValue)
    } else {
        Ok(value)
    }
}

fn hash_value(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Tuples are equal when they hold equal payloads in the same order and have the same lock state.
/// Type names are compared only when both tuples have one.
impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        let same_names = match (&self.type_name, &other.type_name) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => true,
        };
        self.locked_size == other.locked_size && same_names && self.iter().eq(other.iter())
    }
}

impl Hash for Tuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

/// Renders as `(a, 3, true, 4.5)`, with absent payloads shown as `None`.
impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(value) => write!(f, "{}", value)?,
                None => f.write_str("None")?,
            }
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tuple")
            .field("values", &self.iter().collect::<Vec<_>>())
            .field("locked_size", &self.locked_size)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = Option<&'a Value>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<Value>> for Tuple {
    type Error = Error;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        Tuple::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;

    fn tuple_of(values: &[&str]) -> Tuple {
        Tuple::from_values(values.iter().copied()).unwrap()
    }

    fn assert_links(tuple: &Tuple) {
        let mut count = 1;
        let mut current = tuple.root;
        while let Some(next) = tuple.arena[current].next {
            current = next;
            count += 1;
        }
        assert_eq!(current, tuple.last, "last is not the end of the chain");
        assert_eq!(count, tuple.size(), "arena holds unlinked nodes");
    }

    #[test]
    fn append_moves_last() {
        let mut tuple = Tuple::new("a").unwrap();
        let _ = tuple.ap(3).unwrap().ap(true).unwrap().ap(4.5).unwrap();
        assert_links(&tuple);
        assert_eq!(tuple.last(), Some(&Value::Float(4.5)));
        assert_eq!(tuple.to_string(), "(a, 3, true, 4.5)");
    }

    #[test]
    fn insert_at_front_of_singleton() {
        let mut tuple = tuple_of(&["a"]);
        tuple.add(0, "x").unwrap();
        assert_links(&tuple);
        assert_eq!(tuple.to_string(), "(x, a)");
        assert_eq!(tuple.last(), Some(&Value::from("a")));
    }

    #[test]
    fn insert_in_middle_and_at_end() {
        let mut tuple = tuple_of(&["a", "c"]);
        tuple.add(1, "b").unwrap();
        tuple.add(3, "d").unwrap();
        assert_links(&tuple);
        assert_eq!(tuple.to_string(), "(a, b, c, d)");
        assert!(matches!(tuple.add(5, "f"), Err(Error::InvalidIndex { index: 5 })));
        assert_eq!(tuple.size(), 4);
    }

    #[test]
    fn remove_from_front_shifts_payloads() {
        let mut tuple = tuple_of(&["a", "b"]);
        assert_eq!(tuple.remove(0).unwrap(), Some(Value::from("a")));
        assert_links(&tuple);
        assert_eq!(tuple.to_string(), "(b)");
        assert_eq!(tuple.last(), Some(&Value::from("b")));
    }

    #[test]
    fn remove_before_tail_moves_last() {
        let mut tuple = tuple_of(&["a", "b", "c"]);
        assert_eq!(tuple.remove(1).unwrap(), Some(Value::from("b")));
        assert_links(&tuple);
        assert_eq!(tuple.last(), Some(&Value::from("c")));
        assert_eq!(tuple.remove(1).unwrap(), Some(Value::from("c")));
        assert_links(&tuple);
        assert_eq!(tuple.to_string(), "(a)");
    }

    #[test]
    fn remove_past_the_end() {
        let mut tuple = tuple_of(&["a", "b"]);
        assert_eq!(tuple.remove(2).unwrap(), None);
        assert!(matches!(tuple.remove(3), Err(Error::InvalidIndex { index: 3 })));
        assert_eq!(tuple.size(), 2);
    }

    #[test]
    fn remove_from_singleton_leaves_absent_payload() {
        let mut tuple = tuple_of(&["a"]);
        assert_eq!(tuple.remove(0).unwrap(), Some(Value::from("a")));
        assert_eq!(tuple.size(), 1);
        assert_eq!(tuple.get(0).unwrap(), None);
        assert_eq!(tuple.to_string(), "(None)");
        assert_eq!(tuple.remove(0).unwrap(), None);
    }

    #[test]
    fn tuples_never_nest() {
        let inner = tuple_of(&["a"]);
        assert!(matches!(Tuple::new(Object::opaque(inner)), Err(Error::InvalidValue)));

        let mut tuple = tuple_of(&["a"]);
        let inner = Value::from(Object::opaque(tuple_of(&["b"])));
        assert!(matches!(tuple.ap(inner), Err(Error::InvalidValue)));
        let inner = Value::from(Object::opaque(tuple_of(&["b"])));
        assert!(matches!(tuple.add(0, inner), Err(Error::InvalidValue)));
        assert_eq!(tuple.to_string(), "(a)");
    }

    #[test]
    fn tuple_first_in_sequence_is_dropped() {
        let values = vec![Value::from(Object::opaque(tuple_of(&["a"]))), Value::from(1)];
        let tuple = Tuple::from_values(values).unwrap();
        assert_eq!(tuple.size(), 1);
        assert_eq!(tuple.first(), None);

        let values = vec![Value::from(1), Value::from(Object::opaque(tuple_of(&["a"])))];
        assert!(matches!(Tuple::from_values(values), Err(Error::InvalidValue)));
    }

    #[test]
    fn replace_checks_types() {
        let mut tuple = Tuple::from_values(vec![Value::from(1), Value::from("two")]).unwrap();
        match tuple.replace(1, 99) {
            Err(Error::IncompatibleType {
                existing,
                replacement,
            }) => {
                assert_eq!(existing, "alloc::string::String");
                assert_eq!(replacement, "i64");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(tuple.replace(0, 7).unwrap(), Some(Value::from(1)));
        assert_eq!(tuple.to_string(), "(7, two)");
    }

    #[test]
    fn absent_payload_accepts_anything() {
        let mut tuple = tuple_of(&["a"]);
        let _ = tuple.remove(0).unwrap();
        assert_eq!(tuple.replace(0, 5).unwrap(), None);
        assert_eq!(tuple.first(), Some(&Value::Int(5)));
    }

    #[test]
    fn locked_tuples_refuse_structural_changes() {
        let mut tuple = tuple_of(&["a", "b"]);
        let _ = tuple.lock_size_as("pair");
        assert!(tuple.is_locked_size());
        assert_eq!(tuple.type_name(), Some("pair"));
        assert!(matches!(tuple.ap("c"), Err(Error::LockedSize)));
        assert!(matches!(tuple.add(0, "c"), Err(Error::LockedSize)));
        assert!(matches!(tuple.remove(0), Err(Error::LockedSize)));
        assert_eq!(tuple.to_string(), "(a, b)");
    }

    #[test]
    fn locking_without_a_name_does_nothing() {
        let mut tuple = Tuple::from_values(vec![1, 2]).unwrap();
        assert!(tuple.lock_size().is_none());
        assert!(!tuple.is_locked_size());
        assert_eq!(tuple.type_name(), None);
        let _ = tuple.ap(3).unwrap();
        assert_eq!(tuple.to_string(), "(1, 2, 3)");

        assert!(tuple.lock_size_as("triple").is_some());
        assert!(tuple.lock_size().is_none());
        assert!(tuple.is_locked_size());
        assert_eq!(tuple.type_name(), Some("triple"));
    }

    #[test]
    fn equality() {
        let mut named = tuple_of(&["a", "b"]);
        let mut unnamed = tuple_of(&["a", "b"]);
        assert_eq!(named, unnamed);

        let _ = named.lock_size_as("pair");
        assert_ne!(named, unnamed);
        let _ = unnamed.lock_size();
        assert_ne!(named, unnamed);
        let _ = unnamed.lock_size_as("pair");
        assert_eq!(named, unnamed);

        let mut other = tuple_of(&["a", "b"]);
        let _ = other.lock_size_as("couple");
        assert_ne!(named, other);

        assert_ne!(tuple_of(&["a"]), tuple_of(&["a", "b"]));
        assert_ne!(tuple_of(&["a", "b"]), tuple_of(&["a"]));
    }

    #[test]
    fn hash_code_is_polynomial() {
        let tuple = tuple_of(&["a", "b"]);
        let expected = 31_u64
            .wrapping_add(hash_value(&Value::from("a")))
            .wrapping_mul(31)
            .wrapping_add(hash_value(&Value::from("b")));
        assert_eq!(tuple.hash_code(), expected);

        let mut absent = tuple_of(&["a"]);
        let _ = absent.remove(0).unwrap();
        assert_eq!(absent.hash_code(), 31);
    }

    #[test]
    fn deep_clone_is_independent() {
        let mut tuple = Tuple::new(Object::cloneable(vec![1])).unwrap();
        let _ = tuple.ap("x").unwrap();
        let _ = tuple.lock_size_as("list");
        let mut clone = tuple.deep_clone().unwrap();
        assert_eq!(clone, tuple);
        assert_links(&clone);

        clone.downcast_mut::<Vec<i32>>(0).unwrap().unwrap().push(2);
        assert_eq!(tuple.to_string(), "([1], x)");
        assert_eq!(clone.to_string(), "([1, 2], x)");
        assert_eq!(clone.type_name(), Some("list"));
    }

    #[test]
    fn deep_clone_fails_as_a_whole() {
        #[derive(Debug, PartialEq)]
        struct Handle;

        let tuple = Tuple::from_values(vec![Value::from(1), Value::from(Object::opaque(Handle))])
            .unwrap();
        assert!(matches!(tuple.deep_clone(), Err(Error::NotCloneable { .. })));
        assert!(tuple.deep_clone_silent().is_none());
    }
}
