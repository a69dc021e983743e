//! The deep-clone engine: how each element of a tuple is duplicated.
//!
//! Every [`Value`] has a [`Capability`]. Plain data is copied; an [`Object`] is duplicated by the
//! strategy it declared when it was constructed. Objects which declared none are looked up by type
//! in a [`Duplicator`], which holds fallback strategies for types that cannot (or do not) declare
//! their own.

use std::{
    any::{self, Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use tracing::trace;

use crate::{
    error::Error,
    object::{Element, Object},
    value::Value,
};

#[cfg(feature = "serde")]
use crate::format::Format;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The way a value is duplicated during a deep clone, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Immutable or trivially copyable data, duplicated by copying.
    Plain,
    /// A value with its own cloning operation.
    SelfClone,
    /// A value duplicated by a serialization round trip.
    Duplicable,
    /// A value with no way to duplicate itself.
    Opaque,
}

/// A strategy for duplicating values of type `T`, fixed when an [`Object`] is constructed.
pub(crate) trait Strategy<T>: Clone + Send + Sync + 'static {
    const CAPABILITY: Capability;

    fn duplicate(&self, value: &T) -> Result<T, Error>;
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Copied;

impl<T: Copy> Strategy<T> for Copied {
    const CAPABILITY: Capability = Capability::Plain;

    fn duplicate(&self, value: &T) -> Result<T, Error> {
        Ok(*value)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Cloned;

impl<T: Clone> Strategy<T> for Cloned {
    const CAPABILITY: Capability = Capability::SelfClone;

    fn duplicate(&self, value: &T) -> Result<T, Error> {
        Ok(value.clone())
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy)]
pub(crate) struct RoundTrip<F>(pub(crate) F);

#[cfg(feature = "serde")]
impl<T, F> Strategy<T> for RoundTrip<F>
where
    T: Serialize + for<'a> Deserialize<'a>,
    F: Format + Clone + Send + Sync + 'static,
{
    const CAPABILITY: Capability = Capability::Duplicable;

    fn duplicate(&self, value: &T) -> Result<T, Error> {
        self.0
            .clone()
            .round_trip(value)
            .map_err(|source| Error::NotCloneable {
                type_name: any::type_name::<T>(),
                source: Some(source),
            })
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Opaque;

impl<T> Strategy<T> for Opaque {
    const CAPABILITY: Capability = Capability::Opaque;

    fn duplicate(&self, _: &T) -> Result<T, Error> {
        Err(Error::not_cloneable(any::type_name::<T>()))
    }
}

type FallbackFn = dyn Fn(&dyn Any) -> Result<Box<dyn Any + Send + Sync>, Error> + Send + Sync;

#[derive(Derivative, Clone)]
#[derivative(Debug)]
struct Fallback {
    type_name: &'static str,
    #[derivative(Debug = "ignore")]
    duplicate: Arc<FallbackFn>,
}

/// The dispatch table used to duplicate values during a deep clone.
///
/// Values are duplicated by the first capability that applies, in this order:
///
/// 1. plain data is copied;
/// 2. an object's own cloning operation, if it declared one;
/// 3. an object's own serialization round trip, if it declared one;
/// 4. a fallback registered in this table for the object's type.
///
/// If none applies, duplication fails with [`Error::NotCloneable`].
///
/// # Examples
///
/// ```
/// use linked_tuple::{Duplicator, Error, Object, Tuple};
///
/// #[derive(Debug, PartialEq)]
/// struct Handle(u32);
///
/// let tuple = Tuple::new(Object::opaque(Handle(7)))?;
/// assert!(matches!(tuple.deep_clone(), Err(Error::NotCloneable { .. })));
///
/// let mut duplicator = Duplicator::new();
/// let _ = duplicator.register(|handle: &Handle| Handle(handle.0));
/// assert_eq!(tuple.deep_clone_with(&duplicator)?, tuple);
/// # Ok::<_, Error>(())
/// ```
#[derive(Derivative, Clone, Default)]
#[derivative(Debug)]
pub struct Duplicator {
    fallbacks: HashMap<TypeId, Fallback>,
}

impl Duplicator {
    /// An empty table: only objects' own capabilities are used.
    pub fn new() -> Self {
        Duplicator::default()
    }

    /// Duplicate opaque objects of type `T` by calling `duplicate`. Replaces any fallback already
    /// registered for `T`.
    pub fn register<T, F>(&mut self, duplicate: F) -> &mut Self
    where
        T: Element,
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        self.insert::<T>(Arc::new(move |value: &dyn Any| {
            let value = value
                .downcast_ref::<T>()
                .ok_or_else(|| Error::not_cloneable(any::type_name::<T>()))?;
            Ok(Box::new(duplicate(value)) as Box<dyn Any + Send + Sync>)
        }))
    }

    /// Duplicate opaque objects of type `T` using their [`Clone`] implementation.
    pub fn register_clone<T: Element + Clone>(&mut self) -> &mut Self {
        self.register(T::clone)
    }

    /// Duplicate opaque objects of type `T` by a round trip through `format`.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn register_round_trip<T, F>(&mut self, format: F) -> &mut Self
    where
        T: Element + Serialize + for<'a> Deserialize<'a>,
        F: Format + Clone + Send + Sync + 'static,
    {
        let strategy = RoundTrip(format);
        self.insert::<T>(Arc::new(move |value: &dyn Any| {
            let value = value
                .downcast_ref::<T>()
                .ok_or_else(|| Error::not_cloneable(any::type_name::<T>()))?;
            let copy: T = strategy.duplicate(value)?;
            Ok(Box::new(copy) as Box<dyn Any + Send + Sync>)
        }))
    }

    /// Whether a fallback is registered for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.fallbacks.contains_key(&TypeId::of::<T>())
    }

    fn insert<T: Element>(&mut self, duplicate: Arc<FallbackFn>) -> &mut Self {
        let fallback = Fallback {
            type_name: any::type_name::<T>(),
            duplicate,
        };
        let _ = self.fallbacks.insert(TypeId::of::<T>(), fallback);
        self
    }

    /// Produce an independent copy of `value`.
    pub fn duplicate(&self, value: &Value) -> Result<Value, Error> {
        Ok(match value {
            Value::Bool(b) => Value::Bool(*b),
            Value::Char(c) => Value::Char(*c),
            Value::Int(i) => Value::Int(*i),
            Value::Float(x) => Value::Float(*x),
            Value::Text(s) => Value::Text(s.clone()),
            Value::Type(tag) => Value::Type(*tag),
            Value::Object(object) => Value::Object(self.duplicate_object(object)?),
        })
    }

    fn duplicate_object(&self, object: &Object) -> Result<Object, Error> {
        if object.capability() != Capability::Opaque {
            return object.duplicate();
        }

        let fallback = self
            .fallbacks
            .get(&object.value_type_id())
            .ok_or_else(|| Error::not_cloneable(object.type_name()))?;
        trace!(type_name = fallback.type_name, "duplicating through fallback");
        let copy = (fallback.duplicate)(object.as_any())?;
        object
            .rewrap(copy)
            .ok_or_else(|| Error::not_cloneable(object.type_name()))
    }
}
