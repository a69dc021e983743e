use std::{
    any::{self, Any, TypeId},
    fmt,
};

use crate::{
    duplicate::{Capability, Cloned, Copied, Opaque, Strategy},
    error::Error,
};

#[cfg(feature = "serde")]
use crate::{duplicate::RoundTrip, format::Format};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The bounds every type held in an [`Object`] must satisfy: it can be compared, printed, and
/// shared between threads.
///
/// This is implemented automatically for every type which meets these bounds.
pub trait Element: Any + Send + Sync + fmt::Debug + PartialEq {}

impl<T: Any + Send + Sync + fmt::Debug + PartialEq> Element for T {}

/// A dynamically typed value of any [`Element`] type, together with the [`Capability`] it declared
/// for duplicating itself.
///
/// The capability is chosen when the object is constructed, by picking the constructor matching
/// what the type supports:
///
/// | Constructor | Requires | Capability |
/// | :---------- | :------- | :--------- |
/// | [`Object::plain`] | [`Copy`] | [`Capability::Plain`] |
/// | [`Object::cloneable`] | [`Clone`] | [`Capability::SelfClone`] |
/// | [`Object::duplicable`], [`Object::duplicable_with`] | `Serialize + Deserialize` | [`Capability::Duplicable`] |
/// | [`Object::opaque`] | nothing | [`Capability::Opaque`] |
///
/// # Examples
///
/// ```
/// use linked_tuple::{Capability, Object};
///
/// let mut object = Object::cloneable(vec![1, 2, 3]);
/// assert_eq!(object.capability(), Capability::SelfClone);
///
/// object.downcast_mut::<Vec<i32>>().unwrap().push(4);
/// assert_eq!(object.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3, 4]));
/// assert!(object.downcast_ref::<String>().is_none());
/// ```
pub struct Object {
    payload: Box<dyn Payload>,
}

impl Object {
    fn new<T: Element, S: Strategy<T>>(value: T, strategy: S) -> Self {
        Object {
            payload: Box::new(Slot { value, strategy }),
        }
    }

    /// Wrap a value which is duplicated by copying its bits.
    pub fn plain<T: Element + Copy>(value: T) -> Self {
        Object::new(value, Copied)
    }

    /// Wrap a value which is duplicated by its own [`Clone`] implementation.
    pub fn cloneable<T: Element + Clone>(value: T) -> Self {
        Object::new(value, Cloned)
    }

    /// Wrap a value which is duplicated by serializing it with `format` and deserializing the
    /// result.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn duplicable_with<T, F>(value: T, format: F) -> Self
    where
        T: Element + Serialize + for<'a> Deserialize<'a>,
        F: Format + Clone + Send + Sync + 'static,
    {
        Object::new(value, RoundTrip(format))
    }

    /// Wrap a value which is duplicated by a round trip through the
    /// [`DefaultFormat`](crate::format::DefaultFormat).
    ///
    /// ```
    /// use linked_tuple::{Capability, Object};
    /// use serde_crate::{Deserialize, Serialize};
    ///
    /// #[derive(Debug, PartialEq, Serialize, Deserialize)]
    /// #[serde(crate = "serde_crate")]
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// let point = Object::duplicable(Point { x: 1, y: 2 });
    /// assert_eq!(point.capability(), Capability::Duplicable);
    /// ```
    #[cfg(any(feature = "json", feature = "bincode"))]
    #[cfg_attr(docsrs, doc(cfg(any(feature = "json", feature = "bincode"))))]
    pub fn duplicable<T>(value: T) -> Self
    where
        T: Element + Serialize + for<'a> Deserialize<'a>,
    {
        Object::duplicable_with(value, crate::format::DefaultFormat::default())
    }

    /// Wrap a value which declares no way of duplicating itself. A deep clone of a tuple holding it
    /// fails with [`Error::NotCloneable`], unless the [`Duplicator`](crate::Duplicator) in use has
    /// a fallback registered for its type.
    pub fn opaque<T: Element>(value: T) -> Self {
        Object::new(value, Opaque)
    }

    /// The capability this object declared for duplicating itself.
    pub fn capability(&self) -> Capability {
        self.payload.capability()
    }

    /// The name of the type of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.payload.type_name()
    }

    /// Whether the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value_type_id() == TypeId::of::<T>()
    }

    /// A reference to the wrapped value, if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.as_any().downcast_ref()
    }

    /// A mutable reference to the wrapped value, if it is a `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.as_any_mut().downcast_mut()
    }

    /// Unwrap the value if it is a `T`, or give the object back if it is not.
    pub fn downcast<T: Any>(self) -> Result<T, Object> {
        if self.is::<T>() {
            match self.payload.into_any().downcast() {
                Ok(value) => Ok(*value),
                Err(_) => unreachable!("type checked before downcasting"),
            }
        } else {
            Err(self)
        }
    }

    pub(crate) fn value_type_id(&self) -> TypeId {
        self.payload.value_type_id()
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        self.payload.as_any()
    }

    pub(crate) fn as_any_mut(&mut self) -> &mut dyn Any {
        self.payload.as_any_mut()
    }

    /// Duplicate this object using its own declared capability.
    pub(crate) fn duplicate(&self) -> Result<Object, Error> {
        Ok(Object {
            payload: self.payload.duplicate()?,
        })
    }

    /// Build an object of the same type and capability as this one around a new value produced
    /// by a fallback strategy. Returns `None` if `value` is not of this object's type.
    pub(crate) fn rewrap(&self, value: Box<dyn Any + Send + Sync>) -> Option<Object> {
        self.payload
            .rewrap(value)
            .map(|payload| Object { payload })
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.payload.eq_payload(other.payload.as_any())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Object").field(self.payload.debug()).finish()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.payload.debug(), f)
    }
}

/// The type-erased operations on the value inside an [`Object`].
trait Payload: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn value_type_id(&self) -> TypeId;
    fn type_name(&self) -> &'static str;
    fn capability(&self) -> Capability;
    fn duplicate(&self) -> Result<Box<dyn Payload>, Error>;
    fn rewrap(&self, value: Box<dyn Any + Send + Sync>) -> Option<Box<dyn Payload>>;
    fn eq_payload(&self, other: &dyn Any) -> bool;
    fn debug(&self) -> &dyn fmt::Debug;
}

struct Slot<T, S> {
    value: T,
    strategy: S,
}

impl<T: Element, S: Strategy<T>> Payload for Slot<T, S> {
    fn as_any(&self) -> &dyn Any {
        &self.value
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.value
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.value)
    }

    fn value_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }

    fn capability(&self) -> Capability {
        S::CAPABILITY
    }

    fn duplicate(&self) -> Result<Box<dyn Payload>, Error> {
        Ok(Box::new(Slot {
            value: self.strategy.duplicate(&self.value)?,
            strategy: self.strategy.clone(),
        }))
    }

    fn rewrap(&self, value: Box<dyn Any + Send + Sync>) -> Option<Box<dyn Payload>> {
        let value = value.downcast::<T>().ok()?;
        Some(Box::new(Slot {
            value: *value,
            strategy: self.strategy.clone(),
        }))
    }

    fn eq_payload(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<T>()
            .map_or(false, |other| &self.value == other)
    }

    fn debug(&self) -> &dyn fmt::Debug {
        &self.value
    }
}
