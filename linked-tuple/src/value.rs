use std::{
    any::{self, Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
    mem,
};

use crate::{duplicate::Capability, object::Object, tuple::Tuple};

/// A runtime descriptor of a Rust type, usable as a plain value inside a tuple.
///
/// Two tags are equal exactly when they describe the same type.
///
/// # Examples
///
/// ```
/// use linked_tuple::TypeTag;
///
/// assert_eq!(TypeTag::of::<u8>(), TypeTag::of::<u8>());
/// assert_ne!(TypeTag::of::<u8>(), TypeTag::of::<i8>());
/// assert_eq!(TypeTag::of::<bool>().name(), "bool");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// The tag describing `T`.
    pub fn of<T: ?Sized + Any>() -> Self {
        TypeTag {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// The [`TypeId`] of the described type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The name of the described type, as given by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The payload of one element of a [`Tuple`].
///
/// Booleans, characters, integers, floats, text and type descriptors are *plain* data: they are
/// held directly and duplicated by copying. Anything else is held as an [`Object`], which records
/// how (and whether) it can be duplicated.
///
/// Values are built with [`From`] conversions from the common primitive types:
///
/// ```
/// use linked_tuple::Value;
///
/// assert_eq!(Value::from(3_u8), Value::Int(3));
/// assert_eq!(Value::from("a"), Value::Text("a".to_string()));
/// assert_eq!(Value::from(4.5_f32).to_string(), "4.5");
/// ```
#[derive(Debug)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A character.
    Char(char),
    /// A signed integer; every integer type up to 32 bits, and `i64`, converts into this.
    Int(i64),
    /// A floating-point number. Floats compare and hash by their bit pattern, so `NaN` equals
    /// itself and `0.0` differs from `-0.0`.
    Float(f64),
    /// A string.
    Text(String),
    /// A type descriptor.
    Type(TypeTag),
    /// Any other value.
    Object(Object),
}

impl Value {
    /// The name of the runtime type of this value.
    ///
    /// ```
    /// use linked_tuple::{Object, Value};
    ///
    /// assert_eq!(Value::from(true).type_name(), "bool");
    /// let list = Value::from(Object::cloneable(vec![1_u8]));
    /// assert_eq!(list.type_name(), std::any::type_name::<Vec<u8>>());
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => any::type_name::<bool>(),
            Value::Char(_) => any::type_name::<char>(),
            Value::Int(_) => any::type_name::<i64>(),
            Value::Float(_) => any::type_name::<f64>(),
            Value::Text(_) => any::type_name::<String>(),
            Value::Type(_) => any::type_name::<TypeTag>(),
            Value::Object(object) => object.type_name(),
        }
    }

    /// How this value is duplicated during a deep clone.
    pub fn capability(&self) -> Capability {
        match self {
            Value::Object(object) => object.capability(),
            _ => Capability::Plain,
        }
    }

    /// Whether `replacement` may take the place of this value: it must have the same runtime type.
    ///
    /// ```
    /// use linked_tuple::Value;
    ///
    /// assert!(Value::from(1).accepts(&Value::from(99_u8)));
    /// assert!(!Value::from("two").accepts(&Value::from(99)));
    /// ```
    pub fn accepts(&self, replacement: &Value) -> bool {
        match (self, replacement) {
            (Value::Object(existing), Value::Object(replacement)) => {
                existing.value_type_id() == replacement.value_type_id()
            }
            _ => mem::discriminant(self) == mem::discriminant(replacement),
        }
    }

    /// Whether this value is a [`Tuple`] in disguise, which may never become an element.
    pub(crate) fn is_tuple(&self) -> bool {
        match self {
            Value::Object(object) => object.is::<Tuple>(),
            _ => false,
        }
    }

    /// The boolean held by this value, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The character held by this value, if it is one.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// The integer held by this value, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The float held by this value, if it is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The text held by this value, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The type descriptor held by this value, if it is one.
    pub fn as_type(&self) -> Option<TypeTag> {
        match self {
            Value::Type(tag) => Some(*tag),
            _ => None,
        }
    }

    /// The object held by this value, if it is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// A reference to the payload as a `T`, if it is one. Plain data is reachable through its
    /// representation type (`bool`, `char`, `i64`, `f64`, `String` or [`TypeTag`]).
    ///
    /// ```
    /// use linked_tuple::Value;
    ///
    /// assert_eq!(Value::from(7).downcast_ref::<i64>(), Some(&7));
    /// assert_eq!(Value::from(7).downcast_ref::<i32>(), None);
    /// ```
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// A mutable reference to the payload as a `T`, if it is one. The payload's type cannot be
    /// changed through this reference.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    fn as_any(&self) -> &dyn Any {
        match self {
            Value::Bool(b) => b,
            Value::Char(c) => c,
            Value::Int(i) => i,
            Value::Float(x) => x,
            Value::Text(s) => s,
            Value::Type(tag) => tag,
            Value::Object(object) => object.as_any(),
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        match self {
            Value::Bool(b) => b,
            Value::Char(c) => c,
            Value::Int(i) => i,
            Value::Float(x) => x,
            Value::Text(s) => s,
            Value::Type(tag) => tag,
            Value::Object(object) => object.as_any_mut(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Objects contribute only their type to the hash, so that any two equal values hash equally
/// without requiring [`Hash`] of every object type.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(x) => x.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Type(tag) => tag.hash(state),
            Value::Object(object) => object.value_type_id().hash(state),
        }
    }
}

/// Plain data displays as itself; objects display their [`Debug`](fmt::Debug) form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
            Value::Type(tag) => write!(f, "{}", tag),
            Value::Object(object) => write!(f, "{}", object),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident: $($from:ty),+) => {
        $(
            impl From<$from> for Value {
                fn from(value: $from) -> Self {
                    Value::$variant(value.into())
                }
            }
        )+
    };
}

impl_from!(Bool: bool);
impl_from!(Char: char);
impl_from!(Int: i8, i16, i32, i64, u8, u16, u32);
impl_from!(Float: f32, f64);
impl_from!(Text: String, &str);
impl_from!(Type: TypeTag);
impl_from!(Object: Object);
