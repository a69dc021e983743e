//! Serialization formats used to duplicate values which have no cloning operation of their own,
//! by serializing them and deserializing a fresh, independent copy.
//!
//! By default, only the `"json"` format is enabled. To enable another format, use its corresponding
//! feature when listing this crate in your `Cargo.toml`. For instance, to enable Bincode support:
//!
//! ```toml
//! [dependencies]
//! linked-tuple = { version = "...", features = ["bincode"] }
//! ```
//!
//! The currently supported formats are:
//!
//! - `"json"`, via the [`serde_json`] crate
//! - `"bincode"`, via the [`bincode`](bincode_crate) crate
//!
//! Any other format can be used by implementing [`Serializer`] and [`Deserializer`] for it.

use serde_crate::{Deserialize, Serialize};

use crate::error::BoxError;

#[cfg(feature = "bincode")]
mod bincode;
#[cfg(feature = "bincode")]
pub use self::bincode::*;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "json")]
pub use self::json::*;

/// The format used by [`Object::duplicable`](crate::Object::duplicable) when no format is given.
#[cfg(feature = "json")]
pub type DefaultFormat = Json;

/// The format used by [`Object::duplicable`](crate::Object::duplicable) when no format is given.
#[cfg(all(feature = "bincode", not(feature = "json")))]
pub type DefaultFormat = Bincode;

/// The encoding half of a round trip: turns any [`Serialize`] value into an intermediate
/// [`Output`](Serializer::Output) which a [`Deserializer`] for the same format can read back.
///
/// The output only lives for the duration of a single duplication, so it needs no particular
/// shape beyond being readable by the matching deserializer.
pub trait Serializer {
    /// The type of errors during encoding.
    type Error;

    /// The intermediate representation produced by encoding.
    type Output;

    /// Encode `item`.
    fn serialize<T: Serialize>(&mut self, item: &T) -> Result<Self::Output, Self::Error>;
}

/// The decoding half of a round trip: builds a fresh, owned value from the intermediate `Input`
/// produced by a [`Serializer`].
///
/// The decoded value must own all of its data, so that the copy shares nothing with the value it
/// was encoded from.
pub trait Deserializer<Input> {
    /// The type of errors during decoding.
    type Error;

    /// Decode an owned value from `src`.
    fn deserialize<T: for<'a> Deserialize<'a>>(&mut self, src: &Input) -> Result<T, Self::Error>;
}

/// A format which can read back its own output, and so can produce an independent copy of any
/// value it can serialize.
///
/// This is implemented automatically for every [`Serializer`] which is also a [`Deserializer`] of
/// its own [`Output`](Serializer::Output), provided both of its error types can be boxed.
pub trait Format: Serializer + Deserializer<<Self as Serializer>::Output> {
    /// Serialize `item`, then deserialize the result into a new value.
    fn round_trip<T>(&mut self, item: &T) -> Result<T, BoxError>
    where
        T: Serialize + for<'a> Deserialize<'a>;
}

impl<F> Format for F
where
    F: Serializer + Deserializer<<F as Serializer>::Output>,
    <F as Serializer>::Error: Into<BoxError>,
    <F as Deserializer<<F as Serializer>::Output>>::Error: Into<BoxError>,
{
    fn round_trip<T>(&mut self, item: &T) -> Result<T, BoxError>
    where
        T: Serialize + for<'a> Deserialize<'a>,
    {
        let encoded = self.serialize(item).map_err(Into::into)?;
        self.deserialize(&encoded).map_err(Into::into)
    }
}
