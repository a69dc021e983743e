/*!
Heterogeneous, singly-linked tuples which can be size-locked, deep-cloned, and registered as
named prototypes.

A [`Tuple`] holds a chain of [`Value`]s of possibly different types: booleans, characters,
integers, floats, text, type descriptors, or any other type wrapped in an [`Object`]. Tuples can
grow and shrink with [`ap`](Tuple::ap), [`add`](Tuple::add) and [`remove`](Tuple::remove) until they
are *size-locked*, after which their payloads can still be [`replace`](Tuple::replace)d by values
of the same type, but no elements can be added or removed.

```
use linked_tuple::prelude::*;

let mut tuple = Tuple::new("a")?;
let _ = tuple.ap(3)?.ap(true)?.ap(4.5)?;
assert_eq!(tuple.to_string(), "(a, 3, true, 4.5)");
# Ok::<_, Error>(())
```

## Deep cloning

[`Tuple::deep_clone`] produces a copy sharing no state with the original. Every payload is
duplicated by the [`Capability`] its type declared when it was wrapped:

- plain values, and objects made with [`Object::plain`], are copied;
- objects made with [`Object::cloneable`] are cloned;
- objects made with [`Object::duplicable`] are serialized and deserialized by a
  [`format`](crate::format) (requires the `serde` feature, on by default);
- objects made with [`Object::opaque`] cannot be duplicated, unless a [`Duplicator`] passed to
  [`Tuple::deep_clone_with`] has a fallback for their type.

## Named shapes

A tuple locked with [`Tuple::lock_size_as`] carries a type name, under which it can be registered
in a [`Registry`]. Each [`lookup`](Registry::lookup) returns a fresh deep clone of the registered
prototype:

```
use linked_tuple::prelude::*;

let registry = Registry::new();
let mut point = Tuple::from_values(vec![0, 0, 0, 0])?;
let _ = point.lock_size_as("point4d");
assert!(registry.register(point));

let mut copy = registry.lookup("point4d").unwrap();
assert!(matches!(copy.ap(1), Err(Error::LockedSize)));
# Ok::<_, Error>(())
```

A process-wide registry is available from [`registry::global`].

## Features

- `serde` (default): duplication of objects by a serialization round trip.
- `json` (default): the [`Json`](format::Json) format, via `serde_json`.
- `bincode`: the [`Bincode`](format::Bincode) format, via `bincode`.
*/

#![allow(clippy::type_complexity)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations, missing_debug_implementations)]
#![warn(unused_qualifications, unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
// Documentation configuration
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate derivative;

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod format;
pub mod registry;

mod cursor;
mod duplicate;
mod error;
mod object;
mod tuple;
mod tuple_macro;
mod value;

pub use cursor::{CursorMut, Iter};
pub use duplicate::{Capability, Duplicator};
pub use error::{BoxError, Error};
pub use object::{Element, Object};
pub use registry::Registry;
pub use tuple::Tuple;
pub use value::{TypeTag, Value};

/// The prelude module for quickly getting started with linked tuples.
///
/// This module is designed to be imported as `use linked_tuple::prelude::*;`.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{Capability, Duplicator, Error, Object, Registry, Tuple, TypeTag, Value};
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Tuple: Send, Sync);
    assert_impl_all!(Value: Send, Sync);
    assert_impl_all!(Object: Send, Sync);
    assert_impl_all!(Error: Send, Sync, std::error::Error);
}
