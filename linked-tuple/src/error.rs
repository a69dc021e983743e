use thiserror::Error;

/// A boxed error from a serialization format, kept as the source of a failed duplication.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error returned by an operation on a [`Tuple`](crate::Tuple).
///
/// Every error is returned to the caller of the operation which detected it; nothing is retried
/// and no operation leaves a tuple half-modified when it fails.
#[derive(Debug, Error)]
pub enum Error {
    /// A [`Tuple`](crate::Tuple) was supplied as the payload of an element. Tuples never nest.
    #[error("a tuple cannot be stored as an element of another tuple")]
    InvalidValue,
    /// A structural mutation (append, insert or remove) was attempted on a size-locked tuple.
    #[error("cannot change the size of a size-locked tuple")]
    LockedSize,
    /// The index does not refer to an element of the tuple.
    #[error("invalid index {index}: the tuple has no element there")]
    InvalidIndex {
        /// The index which was requested.
        index: usize,
    },
    /// The replacement value's type differs from the type of the payload it would replace.
    #[error("incompatible types: cannot replace a value of type `{existing}` with one of type `{replacement}`")]
    IncompatibleType {
        /// The type of the payload currently stored.
        existing: &'static str,
        /// The type of the rejected replacement.
        replacement: &'static str,
    },
    /// A payload could not be duplicated during a deep clone.
    #[error("value of type `{type_name}` is not cloneable")]
    NotCloneable {
        /// The type of the payload which could not be duplicated.
        type_name: &'static str,
        /// The serialization error, when a round trip was attempted and failed.
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    pub(crate) fn not_cloneable(type_name: &'static str) -> Self {
        Error::NotCloneable {
            type_name,
            source: None,
        }
    }
}
