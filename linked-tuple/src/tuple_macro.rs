/// The `tuple!` macro builds a [`Tuple`](crate::Tuple) from a comma-separated list of expressions,
/// each of which is converted into a [`Value`](crate::Value) with [`From`]. It evaluates to a
/// `Result<Tuple, Error>`, like [`Tuple::from_values`](crate::Tuple::from_values).
///
/// An empty invocation builds a singleton tuple whose payload is absent.
///
/// # Examples
///
/// ```
/// use linked_tuple::{tuple, Object};
///
/// let tuple = tuple!["a", 3, true, 4.5, Object::cloneable(vec!['x'])]?;
/// assert_eq!(tuple.to_string(), "(a, 3, true, 4.5, ['x'])");
///
/// let empty = tuple![]?;
/// assert_eq!(empty.to_string(), "(None)");
/// # Ok::<_, linked_tuple::Error>(())
/// ```
#[macro_export]
macro_rules! tuple {
    () => (
        $crate::Tuple::from_values(::std::vec::Vec::<$crate::Value>::new())
    );
    ($($value:expr),+ $(,)?) => (
        $crate::Tuple::from_values(::std::vec![$($crate::Value::from($value)),+])
    );
}
