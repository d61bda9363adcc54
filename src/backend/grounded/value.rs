//! Automatic grounding for plain Rust values.

use std::fmt;

use super::Grounded;
use crate::backend::models::Atom;

/// Grounded wrapper for any cloneable, comparable, printable Rust value.
///
/// The type of a `ValueAtom<T>` is a symbol named after `T`, so values of
/// different Rust types never compare or type-check as equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAtom<T>(T);

impl<T> ValueAtom<T> {
    pub fn new(value: T) -> Self {
        ValueAtom(value)
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: fmt::Display> fmt::Display for ValueAtom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T> Grounded for ValueAtom<T>
where
    T: Clone + PartialEq + fmt::Display + fmt::Debug + 'static,
{
    fn type_(&self) -> Atom {
        Atom::sym(std::any::type_name::<T>())
    }
}
