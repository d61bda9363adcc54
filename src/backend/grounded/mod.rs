//! Grounded atoms.
//!
//! A grounded atom owns an opaque payload supplied by the embedding program
//! and reaches it only through the `Grounded` capability trait. This is the
//! single extension point of the atom space: there is no other way to add
//! behavior to atoms.
//!
//! # Key Concepts
//!
//! - **Ownership**: The atom exclusively owns its payload; the payload is
//!   dropped exactly once, when the atom is
//! - **Equality**: Same concrete payload type and payload `PartialEq`
//! - **Custom matching**: `Grounded::match_` overrides structural matching
//! - **Execution**: `Grounded::execute` is consumed by interpreters built on top

mod traits;
mod value;
#[cfg(test)]
mod tests;

use std::fmt;

use super::models::{Atom, BindingsSet};

pub use traits::{Grounded, GroundedObject};
pub use value::ValueAtom;

/// Error type for grounded atom execution
#[derive(Debug, Clone, PartialEq)]
pub enum ExecError {
    /// Execution succeeded but the call must not be reduced further.
    /// This is NOT an error, just signals "leave me as is"
    NoReduce,

    /// Runtime error during execution
    Runtime(String),

    /// Incorrect argument type or arity
    IncorrectArgument(String),

    /// The payload does not implement `execute`
    NotExecutable(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::NoReduce => write!(f, "NoReduce"),
            ExecError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            ExecError::IncorrectArgument(msg) => write!(f, "Incorrect argument: {}", msg),
            ExecError::NotExecutable(atom) => write!(f, "Atom is not executable: {}", atom),
        }
    }
}

impl std::error::Error for ExecError {}

/// Grounded variant of `Atom`: a boxed payload plus its capability table
pub struct GroundedAtom(Box<dyn GroundedObject>);

impl GroundedAtom {
    pub fn new<T: Grounded + Clone + PartialEq>(payload: T) -> Self {
        GroundedAtom(Box::new(payload))
    }

    #[inline]
    pub fn type_(&self) -> Atom {
        self.0.type_()
    }

    /// Result of the payload's custom matcher, `None` if it has none
    #[inline]
    pub fn match_(&self, other: &Atom) -> Option<BindingsSet> {
        self.0.match_(other)
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.0.is_executable()
    }

    #[inline]
    pub fn execute(&self, args: &[Atom]) -> Result<Vec<Atom>, ExecError> {
        self.0.execute(args)
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Clone for GroundedAtom {
    fn clone(&self) -> Self {
        GroundedAtom(self.0.clone_object())
    }
}

impl PartialEq for GroundedAtom {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_object(other.0.as_ref())
    }
}

impl fmt::Display for GroundedAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for GroundedAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
