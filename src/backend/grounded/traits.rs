//! Traits for grounded atoms.
//!
//! Defines the capability contract external payloads implement:
//! - `Grounded` - type, optional custom matching, optional execution
//! - `GroundedObject` - object-safe equality/clone/downcast glue, implemented
//!   automatically for every `Grounded + Clone + PartialEq` payload

use std::any::Any;
use std::fmt;

use super::ExecError;
use crate::backend::models::{Atom, BindingsSet};

/// Capability contract for payloads carried by grounded atoms.
///
/// Equality, cloning and releasing the payload come from the payload's own
/// `PartialEq`, `Clone` and `Drop` impls; rendering comes from `Display`.
///
/// # Implementing a grounded type
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Int(i64);
///
/// impl std::fmt::Display for Int {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
///
/// impl Grounded for Int {
///     fn type_(&self) -> Atom {
///         Atom::sym("int")
///     }
/// }
///
/// let atom = Atom::gnd(Int(42));
/// assert_eq!(atom.to_text(), "42");
/// ```
pub trait Grounded: fmt::Display + fmt::Debug + 'static {
    /// Type of the payload, as an atom
    fn type_(&self) -> Atom;

    /// Custom matching against another atom.
    ///
    /// `None` means the payload has no custom matcher and is matched by
    /// equality. `Some(set)` replaces structural matching entirely; an empty
    /// set means no match.
    fn match_(&self, _other: &Atom) -> Option<BindingsSet> {
        None
    }

    /// Whether `execute` is implemented
    fn is_executable(&self) -> bool {
        false
    }

    /// Execute the payload with the given arguments.
    ///
    /// # Returns
    /// * `Ok(results)` - Zero or more result atoms
    /// * `Err(NoReduce)` - Executed, but the call should be left unreduced
    /// * `Err(NotExecutable)` - The payload is not a function
    /// * `Err(...)` - Actual error during execution
    fn execute(&self, _args: &[Atom]) -> Result<Vec<Atom>, ExecError> {
        Err(ExecError::NotExecutable(self.to_string()))
    }
}

/// Object-safe view of a grounded payload.
///
/// `Clone` and `PartialEq` are not object safe, so the grounded atom stores
/// `Box<dyn GroundedObject>` and reaches the payload's impls through here.
pub trait GroundedObject: Grounded {
    /// Payload equality; false when the payloads have different Rust types
    fn eq_object(&self, other: &dyn GroundedObject) -> bool;

    fn clone_object(&self) -> Box<dyn GroundedObject>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Grounded + Clone + PartialEq> GroundedObject for T {
    fn eq_object(&self, other: &dyn GroundedObject) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn clone_object(&self) -> Box<dyn GroundedObject> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
