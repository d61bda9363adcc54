pub mod atom;
pub mod bindings;
pub mod bindings_set;

pub use atom::{collect_vars, Atom, AtomKind, ExpressionAtom, SymbolAtom, VariableAtom, VARIABLE_SIGIL};
pub use bindings::{Bindings, BindingsError};
pub use bindings_set::BindingsSet;
