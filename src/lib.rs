//! mettaspace - Atom Space Library
//!
//! This library provides an in-memory atom space for MeTTa-style symbolic
//! knowledge bases: a term representation, structural pattern matching with
//! multiple solutions, and a type checker driven by typing facts stored in
//! the space.
//!
//! # Architecture
//!
//! All engine code lives in the `backend` module:
//!
//! 1. **Atoms** (`backend::models`)
//!    - `Atom`: symbol, variable, expression or grounded value
//!    - `Bindings` / `BindingsSet`: one or many variable assignments
//!
//! 2. **Grounded atoms** (`backend::grounded`)
//!    - The `Grounded` trait external payload types implement
//!    - Custom matching and execution hooks
//!
//! 3. **Matching** (`backend::matcher`)
//!    - `match_atoms`: raw structural matching
//!    - `unify`: matching with the stored side's variables renamed apart
//!
//! 4. **Space** (`backend::space`)
//!    - `GroundingSpace`: ordered atom storage with `query` and `subst`
//!
//! 5. **Types** (`backend::types`)
//!    - `check_type`, `validate_atom`, `get_atom_types` over `(: atom Type)` facts
//!
//! # Example
//!
//! ```rust
//! use mettaspace::{expr, sym, GroundingSpace, VariableAtom};
//!
//! let mut space = GroundingSpace::new();
//! space.add(expr!("+" a "B"));
//!
//! let result = space.query(&expr!("+" "A" b));
//! assert_eq!(result.len(), 1);
//! let bindings = result.iter().next().unwrap();
//! assert_eq!(bindings.resolve(&VariableAtom::new("b")), Some(sym!("B")));
//! ```
//!
//! # Logging
//!
//! Every space and type operation emits `tracing` events with targets of
//! the form `mettaspace::<module>::<operation>`. Install any subscriber, or
//! call `backend::logging::init_logging`.

#[macro_use]
mod macros;

pub mod backend;

pub use backend::{
    check_type, get_atom_types, init_logging, match_atoms, unify, validate_atom, Atom, AtomKind,
    Bindings, BindingsError, BindingsSet, EngineConfig, ExecError, ExpressionAtom, Grounded,
    GroundedAtom, GroundingSpace, SpaceConfig, SymbolAtom, ValueAtom, VariableAtom,
};
