//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::fmt;

use mettaspace::{Atom, Bindings, BindingsSet, Grounded, GroundingSpace};

/// Grounded integer of type `int`, rendered as the number itself
#[derive(Debug, Clone, PartialEq)]
pub struct IntGnd(pub i64);

impl fmt::Display for IntGnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Grounded for IntGnd {
    fn type_(&self) -> Atom {
        Atom::sym("int")
    }
}

pub fn int(n: i64) -> Atom {
    Atom::gnd(IntGnd(n))
}

/// Space holding `atoms` in the given order
pub fn space_of(atoms: impl IntoIterator<Item = Atom>) -> GroundingSpace {
    atoms.into_iter().collect()
}

/// Collect a bindings set through its callback iteration
pub fn collect_bindings(set: &BindingsSet) -> Vec<Bindings> {
    let mut out = Vec::new();
    set.for_each(|bindings| out.push(bindings.clone()));
    out
}

/// Collect the atoms of a space through iteration
pub fn collect_atoms(space: &GroundingSpace) -> Vec<Atom> {
    space.iter().cloned().collect()
}
