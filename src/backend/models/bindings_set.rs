//! Sets of alternative bindings
//!
//! A `BindingsSet` is a disjunction: one of its members must hold.
//! - `BindingsSet::empty()` - no member, "no solution"
//! - `BindingsSet::single()` - one empty member, "trivially satisfied"
//!
//! Operations that constrain a set apply the constraint to each member
//! independently and drop the members that become inconsistent.

use std::fmt;

use itertools::Itertools;

use super::{Atom, Bindings, VariableAtom};

#[derive(Clone, Default)]
pub struct BindingsSet(Vec<Bindings>);

impl BindingsSet {
    /// The set with no solution
    #[inline]
    pub fn empty() -> Self {
        BindingsSet(Vec::new())
    }

    /// The set holding one unconstrained solution
    pub fn single() -> Self {
        BindingsSet(vec![Bindings::new()])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for exactly one unconstrained solution
    pub fn is_single(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_empty()
    }

    pub fn push(&mut self, bindings: Bindings) {
        self.0.push(bindings);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bindings> {
        self.0.iter()
    }

    /// Visit every member in order
    pub fn for_each(&self, mut callback: impl FnMut(&Bindings)) {
        for bindings in &self.0 {
            callback(bindings);
        }
    }

    /// Conjunction of two sets: every member of `self` merged with every
    /// member of `other`, inconsistent pairs dropped
    pub fn merge(&self, other: &BindingsSet) -> BindingsSet {
        self.iter()
            .cartesian_product(other.iter())
            .flat_map(|(a, b)| a.merge(b))
            .collect()
    }

    /// Add `a = b` to every member, dropping members that reject it
    pub fn add_var_equality(&mut self, a: &VariableAtom, b: &VariableAtom) {
        let members = std::mem::take(&mut self.0);
        self.0 = members
            .into_iter()
            .flat_map(|bindings| bindings.add_var_equality_multi(a, b))
            .collect();
    }

    /// Add `var = value` to every member, dropping members that reject it
    pub fn add_var_binding(&mut self, var: &VariableAtom, value: &Atom) {
        let members = std::mem::take(&mut self.0);
        self.0 = members
            .into_iter()
            .flat_map(|bindings| bindings.add_var_binding_multi(var, value))
            .collect();
    }
}

impl From<Bindings> for BindingsSet {
    fn from(bindings: Bindings) -> Self {
        BindingsSet(vec![bindings])
    }
}

impl FromIterator<Bindings> for BindingsSet {
    fn from_iter<I: IntoIterator<Item = Bindings>>(iter: I) -> Self {
        BindingsSet(iter.into_iter().collect())
    }
}

impl Extend<Bindings> for BindingsSet {
    fn extend<I: IntoIterator<Item = Bindings>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for BindingsSet {
    type Item = Bindings;
    type IntoIter = std::vec::IntoIter<Bindings>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BindingsSet {
    type Item = &'a Bindings;
    type IntoIter = std::slice::Iter<'a, Bindings>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Same members, in any order
impl PartialEq for BindingsSet {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut unmatched: Vec<&Bindings> = other.iter().collect();
        self.iter().all(|b| match unmatched.iter().position(|o| *o == b) {
            Some(i) => {
                unmatched.swap_remove(i);
                true
            }
            None => false,
        })
    }
}

impl fmt::Display for BindingsSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, bindings) in self.0.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{}", bindings)?;
        }
        f.write_str(" ]")
    }
}

impl fmt::Debug for BindingsSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
