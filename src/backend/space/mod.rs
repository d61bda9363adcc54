//! In-memory atom space.
//!
//! `GroundingSpace` stores atoms in insertion order, duplicates allowed, and
//! answers queries by unifying a pattern against every stored atom. Each
//! matching atom contributes its own solutions to the result; solutions from
//! different atoms are never merged with each other.
//!
//! With `SpaceConfig::head_index` enabled the space also keeps a bloom filter
//! over the (head symbol, arity) pairs of stored expressions, so a query for
//! a head that was never added returns without scanning. Results and their
//! order are the same with or without the index.

mod bloom;

use std::fmt;

use tracing::trace;

use self::bloom::{head_key, HeadArityBloomFilter};
use crate::backend::config::SpaceConfig;
use crate::backend::matcher::{apply_bindings_to_atom, unify};
use crate::backend::models::{Atom, BindingsSet};

/// Head index state
#[derive(Clone)]
struct HeadIndex {
    filter: HeadArityBloomFilter,
    expected_atoms: usize,
    /// Stored atoms the filter cannot describe (no symbol head)
    unindexed: usize,
}

impl HeadIndex {
    fn new(expected_atoms: usize) -> Self {
        Self {
            filter: HeadArityBloomFilter::new(expected_atoms),
            expected_atoms,
            unindexed: 0,
        }
    }

    fn insert(&mut self, atom: &Atom) {
        match head_key(atom) {
            Some((head, arity)) => self.filter.insert(head, arity),
            None => self.unindexed += 1,
        }
    }

    fn remove(&mut self, atom: &Atom) {
        match head_key(atom) {
            Some(_) => self.filter.note_deletion(),
            None => self.unindexed = self.unindexed.saturating_sub(1),
        }
    }

    fn rebuild<'a>(&mut self, atoms: impl Iterator<Item = &'a Atom>) {
        let atoms: Vec<&Atom> = atoms.collect();
        if atoms.len() > self.expected_atoms {
            self.expected_atoms = atoms.len() * 2;
            self.filter = HeadArityBloomFilter::new(self.expected_atoms);
        } else {
            self.filter.clear();
        }
        self.unindexed = 0;
        for atom in atoms {
            self.insert(atom);
        }
    }

    /// True when no stored atom can match `pattern`
    fn rejects(&self, pattern: &Atom) -> bool {
        if self.unindexed > 0 {
            return false;
        }
        match head_key(pattern) {
            Some((head, arity)) => !self.filter.may_contain(head, arity),
            None => false,
        }
    }
}

/// Ordered multiset of atoms with pattern queries
#[derive(Clone, Default)]
pub struct GroundingSpace {
    atoms: Vec<Atom>,
    index: Option<HeadIndex>,
}

impl GroundingSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &SpaceConfig) -> Self {
        Self {
            atoms: Vec::new(),
            index: config
                .head_index
                .then(|| HeadIndex::new(config.expected_atoms)),
        }
    }

    /// Append an atom; the space takes ownership
    pub fn add(&mut self, atom: Atom) {
        trace!(target: "mettaspace::space::add", %atom);
        if let Some(index) = self.index.as_mut() {
            index.insert(&atom);
        }
        self.atoms.push(atom);
    }

    /// Remove the first atom equal to `atom`.
    /// Returns false, leaving the space unchanged, if there is none.
    pub fn remove(&mut self, atom: &Atom) -> bool {
        let Some(position) = self.atoms.iter().position(|a| a == atom) else {
            trace!(target: "mettaspace::space::remove", %atom, "Not found");
            return false;
        };
        trace!(target: "mettaspace::space::remove", %atom, position);
        let removed = self.atoms.remove(position);
        if let Some(index) = self.index.as_mut() {
            index.remove(&removed);
            if index.filter.needs_rebuild() {
                index.rebuild(self.atoms.iter());
            }
        }
        true
    }

    /// Put `to` in the place of the first atom equal to `from`.
    /// Returns false, leaving the space unchanged, if there is none.
    pub fn replace(&mut self, from: &Atom, to: Atom) -> bool {
        let Some(position) = self.atoms.iter().position(|a| a == from) else {
            trace!(target: "mettaspace::space::replace", %from, "Not found");
            return false;
        };
        trace!(target: "mettaspace::space::replace", %from, %to, position);
        if let Some(index) = self.index.as_mut() {
            index.remove(&self.atoms[position]);
            index.insert(&to);
        }
        self.atoms[position] = to;
        true
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// Unify `pattern` with every stored atom, in storage order.
    ///
    /// Each solution binds only variables of `pattern`; variables of the
    /// stored atoms are renamed apart and projected out.
    pub fn query(&self, pattern: &Atom) -> BindingsSet {
        if self.index.as_ref().map_or(false, |index| index.rejects(pattern)) {
            trace!(target: "mettaspace::space::query", %pattern, "Rejected by head index");
            return BindingsSet::empty();
        }
        let mut result = BindingsSet::empty();
        for atom in &self.atoms {
            result.extend(unify(pattern, atom));
        }
        trace!(target: "mettaspace::space::query", %pattern, solutions = result.len());
        result
    }

    /// Query `pattern` and instantiate `template` with each solution
    pub fn subst(&self, pattern: &Atom, template: &Atom) -> Vec<Atom> {
        self.query(pattern)
            .iter()
            .map(|bindings| apply_bindings_to_atom(template, bindings))
            .collect()
    }
}

/// Same atoms in the same order
impl PartialEq for GroundingSpace {
    fn eq(&self, other: &Self) -> bool {
        self.atoms == other.atoms
    }
}

impl fmt::Display for GroundingSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for atom in &self.atoms {
            writeln!(f, "{}", atom)?;
        }
        Ok(())
    }
}

impl fmt::Debug for GroundingSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroundingSpace")
            .field("atoms", &self.atoms)
            .field("head_index", &self.index.is_some())
            .finish()
    }
}

impl<'a> IntoIterator for &'a GroundingSpace {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl FromIterator<Atom> for GroundingSpace {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        let mut space = GroundingSpace::new();
        for atom in iter {
            space.add(atom);
        }
        space
    }
}
