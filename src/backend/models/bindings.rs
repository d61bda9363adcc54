//! Variable bindings for pattern matching
//!
//! A `Bindings` is one consistent assignment. Variables are partitioned into
//! equality groups, and each group optionally carries the value every member
//! resolves to:
//! - `{ $a = A }` - one group, one variable, bound
//! - `{ $a = $b }` - one group, two variables, value still unknown
//! - `{ $a = $b = (f $c) }` - both variables share the value
//!
//! Matching rarely produces more than a handful of groups, so groups and their
//! members are stored in `SmallVec`s and searched linearly.
//!
//! Adding a binding to a variable that already has a different value does not
//! simply fail: the two values are matched against each other, which can
//! yield zero, one or several consistent results. The internal mutators
//! therefore return a `BindingsSet`; the public `add_var_binding` and
//! `add_var_equality` accept only a single outcome.

use std::collections::HashSet;
use std::fmt;

use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use super::{Atom, BindingsSet, VariableAtom};
use crate::backend::matcher::match_atoms;

/// Errors from the strict single-outcome mutators of `Bindings`
#[derive(Debug, Clone, PartialEq)]
pub enum BindingsError {
    /// The variable already resolves to something incompatible with `value`
    Conflict { var: VariableAtom, value: Atom },

    /// The value would contain the variable it is bound to
    Cyclic { var: VariableAtom, value: Atom },

    /// Reconciling the old and new value produced several alternatives;
    /// use the `BindingsSet` operations to keep all of them
    Ambiguous { var: VariableAtom, alternatives: usize },
}

impl fmt::Display for BindingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingsError::Conflict { var, value } => {
                write!(f, "Conflicting binding: {} cannot be {}", var, value)
            }
            BindingsError::Cyclic { var, value } => {
                write!(f, "Cyclic binding: {} occurs in {}", var, value)
            }
            BindingsError::Ambiguous { var, alternatives } => write!(
                f,
                "Ambiguous binding for {}: {} alternatives",
                var, alternatives
            ),
        }
    }
}

impl std::error::Error for BindingsError {}

/// Variables known to be equal, plus their common value if any.
/// Never empty; `vars[0]` is the representative used when there is no value.
#[derive(Clone)]
struct Group {
    vars: SmallVec<[VariableAtom; 2]>,
    value: Option<Atom>,
}

impl Group {
    fn same_as(&self, other: &Group) -> bool {
        self.vars.len() == other.vars.len()
            && self.vars.iter().all(|v| other.vars.contains(v))
            && self.value == other.value
    }
}

type Visited = SmallVec<[usize; 8]>;

/// A single consistent variable assignment
#[derive(Clone, Default)]
pub struct Bindings {
    groups: SmallVec<[Group; 4]>,
}

impl Bindings {
    /// Create empty bindings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no variable is constrained
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[inline]
    fn group_of(&self, var: &VariableAtom) -> Option<usize> {
        self.groups.iter().position(|g| g.vars.contains(var))
    }

    pub fn contains(&self, var: &VariableAtom) -> bool {
        self.group_of(var).is_some()
    }

    /// Value of the variable's group as stored, without substitution
    pub fn value(&self, var: &VariableAtom) -> Option<&Atom> {
        self.group_of(var)
            .and_then(|idx| self.groups[idx].value.as_ref())
    }

    /// Fully substituted value of a variable.
    ///
    /// Variables inside the value are replaced by their own resolutions. A
    /// variable whose group has no value resolves to the group's first
    /// variable. Returns `None` for a variable these bindings do not mention.
    pub fn resolve(&self, var: &VariableAtom) -> Option<Atom> {
        let idx = self.group_of(var)?;
        Some(self.resolve_group(idx, &mut Visited::new()))
    }

    /// `resolve`, then forget the variable
    pub fn resolve_and_remove(&mut self, var: &VariableAtom) -> Option<Atom> {
        let resolved = self.resolve(var)?;
        self.remove_var(var);
        Some(resolved)
    }

    /// Substitute every variable these bindings mention
    pub fn apply(&self, atom: &Atom) -> Atom {
        self.substitute(atom, &mut Visited::new())
    }

    fn resolve_group(&self, idx: usize, visiting: &mut Visited) -> Atom {
        let group = &self.groups[idx];
        match &group.value {
            None => Atom::Variable(group.vars[0].clone()),
            // Unreachable while the occurs check holds
            Some(value) if visiting.contains(&idx) => value.clone(),
            Some(value) => {
                visiting.push(idx);
                let resolved = self.substitute(value, visiting);
                visiting.pop();
                resolved
            }
        }
    }

    fn substitute(&self, atom: &Atom, visiting: &mut Visited) -> Atom {
        match atom {
            Atom::Variable(v) => match self.group_of(v) {
                Some(idx) => self.resolve_group(idx, visiting),
                None => atom.clone(),
            },
            Atom::Expression(e) => Atom::expr(
                e.children()
                    .iter()
                    .map(|child| self.substitute(child, visiting))
                    .collect::<Vec<_>>(),
            ),
            _ => atom.clone(),
        }
    }

    fn remove_var(&mut self, var: &VariableAtom) {
        if let Some(idx) = self.group_of(var) {
            let group = &mut self.groups[idx];
            group.vars.retain(|v| *v != *var);
            if group.vars.is_empty() || (group.vars.len() == 1 && group.value.is_none()) {
                self.groups.remove(idx);
            }
        }
    }

    /// Whether the value of group `idx` refers back to the group
    fn group_cycles(&self, idx: usize) -> bool {
        match &self.groups[idx].value {
            Some(value) => self.reaches_group(value, idx, &mut Visited::new()),
            None => false,
        }
    }

    fn reaches_group(&self, atom: &Atom, target: usize, seen: &mut Visited) -> bool {
        for var in atom.iter_vars() {
            let Some(idx) = self.group_of(var) else {
                continue;
            };
            if idx == target {
                return true;
            }
            if seen.contains(&idx) {
                continue;
            }
            seen.push(idx);
            if let Some(value) = &self.groups[idx].value {
                if self.reaches_group(value, target, seen) {
                    return true;
                }
            }
        }
        false
    }

    /// Keep the bindings only if group `idx` did not become cyclic
    fn checked(self, idx: usize) -> BindingsSet {
        if self.group_cycles(idx) {
            debug!(
                target: "mettaspace::bindings::occurs_check",
                group = %self.groups[idx].vars[0],
                "Rejected cyclic binding"
            );
            BindingsSet::empty()
        } else {
            BindingsSet::from(self)
        }
    }

    /// Two values claimed for one group: keep `existing` and add whatever
    /// matching the two values requires
    fn reconcile(self, existing: &Atom, value: &Atom) -> BindingsSet {
        let mut result = BindingsSet::empty();
        for constraint in match_atoms(existing, value) {
            result.extend(self.merge(&constraint));
        }
        if result.is_empty() {
            debug!(
                target: "mettaspace::bindings::reconcile",
                %existing, %value,
                "Rejected conflicting binding"
            );
        }
        result
    }

    /// Bind `var` to `value`, returning every consistent outcome
    pub(crate) fn add_var_binding_multi(mut self, var: &VariableAtom, value: &Atom) -> BindingsSet {
        if let Atom::Variable(other) = value {
            return self.add_var_equality_multi(var, other);
        }
        match self.group_of(var) {
            None => {
                self.groups.push(Group {
                    vars: smallvec![var.clone()],
                    value: Some(value.clone()),
                });
                let idx = self.groups.len() - 1;
                self.checked(idx)
            }
            Some(idx) => match self.groups[idx].value.clone() {
                None => {
                    self.groups[idx].value = Some(value.clone());
                    self.checked(idx)
                }
                Some(existing) if existing == *value => BindingsSet::from(self),
                Some(existing) => self.reconcile(&existing, value),
            },
        }
    }

    /// Make `a` and `b` the same variable, returning every consistent outcome
    pub(crate) fn add_var_equality_multi(mut self, a: &VariableAtom, b: &VariableAtom) -> BindingsSet {
        if a == b {
            return BindingsSet::from(self);
        }
        match (self.group_of(a), self.group_of(b)) {
            (None, None) => {
                self.groups.push(Group {
                    vars: smallvec![a.clone(), b.clone()],
                    value: None,
                });
                BindingsSet::from(self)
            }
            (Some(i), None) => {
                self.groups[i].vars.push(b.clone());
                self.checked(i)
            }
            (None, Some(j)) => {
                self.groups[j].vars.push(a.clone());
                self.checked(j)
            }
            (Some(i), Some(j)) if i == j => BindingsSet::from(self),
            (Some(i), Some(j)) => {
                let absorbed = self.groups.remove(j);
                let i = if j < i { i - 1 } else { i };
                self.groups[i].vars.extend(absorbed.vars);
                match (self.groups[i].value.clone(), absorbed.value) {
                    (_, None) => self.checked(i),
                    (None, Some(value)) => {
                        self.groups[i].value = Some(value);
                        self.checked(i)
                    }
                    (Some(x), Some(y)) if x == y => self.checked(i),
                    (Some(_), Some(_)) if self.group_cycles(i) => BindingsSet::empty(),
                    (Some(x), Some(y)) => self.reconcile(&x, &y),
                }
            }
        }
    }

    /// Bind `var` to `value`.
    ///
    /// A variable `value` is recorded as an equality. Fails, leaving the
    /// bindings unchanged, unless exactly one consistent outcome exists.
    pub fn add_var_binding(&mut self, var: &VariableAtom, value: &Atom) -> Result<(), BindingsError> {
        trace!(target: "mettaspace::bindings::add_var_binding", %var, %value, "Adding binding");
        match single_outcome(self.clone().add_var_binding_multi(var, value)) {
            Ok(bindings) => {
                *self = bindings;
                Ok(())
            }
            Err(0) if self.would_cycle(var, value) => Err(BindingsError::Cyclic {
                var: var.clone(),
                value: value.clone(),
            }),
            Err(0) => Err(BindingsError::Conflict {
                var: var.clone(),
                value: value.clone(),
            }),
            Err(alternatives) => Err(BindingsError::Ambiguous {
                var: var.clone(),
                alternatives,
            }),
        }
    }

    /// Record that `a` and `b` must resolve to the same atom.
    ///
    /// Fails, leaving the bindings unchanged, when the values already bound
    /// to the two variables cannot be reconciled into a single outcome.
    pub fn add_var_equality(&mut self, a: &VariableAtom, b: &VariableAtom) -> Result<(), BindingsError> {
        trace!(target: "mettaspace::bindings::add_var_equality", %a, %b, "Adding equality");
        match single_outcome(self.clone().add_var_equality_multi(a, b)) {
            Ok(bindings) => {
                *self = bindings;
                Ok(())
            }
            Err(0) if self.equality_would_cycle(a, b) => Err(BindingsError::Cyclic {
                var: a.clone(),
                value: Atom::Variable(b.clone()),
            }),
            Err(0) => Err(BindingsError::Conflict {
                var: a.clone(),
                value: Atom::Variable(b.clone()),
            }),
            Err(alternatives) => Err(BindingsError::Ambiguous {
                var: a.clone(),
                alternatives,
            }),
        }
    }

    fn would_cycle(&self, var: &VariableAtom, value: &Atom) -> bool {
        if let Atom::Variable(other) = value {
            return self.equality_would_cycle(var, other);
        }
        let mut probe = self.clone();
        let idx = match probe.group_of(var) {
            Some(idx) => idx,
            None => {
                probe.groups.push(Group {
                    vars: smallvec![var.clone()],
                    value: None,
                });
                probe.groups.len() - 1
            }
        };
        probe.groups[idx].value = Some(value.clone());
        probe.group_cycles(idx)
    }

    /// Whether joining the groups of `a` and `b` makes either value refer
    /// back to the joined group
    fn equality_would_cycle(&self, a: &VariableAtom, b: &VariableAtom) -> bool {
        let mut probe = self.clone();
        let (idx, other_value) = match (probe.group_of(a), probe.group_of(b)) {
            (None, None) => return false,
            (Some(i), Some(j)) if i == j => return false,
            (Some(i), None) => {
                probe.groups[i].vars.push(b.clone());
                (i, None)
            }
            (None, Some(j)) => {
                probe.groups[j].vars.push(a.clone());
                (j, None)
            }
            (Some(i), Some(j)) => {
                let absorbed = probe.groups.remove(j);
                let i = if j < i { i - 1 } else { i };
                probe.groups[i].vars.extend(absorbed.vars);
                if probe.groups[i].value.is_none() {
                    probe.groups[i].value = absorbed.value;
                    (i, None)
                } else {
                    (i, absorbed.value)
                }
            }
        };
        if probe.group_cycles(idx) {
            return true;
        }
        match other_value {
            Some(value) => {
                probe.groups[idx].value = Some(value);
                probe.group_cycles(idx)
            }
            None => false,
        }
    }

    /// Combine two bindings into every consistent union of both
    pub fn merge(&self, other: &Bindings) -> BindingsSet {
        let mut result = BindingsSet::from(self.clone());
        for group in &other.groups {
            let Some((first, rest)) = group.vars.split_first() else {
                continue;
            };
            for var in rest {
                result.add_var_equality(first, var);
            }
            if let Some(value) = &group.value {
                result.add_var_binding(first, value);
            }
        }
        result
    }

    /// Project onto `vars`.
    ///
    /// Values are fully resolved first, so nothing kept refers to a dropped
    /// variable that had a value. Dropped variables without a value that are
    /// equal to a kept variable are replaced by it.
    pub fn narrow_vars(&self, vars: &HashSet<VariableAtom>) -> Bindings {
        let mut ordered = self.clone();
        for group in ordered.groups.iter_mut() {
            // Kept variables first so they become the representatives
            group.vars.sort_by_key(|v| !vars.contains(v));
        }

        let mut narrowed = Bindings::new();
        for (idx, group) in ordered.groups.iter().enumerate() {
            let kept: SmallVec<[VariableAtom; 2]> =
                group.vars.iter().filter(|v| vars.contains(*v)).cloned().collect();
            if kept.is_empty() {
                continue;
            }
            let value = group
                .value
                .as_ref()
                .map(|_| ordered.resolve_group(idx, &mut Visited::new()));
            if value.is_none() && kept.len() == 1 {
                continue;
            }
            narrowed.groups.push(Group { vars: kept, value });
        }
        narrowed
    }

    /// Every variable that has a value, with the value as stored
    pub fn iter(&self) -> impl Iterator<Item = (&VariableAtom, &Atom)> + '_ {
        self.groups.iter().flat_map(|group| {
            group
                .value
                .iter()
                .flat_map(move |value| group.vars.iter().map(move |var| (var, value)))
        })
    }

    /// Every variable mentioned, bound or not
    pub fn vars(&self) -> impl Iterator<Item = &VariableAtom> + '_ {
        self.groups.iter().flat_map(|group| group.vars.iter())
    }
}

/// The only element of `outcomes`, or how many there were
fn single_outcome(outcomes: BindingsSet) -> Result<Bindings, usize> {
    let mut outcomes = outcomes.into_iter();
    match (outcomes.next(), outcomes.next()) {
        (Some(bindings), None) => Ok(bindings),
        (None, _) => Err(0),
        (Some(_), Some(_)) => Err(2 + outcomes.count()),
    }
}

impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.groups.len() == other.groups.len()
            && self
                .groups
                .iter()
                .all(|g| other.groups.iter().any(|h| g.same_as(h)))
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, group) in self.groups.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            for (j, var) in group.vars.iter().enumerate() {
                if j > 0 {
                    f.write_str(" = ")?;
                }
                write!(f, "{}", var)?;
            }
            if let Some(value) = &group.value {
                write!(f, " = {}", value)?;
            }
        }
        f.write_str(" }")
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
