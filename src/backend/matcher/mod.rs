//! Matching atoms against each other.
//!
//! `match_atoms` is the raw structural matcher: it treats variables on both
//! sides as the same namespace. `unify` is what queries use: it renames the
//! stored atom's variables apart first and reports only the bindings of the
//! caller's pattern variables.

mod rename;

use std::collections::HashSet;

use tracing::trace;

use crate::backend::models::{Atom, Bindings, BindingsSet, VariableAtom};

pub use rename::make_variables_unique;

/// Match two atoms, returning every consistent set of bindings.
///
/// - Variable vs variable records an equality, variable vs anything a binding
/// - Symbols match when their names are equal
/// - Expressions match when they have the same arity and every pair of
///   children matches; the per-child results are merged
/// - A grounded atom with a custom matcher on either side decides alone
/// - Other grounded atoms match only an equal grounded atom
///
/// # Returns
/// - An empty set when the atoms do not match
/// - `BindingsSet::single()` when they match without binding anything
///
/// # Examples
/// ```ignore
/// let result = match_atoms(&expr!("+" a "B"), &expr!("+" "A" b));
/// assert_eq!(result, bind_set![{ a: sym!("A"), b: sym!("B") }]);
/// ```
pub fn match_atoms(left: &Atom, right: &Atom) -> BindingsSet {
    trace!(target: "mettaspace::matcher::match_atoms", %left, %right);
    match_atoms_recursive(left, right)
}

fn match_atoms_recursive(left: &Atom, right: &Atom) -> BindingsSet {
    match (left, right) {
        (Atom::Variable(a), Atom::Variable(b)) => {
            Bindings::new().add_var_equality_multi(a, b)
        }
        (Atom::Variable(var), value) | (value, Atom::Variable(var)) => {
            Bindings::new().add_var_binding_multi(var, value)
        }
        _ => match custom_match(left, right) {
            Some(result) => result,
            None => match_structure(left, right),
        },
    }
}

/// Result of the first custom grounded matcher found, left side first
fn custom_match(left: &Atom, right: &Atom) -> Option<BindingsSet> {
    if let Atom::Grounded(g) = left {
        if let Some(result) = g.match_(right) {
            return Some(result);
        }
    }
    match right {
        Atom::Grounded(g) => g.match_(left),
        _ => None,
    }
}

fn match_structure(left: &Atom, right: &Atom) -> BindingsSet {
    match (left, right) {
        (Atom::Symbol(a), Atom::Symbol(b)) if a == b => BindingsSet::single(),
        (Atom::Grounded(a), Atom::Grounded(b)) if a == b => BindingsSet::single(),
        (Atom::Expression(a), Atom::Expression(b)) if a.arity() == b.arity() => {
            let mut result = BindingsSet::single();
            for (x, y) in a.children().iter().zip(b.children()) {
                result = result.merge(&match_atoms_recursive(x, y));
                if result.is_empty() {
                    break;
                }
            }
            result
        }
        _ => BindingsSet::empty(),
    }
}

/// Match a caller's pattern against a stored atom.
///
/// Variables of `target` are renamed to fresh ones first, so a `$a` in the
/// stored atom never collides with a `$a` in the pattern. Results are
/// projected onto the variables of `pattern`.
pub fn unify(pattern: &Atom, target: &Atom) -> BindingsSet {
    let target = make_variables_unique(target);
    let vars: HashSet<VariableAtom> = pattern.iter_vars().cloned().collect();
    let result: BindingsSet = match_atoms(pattern, &target)
        .into_iter()
        .map(|bindings| bindings.narrow_vars(&vars))
        .collect();
    trace!(target: "mettaspace::matcher::unify", %pattern, %target, %result);
    result
}

/// Substitute the bound variables of `atom`
pub fn apply_bindings_to_atom(atom: &Atom, bindings: &Bindings) -> Atom {
    bindings.apply(atom)
}
