//! Type checking over a space of typing facts.
//!
//! Types are declared with facts of the form `(: entity Type)`. Function
//! types are expressions `(-> Arg1 ... ArgN Ret)`, possibly with type
//! variables such as `(-> $t $t)`.
//!
//! An atom without any derivable type has type `%Undefined%`, which checks
//! against every type. An application whose head has function types, none
//! of which accepts the arguments, is ill-typed: it has no type at all and
//! checks against nothing but `%Undefined%` and the meta types.
//!
//! An expression whose head has no function type is a tuple. Its type is
//! `(T1 ... Tn)` for every combination of its children's types, with
//! `%Undefined%` standing in for an untyped child; a tuple of nothing but
//! `%Undefined%` is no type at all.
//!
//! Lookups are single-step: no supertype or subtype chains are followed.


use itertools::Itertools;
use tracing::trace;

use crate::backend::matcher::{apply_bindings_to_atom, make_variables_unique, match_atoms};
use crate::backend::models::{Atom, BindingsSet, VariableAtom};
use crate::backend::space::GroundingSpace;

/// Type of atoms with no declared type; matches every type
pub const ATOM_TYPE_UNDEFINED: &str = "%Undefined%";
/// Type of types
pub const ATOM_TYPE_TYPE: &str = "Type";
/// Meta type every atom has
pub const ATOM_TYPE_ATOM: &str = "Atom";
pub const ATOM_TYPE_SYMBOL: &str = "Symbol";
pub const ATOM_TYPE_VARIABLE: &str = "Variable";
pub const ATOM_TYPE_EXPRESSION: &str = "Expression";
pub const ATOM_TYPE_GROUNDED: &str = "Grounded";

/// Head of typing facts `(: entity Type)`
pub const HAS_TYPE_SYMBOL: &str = ":";
/// Head of function types `(-> Arg... Ret)`
pub const ARROW_SYMBOL: &str = "->";

#[inline]
fn is_symbol(atom: &Atom, name: &str) -> bool {
    matches!(atom, Atom::Symbol(s) if s.name() == name)
}

#[inline]
fn is_undefined(typ: &Atom) -> bool {
    is_symbol(typ, ATOM_TYPE_UNDEFINED)
}

/// True for `(-> ...)` with at least a return type
pub fn is_func(typ: &Atom) -> bool {
    match typ {
        Atom::Expression(e) => {
            e.arity() > 1 && e.head().map_or(false, |head| is_symbol(head, ARROW_SYMBOL))
        }
        _ => false,
    }
}

/// Split a function type into its parameter types and return type
pub fn get_arg_types(fn_type: &Atom) -> Option<(&[Atom], &Atom)> {
    if !is_func(fn_type) {
        return None;
    }
    let children = fn_type.children()?;
    let (ret, rest) = children.split_last()?;
    Some((&rest[1..], ret))
}

/// Whether `atom` has the meta type `typ` (`Atom`, `Symbol`, ...)
fn check_meta_type(atom: &Atom, typ: &Atom) -> bool {
    let Atom::Symbol(meta) = typ else {
        return false;
    };
    match meta.name() {
        ATOM_TYPE_ATOM => true,
        ATOM_TYPE_SYMBOL => matches!(atom, Atom::Symbol(_)),
        ATOM_TYPE_VARIABLE => matches!(atom, Atom::Variable(_)),
        ATOM_TYPE_EXPRESSION => matches!(atom, Atom::Expression(_)),
        ATOM_TYPE_GROUNDED => matches!(atom, Atom::Grounded(_)),
        _ => false,
    }
}

/// Bindings under which an atom of type `actual` fits where `expected` is
/// required
fn match_types(expected: &Atom, actual: &Atom) -> BindingsSet {
    if is_undefined(expected) || is_undefined(actual) {
        BindingsSet::single()
    } else {
        match_atoms(expected, actual)
    }
}

/// Types stated directly by `(: atom $T)` facts, in storage order
fn query_declared_types(space: &GroundingSpace, atom: &Atom) -> Vec<Atom> {
    let typ = VariableAtom::new_unique("T");
    let pattern = Atom::expr([
        Atom::sym(HAS_TYPE_SYMBOL),
        atom.clone(),
        Atom::Variable(typ.clone()),
    ]);
    space
        .query(&pattern)
        .iter()
        .map(|bindings| {
            bindings
                .resolve(&typ)
                .unwrap_or_else(|| Atom::Variable(typ.clone()))
        })
        .collect()
}

/// Everything derivable about the type of one atom
struct Inferred {
    types: Vec<Atom>,
    /// An application nothing in the space accepts
    ill_typed: bool,
}

fn infer(space: &GroundingSpace, atom: &Atom) -> Inferred {
    match atom {
        Atom::Variable(_) => Inferred {
            types: Vec::new(),
            ill_typed: false,
        },
        Atom::Grounded(g) => Inferred {
            types: vec![g.type_()],
            ill_typed: false,
        },
        Atom::Symbol(_) => Inferred {
            types: query_declared_types(space, atom),
            ill_typed: false,
        },
        Atom::Expression(e) => {
            let mut types = query_declared_types(space, atom);
            let mut ill_typed = false;
            if let Some((head, args)) = e.children().split_first() {
                match application_types(space, head, args) {
                    Some(returned) => {
                        ill_typed = types.is_empty() && returned.is_empty();
                        types.extend(returned);
                    }
                    None => types.extend(tuple_types(space, e.children())),
                }
            }
            Inferred { types, ill_typed }
        }
    }
}

/// Return types of `head` applied to `args`.
/// `None` when `head` has no function type, so this is not an application.
fn application_types(space: &GroundingSpace, head: &Atom, args: &[Atom]) -> Option<Vec<Atom>> {
    let fn_types: Vec<Atom> = infer(space, head)
        .types
        .into_iter()
        .filter(is_func)
        .collect();
    if fn_types.is_empty() {
        return None;
    }

    let mut returned = Vec::new();
    for fn_type in &fn_types {
        // Type variables are local to each application
        let fn_type = make_variables_unique(fn_type);
        let Some((params, ret)) = get_arg_types(&fn_type) else {
            continue;
        };
        if params.len() != args.len() {
            trace!(
                target: "mettaspace::types::application",
                %head, %fn_type, args = args.len(),
                "Arity mismatch"
            );
            continue;
        }
        let mut solutions = BindingsSet::single();
        for (param, arg) in params.iter().zip(args) {
            solutions = solutions.merge(&arg_fits(space, param, arg));
            if solutions.is_empty() {
                break;
            }
        }
        returned.extend(
            solutions
                .iter()
                .map(|bindings| apply_bindings_to_atom(ret, bindings)),
        );
    }
    Some(returned)
}

/// Types of an expression read as a tuple: one `(T1 ... Tn)` per combination
/// of the children's types.
///
/// An untyped child contributes `%Undefined%`; an ill-typed child makes the
/// tuple untypable. Tuples made only of `%Undefined%` are left out.
fn tuple_types(space: &GroundingSpace, children: &[Atom]) -> Vec<Atom> {
    let undefined = Atom::sym(ATOM_TYPE_UNDEFINED);
    let mut tuples: Vec<Vec<Atom>> = vec![Vec::new()];
    for (i, child) in children.iter().enumerate() {
        let inferred = infer(space, child);
        let child_types: Vec<Atom> = if inferred.types.is_empty() {
            if inferred.ill_typed {
                Vec::new()
            } else {
                vec![undefined.clone()]
            }
        } else {
            // A function type in head position describes a call, not a tuple
            inferred
                .types
                .into_iter()
                .filter(|typ| i != 0 || !is_func(typ))
                .collect()
        };
        tuples = tuples
            .iter()
            .cartesian_product(&child_types)
            .map(|(prev, typ)| {
                let mut next = prev.clone();
                next.push(typ.clone());
                next
            })
            .collect();
        if tuples.is_empty() {
            break;
        }
    }
    tuples
        .into_iter()
        .filter(|tuple| tuple.iter().any(|typ| !is_undefined(typ)))
        .map(|tuple| Atom::expr(tuple))
        .collect()
}

/// Bindings of type variables under which `arg` fits parameter type `param`
fn arg_fits(space: &GroundingSpace, param: &Atom, arg: &Atom) -> BindingsSet {
    if check_meta_type(arg, param) {
        return BindingsSet::single();
    }
    let inferred = infer(space, arg);
    if inferred.types.is_empty() {
        return if inferred.ill_typed {
            BindingsSet::empty()
        } else {
            BindingsSet::single()
        };
    }
    let mut fits = BindingsSet::empty();
    for typ in &inferred.types {
        fits.extend(match_types(param, typ));
    }
    fits
}

/// All types derivable for `atom`, in space storage order, not deduplicated.
///
/// - Variables have no type
/// - Grounded atoms have the type reported by their payload
/// - Symbols have their declared types
/// - Expressions have their declared types, plus the return type of every
///   function type of the head whose parameters accept the arguments
/// - Expressions whose head has no function type have their declared types,
///   plus their tuple types
pub fn get_atom_types(space: &GroundingSpace, atom: &Atom) -> Vec<Atom> {
    let types = infer(space, atom).types;
    trace!(target: "mettaspace::types::get_atom_types", %atom, found = types.len());
    types
}

/// `get_atom_types`, delivering each type to `callback`
pub fn for_each_atom_type(space: &GroundingSpace, atom: &Atom, mut callback: impl FnMut(&Atom)) {
    for typ in get_atom_types(space, atom) {
        callback(&typ);
    }
}

/// Whether `atom` can be used where `typ` is expected.
///
/// True if `typ` is `%Undefined%`, if `typ` is a meta type `atom` has, if
/// `atom` has no derivable type and is not an ill-typed application, or if
/// one of its types matches `typ`.
pub fn check_type(space: &GroundingSpace, atom: &Atom, typ: &Atom) -> bool {
    let result = if is_undefined(typ) || check_meta_type(atom, typ) {
        true
    } else {
        let inferred = infer(space, atom);
        if inferred.types.is_empty() {
            !inferred.ill_typed
        } else {
            inferred
                .types
                .iter()
                .any(|actual| !match_types(typ, actual).is_empty())
        }
    };
    trace!(target: "mettaspace::types::check_type", %atom, %typ, result);
    result
}

/// Whether every application inside `atom` is well typed.
///
/// Symbols, variables and grounded atoms are always valid. An expression is
/// valid when all of its children are, and its head, if it has function
/// types, accepts the arguments under one of them.
pub fn validate_atom(space: &GroundingSpace, atom: &Atom) -> bool {
    let valid = match atom {
        Atom::Expression(e) => {
            e.children().iter().all(|child| validate_atom(space, child))
                && !infer(space, atom).ill_typed
        }
        _ => true,
    };
    trace!(target: "mettaspace::types::validate_atom", %atom, valid);
    valid
}
