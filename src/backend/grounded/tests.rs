//! Tests for grounded atoms.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::*;
use crate::backend::models::{Bindings, VariableAtom};

// ============================================================================
// Test payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Int(i64);

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Grounded for Int {
    fn type_(&self) -> Atom {
        Atom::sym("int")
    }
}

/// Matches any symbol, binding `$matched` to it
#[derive(Debug, Clone, PartialEq)]
struct AnySymbol;

impl fmt::Display for AnySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "any-symbol")
    }
}

impl Grounded for AnySymbol {
    fn type_(&self) -> Atom {
        Atom::sym("Matcher")
    }

    fn match_(&self, other: &Atom) -> Option<BindingsSet> {
        match other {
            Atom::Symbol(_) => {
                let mut bindings = Bindings::new();
                bindings
                    .add_var_binding(&VariableAtom::new("matched"), other)
                    .ok()?;
                Some(BindingsSet::from(bindings))
            }
            _ => Some(BindingsSet::empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Sum;

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sum")
    }
}

impl Grounded for Sum {
    fn type_(&self) -> Atom {
        Atom::expr([
            Atom::sym("->"),
            Atom::sym("int"),
            Atom::sym("int"),
            Atom::sym("int"),
        ])
    }

    fn is_executable(&self) -> bool {
        true
    }

    fn execute(&self, args: &[Atom]) -> Result<Vec<Atom>, ExecError> {
        if args.len() != 2 {
            return Err(ExecError::IncorrectArgument(format!(
                "sum expects 2 arguments, got {}",
                args.len()
            )));
        }
        let mut total = 0;
        for arg in args {
            match arg.as_gnd::<Int>() {
                Some(Int(n)) => total += n,
                None => {
                    return Err(ExecError::IncorrectArgument(format!(
                        "expected int, got {}",
                        arg
                    )))
                }
            }
        }
        Ok(vec![Atom::gnd(Int(total))])
    }
}

/// Counts how many times a payload copy is released
#[derive(Debug, Clone)]
struct DropCounter(Rc<Cell<usize>>);

impl PartialEq for DropCounter {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

impl fmt::Display for DropCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "counter")
    }
}

impl Grounded for DropCounter {
    fn type_(&self) -> Atom {
        Atom::sym("Counter")
    }
}

// ============================================================================
// Capability table
// ============================================================================

#[test]
fn test_grounded_type_and_display() {
    let atom = Atom::gnd(Int(42));
    assert_eq!(atom.to_text(), "42");
    assert_eq!(atom.grounded_type(), Some(Atom::sym("int")));
}

#[test]
fn test_grounded_equality_uses_payload() {
    assert_eq!(Atom::gnd(Int(1)), Atom::gnd(Int(1)));
    assert_ne!(Atom::gnd(Int(1)), Atom::gnd(Int(2)));
}

#[test]
fn test_grounded_equality_across_payload_types() {
    // Same rendering, different payload types
    assert_ne!(Atom::gnd(Int(1)), Atom::value(1i64));
    assert_ne!(Atom::value(1i32), Atom::value(1i64));
}

#[test]
fn test_grounded_clone_is_independent() {
    let atom = Atom::gnd(Int(5));
    let copy = atom.clone();
    drop(atom);
    assert_eq!(copy.as_gnd::<Int>(), Some(&Int(5)));
}

#[test]
fn test_default_match_is_absent() {
    let atom = Atom::gnd(Int(5));
    if let Atom::Grounded(g) = &atom {
        assert!(g.match_(&Atom::sym("x")).is_none());
    } else {
        panic!("Expected grounded atom");
    }
}

#[test]
fn test_custom_match() {
    let atom = Atom::gnd(AnySymbol);
    let Atom::Grounded(g) = &atom else {
        panic!("Expected grounded atom");
    };

    let matched = g.match_(&Atom::sym("A")).expect("custom matcher");
    assert_eq!(matched.len(), 1);
    assert_eq!(
        matched.iter().next().and_then(|b| b.resolve(&VariableAtom::new("matched"))),
        Some(Atom::sym("A"))
    );

    let rejected = g.match_(&Atom::expr([Atom::sym("A")])).expect("custom matcher");
    assert!(rejected.is_empty());
}

// ============================================================================
// Execution
// ============================================================================

#[test]
fn test_execute() {
    let sum = GroundedAtom::new(Sum);
    assert!(sum.is_executable());
    let result = sum
        .execute(&[Atom::gnd(Int(2)), Atom::gnd(Int(3))])
        .expect("sum");
    assert_eq!(result, vec![Atom::gnd(Int(5))]);
}

#[test]
fn test_execute_incorrect_argument() {
    let sum = GroundedAtom::new(Sum);
    let err = sum.execute(&[Atom::gnd(Int(2))]).unwrap_err();
    assert!(matches!(err, ExecError::IncorrectArgument(_)));

    let err = sum.execute(&[Atom::gnd(Int(2)), Atom::sym("x")]).unwrap_err();
    assert_eq!(err.to_string(), "Incorrect argument: expected int, got x");
}

#[test]
fn test_execute_not_executable() {
    let int = GroundedAtom::new(Int(1));
    assert!(!int.is_executable());
    assert_eq!(
        int.execute(&[]),
        Err(ExecError::NotExecutable("1".to_string()))
    );
}

#[test]
fn test_exec_error_display() {
    assert_eq!(ExecError::NoReduce.to_string(), "NoReduce");
    assert_eq!(
        ExecError::Runtime("boom".to_string()).to_string(),
        "Runtime error: boom"
    );
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn test_payload_released_exactly_once() {
    let drops = Rc::new(Cell::new(0));
    {
        let atom = Atom::gnd(DropCounter(drops.clone()));
        // The temporary passed to Atom::gnd was moved, not copied
        assert_eq!(drops.get(), 0);
        let expr = Atom::expr([Atom::sym("holds"), atom]);
        assert_eq!(expr.to_text(), "(holds counter)");
    }
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_cloned_payload_released_separately() {
    let drops = Rc::new(Cell::new(0));
    let atom = Atom::gnd(DropCounter(drops.clone()));
    let copy = atom.clone();
    assert_eq!(atom, copy);
    drop(atom);
    assert_eq!(drops.get(), 1);
    drop(copy);
    assert_eq!(drops.get(), 2);
}

#[test]
fn test_value_atom_type_is_rust_type_name() {
    let atom = Atom::value(3.5f64);
    assert_eq!(atom.grounded_type(), Some(Atom::sym("f64")));
    assert_eq!(atom.to_text(), "3.5");
    assert_eq!(atom.as_value::<f64>(), Some(&3.5));
}
