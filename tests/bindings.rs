//! Bindings and BindingsSet algebra through the public API.

mod common;

use common::collect_bindings;
use mettaspace::{bind, expr, sym, Bindings, BindingsError, BindingsSet, VariableAtom};

fn var(name: &str) -> VariableAtom {
    VariableAtom::new(name)
}

fn bound_count(set: &BindingsSet) -> Vec<usize> {
    collect_bindings(set)
        .iter()
        .map(|bindings| bindings.iter().count())
        .collect()
}

#[test]
fn test_bindings_set_merge_scenario() {
    let mut bindings_a = Bindings::new();
    bindings_a.add_var_binding(&var("a"), &sym!("A")).unwrap();
    let mut bindings_b = Bindings::new();
    bindings_b.add_var_binding(&var("b"), &sym!("B")).unwrap();
    let set_1 = bindings_a.merge(&bindings_b);
    assert_eq!(set_1.len(), 1);

    let mut bindings_c = Bindings::new();
    bindings_c.add_var_binding(&var("c"), &sym!("C")).unwrap();
    let set_2 = BindingsSet::from(bindings_c);

    let mut result = set_1.merge(&set_2);
    assert_eq!(bound_count(&result), vec![3]);

    result.add_var_equality(&var("a"), &var("a_prime"));
    assert_eq!(bound_count(&result), vec![4]);

    result.add_var_binding(&var("d"), &sym!("D"));
    assert_eq!(bound_count(&result), vec![5]);

    let only = &collect_bindings(&result)[0];
    assert_eq!(only.resolve(&var("a_prime")), Some(sym!("A")));
    assert_eq!(only.resolve(&var("d")), Some(sym!("D")));

    // Inputs are untouched by merging
    assert_eq!(bindings_a, bind! { a: sym!("A") });
    assert_eq!(set_2.len(), 1);
}

#[test]
fn test_merge_two_single_solutions() {
    let left = BindingsSet::from(bind! { a: sym!("A") });
    let right = BindingsSet::from(bind! { c: sym!("C") });
    let merged = left.merge(&right);
    assert_eq!(merged, BindingsSet::from(bind! { a: sym!("A"), c: sym!("C") }));
}

#[test]
fn test_merge_drops_conflicts() {
    let left: BindingsSet = [bind! { a: sym!("A") }, bind! { a: sym!("B") }]
        .into_iter()
        .collect();
    let right = BindingsSet::from(bind! { a: sym!("B") });
    let merged = left.merge(&right);
    assert_eq!(merged, BindingsSet::from(bind! { a: sym!("B") }));
}

#[test]
fn test_set_add_var_binding_drops_conflicting_members() {
    let mut set: BindingsSet = [bind! { a: sym!("A") }, bind! { a: sym!("B") }]
        .into_iter()
        .collect();
    set.add_var_binding(&var("a"), &sym!("A"));
    assert_eq!(set, BindingsSet::from(bind! { a: sym!("A") }));
}

#[test]
fn test_strict_binding_conflict() {
    let mut bindings = bind! { a: sym!("A") };
    let err = bindings.add_var_binding(&var("a"), &sym!("B")).unwrap_err();
    assert!(matches!(err, BindingsError::Conflict { .. }));
    assert_eq!(bindings, bind! { a: sym!("A") });
}

#[test]
fn test_strict_binding_cycle() {
    let mut bindings = Bindings::new();
    let err = bindings
        .add_var_binding(&var("x"), &expr!("f" x))
        .unwrap_err();
    assert!(matches!(err, BindingsError::Cyclic { .. }));
    assert!(bindings.is_empty());
}

#[test]
fn test_resolve_through_equality_and_nesting() {
    let mut bindings = Bindings::new();
    bindings.add_var_equality(&var("x"), &var("y")).unwrap();
    bindings.add_var_binding(&var("z"), &expr!("pair" x "B")).unwrap();
    bindings.add_var_binding(&var("y"), &sym!("A")).unwrap();

    assert_eq!(bindings.resolve(&var("x")), Some(sym!("A")));
    assert_eq!(bindings.resolve(&var("z")), Some(expr!("pair" "A" "B")));
    assert_eq!(bindings.resolve(&var("missing")), None);
}

#[test]
fn test_resolve_and_remove() {
    let mut bindings = bind! { x: sym!("A"), y: sym!("B") };
    assert_eq!(bindings.resolve_and_remove(&var("x")), Some(sym!("A")));
    assert!(!bindings.contains(&var("x")));
    assert_eq!(bindings.resolve(&var("y")), Some(sym!("B")));
    assert_eq!(bindings.resolve_and_remove(&var("x")), None);
}

#[test]
fn test_rendering() {
    assert_eq!(Bindings::new().to_string(), "{ }");
    assert_eq!(bind! { a: sym!("A") }.to_string(), "{ $a = A }");
    assert_eq!(BindingsSet::empty().to_string(), "[ ]");
}
