//! GroundingSpace storage and query behaviour through the public API.

mod common;

use std::fmt;

use common::{collect_atoms, collect_bindings, int, space_of};
use mettaspace::{
    expr, match_atoms, sym, Atom, BindingsSet, Grounded, GroundingSpace, SpaceConfig,
    VariableAtom,
};

/// Grounded point that matches any `(point X Y)` pattern against its
/// coordinates
#[derive(Debug, Clone, PartialEq)]
struct Point(i64, i64);

impl Point {
    fn as_expr(&self) -> Atom {
        expr!("point" {int(self.0)} {int(self.1)})
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.0, self.1)
    }
}

impl Grounded for Point {
    fn type_(&self) -> Atom {
        sym!("Point")
    }

    fn match_(&self, other: &Atom) -> Option<BindingsSet> {
        Some(match_atoms(&self.as_expr(), other))
    }
}

#[test]
fn test_query_projects_onto_pattern_variables() {
    let mut space = GroundingSpace::new();
    space.add(expr!("+" a "B"));

    let result = space.query(&expr!("+" "A" b));
    let solutions = collect_bindings(&result);
    assert_eq!(solutions.len(), 1);

    let pairs: Vec<String> = solutions[0]
        .iter()
        .map(|(var, value)| format!("{}: {}", var.name(), value))
        .collect();
    assert_eq!(pairs, vec!["b: B"]);
    assert!(!solutions[0].contains(&VariableAtom::new("a")));
}

#[test]
fn test_add_get_remove_replace_round_trip() {
    let mut space = GroundingSpace::new();
    space.add(sym!("first"));
    space.add(expr!("second" {int(2)}));
    space.add(sym!("third"));
    assert_eq!(space.get(1), Some(&expr!("second" {int(2)})));

    let before = space.len();
    assert!(space.remove(&sym!("first")));
    assert_eq!(space.len(), before - 1);
    assert_eq!(space.get(0), Some(&expr!("second" {int(2)})));

    assert!(space.replace(&sym!("third"), sym!("fourth")));
    assert_eq!(space.len(), before - 1);
    assert_eq!(space.get(1), Some(&sym!("fourth")));
}

#[test]
fn test_not_found_leaves_space_unchanged() {
    let mut space = space_of([sym!("a"), sym!("b")]);
    let before = collect_atoms(&space);
    assert!(!space.remove(&sym!("c")));
    assert!(!space.replace(&sym!("c"), sym!("d")));
    assert_eq!(collect_atoms(&space), before);
}

#[test]
fn test_query_results_in_storage_order() {
    let space = space_of([
        expr!("parent" "Alice" "Bob"),
        expr!("parent" "Bob" "Carol"),
        expr!("likes" "Alice" "Carol"),
        expr!("parent" "Carol" "Dave"),
    ]);
    let children: Vec<Atom> = collect_bindings(&space.query(&expr!("parent" x y)))
        .iter()
        .filter_map(|bindings| bindings.resolve(&VariableAtom::new("y")))
        .collect();
    assert_eq!(children, vec![sym!("Bob"), sym!("Carol"), sym!("Dave")]);
}

#[test]
fn test_query_shared_variable() {
    let space = space_of([
        expr!("edge" "a" "a"),
        expr!("edge" "a" "b"),
        expr!("edge" "b" "b"),
    ]);
    assert_eq!(space.query(&expr!("edge" x x)).len(), 2);
}

#[test]
fn test_query_without_match_is_empty() {
    let space = space_of([expr!("foo" "bar")]);
    assert!(space.query(&expr!("baz" x)).is_empty());
    assert!(space.query(&expr!("foo" x "extra")).is_empty());
}

#[test]
fn test_query_ground_pattern_yields_empty_bindings() {
    let space = space_of([expr!("foo" "bar")]);
    let result = space.query(&expr!("foo" "bar"));
    assert!(result.is_single());
}

#[test]
fn test_repeated_queries_do_not_capture_variables() {
    let space = space_of([expr!("pair" x "A"), expr!("pair" "B" x)]);
    for _ in 0..3 {
        let result = space.query(&expr!("pair" y z));
        assert_eq!(result.len(), 2);
        for bindings in &result {
            assert!(bindings.vars().all(|v| v.id() == 0));
        }
    }
}

#[test]
fn test_subst() {
    let space = space_of([expr!("parent" "Alice" "Bob"), expr!("parent" "Bob" "Carol")]);
    let children = space.subst(&expr!("parent" "Alice" c), &expr!("child" c));
    assert_eq!(children, vec![expr!("child" "Bob")]);

    let everyone = space.subst(&expr!("parent" x y), &expr!(y "of" x));
    assert_eq!(everyone, vec![expr!("Bob" "of" "Alice"), expr!("Carol" "of" "Bob")]);
}

#[test]
fn test_head_index_gives_same_results() {
    let atoms = [
        expr!("parent" "Alice" "Bob"),
        expr!("likes" "Alice" "Carol"),
        expr!("parent" "Bob" "Carol"),
    ];
    let plain = space_of(atoms.clone());
    let mut indexed = GroundingSpace::with_config(&SpaceConfig {
        head_index: true,
        expected_atoms: 64,
    });
    for atom in atoms {
        indexed.add(atom);
    }

    for pattern in [expr!("parent" x y), expr!("missing" x), expr!(x "Alice" y), expr!(x)] {
        assert_eq!(
            collect_bindings(&plain.query(&pattern)),
            collect_bindings(&indexed.query(&pattern)),
            "pattern {}",
            pattern
        );
    }
}

#[test]
fn test_query_uses_custom_grounded_matcher() {
    let space = space_of([
        expr!("located" {Atom::gnd(Point(1, 2))} place),
        expr!("located" {Atom::gnd(Point(3, 4))} "work"),
    ]);

    // The matcher binds the pattern's coordinates; the stored `$place`
    // bound to "home" is projected out
    let result = space.query(&expr!("located" ("point" x y) "home"));
    let solutions = collect_bindings(&result);
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].resolve(&VariableAtom::new("x")), Some(int(1)));
    assert_eq!(solutions[0].resolve(&VariableAtom::new("y")), Some(int(2)));
    assert_eq!(solutions[0].vars().count(), 2);
    assert!(!solutions[0].contains(&VariableAtom::new("place")));

    // Ground coordinates select one point
    let result = space.query(&expr!("located" ("point" {int(3)} {int(4)}) w));
    let solutions = collect_bindings(&result);
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].resolve(&VariableAtom::new("w")), Some(sym!("work")));

    // The matcher rejects shapes it does not describe
    assert!(space.query(&expr!("located" ("point" x) w)).is_empty());

    // A bare variable binds the grounded atom itself; the first fact
    // matches too because its `$place` takes "work"
    let points: Vec<Atom> = collect_bindings(&space.query(&expr!("located" p "work")))
        .iter()
        .filter_map(|bindings| bindings.resolve(&VariableAtom::new("p")))
        .collect();
    assert_eq!(points, vec![Atom::gnd(Point(1, 2)), Atom::gnd(Point(3, 4))]);
}
