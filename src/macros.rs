//! Literal builders for atoms and bindings.
//!
//! Inside `expr!`, a string literal is a symbol, a bare identifier is a
//! variable, `( ... )` is a nested expression and `{ ... }` splices any Rust
//! expression convertible into an `Atom`:
//!
//! ```ignore
//! let atom = expr!(":" "foo" ("->" "A" t) {Atom::value(42)});
//! assert_eq!(atom.to_text(), "(: foo (-> A $t) 42)");
//! ```

/// Symbol atom
#[macro_export]
macro_rules! sym {
    ($name:expr) => {
        $crate::Atom::sym($name)
    };
}

/// Variable atom, named without the `$` sigil
#[macro_export]
macro_rules! var {
    ($name:expr) => {
        $crate::Atom::var($name)
    };
}

/// Atom literal; a single token is not wrapped in an expression
#[macro_export]
macro_rules! expr {
    (@child ($($x:tt)*)) => { $crate::expr!(@list $($x)*) };
    (@child {$x:expr}) => { $crate::Atom::from($x) };
    (@child $x:ident) => { $crate::Atom::var(stringify!($x)) };
    (@child $x:literal) => { $crate::Atom::sym($x) };
    (@list $($x:tt)*) => {{
        let children: ::std::vec::Vec<$crate::Atom> = ::std::vec![$($crate::expr!(@child $x)),*];
        $crate::Atom::expr(children)
    }};
    ($x:tt) => { $crate::expr!(@child $x) };
    ($($x:tt)*) => { $crate::expr!(@list $($x)*) };
}

/// Bindings literal: `bind!{ x: sym!("A"), y: expr!("f" z) }`
///
/// # Panics
/// If the listed bindings are inconsistent with each other.
#[macro_export]
macro_rules! bind {
    ($($var:ident: $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut bindings = $crate::Bindings::new();
        $(
            if let Err(e) = bindings.add_var_binding(
                &$crate::VariableAtom::new(stringify!($var)),
                &$value,
            ) {
                panic!("inconsistent bind! literal: {}", e);
            }
        )*
        bindings
    }};
}

/// Bindings set literal: `bind_set![{ x: sym!("A") }, { x: sym!("B") }]`
#[macro_export]
macro_rules! bind_set {
    () => {
        $crate::BindingsSet::empty()
    };
    ($({ $($var:ident: $value:expr),* $(,)? }),+ $(,)?) => {
        [$($crate::bind!{ $($var: $value),* }),+]
            .into_iter()
            .collect::<$crate::BindingsSet>()
    };
}
