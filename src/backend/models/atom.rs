//! The atom term representation.
//!
//! An `Atom` is one of four variants: a symbol, a logic variable, an
//! expression (ordered list of child atoms) or a grounded atom wrapping an
//! external payload. Atoms form trees; every node is owned exactly once and
//! `clone()` is a deep copy, with grounded payloads copied through their own
//! `Clone` impl.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::grounded::{Grounded, GroundedAtom, ValueAtom};
use crate::backend::symbol::Symbol;

/// Source of fresh variable identities for alpha-renaming.
/// Identity 0 is reserved for variables written by callers.
static NEXT_VARIABLE_ID: AtomicUsize = AtomicUsize::new(1);

/// Prefix used when rendering variables
pub const VARIABLE_SIGIL: char = '$';

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SymbolAtom {
    name: Symbol,
}

impl SymbolAtom {
    pub fn new(name: impl Into<Symbol>) -> Self {
        SymbolAtom { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for SymbolAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for SymbolAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A named logic variable.
///
/// Two variables are the same variable iff both the name and the identity
/// match. Variables built by callers have identity 0; `make_unique` hands out
/// a fresh identity so the renamed copy can never collide with a caller's
/// variable of the same name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VariableAtom {
    name: String,
    id: usize,
}

impl VariableAtom {
    pub fn new(name: impl Into<String>) -> Self {
        VariableAtom {
            name: name.into(),
            id: 0,
        }
    }

    /// Create a variable that is guaranteed not to occur anywhere else
    pub fn new_unique(name: impl Into<String>) -> Self {
        VariableAtom::new(name).make_unique()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Copy of this variable with a fresh process-wide identity
    pub fn make_unique(&self) -> Self {
        VariableAtom {
            name: self.name.clone(),
            id: NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl fmt::Display for VariableAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == 0 {
            write!(f, "{}{}", VARIABLE_SIGIL, self.name)
        } else {
            write!(f, "{}{}#{}", VARIABLE_SIGIL, self.name, self.id)
        }
    }
}

impl fmt::Debug for VariableAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[derive(Clone, PartialEq, Default)]
pub struct ExpressionAtom {
    children: Vec<Atom>,
}

impl ExpressionAtom {
    pub fn new(children: Vec<Atom>) -> Self {
        ExpressionAtom { children }
    }

    #[inline]
    pub fn children(&self) -> &[Atom] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<Atom> {
        &mut self.children
    }

    pub fn into_children(self) -> Vec<Atom> {
        self.children
    }

    /// Number of children
    #[inline]
    pub fn arity(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// First child, the operator position of an application
    #[inline]
    pub fn head(&self) -> Option<&Atom> {
        self.children.first()
    }
}

impl fmt::Display for ExpressionAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for ExpressionAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Discriminant of an `Atom`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Symbol,
    Variable,
    Expression,
    Grounded,
}

/// A term of the atom space
#[derive(Clone, PartialEq)]
pub enum Atom {
    Symbol(SymbolAtom),
    Variable(VariableAtom),
    Expression(ExpressionAtom),
    Grounded(GroundedAtom),
}

impl Atom {
    pub fn sym(name: impl Into<Symbol>) -> Self {
        Atom::Symbol(SymbolAtom::new(name))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Atom::Variable(VariableAtom::new(name))
    }

    /// Build an expression; accepts `Vec<Atom>`, arrays and slices
    pub fn expr(children: impl Into<Vec<Atom>>) -> Self {
        Atom::Expression(ExpressionAtom::new(children.into()))
    }

    /// Wrap a payload implementing the grounded capability trait
    pub fn gnd<T: Grounded + Clone + PartialEq>(payload: T) -> Self {
        Atom::Grounded(GroundedAtom::new(payload))
    }

    /// Wrap a plain Rust value as a grounded atom, see `ValueAtom`
    pub fn value<T>(value: T) -> Self
    where
        T: Clone + PartialEq + fmt::Display + fmt::Debug + 'static,
    {
        Atom::gnd(ValueAtom::new(value))
    }

    pub fn kind(&self) -> AtomKind {
        match self {
            Atom::Symbol(_) => AtomKind::Symbol,
            Atom::Variable(_) => AtomKind::Variable,
            Atom::Expression(_) => AtomKind::Expression,
            Atom::Grounded(_) => AtomKind::Grounded,
        }
    }

    /// Name of a symbol or variable (variables without the sigil)
    pub fn name(&self) -> Option<&str> {
        match self {
            Atom::Symbol(s) => Some(s.name()),
            Atom::Variable(v) => Some(v.name()),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[Atom]> {
        match self {
            Atom::Expression(e) => Some(e.children()),
            _ => None,
        }
    }

    /// Type reported by a grounded atom's payload
    pub fn grounded_type(&self) -> Option<Atom> {
        match self {
            Atom::Grounded(g) => Some(g.type_()),
            _ => None,
        }
    }

    /// Typed access to a grounded payload
    pub fn as_gnd<T: 'static>(&self) -> Option<&T> {
        match self {
            Atom::Grounded(g) => g.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Typed access to a value wrapped by `Atom::value`
    pub fn as_value<T>(&self) -> Option<&T>
    where
        T: Clone + PartialEq + fmt::Display + fmt::Debug + 'static,
    {
        self.as_gnd::<ValueAtom<T>>().map(ValueAtom::get)
    }

    /// Every variable occurrence, depth-first, left to right
    pub fn iter_vars(&self) -> impl Iterator<Item = &VariableAtom> + '_ {
        let mut vars = Vec::new();
        collect_vars(self, &mut vars);
        vars.into_iter()
    }

    pub fn contains_var(&self, var: &VariableAtom) -> bool {
        match self {
            Atom::Variable(v) => v == var,
            Atom::Expression(e) => e.children().iter().any(|c| c.contains_var(var)),
            _ => false,
        }
    }

    /// Canonical printable form, identical to `Display`
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

/// Push every variable occurrence of `atom` onto `vars`, depth-first
pub fn collect_vars<'a>(atom: &'a Atom, vars: &mut Vec<&'a VariableAtom>) {
    match atom {
        Atom::Variable(v) => vars.push(v),
        Atom::Expression(e) => {
            for child in e.children() {
                collect_vars(child, vars);
            }
        }
        _ => {}
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(s) => fmt::Display::fmt(s, f),
            Atom::Variable(v) => fmt::Display::fmt(v, f),
            Atom::Expression(e) => fmt::Display::fmt(e, f),
            Atom::Grounded(g) => fmt::Display::fmt(g, f),
        }
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<SymbolAtom> for Atom {
    fn from(s: SymbolAtom) -> Self {
        Atom::Symbol(s)
    }
}

impl From<VariableAtom> for Atom {
    fn from(v: VariableAtom) -> Self {
        Atom::Variable(v)
    }
}

impl From<ExpressionAtom> for Atom {
    fn from(e: ExpressionAtom) -> Self {
        Atom::Expression(e)
    }
}

impl<'a> TryFrom<&'a Atom> for &'a VariableAtom {
    type Error = &'static str;

    fn try_from(atom: &'a Atom) -> Result<Self, Self::Error> {
        match atom {
            Atom::Variable(v) => Ok(v),
            _ => Err("atom is not a variable"),
        }
    }
}

impl<'a> TryFrom<&'a Atom> for &'a ExpressionAtom {
    type Error = &'static str;

    fn try_from(atom: &'a Atom) -> Result<Self, Self::Error> {
        match atom {
            Atom::Expression(e) => Ok(e),
            _ => Err("atom is not an expression"),
        }
    }
}
