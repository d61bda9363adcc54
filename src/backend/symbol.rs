//! Symbol names for atoms.
//!
//! With the `symbol-interning` feature, `Symbol` is a 4-byte key into a
//! process-wide `lasso::ThreadedRodeo`, so comparing two symbol atoms is an
//! integer comparison. Without the feature it owns its `String`.
//!
//! Either way a `Symbol` copies its input on construction: mutating the
//! buffer a symbol was built from never changes the symbol afterwards.
//!
//! ```ignore
//! use mettaspace::backend::symbol::intern;
//!
//! let a = intern("Verb");
//! let b = intern("Verb");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "Verb");
//! ```

#[cfg(feature = "symbol-interning")]
mod interned {
    use lasso::{Spur, ThreadedRodeo};
    use std::sync::OnceLock;

    static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();

    #[inline]
    fn interner() -> &'static ThreadedRodeo {
        INTERNER.get_or_init(ThreadedRodeo::new)
    }

    /// Interned symbol name
    #[derive(Copy, Clone, Eq, PartialEq, Hash)]
    pub struct Symbol(Spur);

    impl Symbol {
        #[inline]
        pub fn new(s: &str) -> Self {
            Symbol(interner().get_or_intern(s))
        }

        #[inline]
        pub fn from_string(s: String) -> Self {
            Symbol(interner().get_or_intern(s))
        }

        #[inline]
        pub fn as_str(&self) -> &'static str {
            interner().resolve(&self.0)
        }
    }

    impl std::fmt::Debug for Symbol {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "Symbol({:?})", self.as_str())
        }
    }
}

#[cfg(not(feature = "symbol-interning"))]
mod owned {
    /// Owned symbol name
    #[derive(Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Symbol(String);

    impl Symbol {
        #[inline]
        pub fn new(s: &str) -> Self {
            Symbol(s.to_string())
        }

        /// Takes the string without copying it
        #[inline]
        pub fn from_string(s: String) -> Self {
            Symbol(s)
        }

        #[inline]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }
}

#[cfg(feature = "symbol-interning")]
pub use interned::Symbol;

#[cfg(not(feature = "symbol-interning"))]
pub use owned::Symbol;

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    #[inline]
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    #[inline]
    fn from(s: String) -> Self {
        Symbol::from_string(s)
    }
}

impl From<&String> for Symbol {
    #[inline]
    fn from(s: &String) -> Self {
        Symbol::new(s.as_str())
    }
}

impl AsRef<str> for Symbol {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Intern a name and return its `Symbol`
#[inline]
pub fn intern(s: &str) -> Symbol {
    Symbol::new(s)
}

/// Intern an owned name and return its `Symbol`
#[inline]
pub fn intern_string(s: String) -> Symbol {
    Symbol::from_string(s)
}
