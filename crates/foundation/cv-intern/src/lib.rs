//! String interning for identifiers
//!
//! Every identifier in the AST carries a [`Symbol`]. The interner is shared
//! between the parser, the resolver and diagnostics rendering, so it is
//! reference counted and safe to intern into from any holder of a clone.

pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::fmt;
use std::sync::Arc;

/// Shared string interner
#[derive(Clone, Default)]
pub struct Interner {
    inner: Arc<ThreadedRodeo>,
}

impl Interner {
    /// Create an empty interner
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning the existing symbol if it was seen before
    pub fn intern(&self, text: &str) -> Symbol {
        self.inner.get_or_intern(text)
    }

    /// Look up a string without interning it
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.inner.get(text)
    }

    /// Resolve a symbol back to its text
    ///
    /// Symbols always come from this interner, so resolution cannot fail for
    /// them; use [`Interner::try_resolve`] for symbols of unknown origin.
    pub fn resolve(&self, sym: &Symbol) -> String {
        self.inner.resolve(sym).to_string()
    }

    /// Resolve a symbol that may not belong to this interner
    pub fn try_resolve(&self, sym: &Symbol) -> Option<String> {
        self.inner.try_resolve(sym).map(ToString::to_string)
    }

    /// Number of distinct strings interned so far
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing has been interned yet
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Interner").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_stable() {
        let interner = Interner::new();
        let first = interner.intern("foo");
        let second = interner.intern("foo");
        assert_eq!(first, second);
        assert_eq!(interner.resolve(&first), "foo");
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_clones_share_storage() {
        let interner = Interner::new();
        let clone = interner.clone();
        let sym = clone.intern("shared");
        assert_eq!(interner.get("shared"), Some(sym));
        assert_eq!(interner.get("missing"), None);
    }
}
