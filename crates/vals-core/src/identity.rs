//! # Identity Handles
//!
//! Values whose equality is identity, not content: symbols, functions and
//! classes. Two symbols with the same description are still different
//! symbols; a symbol is only equal to its own clones.
//!
//! Every handle draws its id from one process-wide counter, so ids are
//! unique across all three handle kinds.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A unique symbol with an optional description.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Create a new symbol, distinct from every other symbol.
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: next_id(),
            description: Some(description.into()),
        }
    }

    /// Create a new symbol without a description.
    pub fn anonymous() -> Self {
        Self {
            id: next_id(),
            description: None,
        }
    }

    /// The process-unique id of this symbol.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The description given at creation, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol#{}({})", self.id, self.description().unwrap_or(""))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// An opaque callable value.
///
/// The engine never invokes functions; it only needs to recognise them.
#[derive(Clone)]
pub struct Function {
    id: u64,
    name: Arc<str>,
}

impl Function {
    /// Create a new function handle, distinct from every other.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
        }
    }

    /// The name given at creation.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Function {}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function {}]", self.name)
    }
}

/// A class with single inheritance, used by `instance` checks.
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

struct ClassInner {
    id: u64,
    name: String,
    parent: Option<Class>,
}

impl Class {
    /// Declare a root class.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInner {
            id: next_id(),
            name: name.into(),
            parent: None,
        }))
    }

    /// Declare a class that extends `parent`.
    pub fn extending(name: impl Into<String>, parent: &Class) -> Self {
        Self(Arc::new(ClassInner {
            id: next_id(),
            name: name.into(),
            parent: Some(parent.clone()),
        }))
    }

    /// The declared class name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The direct superclass, if any.
    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// Whether `self` is `ancestor` or inherits from it, directly or not.
    pub fn is_subclass_of(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == ancestor {
                return true;
            }
            current = class.parent();
        }
        false
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.0.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_compare_by_identity() {
        let a = Symbol::new("tag");
        let b = Symbol::new("tag");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.to_string(), "Symbol(tag)");
        assert_eq!(Symbol::anonymous().description(), None);
    }

    #[test]
    fn test_functions_compare_by_identity() {
        let f = Function::new("handler");
        assert_eq!(f, f.clone());
        assert_ne!(f, Function::new("handler"));
        assert_eq!(format!("{f:?}"), "[Function handler]");
    }

    #[test]
    fn test_subclass_chain() {
        let base = Class::new("Base");
        let middle = Class::extending("Middle", &base);
        let leaf = Class::extending("Leaf", &middle);
        let other = Class::new("Other");

        assert!(leaf.is_subclass_of(&leaf));
        assert!(leaf.is_subclass_of(&base));
        assert!(middle.is_subclass_of(&base));
        assert!(!base.is_subclass_of(&leaf));
        assert!(!leaf.is_subclass_of(&other));
        assert_eq!(leaf.parent().map(Class::name), Some("Middle"));
    }
}
