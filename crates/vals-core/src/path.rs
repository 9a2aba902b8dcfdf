//! # Traversal Paths
//!
//! A `Path` locates a sub-value inside an input: array and tuple positions
//! are indices, object and record properties are string or symbol keys.
//! The empty path is the root of the input.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::identity::Symbol;
use crate::value::PropertyKey;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Array or tuple position.
    Index(usize),
    /// String property key.
    Key(String),
    /// Symbol property key.
    Symbol(Symbol),
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        Self::Key(s.to_string())
    }
}

impl From<&PropertyKey> for PathSegment {
    fn from(key: &PropertyKey) -> Self {
        match key {
            PropertyKey::String(s) => Self::Key(s.clone()),
            PropertyKey::Symbol(s) => Self::Symbol(s.clone()),
        }
    }
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Index(i) => serializer.serialize_u64(*i as u64),
            Self::Key(k) => serializer.serialize_str(k),
            Self::Symbol(s) => serializer.serialize_str(&s.to_string()),
        }
    }
}

/// An owned sequence of segments from the input root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether no segment has been entered.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Same as [`Path::is_root`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Descend one step.
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Drop every segment past the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Renders `(root)` for the empty path, otherwise `a.b[0][Symbol(s)]`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Symbol(symbol) => write!(f, "[{symbol}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(Path::root().to_string(), "(root)");
        assert!(Path::root().is_root());
    }

    #[test]
    fn test_nested_display() {
        let path: Path = vec![
            PathSegment::from("items"),
            PathSegment::Index(2),
            PathSegment::from("name"),
            PathSegment::Symbol(Symbol::new("meta")),
        ]
        .into();
        assert_eq!(path.to_string(), "items[2].name[Symbol(meta)]");
    }

    #[test]
    fn test_truncate_restores_prefix() {
        let mut path = Path::root();
        path.push("a".into());
        path.push(0.into());
        path.truncate(1);
        assert_eq!(path.segments(), &[PathSegment::Key("a".into())]);
    }

    #[test]
    fn test_serializes_as_array() {
        let path: Path = vec![PathSegment::from("a"), PathSegment::Index(1)].into();
        assert_eq!(serde_json::to_value(&path).unwrap(), serde_json::json!(["a", 1]));
    }
}
