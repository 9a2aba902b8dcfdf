//! # Execution Context
//!
//! Call-scoped mutable state threaded explicitly through every recursive
//! validation call: the current traversal path and the reason-collection
//! flag. One context per top-level `execute`/`parse`; never shared between
//! concurrent calls and never stored in static state.
//!
//! ## Stack Discipline
//!
//! Composite validators take a [`Mark`] before visiting children and
//! [`ExecutionContext::reset`] to it before returning, whether the call
//! passed or failed. Collection suppression is scoped through
//! [`ExecutionContext::suppressed`], which restores the previous flag.

use serde::Deserialize;
use vals_core::{Path, PathSegment};

/// Knobs for a fresh [`ExecutionContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    /// Record failure reasons. With this off, failures carry no reasons and
    /// validation only answers accept/reject.
    pub collect_reasons: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            collect_reasons: true,
        }
    }
}

/// Saved path depth, see [`ExecutionContext::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// Call-scoped traversal state: the current path and whether reasons are
/// being collected.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    path: Path,
    collect_reasons: bool,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext {
    /// A context at the root, with default options.
    pub fn new() -> Self {
        Self::with_options(ExecutionOptions::default())
    }

    /// A context at the root, configured by `options`.
    pub fn with_options(options: ExecutionOptions) -> Self {
        Self {
            path: Path::root(),
            collect_reasons: options.collect_reasons,
        }
    }

    /// Location of the value currently being validated.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False inside [`ExecutionContext::suppressed`] or when disabled by options.
    pub fn collects_reasons(&self) -> bool {
        self.collect_reasons
    }

    /// Remember the current depth for a later [`ExecutionContext::reset`].
    pub fn mark(&self) -> Mark {
        Mark(self.path.len())
    }

    /// Point the path at child `segment` of the location saved in `mark`.
    pub fn enter(&mut self, mark: Mark, segment: PathSegment) {
        self.path.truncate(mark.0);
        self.path.push(segment);
    }

    /// Restore the path saved in `mark`.
    pub fn reset(&mut self, mark: Mark) {
        self.path.truncate(mark.0);
    }

    /// Run `f` with reason collection off, then restore the previous flag.
    pub fn suppressed<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.collect_reasons, false);
        let out = f(self);
        self.collect_reasons = previous;
        out
    }
}
