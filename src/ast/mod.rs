//! AST module for stylegen
//!
//! This module provides the abstract description the engine works on: the
//! annotated declaration, the macro invocation attached to it, and the
//! declarations generated from the pair. Nothing here knows about the source
//! syntax; the `syntax` module lowers parsed sites into these types.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::Serialize;

pub mod declaration;
pub mod generated;
pub mod invocation;

pub use declaration::{AccessLevel, Declaration, DeclarationKind};
pub use generated::{GeneratedDeclaration, Role};
pub use invocation::{ArgumentValue, MacroArgument, MacroInvocation, MacroName};

// ============================================================================
// SOURCE LOCATIONS
// ============================================================================

/// Represents a span in the source code.
///
/// Offsets are byte positions into the file the site was parsed from.
///
/// # Examples
///
/// ```rust
/// use stylegen::ast::Span;
/// let span = Span { start: 0, end: 5 };
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

