//! Og abstract syntax tree
//!
//! The typed tree produced by lowering an Og parse tree. Every node owns its
//! children exclusively and carries a [`FileSpan`]. Every sum type is an enum
//! held next to the node's provenance, so a node always has exactly one
//! variant.

pub mod dump;
pub mod expr;
pub mod items;
pub mod stmt;
pub mod types;
pub mod visit;

pub use expr::*;
pub use items::*;
pub use stmt::*;
pub use types::*;

pub use og_span::{FileId, FileSpan, Span};

use serde::{Deserialize, Serialize};

/// Ordered identifiers of a declaration, parameter or binding
///
/// A plain value: the count is not checked against any expression list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierList(pub Vec<String>);

impl IdentifierList {
    /// Wraps names in source order
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Names in source order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no names
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Ordered, comma-separated expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionList {
    /// Expressions in source order
    pub exprs: Vec<Expr>,
    /// Source location
    pub span: FileSpan,
}

impl ExpressionList {
    /// Wraps expressions in source order
    pub fn new(exprs: Vec<Expr>, span: FileSpan) -> Self {
        Self { exprs, span }
    }

    /// Number of expressions
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// Brace-delimited statement sequence
///
/// Bodies written as a single bare statement are normalized into a
/// one-statement block during lowering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Statements in source order
    pub statements: Vec<Stmt>,
    /// Source location
    pub span: FileSpan,
}

impl Block {
    /// Wraps statements in source order
    pub fn new(statements: Vec<Stmt>, span: FileSpan) -> Self {
        Self { statements, span }
    }
}
