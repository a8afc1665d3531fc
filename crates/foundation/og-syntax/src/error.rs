//! Errors raised while converting a tree-sitter parse into a syntax tree

use og_span::Span;
use thiserror::Error;

/// Failure to convert a tree-sitter node into a [`crate::SyntaxNode`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A named tree-sitter node has no matching production
    #[error("grammar `{grammar}` has no production for node kind `{kind}` at {span}")]
    UnknownNodeKind {
        /// Name of the grammar doing the conversion
        grammar: &'static str,
        /// The unmapped tree-sitter kind
        kind: String,
        /// Where the node sits in the source
        span: Span,
    },

    /// The parser reported an error or inserted a missing node
    #[error("source does not parse: {reason} at {span}")]
    Malformed {
        /// `error` or `missing <kind>`
        reason: String,
        /// Where the parser gave up
        span: Span,
    },
}
