//! Parse-tree contract for the Og lowering engine
//!
//! A [`SyntaxNode`] is one grammar production (or token) as emitted by an
//! external grammar-based parser: its [`SyntaxKind`] tag, its byte span,
//! its raw source text and its children in source order. Trees can be built
//! directly with [`SyntaxNode::token`] / [`SyntaxNode::branch`], or converted
//! from a tree-sitter parse through a [`Grammar`].

pub mod build;
pub mod error;
pub mod grammar;
pub mod kind;

pub use error::SyntaxError;
pub use grammar::Grammar;
pub use kind::SyntaxKind;

use og_span::Span;
use serde::{Deserialize, Serialize};

/// Parse-tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    /// The production (or token) kind of this node
    pub kind: SyntaxKind,
    /// Source location
    pub span: Span,
    /// Raw source text covered by this node
    pub text: String,
    /// Child nodes, in source order
    #[serde(default)]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Creates a leaf token spanning its own text
    pub fn token(kind: SyntaxKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let span = Span::new(0, text.len() as u32);
        Self {
            kind,
            span,
            text,
            children: Vec::new(),
        }
    }

    /// Creates a production from its children
    ///
    /// Child text is concatenated and child spans are laid out one after the
    /// other starting at offset zero.
    pub fn branch(kind: SyntaxKind, mut children: Vec<Self>) -> Self {
        let mut text = String::new();
        let mut offset = 0;
        for child in &mut children {
            child.shift(offset);
            offset += child.text.len() as u32;
            text.push_str(&child.text);
        }
        Self {
            kind,
            span: Span::new(0, offset),
            text,
            children,
        }
    }

    fn shift(&mut self, offset: u32) {
        self.span = self.span.shifted(offset);
        for child in &mut self.children {
            child.shift(offset);
        }
    }

    /// Whether this node is a leaf token
    pub fn is_token(&self) -> bool {
        self.kind.is_token()
    }

    /// Whether this node is a token whose text (ignoring whitespace) is `text`
    pub fn is_token_text(&self, text: &str) -> bool {
        self.is_token() && self.compact_text() == text
    }

    /// Raw text with every whitespace character removed
    pub fn compact_text(&self) -> String {
        compact(&self.text)
    }

    /// First child of the given kind
    pub fn child(&self, kind: SyntaxKind) -> Option<&Self> {
        self.children_of(kind).next()
    }

    /// `index`-th child of the given kind
    pub fn nth_child(&self, kind: SyntaxKind, index: usize) -> Option<&Self> {
        self.children_of(kind).nth(index)
    }

    /// Whether a child of the given kind is present
    pub fn has_child(&self, kind: SyntaxKind) -> bool {
        self.child(kind).is_some()
    }

    /// All children of the given kind, in source order
    pub fn children_of(&self, kind: SyntaxKind) -> impl Iterator<Item = &Self> + '_ {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// Children that are grammar productions rather than tokens
    pub fn productions(&self) -> impl Iterator<Item = &Self> + '_ {
        self.children.iter().filter(|child| !child.is_token())
    }

    /// First child that is a grammar production
    pub fn first_production(&self) -> Option<&Self> {
        self.productions().next()
    }

    /// Position of the first token child whose text is `text`
    pub fn token_position(&self, text: &str) -> Option<usize> {
        self.children.iter().position(|child| child.is_token_text(text))
    }
}

/// Removes every whitespace character from `text`
pub fn compact(text: &str) -> String {
    text.chars().filter(|character| !character.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> SyntaxNode {
        SyntaxNode::token(SyntaxKind::Identifier, name)
    }

    #[test]
    fn branch_concatenates_text_and_lays_out_spans() {
        let list = SyntaxNode::branch(
            SyntaxKind::IdentifierList,
            vec![
                ident("alpha"),
                SyntaxNode::token(SyntaxKind::Token, ", "),
                ident("b"),
            ],
        );
        assert_eq!(list.text, "alpha, b");
        assert_eq!(list.span, Span::new(0, 8));
        assert_eq!(list.children[2].span, Span::new(7, 8));
        assert_eq!(list.compact_text(), "alpha,b");

        let outer = SyntaxNode::branch(
            SyntaxKind::VarSpec,
            vec![SyntaxNode::token(SyntaxKind::Token, "var "), list],
        );
        let nested = &outer.children[1];
        assert_eq!(nested.span, Span::new(4, 12));
        assert_eq!(nested.children[2].span, Span::new(11, 12));
        assert_eq!(&outer.text[nested.span.range()], "alpha, b");
    }

    #[test]
    fn kind_accessors() {
        let list = SyntaxNode::branch(
            SyntaxKind::IdentifierList,
            vec![ident("a"), SyntaxNode::token(SyntaxKind::Token, ","), ident("b")],
        );
        assert_eq!(list.child(SyntaxKind::Identifier).map(|n| n.text.as_str()), Some("a"));
        assert_eq!(
            list.nth_child(SyntaxKind::Identifier, 1).map(|n| n.text.as_str()),
            Some("b")
        );
        assert!(list.nth_child(SyntaxKind::Identifier, 2).is_none());
        assert!(!list.has_child(SyntaxKind::Expression));
        assert_eq!(list.children_of(SyntaxKind::Identifier).count(), 2);
        assert!(list.first_production().is_none());
        assert_eq!(list.token_position(","), Some(1));
    }

    #[test]
    fn compact_strips_all_whitespace() {
        assert_eq!(compact(" [ :\n n ] "), "[:n]");
        assert!(SyntaxNode::token(SyntaxKind::Token, " else ").is_token_text("else"));
    }
}
