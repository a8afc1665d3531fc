//! tree-sitter adapter
//!
//! A [`Grammar`] wraps a tree-sitter language whose named node kinds are the
//! Og production names, and converts its concrete trees into
//! [`SyntaxNode`]s the lowering engine consumes.

use crate::{SyntaxError, SyntaxKind, SyntaxNode};
use anyhow::Result;
use og_span::Span;
use tree_sitter::{Node, Parser, Tree};

/// A tree-sitter grammar producing Og parse trees
pub trait Grammar: Send + Sync + 'static {
    /// Name of the grammar
    fn name(&self) -> &'static str;

    /// tree-sitter language instance
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Maps a named tree-sitter node kind to a production
    ///
    /// The default accepts exactly the grammar names of [`SyntaxKind`].
    /// Grammars with extras (comments and the like) map them to
    /// [`SyntaxKind::Token`] so the lowering engine skips them.
    fn syntax_kind(&self, node_kind: &str) -> Option<SyntaxKind> {
        SyntaxKind::from_name(node_kind)
    }

    /// Parse source code to a concrete syntax tree
    ///
    /// # Errors
    ///
    /// Returns an error if the language cannot be loaded or parsing fails
    fn parse(&self, source: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser.set_language(&self.tree_sitter_language())?;

        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("tree-sitter parse failed"))
    }

    /// Convert a tree-sitter node (and its subtree) to a syntax node
    ///
    /// # Errors
    ///
    /// Fails on error/missing nodes and on named nodes without a production.
    fn lower_node(&self, node: &Node<'_>, source: &str) -> Result<SyntaxNode, SyntaxError> {
        let span = Span::new(node.start_byte() as u32, node.end_byte() as u32);

        if node.is_error() || node.is_missing() {
            let reason = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                "error".to_string()
            };
            return Err(SyntaxError::Malformed { reason, span });
        }

        let kind = if node.is_named() {
            self.syntax_kind(node.kind())
                .ok_or_else(|| SyntaxError::UnknownNodeKind {
                    grammar: self.name(),
                    kind: node.kind().to_string(),
                    span,
                })?
        } else {
            SyntaxKind::Token
        };

        let text = source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or_default()
            .to_string();

        let mut children = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            children.push(self.lower_node(&child, source)?);
        }

        Ok(SyntaxNode {
            kind,
            span,
            text,
            children,
        })
    }

    /// Parse `source` and convert the whole tree
    ///
    /// # Errors
    ///
    /// Returns parser setup failures and conversion failures
    fn parse_to_syntax(&self, source: &str) -> Result<SyntaxNode> {
        let tree = self.parse(source)?;
        Ok(self.lower_node(&tree.root_node(), source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Borrows the Rust grammar to exercise the conversion machinery
    struct StandIn;

    impl Grammar for StandIn {
        fn name(&self) -> &'static str {
            "stand-in"
        }

        fn tree_sitter_language(&self) -> tree_sitter::Language {
            tree_sitter_rust::LANGUAGE.into()
        }

        fn syntax_kind(&self, node_kind: &str) -> Option<SyntaxKind> {
            match node_kind {
                "source_file" => Some(SyntaxKind::SourceFile),
                "function_item" => Some(SyntaxKind::FunctionDecl),
                "identifier" => Some(SyntaxKind::Identifier),
                "parameters" => Some(SyntaxKind::Parameters),
                "block" => Some(SyntaxKind::Block),
                _ => None,
            }
        }
    }

    #[test]
    fn converts_named_and_anonymous_nodes() {
        let source = "fn main() {}";
        let root = StandIn.parse_to_syntax(source).unwrap();

        assert_eq!(root.kind, SyntaxKind::SourceFile);
        let function = root.child(SyntaxKind::FunctionDecl).unwrap();
        assert_eq!(function.text, source);
        assert_eq!(function.span, Span::new(0, 12));
        assert_eq!(function.children[0].kind, SyntaxKind::Token);
        assert!(function.children[0].is_token_text("fn"));

        let name = function.child(SyntaxKind::Identifier).unwrap();
        assert_eq!(name.text, "main");
        assert_eq!(name.span, Span::new(3, 7));
        assert!(function.has_child(SyntaxKind::Parameters));
        assert!(function.has_child(SyntaxKind::Block));
    }

    #[test]
    fn unmapped_named_kind_is_rejected() {
        let error = StandIn
            .parse_to_syntax("fn main() { let x = 1; }")
            .unwrap_err();
        let error = error.downcast::<SyntaxError>().unwrap();
        assert!(matches!(
            error,
            SyntaxError::UnknownNodeKind { ref kind, .. } if kind == "let_declaration"
        ));
    }

    #[test]
    fn default_mapping_uses_grammar_names() {
        struct ByName;
        impl Grammar for ByName {
            fn name(&self) -> &'static str {
                "by-name"
            }
            fn tree_sitter_language(&self) -> tree_sitter::Language {
                tree_sitter_rust::LANGUAGE.into()
            }
        }

        assert_eq!(ByName.syntax_kind("if_stmt"), Some(SyntaxKind::IfStmt));
        assert_eq!(ByName.syntax_kind("function_item"), None);
    }
}
