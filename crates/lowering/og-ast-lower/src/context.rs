//! Per-unit lowering state

use crate::error::{LowerError, LowerResult};
use crate::heuristics;
use crate::options::LowerOptions;
use miette::NamedSource;
use og_span::{FileId, FileSpan};
use og_syntax::{SyntaxKind, SyntaxNode};
use tracing::{debug, trace};

/// State of one lowering invocation
///
/// Owns the line counter of the unit being lowered. Every invocation uses
/// its own context; nothing is shared between units.
pub struct LoweringContext<'tree> {
    file: FileId,
    line: u32,
    options: LowerOptions,
    /// Text of the root production, for diagnostics
    source: &'tree str,
}

impl<'tree> LoweringContext<'tree> {
    /// Create a context with default options
    pub fn new(file: FileId, root: &'tree SyntaxNode) -> Self {
        Self::with_options(file, root, LowerOptions::default())
    }

    /// Create a context with explicit options
    pub fn with_options(file: FileId, root: &'tree SyntaxNode, options: LowerOptions) -> Self {
        Self {
            file,
            line: options.first_line,
            options,
            source: &root.text,
        }
    }

    /// Points diagnostics at the text of a new root
    pub(crate) fn set_source(&mut self, root: &'tree SyntaxNode) {
        self.source = &root.text;
    }

    /// Source unit being lowered
    pub fn file(&self) -> FileId {
        self.file
    }

    /// Current value of the line counter
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Options of this run
    pub fn options(&self) -> &LowerOptions {
        &self.options
    }

    /// Canonical self-reference name
    pub fn self_name(&self) -> &str {
        &self.options.self_name
    }

    /// Provenance of `node` at the current line
    pub fn span(&self, node: &SyntaxNode) -> FileSpan {
        FileSpan::new(self.file, node.span, self.line)
    }

    /// Builds the mismatch error for `node`
    pub fn mismatch(&self, node: &SyntaxNode, detail: impl Into<String>) -> LowerError {
        let detail = detail.into();
        debug!(production = %node.kind, span = %node.span, %detail, "structural mismatch");
        LowerError::StructuralMismatch {
            production: node.kind,
            detail,
            location: self.span(node),
            span: (node.span.start as usize, node.span.len() as usize).into(),
            src: NamedSource::new(self.file.to_string(), self.source.to_string()),
        }
    }

    /// Fails unless `node` is a `kind` production
    pub fn expect_kind(&self, node: &SyntaxNode, kind: SyntaxKind) -> LowerResult<()> {
        if node.kind == kind {
            Ok(())
        } else {
            Err(self.mismatch(node, format!("expected `{kind}`, found `{}`", node.kind)))
        }
    }

    /// First child of `node` of the given kind, which the grammar guarantees
    pub fn required<'node>(
        &self,
        node: &'node SyntaxNode,
        kind: SyntaxKind,
    ) -> LowerResult<&'node SyntaxNode> {
        node.child(kind)
            .ok_or_else(|| self.mismatch(node, format!("missing `{kind}`")))
    }

    /// `index`-th child of `node` of the given kind, which the grammar guarantees
    pub fn required_nth<'node>(
        &self,
        node: &'node SyntaxNode,
        kind: SyntaxKind,
        index: usize,
    ) -> LowerResult<&'node SyntaxNode> {
        node.nth_child(kind, index)
            .ok_or_else(|| self.mismatch(node, format!("missing `{kind}` #{}", index + 1)))
    }

    /// Text of the required identifier child of `node`
    pub fn identifier(&self, node: &SyntaxNode) -> LowerResult<String> {
        self.required(node, SyntaxKind::Identifier)
            .map(SyntaxNode::compact_text)
    }

    /// Text of the `index`-th identifier child of `node`
    pub fn nth_identifier(&self, node: &SyntaxNode, index: usize) -> LowerResult<String> {
        self.required_nth(node, SyntaxKind::Identifier, index)
            .map(SyntaxNode::compact_text)
    }

    /// Accounts for a statement terminator passed while walking a list
    pub fn observe_eos(&mut self, eos: &SyntaxNode) {
        let at_end = eos.kind == SyntaxKind::Eof || eos.has_child(SyntaxKind::Eof);
        if heuristics::is_counted_terminator(&eos.compact_text(), at_end) {
            self.line += 1;
            trace!(line = self.line, span = %eos.span, "line counter advanced");
        }
    }

    /// Lowers every `kind` child of a list production, in order
    ///
    /// Terminators between elements advance the line counter; other tokens
    /// are punctuation. Any other production is a mismatch.
    pub fn lower_list<T>(
        &mut self,
        node: &SyntaxNode,
        kind: SyntaxKind,
        mut lower: impl FnMut(&mut Self, &SyntaxNode) -> LowerResult<T>,
    ) -> LowerResult<Vec<T>> {
        let mut items = Vec::new();
        for child in &node.children {
            if child.kind == kind {
                items.push(lower(self, child)?);
            } else if child.kind == SyntaxKind::Eos || child.kind == SyntaxKind::Eof {
                self.observe_eos(child);
            } else if !child.is_token() {
                return Err(self.mismatch(
                    node,
                    format!("unexpected `{}` in a list of `{kind}`", child.kind),
                ));
            }
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eos(text: &str) -> SyntaxNode {
        SyntaxNode::branch(
            SyntaxKind::Eos,
            vec![SyntaxNode::token(SyntaxKind::Token, text)],
        )
    }

    #[test]
    fn line_counter_counts_semicolons_and_end_of_input() {
        let root = SyntaxNode::token(SyntaxKind::Token, "");
        let mut ctx = LoweringContext::new(FileId(0), &root);
        assert_eq!(ctx.line(), 1);

        ctx.observe_eos(&eos(";"));
        assert_eq!(ctx.line(), 2);

        ctx.observe_eos(&eos("\n"));
        assert_eq!(ctx.line(), 2);

        ctx.observe_eos(&SyntaxNode::branch(
            SyntaxKind::Eos,
            vec![SyntaxNode::token(SyntaxKind::Eof, "")],
        ));
        assert_eq!(ctx.line(), 3);
    }

    #[test]
    fn first_line_comes_from_options() {
        let root = SyntaxNode::token(SyntaxKind::Token, "");
        let options = LowerOptions {
            first_line: 12,
            ..LowerOptions::default()
        };
        let ctx = LoweringContext::with_options(FileId(4), &root, options);
        assert_eq!(ctx.line(), 12);
        assert_eq!(ctx.span(&root).line, 12);
        assert_eq!(ctx.span(&root).file, FileId(4));
    }

    #[test]
    fn missing_child_is_a_mismatch() {
        let root = SyntaxNode::branch(
            SyntaxKind::GotoStmt,
            vec![SyntaxNode::token(SyntaxKind::Token, "goto")],
        );
        let ctx = LoweringContext::new(FileId(0), &root);
        let error = ctx.identifier(&root).unwrap_err();
        assert_eq!(error.production(), SyntaxKind::GotoStmt);
        assert_eq!(error.detail(), "missing `identifier`");
    }

    #[test]
    fn list_rejects_foreign_productions() {
        let root = SyntaxNode::branch(
            SyntaxKind::StatementList,
            vec![SyntaxNode::branch(
                SyntaxKind::TypeList,
                vec![SyntaxNode::token(SyntaxKind::Token, "x")],
            )],
        );
        let mut ctx = LoweringContext::new(FileId(0), &root);
        let error = ctx
            .lower_list(&root, SyntaxKind::Statement, |_, _| Ok(()))
            .unwrap_err();
        assert!(error.detail().contains("unexpected `type_list`"));
    }
}
