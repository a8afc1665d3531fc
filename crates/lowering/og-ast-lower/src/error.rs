//! Lowering diagnostics
//!
//! Note: the `span` and `src` fields are read by miette's `#[derive(Diagnostic)]`
//! expansion, which the unused-assignment lint cannot see through.

#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use og_span::{FileId, FileSpan};
use og_syntax::SyntaxKind;
use thiserror::Error;

pub use codespan_reporting;

/// Result alias for lowering functions
pub type LowerResult<T> = Result<T, LowerError>;

/// Lowering failure
///
/// Raised when a parse-tree production lacks a child the grammar guarantees,
/// or has a shape no disambiguation rule recognizes. It aborts lowering of
/// the current unit; nothing is substituted.
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum LowerError {
    #[error("malformed `{production}`: {detail}")]
    #[diagnostic(
        code(lower::structural_mismatch),
        help("the parse tree does not match the Og grammar; the parser and the lowering engine disagree")
    )]
    /// A production is missing a required child or has an unrecognized shape
    StructuralMismatch {
        /// Production being lowered
        production: SyntaxKind,
        /// What was missing or unexpected
        detail: String,
        /// File, byte span and line of the production
        location: FileSpan,
        /// Byte span for the label
        #[label("while lowering this `{production}`")]
        span: SourceSpan,
        /// Text of the source unit
        #[source_code]
        src: NamedSource<String>,
    },
}

impl LowerError {
    /// Production that failed to lower
    pub fn production(&self) -> SyntaxKind {
        match self {
            Self::StructuralMismatch { production, .. } => *production,
        }
    }

    /// Location of the failing production
    pub fn location(&self) -> FileSpan {
        match self {
            Self::StructuralMismatch { location, .. } => *location,
        }
    }

    /// Source unit of the failing production
    pub fn file(&self) -> FileId {
        self.location().file
    }

    /// What was missing or unexpected
    pub fn detail(&self) -> &str {
        match self {
            Self::StructuralMismatch { detail, .. } => detail,
        }
    }

    /// Convert to codespan diagnostic for rustc-style output
    pub fn to_codespan_diagnostic(
        &self,
        file_id: usize,
    ) -> codespan_reporting::diagnostic::Diagnostic<usize> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        match self {
            Self::StructuralMismatch {
                production,
                detail,
                location,
                span,
                ..
            } => Diagnostic::error()
                .with_code("lower::structural_mismatch")
                .with_message(format!("malformed `{production}`: {detail}"))
                .with_labels(vec![
                    Label::primary(file_id, span.offset()..span.offset() + span.len())
                        .with_message(format!("while lowering this `{production}`")),
                ])
                .with_notes(vec![format!("line {}", location.line)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_span::Span;

    fn mismatch() -> LowerError {
        LowerError::StructuralMismatch {
            production: SyntaxKind::Slice,
            detail: "4 colon-separated segments".to_string(),
            location: FileSpan::new(FileId(3), Span::new(4, 11), 2),
            span: (4, 7).into(),
            src: NamedSource::new("file#3", "x := a[1:2:3:4]".to_string()),
        }
    }

    #[test]
    fn message_names_the_production() {
        let error = mismatch();
        assert_eq!(
            error.to_string(),
            "malformed `slice`: 4 colon-separated segments"
        );
        assert_eq!(error.production(), SyntaxKind::Slice);
        assert_eq!(error.file(), FileId(3));
        assert_eq!(error.location().line, 2);
    }

    #[test]
    fn codespan_diagnostic_labels_the_span() {
        let diagnostic = mismatch().to_codespan_diagnostic(0);
        assert_eq!(diagnostic.code.as_deref(), Some("lower::structural_mismatch"));
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].range, 4..11);
        assert_eq!(diagnostic.notes, ["line 2"]);
    }
}
