//! Og parse tree → AST lowering
//!
//! Converts the untyped, production-tagged tree emitted by a grammar-based
//! parser ([`og_syntax::SyntaxNode`]) into the typed [`og_ast`] tree:
//! - Every recognized production becomes exactly one AST node (or a list of
//!   them); tokens are consumed without producing nodes.
//! - Distinctions the grammar leaves to source text are resolved by the
//!   rules in [`heuristics`].
//! - Each node records its provenance: file, byte span and the line counter
//!   value at the point its production was entered.
//!
//! A tree that breaks the grammar's guarantees fails with
//! [`LowerError::StructuralMismatch`] instead of producing a partial AST.

pub mod context;
pub mod error;
pub mod heuristics;
pub mod lower;
pub mod options;

pub use context::LoweringContext;
pub use error::{LowerError, LowerResult};
pub use lower::{lower_interp, lower_interp_with, lower_source_file, lower_source_file_with};
pub use options::{ConfigError, LowerOptions};
