//! Source units, imports and top-level declarations

use crate::{Block, ExpressionList, IdentifierList, InterfaceType, Stmt, StructType, Type};
use og_span::FileSpan;
use serde::{Deserialize, Serialize};

/// A complete source unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// `package` clause
    pub package: Package,
    /// All import declarations of the unit, merged in source order
    pub import: Option<Import>,
    /// Declarations, functions and methods in source order
    pub top_levels: Vec<TopLevel>,
    /// Source location
    pub span: FileSpan,
}

impl SourceFile {
    /// Create a new `SourceFile`
    pub fn new(
        package: Package,
        import: Option<Import>,
        top_levels: Vec<TopLevel>,
        span: FileSpan,
    ) -> Self {
        Self {
            package,
            import,
            top_levels,
            span,
        }
    }
}

/// `package <name>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    pub name: String,
    /// Source location
    pub span: FileSpan,
}

impl Package {
    /// Create a new `Package`
    pub fn new(name: impl Into<String>, span: FileSpan) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Import block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Specs of every import declaration, in source order
    pub specs: Vec<ImportSpec>,
    /// Source location
    pub span: FileSpan,
}

impl Import {
    /// Create a new `Import`
    pub fn new(specs: Vec<ImportSpec>, span: FileSpan) -> Self {
        Self { specs, span }
    }
}

/// One `(path, alias)` pair of an import block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Imported path
    pub path: ImportPath,
    /// Alias form
    pub alias: ImportAlias,
    /// Source location
    pub span: FileSpan,
}

impl ImportSpec {
    /// Create a new `ImportSpec`
    pub fn new(path: ImportPath, alias: ImportAlias, span: FileSpan) -> Self {
        Self { path, alias, span }
    }
}

/// How an imported package is named in the importing unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportAlias {
    /// Explicit alias identifier
    Named(String),
    /// Merge the package's names into the current namespace
    Merge,
    /// Qualify by the package's inferred name
    Inferred,
}

impl ImportAlias {
    /// Text form expected by the code generator: the alias, `.` or empty
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Merge => ".",
            Self::Inferred => "",
        }
    }
}

/// Import path leaf, kept in its rendered framing: a quoted string followed
/// by a single newline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPath(String);

impl ImportPath {
    /// Frames raw path text, quoting it unless it already starts with a quote
    pub fn frame(raw: &str) -> Self {
        if raw.starts_with('"') {
            Self(format!("{raw}\n"))
        } else {
            Self(format!("\"{raw}\"\n"))
        }
    }

    /// The framed text, e.g. `"fmt"\n`
    pub fn as_framed(&self) -> &str {
        &self.0
    }

    /// The bare path without quotes or trailing newline
    pub fn value(&self) -> &str {
        self.0.trim_end_matches('\n').trim_matches('"')
    }
}

/// Declaration, function or method at unit scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopLevel {
    /// Node form
    pub kind: TopLevelKind,
    /// Source location
    pub span: FileSpan,
}

impl TopLevel {
    /// Create a new `TopLevel`
    pub fn new(kind: TopLevelKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Top-level form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopLevelKind {
    /// `const`, `type` or `var` declaration
    Declaration(Declaration),
    /// Function declaration
    Function(FunctionDecl),
    /// Method declaration
    Method(MethodDecl),
}

/// `const`, `type` or `var` declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Node form
    pub kind: DeclarationKind,
    /// Source location
    pub span: FileSpan,
}

impl Declaration {
    /// Create a new `Declaration`
    pub fn new(kind: DeclarationKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Declaration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// Constant declaration
    Const(ConstDecl),
    /// Type declaration
    Type(TypeDecl),
    /// Variable declaration
    Var(VarDecl),
}

/// `const` declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstDecl {
    /// Specs in source order
    pub specs: Vec<ConstSpec>,
    /// Source location
    pub span: FileSpan,
}

impl ConstDecl {
    /// Create a new `ConstDecl`
    pub fn new(specs: Vec<ConstSpec>, span: FileSpan) -> Self {
        Self { specs, span }
    }
}

/// One `const` spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstSpec {
    /// Declared names
    pub identifiers: IdentifierList,
    /// Declared type
    pub ty: Option<Type>,
    /// Values
    pub values: Option<ExpressionList>,
    /// Source location
    pub span: FileSpan,
}

impl ConstSpec {
    /// Create a new `ConstSpec`
    pub fn new(
        identifiers: IdentifierList,
        ty: Option<Type>,
        values: Option<ExpressionList>,
        span: FileSpan,
    ) -> Self {
        Self {
            identifiers,
            ty,
            values,
            span,
        }
    }
}

/// `type` declaration
///
/// Besides the spec-list form, a struct or interface may be declared by
/// name directly (`struct Point { ... }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Node form
    pub kind: TypeDeclKind,
    /// Source location
    pub span: FileSpan,
}

impl TypeDecl {
    /// Create a new `TypeDecl`
    pub fn new(kind: TypeDeclKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Type declaration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDeclKind {
    /// Spec list
    Specs(Vec<TypeSpec>),
    /// Named struct declaration
    Struct(StructType),
    /// Named interface declaration
    Interface(InterfaceType),
}

/// `Name = type` spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    /// Declared name
    pub name: String,
    /// Aliased type
    pub ty: Type,
    /// Source location
    pub span: FileSpan,
}

impl TypeSpec {
    /// Create a new `TypeSpec`
    pub fn new(name: impl Into<String>, ty: Type, span: FileSpan) -> Self {
        Self {
            name: name.into(),
            ty,
            span,
        }
    }
}

/// `var` declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    /// Specs in source order
    pub specs: Vec<VarSpec>,
    /// Source location
    pub span: FileSpan,
}

impl VarDecl {
    /// Create a new `VarDecl`
    pub fn new(specs: Vec<VarSpec>, span: FileSpan) -> Self {
        Self { specs, span }
    }
}

/// One `var` spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarSpec {
    /// Declared names
    pub identifiers: IdentifierList,
    /// Declared type
    pub ty: Option<Type>,
    /// Initializer
    pub init: Option<VarInit>,
    /// Source location
    pub span: FileSpan,
}

impl VarSpec {
    /// Create a new `VarSpec`
    pub fn new(
        identifiers: IdentifierList,
        ty: Option<Type>,
        init: Option<VarInit>,
        span: FileSpan,
    ) -> Self {
        Self {
            identifiers,
            ty,
            init,
            span,
        }
    }
}

/// Initializer of a `var` spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarInit {
    /// Value list
    Expressions(ExpressionList),
    /// Statement used as a value (`var x = if c { 1 } else { 2 }`)
    Statement(Box<Stmt>),
}

/// Named function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Function name
    pub name: String,
    /// Signature and body
    pub function: Function,
    /// Source location
    pub span: FileSpan,
}

impl FunctionDecl {
    /// Create a new `FunctionDecl`
    pub fn new(name: impl Into<String>, function: Function, span: FileSpan) -> Self {
        Self {
            name: name.into(),
            function,
            span,
        }
    }
}

/// Method bound to a receiver type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Owner, method name and pointer flag
    pub receiver: Receiver,
    /// Signature and body
    pub function: Function,
    /// Source location
    pub span: FileSpan,
}

impl MethodDecl {
    /// Create a new `MethodDecl`
    pub fn new(receiver: Receiver, function: Function, span: FileSpan) -> Self {
        Self {
            receiver,
            function,
            span,
        }
    }
}

/// `Owner::method` receiver of a method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    /// Owning type name
    pub owner: String,
    /// Whether the method receives a pointer to `owner`
    pub is_pointer: bool,
    /// Name the method is bound under
    pub method: String,
    /// Source location
    pub span: FileSpan,
}

impl Receiver {
    /// Create a new `Receiver`
    pub fn new(
        owner: impl Into<String>,
        is_pointer: bool,
        method: impl Into<String>,
        span: FileSpan,
    ) -> Self {
        Self {
            owner: owner.into(),
            is_pointer,
            method: method.into(),
            span,
        }
    }
}

/// Signature plus body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Parameters, results and template
    pub signature: Signature,
    /// `None` for signature-only declarations
    pub body: Option<Block>,
    /// Source location
    pub span: FileSpan,
}

impl Function {
    /// Create a new `Function`
    pub fn new(signature: Signature, body: Option<Block>, span: FileSpan) -> Self {
        Self {
            signature,
            body,
            span,
        }
    }
}

/// Function signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Parameters in source order
    pub parameters: Vec<Parameter>,
    /// Results
    pub result: Option<Results>,
    /// Template parameters
    pub template: Option<TemplateSpec>,
    /// Source location
    pub span: FileSpan,
}

impl Signature {
    /// Create a new `Signature`
    pub fn new(
        parameters: Vec<Parameter>,
        result: Option<Results>,
        template: Option<TemplateSpec>,
        span: FileSpan,
    ) -> Self {
        Self {
            parameters,
            result,
            template,
            span,
        }
    }
}

/// Parameter declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter names; unnamed parameters have none
    pub identifiers: Option<IdentifierList>,
    /// Parameter type
    pub ty: Type,
    /// Whether declared as `...T`
    pub is_variadic: bool,
    /// Source location
    pub span: FileSpan,
}

impl Parameter {
    /// Create a new `Parameter`
    pub fn new(
        identifiers: Option<IdentifierList>,
        ty: Type,
        is_variadic: bool,
        span: FileSpan,
    ) -> Self {
        Self {
            identifiers,
            ty,
            is_variadic,
            span,
        }
    }
}

/// Result types of a signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    /// Result types
    pub types: Vec<Type>,
    /// Source location
    pub span: FileSpan,
}

impl Results {
    /// Create a new `Results`
    pub fn new(types: Vec<Type>, span: FileSpan) -> Self {
        Self { types, span }
    }
}

/// Template parameters or instantiation arguments (`<T, U>`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Template types
    pub types: Vec<Type>,
    /// Source location
    pub span: FileSpan,
}

impl TemplateSpec {
    /// Create a new `TemplateSpec`
    pub fn new(types: Vec<Type>, span: FileSpan) -> Self {
        Self { types, span }
    }
}

/// Unit of incremental evaluation: one statement or one top-level item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interp {
    /// Node form
    pub kind: InterpKind,
    /// Source location
    pub span: FileSpan,
}

impl Interp {
    /// Create a new `Interp`
    pub fn new(kind: InterpKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Fragment form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InterpKind {
    /// Single statement
    Statement(Stmt),
    /// Single top-level declaration
    TopLevel(TopLevel),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_path_framing() {
        let bare = ImportPath::frame("x/y");
        assert_eq!(bare.as_framed(), "\"x/y\"\n");
        assert_eq!(bare.value(), "x/y");

        let quoted = ImportPath::frame("\"fmt\"");
        assert_eq!(quoted.as_framed(), "\"fmt\"\n");
        assert_eq!(quoted.value(), "fmt");
    }

    #[test]
    fn alias_text() {
        assert_eq!(ImportAlias::Named("z".into()).as_str(), "z");
        assert_eq!(ImportAlias::Merge.as_str(), ".");
        assert_eq!(ImportAlias::Inferred.as_str(), "");
    }
}
