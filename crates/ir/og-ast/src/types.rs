//! Type expressions, struct and interface bodies

use crate::{Expr, FunctionDecl, IdentifierList, Parameter, Results, Signature, TemplateSpec};
use og_span::FileSpan;
use serde::{Deserialize, Serialize};

/// A type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    /// Node form
    pub kind: TypeKind,
    /// Source location
    pub span: FileSpan,
}

impl Type {
    /// Create a new `Type`
    pub fn new(kind: TypeKind, span: FileSpan) -> Self {
        Self { kind, span }
    }

    /// Shorthand for a named type
    pub fn name(name: impl Into<String>, span: FileSpan) -> Self {
        Self::new(TypeKind::Name(name.into()), span)
    }

    /// The type name, if this is a plain named type
    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// Type form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    /// Possibly qualified type name, kept as written (`int`, `pkg.Thing`)
    Name(String),
    /// Type literal
    Lit(Box<TypeLit>),
    /// Parenthesized type
    Paren(Box<Type>),
}

/// A type literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeLit {
    /// Node form
    pub kind: TypeLitKind,
    /// Source location
    pub span: FileSpan,
}

impl TypeLit {
    /// Create a new `TypeLit`
    pub fn new(kind: TypeLitKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Type literal form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeLitKind {
    /// `[N]T`
    Array(ArrayType),
    /// Struct type
    Struct(StructType),
    /// `*T`
    Pointer(Box<Type>),
    /// Function type
    Function(Signature),
    /// Interface type
    Interface(InterfaceType),
    /// `[]T`
    Slice(Box<Type>),
    /// `map[K]V`
    Map(MapType),
    /// Channel type
    Channel {
        /// Allowed direction
        direction: ChannelDirection,
        /// Element type
        elem: Box<Type>,
    },
}

/// `[length]elem`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayType {
    /// Length expression
    pub length: Box<Expr>,
    /// Element type
    pub elem: Box<Type>,
    /// Source location
    pub span: FileSpan,
}

impl ArrayType {
    /// Create a new `ArrayType`
    pub fn new(length: Expr, elem: Type, span: FileSpan) -> Self {
        Self {
            length: Box::new(length),
            elem: Box::new(elem),
            span,
        }
    }
}

/// `map[key]value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapType {
    /// Key type
    pub key: Box<Type>,
    /// Value type
    pub value: Box<Type>,
    /// Source location
    pub span: FileSpan,
}

impl MapType {
    /// Create a new `MapType`
    pub fn new(key: Type, value: Type, span: FileSpan) -> Self {
        Self {
            key: Box::new(key),
            value: Box::new(value),
            span,
        }
    }
}

/// Which ends of a channel the type allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelDirection {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// Struct type, either inline or declared by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    /// Declared name, for `struct Name { ... }` declarations
    pub name: Option<String>,
    /// Named and embedded fields
    pub fields: Vec<FieldDecl>,
    /// Methods written directly in the struct body
    pub methods: Vec<InlineStructMethod>,
    /// Template parameters
    pub template: Option<TemplateSpec>,
    /// Source location
    pub span: FileSpan,
}

impl StructType {
    /// Create a new `StructType`
    pub fn new(
        name: Option<String>,
        fields: Vec<FieldDecl>,
        methods: Vec<InlineStructMethod>,
        template: Option<TemplateSpec>,
        span: FileSpan,
    ) -> Self {
        Self {
            name,
            fields,
            methods,
            template,
            span,
        }
    }
}

/// One field line of a struct body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Node form
    pub kind: FieldDeclKind,
    /// Raw tag string literal, quotes included
    pub tag: Option<String>,
    /// Source location
    pub span: FileSpan,
}

impl FieldDecl {
    /// Create a new `FieldDecl`
    pub fn new(kind: FieldDeclKind, tag: Option<String>, span: FileSpan) -> Self {
        Self { kind, tag, span }
    }
}

/// Field form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldDeclKind {
    /// `a, b T`
    Named {
        /// Field names
        identifiers: IdentifierList,
        /// Field type
        ty: Type,
    },
    /// Embedded type
    Embedded(AnonymousField),
}

/// Embedded field: a type name, optionally behind a pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymousField {
    /// Embedded type name
    pub type_name: String,
    /// Whether embedded as `*T`
    pub is_pointer: bool,
    /// Source location
    pub span: FileSpan,
}

impl AnonymousField {
    /// Create a new `AnonymousField`
    pub fn new(type_name: impl Into<String>, is_pointer: bool, span: FileSpan) -> Self {
        Self {
            type_name: type_name.into(),
            is_pointer,
            span,
        }
    }
}

/// Method declared inside a struct body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineStructMethod {
    /// Whether the method receives a pointer to the struct
    pub is_pointer: bool,
    /// The method itself
    pub decl: FunctionDecl,
    /// Source location
    pub span: FileSpan,
}

impl InlineStructMethod {
    /// Create a new `InlineStructMethod`
    pub fn new(is_pointer: bool, decl: FunctionDecl, span: FileSpan) -> Self {
        Self {
            is_pointer,
            decl,
            span,
        }
    }
}

/// Interface type, either inline or declared by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceType {
    /// Declared name, for `interface Name { ... }` declarations
    pub name: Option<String>,
    /// Method specs and embedded interfaces
    pub methods: Vec<MethodSpec>,
    /// Source location
    pub span: FileSpan,
}

impl InterfaceType {
    /// Create a new `InterfaceType`
    pub fn new(name: Option<String>, methods: Vec<MethodSpec>, span: FileSpan) -> Self {
        Self {
            name,
            methods,
            span,
        }
    }
}

/// Entry of an interface body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSpec {
    /// Node form
    pub kind: MethodSpecKind,
    /// Source location
    pub span: FileSpan,
}

impl MethodSpec {
    /// Create a new `MethodSpec`
    pub fn new(kind: MethodSpecKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Interface entry form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MethodSpecKind {
    /// Method signature
    Method {
        /// Method name
        name: String,
        /// Parameters
        parameters: Vec<Parameter>,
        /// Results
        result: Option<Results>,
    },
    /// Embedded interface, by type name
    Embedded(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_span::{FileId, Span};

    fn at(start: u32, end: u32) -> FileSpan {
        FileSpan::new(FileId(0), Span::new(start, end), 1)
    }

    #[test]
    fn named_type_accessor() {
        let ty = Type::name("pkg.Thing", at(0, 9));
        assert_eq!(ty.as_name(), Some("pkg.Thing"));

        let pointer = Type::new(
            TypeKind::Lit(Box::new(TypeLit::new(
                TypeLitKind::Pointer(Box::new(Type::name("int", at(1, 4)))),
                at(0, 4),
            ))),
            at(0, 4),
        );
        assert_eq!(pointer.as_name(), None);
    }

    #[test]
    fn channel_serializes_with_direction() {
        let chan = TypeLitKind::Channel {
            direction: ChannelDirection::Recv,
            elem: Box::new(Type::name("int", at(6, 9))),
        };
        let json = serde_json::to_value(&chan).unwrap();
        assert_eq!(json["Channel"]["direction"], "Recv");
        assert_eq!(json["Channel"]["elem"]["kind"]["Name"], "int");
    }
}
