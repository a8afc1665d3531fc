//! Expressions, operands and literals

use crate::{ArrayType, ExpressionList, Function, MapType, StructType, TemplateSpec, Type};
use og_span::FileSpan;
use serde::{Deserialize, Serialize};

/// An expression
///
/// Binary nodes follow the pairing of the parse tree; nothing is
/// re-associated during lowering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Node form
    pub kind: ExprKind,
    /// Source location
    pub span: FileSpan,
}

impl Expr {
    /// Create a new `Expr`
    pub fn new(kind: ExprKind, span: FileSpan) -> Self {
        Self { kind, span }
    }

    /// Binary expression node
    pub fn binary(left: Self, op: impl Into<String>, right: Self, span: FileSpan) -> Self {
        Self::new(
            ExprKind::Binary {
                left: Box::new(left),
                op: op.into(),
                right: Box::new(right),
            },
            span,
        )
    }

    /// The primary expression of an operator-free expression
    pub fn as_primary(&self) -> Option<&PrimaryExpr> {
        match &self.kind {
            ExprKind::Unary(UnaryExpr {
                kind: UnaryExprKind::Primary(primary),
                ..
            }) => Some(primary),
            _ => None,
        }
    }
}

/// Unary or binary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Prefix-operator or primary expression
    Unary(UnaryExpr),
    /// Binary operator application
    Binary {
        /// Left operand
        left: Box<Expr>,
        /// Operator text, e.g. `+` or `&&`
        op: String,
        /// Right operand
        right: Box<Expr>,
    },
}

/// Expression with optional prefix operators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    /// Node form
    pub kind: UnaryExprKind,
    /// Source location
    pub span: FileSpan,
}

impl UnaryExpr {
    /// Create a new `UnaryExpr`
    pub fn new(kind: UnaryExprKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Unary expression form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnaryExprKind {
    /// Primary expression without operator
    Primary(PrimaryExpr),
    /// Prefix operator applied to another unary expression
    Op {
        /// Operator text, e.g. `-` or `<-`
        op: String,
        /// Operand the operator applies to
        operand: Box<UnaryExpr>,
    },
}

/// Operand, conversion, or a chain of suffixes applied to either
///
/// Chains grow to the left: `a.b(c)` is `Chain { inner: Chain { inner: a,
/// suffix: .b }, suffix: (c) }`, so the innermost node is evaluated first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryExpr {
    /// Node form
    pub kind: PrimaryExprKind,
    /// Source location
    pub span: FileSpan,
}

impl PrimaryExpr {
    /// Create a new `PrimaryExpr`
    pub fn new(kind: PrimaryExprKind, span: FileSpan) -> Self {
        Self { kind, span }
    }

    /// Wraps `inner` with one more suffix
    pub fn chain(inner: Self, suffix: SecondaryExpr, span: FileSpan) -> Self {
        Self::new(
            PrimaryExprKind::Chain {
                inner: Box::new(inner),
                suffix,
            },
            span,
        )
    }

    /// The innermost primary expression, where evaluation starts
    pub fn base(&self) -> &Self {
        let mut current = self;
        while let PrimaryExprKind::Chain { inner, .. } = &current.kind {
            current = &**inner;
        }
        current
    }

    /// Suffixes of the chain in evaluation order, innermost first
    pub fn suffixes(&self) -> Vec<&SecondaryExpr> {
        let mut suffixes = Vec::new();
        let mut current = self;
        while let PrimaryExprKind::Chain { inner, suffix } = &current.kind {
            suffixes.push(suffix);
            current = &**inner;
        }
        suffixes.reverse();
        suffixes
    }
}

/// Primary expression form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimaryExprKind {
    /// Operand without suffixes
    Operand(Operand),
    /// `T(x)` conversion
    Conversion(Conversion),
    /// Suffix applied to a shorter chain
    Chain {
        /// Chain before this suffix
        inner: Box<PrimaryExpr>,
        /// Suffix applied last
        suffix: SecondaryExpr,
    },
}

/// A suffix applied to a primary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryExpr {
    /// Node form
    pub kind: SecondaryExprKind,
    /// Source location
    pub span: FileSpan,
}

impl SecondaryExpr {
    /// Create a new `SecondaryExpr`
    pub fn new(kind: SecondaryExprKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Suffix form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SecondaryExprKind {
    /// `.name`
    Selector(String),
    /// `[expr]`
    Index(Box<Expr>),
    /// `[low:high]` or `[low:high:max]`
    Slice(SliceExpr),
    /// `.(Type)`
    TypeAssertion(Type),
    /// `(args)`
    Call(Arguments),
}

/// `[low:high]` or `[low:high:max]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceExpr {
    /// Bound layout
    pub bounds: SliceBounds,
    /// Source location
    pub span: FileSpan,
}

impl SliceExpr {
    /// Create a new `SliceExpr`
    pub fn new(bounds: SliceBounds, span: FileSpan) -> Self {
        Self { bounds, span }
    }

    /// Low bound, if written
    pub fn low(&self) -> Option<&Expr> {
        match &self.bounds {
            SliceBounds::TwoBound { low, .. } | SliceBounds::ThreeBound { low, .. } => {
                low.as_deref()
            }
        }
    }

    /// High bound, if written
    pub fn high(&self) -> Option<&Expr> {
        match &self.bounds {
            SliceBounds::TwoBound { high, .. } => high.as_deref(),
            SliceBounds::ThreeBound { high, .. } => Some(high),
        }
    }

    /// Max bound of a three-bound slice
    pub fn max(&self) -> Option<&Expr> {
        match &self.bounds {
            SliceBounds::TwoBound { .. } => None,
            SliceBounds::ThreeBound { max, .. } => Some(max),
        }
    }

    /// Whether this is the `[low:high:max]` form
    pub fn is_three_bound(&self) -> bool {
        matches!(self.bounds, SliceBounds::ThreeBound { .. })
    }
}

/// Slice bounds by form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SliceBounds {
    /// `[low:high]`, either bound optional
    TwoBound {
        /// Low bound
        low: Option<Box<Expr>>,
        /// High bound
        high: Option<Box<Expr>>,
    },
    /// `[low:high:max]`; high and max are required
    ThreeBound {
        /// Low bound
        low: Option<Box<Expr>>,
        /// High bound
        high: Box<Expr>,
        /// Capacity bound
        max: Box<Expr>,
    },
}

/// Call arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    /// Leading type argument (`make([]int, n)`)
    pub ty: Option<Type>,
    /// Argument expressions
    pub args: Option<ExpressionList>,
    /// Trailing `...`
    pub is_variadic: bool,
    /// Explicit template arguments
    pub template: Option<TemplateSpec>,
    /// Source location
    pub span: FileSpan,
}

impl Arguments {
    /// Create a new `Arguments`
    pub fn new(
        ty: Option<Type>,
        args: Option<ExpressionList>,
        is_variadic: bool,
        template: Option<TemplateSpec>,
        span: FileSpan,
    ) -> Self {
        Self {
            ty,
            args,
            is_variadic,
            template,
            span,
        }
    }
}

/// Leaf of a primary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operand {
    /// Node form
    pub kind: OperandKind,
    /// Source location
    pub span: FileSpan,
}

impl Operand {
    /// Create a new `Operand`
    pub fn new(kind: OperandKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Operand form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperandKind {
    /// Basic, composite or function literal
    Literal(Literal),
    /// Identifier, `<package>.<name>`, or a self reference
    Name(String),
    /// `ReceiverType.method`
    MethodExpr(MethodExpr),
    /// Parenthesized expression
    Paren(Box<Expr>),
}

/// `ReceiverType.method`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodExpr {
    /// Receiver type
    pub receiver: ReceiverType,
    /// Method name
    pub name: String,
    /// Source location
    pub span: FileSpan,
}

impl MethodExpr {
    /// Create a new `MethodExpr`
    pub fn new(receiver: ReceiverType, name: impl Into<String>, span: FileSpan) -> Self {
        Self {
            receiver,
            name: name.into(),
            span,
        }
    }
}

/// Receiver type of a method expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverType {
    /// Whether this level is written with `*`
    pub is_pointer: bool,
    /// Node form
    pub kind: ReceiverTypeKind,
    /// Source location
    pub span: FileSpan,
}

impl ReceiverType {
    /// Create a new `ReceiverType`
    pub fn new(is_pointer: bool, kind: ReceiverTypeKind, span: FileSpan) -> Self {
        Self {
            is_pointer,
            kind,
            span,
        }
    }
}

/// Receiver type form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiverTypeKind {
    /// Type name
    Name(String),
    /// Parenthesized receiver type
    Nested(Box<ReceiverType>),
}

/// `Type(expr)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Target type
    pub ty: Type,
    /// Converted expression
    pub expr: Box<Expr>,
    /// Source location
    pub span: FileSpan,
}

impl Conversion {
    /// Create a new `Conversion`
    pub fn new(ty: Type, expr: Expr, span: FileSpan) -> Self {
        Self {
            ty,
            expr: Box::new(expr),
            span,
        }
    }
}

/// Literal operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// Node form
    pub kind: LiteralKind,
    /// Source location
    pub span: FileSpan,
}

impl Literal {
    /// Create a new `Literal`
    pub fn new(kind: LiteralKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Literal form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralKind {
    /// Raw token text of a numeric, rune or string literal
    Basic(String),
    /// `T{...}` composite literal
    Composite(Box<CompositeLit>),
    /// Function literal
    Function(Box<Function>),
}

/// Composite literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeLit {
    /// Literal type
    pub ty: LiteralType,
    /// Element list
    pub value: LiteralValue,
    /// Template arguments on the literal type
    pub template: Option<TemplateSpec>,
    /// Source location
    pub span: FileSpan,
}

impl CompositeLit {
    /// Create a new `CompositeLit`
    pub fn new(
        ty: LiteralType,
        value: LiteralValue,
        template: Option<TemplateSpec>,
        span: FileSpan,
    ) -> Self {
        Self {
            ty,
            value,
            template,
            span,
        }
    }
}

/// Type of a composite literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralType {
    /// Node form
    pub kind: LiteralTypeKind,
    /// Source location
    pub span: FileSpan,
}

impl LiteralType {
    /// Create a new `LiteralType`
    pub fn new(kind: LiteralTypeKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Literal type form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralTypeKind {
    /// Anonymous struct type
    Struct(StructType),
    /// `[N]T`
    Array(ArrayType),
    /// `[...]T`, length taken from the element count
    Elided(Type),
    /// `[]T`
    Slice(Type),
    /// `map[K]V`
    Map(MapType),
    /// Named type
    Name(String),
}

/// `{ elements }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralValue {
    /// Elements in source order
    pub elements: Vec<KeyedElement>,
    /// Source location
    pub span: FileSpan,
}

impl LiteralValue {
    /// Create a new `LiteralValue`
    pub fn new(elements: Vec<KeyedElement>, span: FileSpan) -> Self {
        Self { elements, span }
    }
}

/// Element with an optional key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedElement {
    /// Key before `:`, if any
    pub key: Option<Key>,
    /// Element value
    pub element: Element,
    /// Source location
    pub span: FileSpan,
}

impl KeyedElement {
    /// Create a new `KeyedElement`
    pub fn new(key: Option<Key>, element: Element, span: FileSpan) -> Self {
        Self { key, element, span }
    }
}

/// Key of a keyed element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Node form
    pub kind: KeyKind,
    /// Source location
    pub span: FileSpan,
}

impl Key {
    /// Create a new `Key`
    pub fn new(kind: KeyKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Key form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyKind {
    /// Field name
    Field(String),
    /// Key expression
    Expr(Expr),
    /// Nested literal value
    Value(LiteralValue),
}

/// Element of a literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Node form
    pub kind: ElementKind,
    /// Source location
    pub span: FileSpan,
}

impl Element {
    /// Create a new `Element`
    pub fn new(kind: ElementKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Element form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Element expression
    Expr(Expr),
    /// Nested literal value
    Value(LiteralValue),
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_span::{FileId, Span};

    fn at(start: u32, end: u32) -> FileSpan {
        FileSpan::new(FileId(0), Span::new(start, end), 1)
    }

    fn name(text: &str, start: u32) -> PrimaryExpr {
        let span = at(start, start + text.len() as u32);
        PrimaryExpr::new(
            PrimaryExprKind::Operand(Operand::new(OperandKind::Name(text.into()), span)),
            span,
        )
    }

    fn expr(primary: PrimaryExpr) -> Expr {
        let span = primary.span;
        Expr::new(
            ExprKind::Unary(UnaryExpr::new(UnaryExprKind::Primary(primary), span)),
            span,
        )
    }

    #[test]
    fn chain_suffixes_read_innermost_first() {
        let a_b = PrimaryExpr::chain(
            name("a", 0),
            SecondaryExpr::new(SecondaryExprKind::Selector("b".into()), at(1, 3)),
            at(0, 3),
        );
        let call = PrimaryExpr::chain(
            a_b,
            SecondaryExpr::new(
                SecondaryExprKind::Call(Arguments::new(None, None, false, None, at(3, 5))),
                at(3, 5),
            ),
            at(0, 5),
        );

        let kinds: Vec<_> = call
            .suffixes()
            .into_iter()
            .map(|suffix| match &suffix.kind {
                SecondaryExprKind::Selector(name) => format!(".{name}"),
                SecondaryExprKind::Call(_) => "()".to_string(),
                other => panic!("unexpected suffix {other:?}"),
            })
            .collect();
        assert_eq!(kinds, [".b", "()"]);
        assert_eq!(call.base(), &name("a", 0));
    }

    #[test]
    fn slice_accessors() {
        let two = SliceExpr::new(
            SliceBounds::TwoBound {
                low: None,
                high: Some(Box::new(expr(name("n", 2)))),
            },
            at(1, 4),
        );
        assert!(two.low().is_none());
        assert!(two.high().is_some());
        assert!(two.max().is_none());
        assert!(!two.is_three_bound());

        let three = SliceExpr::new(
            SliceBounds::ThreeBound {
                low: Some(Box::new(expr(name("n", 2)))),
                high: Box::new(expr(name("m", 4))),
                max: Box::new(expr(name("k", 6))),
            },
            at(1, 8),
        );
        assert!(three.is_three_bound());
        assert_eq!(
            three.max().and_then(Expr::as_primary),
            Some(&name("k", 6))
        );
    }
}
