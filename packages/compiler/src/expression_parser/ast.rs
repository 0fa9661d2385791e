/**
 * Angular Expression AST
 *
 * Expression nodes produced by the parser. Every node carries its span
 * relative to the parsed input and its absolute span inside the template.
 */
pub use crate::parse_util::{AbsoluteSourceSpan, ParseSpan};
use crate::parse_util::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyExpr {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// The implicit component instance an unqualified identifier reads from.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThisReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
    /// `a?.b`
    pub safe: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
    pub value: Box<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
    pub safe: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyedWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
    pub value: Box<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
    pub safe: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindingPipe {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub exp: Box<AST>,
    pub name: String,
    pub args: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralArray {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMapKey {
    pub key: String,
    pub quoted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMap {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub keys: Vec<LiteralMapKey>,
    pub values: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub strings: Vec<String>,
    pub expressions: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

/// `-x` and `+x`
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operator: String,
    pub expr: Box<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeofExpression {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NonNullAssert {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// `a; b` in event bindings
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AST {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    ThisReceiver(ThisReceiver),
    Chain(Chain),
    Conditional(Conditional),
    PropertyRead(PropertyRead),
    PropertyWrite(PropertyWrite),
    KeyedRead(KeyedRead),
    KeyedWrite(KeyedWrite),
    BindingPipe(BindingPipe),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    LiteralMap(LiteralMap),
    Interpolation(Interpolation),
    Binary(Binary),
    Unary(Unary),
    PrefixNot(PrefixNot),
    TypeofExpression(TypeofExpression),
    NonNullAssert(NonNullAssert),
    Call(Call),
}

impl AST {
    pub fn span(&self) -> ParseSpan {
        match self {
            AST::EmptyExpr(n) => n.span,
            AST::ImplicitReceiver(n) => n.span,
            AST::ThisReceiver(n) => n.span,
            AST::Chain(n) => n.span,
            AST::Conditional(n) => n.span,
            AST::PropertyRead(n) => n.span,
            AST::PropertyWrite(n) => n.span,
            AST::KeyedRead(n) => n.span,
            AST::KeyedWrite(n) => n.span,
            AST::BindingPipe(n) => n.span,
            AST::LiteralPrimitive(n) => n.span,
            AST::LiteralArray(n) => n.span,
            AST::LiteralMap(n) => n.span,
            AST::Interpolation(n) => n.span,
            AST::Binary(n) => n.span,
            AST::Unary(n) => n.span,
            AST::PrefixNot(n) => n.span,
            AST::TypeofExpression(n) => n.span,
            AST::NonNullAssert(n) => n.span,
            AST::Call(n) => n.span,
        }
    }

    pub fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            AST::EmptyExpr(n) => n.source_span,
            AST::ImplicitReceiver(n) => n.source_span,
            AST::ThisReceiver(n) => n.source_span,
            AST::Chain(n) => n.source_span,
            AST::Conditional(n) => n.source_span,
            AST::PropertyRead(n) => n.source_span,
            AST::PropertyWrite(n) => n.source_span,
            AST::KeyedRead(n) => n.source_span,
            AST::KeyedWrite(n) => n.source_span,
            AST::BindingPipe(n) => n.source_span,
            AST::LiteralPrimitive(n) => n.source_span,
            AST::LiteralArray(n) => n.source_span,
            AST::LiteralMap(n) => n.source_span,
            AST::Interpolation(n) => n.source_span,
            AST::Binary(n) => n.source_span,
            AST::Unary(n) => n.source_span,
            AST::PrefixNot(n) => n.source_span,
            AST::TypeofExpression(n) => n.source_span,
            AST::NonNullAssert(n) => n.source_span,
            AST::Call(n) => n.source_span,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AST::EmptyExpr(_))
    }

    /// Whether this node reads from the component instance, either implicitly
    /// (`foo`) or through `this` (`this.foo`).
    pub fn is_component_receiver(&self) -> bool {
        matches!(self, AST::ImplicitReceiver(_) | AST::ThisReceiver(_))
    }
}

/// An expression together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ASTWithSource {
    pub ast: AST,
    pub source: String,
    pub absolute_offset: usize,
    pub errors: Vec<ParseError>,
}

impl ASTWithSource {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A variable declared by microsyntax, e.g. `let item` or `index as i`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBinding {
    pub source_span: AbsoluteSourceSpan,
    pub name: String,
    /// The context key the variable reads, `$implicit` when none is given.
    pub value: String,
}

/// A keyed expression in microsyntax, e.g. `ngForOf` in `let x of items`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionBinding {
    pub source_span: AbsoluteSourceSpan,
    pub key: String,
    pub value: Option<ASTWithSource>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateBinding {
    Variable(VariableBinding),
    Expression(ExpressionBinding),
}
