//! Template AST
//!
//! Nodes produced by the template parser. Spans are absolute offsets into the
//! template text.

use crate::expression_parser::ast::{ASTWithSource, AbsoluteSourceSpan, TemplateBinding};
use crate::parse_util::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(Text),
    BoundText(BoundText),
    Element(Element),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            Node::Text(n) => n.source_span,
            Node::BoundText(n) => n.source_span,
            Node::Element(n) => n.source_span,
            Node::Comment(n) => n.source_span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    pub source_span: AbsoluteSourceSpan,
}

/// Text containing at least one `{{ }}` interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundText {
    pub value: ASTWithSource,
    pub source_span: AbsoluteSourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub value: String,
    pub source_span: AbsoluteSourceSpan,
}

/// A static attribute, `name="value"`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttribute {
    pub name: String,
    pub value: String,
    pub source_span: AbsoluteSourceSpan,
    pub key_span: AbsoluteSourceSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `[prop]="exp"` or `bind-prop="exp"`
    Property,
    /// `[(prop)]="exp"` or `bindon-prop="exp"`
    TwoWay,
    /// `prop="text {{exp}}"`
    Interpolated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundAttribute {
    pub name: String,
    pub kind: BindingKind,
    pub value: ASTWithSource,
    pub source_span: AbsoluteSourceSpan,
    pub key_span: AbsoluteSourceSpan,
    pub value_span: AbsoluteSourceSpan,
}

/// `(event)="handler"`
#[derive(Debug, Clone, PartialEq)]
pub struct BoundEvent {
    pub name: String,
    pub handler: ASTWithSource,
    pub source_span: AbsoluteSourceSpan,
    pub key_span: AbsoluteSourceSpan,
}

/// `#name` or `#name="exportAs"`
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: String,
    pub value: String,
    pub source_span: AbsoluteSourceSpan,
    pub key_span: AbsoluteSourceSpan,
}

/// `let-name="contextKey"` on `<ng-template>`
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub source_span: AbsoluteSourceSpan,
    pub key_span: AbsoluteSourceSpan,
}

/// `*name="microsyntax"`
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralDirective {
    pub name: String,
    pub bindings: Vec<TemplateBinding>,
    pub source_span: AbsoluteSourceSpan,
    pub key_span: AbsoluteSourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<TextAttribute>,
    pub inputs: Vec<BoundAttribute>,
    pub outputs: Vec<BoundEvent>,
    pub references: Vec<Reference>,
    pub variables: Vec<Variable>,
    pub template_attr: Option<StructuralDirective>,
    pub children: Vec<Node>,
    pub source_span: AbsoluteSourceSpan,
    pub start_source_span: AbsoluteSourceSpan,
    pub end_source_span: Option<AbsoluteSourceSpan>,
}

impl Element {
    /// `<ng-template>` declares an embedded view like a structural directive does.
    pub fn is_ng_template(&self) -> bool {
        self.name == "ng-template"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTemplate {
    pub nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}
