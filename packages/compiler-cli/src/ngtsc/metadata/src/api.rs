//! Core metadata types read from Angular decorators.

use super::inline_source_map::InlineSourceMap;
use crate::ngtsc::file_system::AbsoluteFsPath;
use crate::ngtsc::reflection::ClassId;
use oxc_span::Span;

/// Discriminant for different kinds of compiler metadata objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
    Component,
    Directive,
    Pipe,
}

/// How a `@Component` declares its template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateDecl {
    /// `template: '...'`. `span` covers the literal including its quotes.
    Inline { text: String, span: Span },
    /// `templateUrl: './x.html'`, unresolved.
    Url { url: String, span: Span },
    /// `template` or `templateUrl` is present but not a string literal.
    NonLiteral { field: &'static str, span: Span },
    /// Neither `template` nor `templateUrl` is present.
    Missing,
}

/// Problems with the decorator call itself, found before any field is read.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoratorShapeError {
    /// `@Component` without a call, or a call with the wrong number of arguments.
    ArityWrong { arity: Option<usize>, span: Span },
    /// The single argument is not an object literal.
    ArgNotLiteral { span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentMeta {
    pub id: ClassId,
    pub selector: Option<String>,
    pub template: Result<TemplateDecl, DecoratorShapeError>,
    pub decorator_span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveMeta {
    pub id: ClassId,
    pub selector: Option<String>,
    /// Attribute names from the selector, e.g. `appIf` for `[appIf]`. A
    /// structural `*appIf` matches through these.
    pub attribute_selectors: Vec<String>,
    pub export_as: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipeMeta {
    pub id: ClassId,
    pub pipe_name: String,
    pub is_pure: bool,
}

/// A component's template, located and ready to check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateResource {
    /// Template text embedded in the class file. `source_map` places the
    /// text's offsets inside the class file.
    Inline {
        text: String,
        owner: ClassId,
        source_map: InlineSourceMap,
    },
    /// A template file, identified by its resolved absolute path.
    External { path: AbsoluteFsPath, owner: ClassId },
}

impl TemplateResource {
    pub fn owner(&self) -> &ClassId {
        match self {
            TemplateResource::Inline { owner, .. } | TemplateResource::External { owner, .. } => owner,
        }
    }

    pub fn external_path(&self) -> Option<&AbsoluteFsPath> {
        match self {
            TemplateResource::External { path, .. } => Some(path),
            TemplateResource::Inline { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecoratorMetadata {
    Component(ComponentMeta),
    Directive(DirectiveMeta),
    Pipe(PipeMeta),
}

impl DecoratorMetadata {
    pub fn kind(&self) -> MetaKind {
        match self {
            DecoratorMetadata::Component(_) => MetaKind::Component,
            DecoratorMetadata::Directive(_) => MetaKind::Directive,
            DecoratorMetadata::Pipe(_) => MetaKind::Pipe,
        }
    }
}
