// Component Resources
//
// Locates component templates: inline text or an external file resolved
// relative to the class's own file.

use crate::ngtsc::diagnostics::{DiagnosticSpan, ErrorCode, FatalDiagnosticError};
use crate::ngtsc::metadata::{
    ComponentMeta, DecoratorShapeError, InlineSourceMap, TemplateDecl, TemplateResource,
};
use crate::ngtsc::program_driver::SourceFile;
use crate::ngtsc::resource::{ResourceError, ResourceLoader};
use oxc_span::Span;

pub struct TemplateResourceLocator<'a, L: ResourceLoader + ?Sized> {
    loader: &'a L,
}

impl<'a, L: ResourceLoader + ?Sized> TemplateResourceLocator<'a, L> {
    pub fn new(loader: &'a L) -> Self {
        Self { loader }
    }

    /// Locate the template of a component declared in `sf`.
    pub fn locate(&self, sf: &SourceFile, meta: &ComponentMeta) -> Result<TemplateResource, FatalDiagnosticError> {
        let class_span = |span: Span| DiagnosticSpan::Class {
            file: sf.path.clone(),
            start: span.start as usize,
            end: span.end as usize,
        };
        let decl = match &meta.template {
            Ok(decl) => decl,
            Err(DecoratorShapeError::ArityWrong { arity: None, span }) => {
                return Err(FatalDiagnosticError::new(
                    ErrorCode::DecoratorArityWrong,
                    class_span(*span),
                    "@Component must be called",
                ));
            }
            Err(DecoratorShapeError::ArityWrong { arity: Some(n), span }) => {
                return Err(FatalDiagnosticError::new(
                    ErrorCode::DecoratorArityWrong,
                    class_span(*span),
                    format!("@Component must have exactly 1 argument, got {}", n),
                ));
            }
            Err(DecoratorShapeError::ArgNotLiteral { span }) => {
                return Err(FatalDiagnosticError::new(
                    ErrorCode::DecoratorArgNotLiteral,
                    class_span(*span),
                    "@Component argument must be an object literal",
                ));
            }
        };

        match decl {
            TemplateDecl::Inline { text, span } => {
                // Contents start after the opening quote and end before the closing one.
                let start = span.start as usize + 1;
                let end = (span.end as usize).saturating_sub(1).max(start);
                let source_map = match sf.text.get(start..end) {
                    Some(raw) => InlineSourceMap::from_literal(start, raw, text),
                    None => InlineSourceMap::identity(start),
                };
                Ok(TemplateResource::Inline {
                    text: text.clone(),
                    owner: meta.id.clone(),
                    source_map,
                })
            }
            TemplateDecl::Url { url, span } => match self.loader.resolve(url, &sf.path) {
                Ok(path) => Ok(TemplateResource::External {
                    path,
                    owner: meta.id.clone(),
                }),
                Err(err) => {
                    tracing::debug!(class = %meta.id, error = %err, "template resolution failed");
                    Err(FatalDiagnosticError::new(
                        ErrorCode::ComponentResourceNotFound,
                        class_span(*span),
                        format!("Could not find template file '{}'.", url),
                    ))
                }
            },
            TemplateDecl::NonLiteral { field, span } => Err(FatalDiagnosticError::new(
                ErrorCode::ValueHasWrongType,
                class_span(*span),
                format!("{} must be a string", field),
            )),
            TemplateDecl::Missing => Err(FatalDiagnosticError::new(
                ErrorCode::ComponentMissingTemplate,
                class_span(meta.decorator_span),
                "component is missing a template",
            )),
        }
    }

    /// The text of a located template.
    pub fn read(&self, resource: &TemplateResource) -> Result<String, ResourceError> {
        match resource {
            TemplateResource::Inline { text, .. } => Ok(text.clone()),
            TemplateResource::External { path, .. } => self.loader.load(path),
        }
    }
}
