//! Utility functions for metadata extraction.

use super::api::{ComponentMeta, DecoratorShapeError, DirectiveMeta, PipeMeta, TemplateDecl};
use crate::ngtsc::program_driver::SourceFile;
use crate::ngtsc::reflection::{ClassDeclaration, Decorator, StaticValue};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use oxc_span::Span;
use regex::Regex;

pub const ANGULAR_CORE: &str = "@angular/core";

static ATTRIBUTE_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*([^\]\s=~|^$*]+)").expect("attribute selector pattern is valid")
});

/// Whether `decorator` is Angular's `name` decorator. Aliased imports from
/// `@angular/core` count; a decorator imported from anywhere else does not.
pub fn is_angular_decorator(decorator: &Decorator, name: &str) -> bool {
    match &decorator.import {
        Some(import) => import.from == ANGULAR_CORE && import.imported_name == name,
        None => decorator.name == name,
    }
}

pub fn find_angular_decorator<'c>(clazz: &'c ClassDeclaration, name: &str) -> Option<&'c Decorator> {
    clazz.decorators.iter().find(|d| is_angular_decorator(d, name))
}

/// The object literal passed to a decorator such as `@Component({...})`.
pub fn decorator_fields(decorator: &Decorator) -> Result<&IndexMap<String, StaticValue>, DecoratorShapeError> {
    let args = decorator.args.as_ref().ok_or(DecoratorShapeError::ArityWrong {
        arity: None,
        span: decorator.span,
    })?;
    if args.len() != 1 {
        return Err(DecoratorShapeError::ArityWrong {
            arity: Some(args.len()),
            span: decorator.span,
        });
    }
    args[0].as_object().ok_or(DecoratorShapeError::ArgNotLiteral {
        span: value_span(&args[0], decorator.span),
    })
}

/// Span of a static value, falling back to `fallback` for values that do not
/// carry one.
pub fn value_span(value: &StaticValue, fallback: Span) -> Span {
    match value {
        StaticValue::String { span, .. } | StaticValue::Dynamic { span } => *span,
        _ => fallback,
    }
}

pub fn extract_component_metadata(
    sf: &SourceFile,
    clazz: &ClassDeclaration,
    decorator: &Decorator,
) -> ComponentMeta {
    let fields = decorator_fields(decorator);
    let selector = fields
        .as_ref()
        .ok()
        .and_then(|f| f.get("selector"))
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let template = fields.map(|f| template_decl(f, decorator.span));
    ComponentMeta {
        id: sf.class_id(clazz),
        selector,
        template,
        decorator_span: decorator.span,
    }
}

/// `templateUrl` takes precedence over `template` when both are present.
fn template_decl(fields: &IndexMap<String, StaticValue>, fallback: Span) -> TemplateDecl {
    if let Some(value) = fields.get("templateUrl") {
        return match value {
            StaticValue::String { value, span } => TemplateDecl::Url {
                url: value.clone(),
                span: *span,
            },
            other => TemplateDecl::NonLiteral {
                field: "templateUrl",
                span: value_span(other, fallback),
            },
        };
    }
    if let Some(value) = fields.get("template") {
        return match value {
            StaticValue::String { value, span } => TemplateDecl::Inline {
                text: value.clone(),
                span: *span,
            },
            other => TemplateDecl::NonLiteral {
                field: "template",
                span: value_span(other, fallback),
            },
        };
    }
    TemplateDecl::Missing
}

pub fn extract_directive_metadata(
    sf: &SourceFile,
    clazz: &ClassDeclaration,
    decorator: &Decorator,
) -> DirectiveMeta {
    let fields = decorator_fields(decorator).ok();
    let field_str = |name: &str| fields.and_then(|f| f.get(name)).and_then(|v| v.as_str());

    let selector = field_str("selector").map(str::to_string);
    let attribute_selectors = selector
        .as_deref()
        .map(parse_attribute_selectors)
        .unwrap_or_default();
    let export_as = field_str("exportAs")
        .map(|s| {
            s.split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default();

    DirectiveMeta {
        id: sf.class_id(clazz),
        selector,
        attribute_selectors,
        export_as,
    }
}

/// A pipe without a literal `name` has nothing a template can refer to.
pub fn extract_pipe_metadata(sf: &SourceFile, clazz: &ClassDeclaration, decorator: &Decorator) -> Option<PipeMeta> {
    let fields = decorator_fields(decorator).ok()?;
    let pipe_name = fields.get("name")?.as_str()?.to_string();
    let is_pure = !matches!(fields.get("pure"), Some(StaticValue::Bool(false)));
    Some(PipeMeta {
        id: sf.class_id(clazz),
        pipe_name,
        is_pure,
    })
}

pub fn parse_attribute_selectors(selector: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in ATTRIBUTE_SELECTOR.captures_iter(selector) {
        let name = cap[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn should_extract_attribute_names() {
            assert_eq!(parse_attribute_selectors("[appIf]"), vec!["appIf".to_string()]);
            assert_eq!(
                parse_attribute_selectors("div[appFoo=bar], [appBar], ng-template[appFoo]"),
                vec!["appFoo".to_string(), "appBar".to_string()]
            );
        }

        #[test]
        fn should_ignore_element_and_class_selectors() {
            assert!(parse_attribute_selectors("app-root, .cls").is_empty());
        }
    }
}
