use super::api::{BindingContext, TemplateDiagnostic, TypeResolver};

/// Checks a template against the binding context of its component.
pub trait TemplateTypeChecker {
    /// Diagnostics for `template`, with spans relative to the template text.
    fn check(
        &self,
        template: &str,
        context: &BindingContext,
        types: &dyn TypeResolver,
    ) -> Vec<TemplateDiagnostic>;
}
