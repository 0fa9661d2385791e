//! Template type-checking.
//!
//! Builds a binding context for each component and checks its template
//! expressions against it.

pub mod api;
pub mod src;

pub use api::{
    BindingContext, BindingMember, BindingMemberKind, DeclarationScope, FunctionType,
    NoopTypeResolver, ParamType, TemplateDiagnostic, TemplateType, TemplateTypeChecker,
    TypeCheckingConfig, TypeResolver,
};
pub use src::{
    translate_diagnostic, BindingContextBuilder, ProgramTypeResolver, TemplateTypeCheckerImpl,
};
