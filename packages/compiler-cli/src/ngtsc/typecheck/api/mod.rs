// TypeCheck API Module

pub mod api;
pub mod checker;

// Re-exports
pub use api::{
    BindingContext, BindingMember, BindingMemberKind, DeclarationScope, FunctionType,
    NoopTypeResolver, ParamType, TemplateDiagnostic, TemplateType, TypeCheckingConfig,
    TypeResolver,
};
pub use checker::TemplateTypeChecker;
