// TypeCheck Source Module

pub mod checker;
pub mod context;
pub mod diagnostics;
pub mod types;

// Re-exports
pub use checker::TemplateTypeCheckerImpl;
pub use context::{BindingContextBuilder, ProgramTypeResolver};
pub use diagnostics::{
    ng_template_diagnostic, parse_error_diagnostic, translate_diagnostic, ts_template_diagnostic,
    TsDiagnosticCode,
};
pub use types::{parse_type_text, primitive_member};
