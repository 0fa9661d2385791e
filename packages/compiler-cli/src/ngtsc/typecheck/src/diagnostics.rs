// TypeCheck Diagnostics
//
// Template diagnostic construction, and translation of template-relative
// spans into the file that reports them.

use super::super::api::TemplateDiagnostic;
use crate::ngtsc::diagnostics::{ng_error_code, Diagnostic, DiagnosticCategory, DiagnosticSpan, ErrorCode};
use crate::ngtsc::metadata::TemplateResource;
use angular_compiler::{AbsoluteSourceSpan, ParseError};

/// TypeScript diagnostic codes reported for template expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsDiagnosticCode {
    PropertyDoesNotExist = 2339,
    PrivateMember = 2341,
    NotCallable = 2349,
    ArithmeticLeftOperand = 2362,
    ArithmeticRightOperand = 2363,
    ProtectedMember = 2445,
    ReadOnlyProperty = 2540,
    WrongArgumentCount = 2554,
    TooFewArgumentsForRest = 2555,
    AssignToFunction = 2630,
}

impl TsDiagnosticCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

pub fn ng_template_diagnostic(code: ErrorCode, span: AbsoluteSourceSpan, message: impl Into<String>) -> TemplateDiagnostic {
    TemplateDiagnostic {
        category: DiagnosticCategory::Error,
        code: ng_error_code(code),
        message: message.into(),
        span,
    }
}

pub fn ts_template_diagnostic(
    code: TsDiagnosticCode,
    span: AbsoluteSourceSpan,
    message: impl Into<String>,
) -> TemplateDiagnostic {
    TemplateDiagnostic {
        category: DiagnosticCategory::Error,
        code: code.code(),
        message: message.into(),
        span,
    }
}

pub fn parse_error_diagnostic(error: &ParseError) -> TemplateDiagnostic {
    ng_template_diagnostic(ErrorCode::TemplateParseError, error.span, error.msg.clone())
}

/// Report a template diagnostic in the file the user edits: the template file
/// for external templates, the class file at the literal's offset for inline
/// ones.
pub fn translate_diagnostic(diagnostic: &TemplateDiagnostic, resource: &TemplateResource) -> Diagnostic {
    let span = match resource {
        TemplateResource::External { path, .. } => DiagnosticSpan::Template {
            file: path.clone(),
            start: diagnostic.span.start,
            end: diagnostic.span.end,
        },
        TemplateResource::Inline { owner, source_map, .. } => DiagnosticSpan::Class {
            file: owner.file.clone(),
            start: source_map.to_class_offset(diagnostic.span.start),
            end: source_map.to_class_offset(diagnostic.span.end),
        },
    };
    Diagnostic {
        category: diagnostic.category,
        code: diagnostic.code,
        message_text: diagnostic.message.clone(),
        span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngtsc::file_system::AbsoluteFsPath;
    use crate::ngtsc::metadata::InlineSourceMap;
    use crate::ngtsc::reflection::ClassId;

    fn owner() -> ClassId {
        ClassId::new(AbsoluteFsPath::new("/app/cmp.ts".to_string()), "Cmp")
    }

    mod translate_diagnostic_tests {
        use super::*;

        #[test]
        fn should_keep_template_coordinates_for_external_templates() {
            let diagnostic = ts_template_diagnostic(
                TsDiagnosticCode::PropertyDoesNotExist,
                AbsoluteSourceSpan::new(2, 5),
                "Property 'x' does not exist on type 'Cmp'.",
            );
            let resource = TemplateResource::External {
                path: AbsoluteFsPath::new("/app/cmp.html".to_string()),
                owner: owner(),
            };
            let translated = translate_diagnostic(&diagnostic, &resource);
            assert_eq!(
                translated.span,
                DiagnosticSpan::Template {
                    file: AbsoluteFsPath::new("/app/cmp.html".to_string()),
                    start: 2,
                    end: 5
                }
            );
            assert_eq!(translated.code, 2339);
            assert_eq!(translated.code_label(), "TS2339");
        }

        #[test]
        fn should_shift_inline_template_spans_into_the_class_file() {
            let diagnostic = ng_template_diagnostic(
                ErrorCode::MissingPipe,
                AbsoluteSourceSpan::new(3, 7),
                "No pipe found with name 'foo'.",
            );
            let resource = TemplateResource::Inline {
                text: String::new(),
                owner: owner(),
                source_map: InlineSourceMap::identity(100),
            };
            let translated = translate_diagnostic(&diagnostic, &resource);
            assert_eq!(
                translated.span,
                DiagnosticSpan::Class {
                    file: AbsoluteFsPath::new("/app/cmp.ts".to_string()),
                    start: 103,
                    end: 107
                }
            );
            assert_eq!(translated.code_label(), "NG8004");
        }
    }
}
