use super::error_code::ErrorCode;
use super::util::{format_error_code, ng_error_code};
use crate::ngtsc::file_system::AbsoluteFsPath;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// Where a diagnostic points. Offsets are byte offsets into the named file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticSpan {
    /// Inside an external template file.
    Template {
        file: AbsoluteFsPath,
        start: usize,
        end: usize,
    },
    /// Inside a TypeScript source, including inline templates.
    Class {
        file: AbsoluteFsPath,
        start: usize,
        end: usize,
    },
}

impl DiagnosticSpan {
    pub fn file(&self) -> &AbsoluteFsPath {
        match self {
            DiagnosticSpan::Template { file, .. } | DiagnosticSpan::Class { file, .. } => file,
        }
    }

    pub fn start(&self) -> usize {
        match self {
            DiagnosticSpan::Template { start, .. } | DiagnosticSpan::Class { start, .. } => *start,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            DiagnosticSpan::Template { end, .. } | DiagnosticSpan::Class { end, .. } => *end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: i32,
    pub message_text: String,
    pub span: DiagnosticSpan,
}

impl Diagnostic {
    pub fn file(&self) -> &AbsoluteFsPath {
        self.span.file()
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    pub fn code_label(&self) -> String {
        format_error_code(self.code)
    }
}

/// An error that stops analysis of a single declaration. It is converted into
/// a diagnostic and analysis moves on to the next class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FatalDiagnosticError {
    pub code: ErrorCode,
    pub span: DiagnosticSpan,
    pub message: String,
}

impl FatalDiagnosticError {
    pub fn new(code: ErrorCode, span: DiagnosticSpan, message: impl Into<String>) -> Self {
        Self {
            code,
            span,
            message: message.into(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        make_diagnostic(
            self.code,
            self.span.clone(),
            self.message.clone(),
            DiagnosticCategory::Error,
        )
    }
}

pub fn make_diagnostic(
    code: ErrorCode,
    span: DiagnosticSpan,
    message_text: impl Into<String>,
    category: DiagnosticCategory,
) -> Diagnostic {
    Diagnostic {
        category,
        code: ng_error_code(code),
        message_text: message_text.into(),
        span,
    }
}
