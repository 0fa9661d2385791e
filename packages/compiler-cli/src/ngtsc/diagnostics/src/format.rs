use super::error::Diagnostic;
use crate::ngtsc::file_system::ReadonlyFileSystem;
use angular_compiler::ParseLocation;
use std::fmt::Write;

/// Render diagnostics as `file:line:col - error NG2008: message`, one per line.
/// Line and column are one-based; a file that cannot be read is printed
/// without a position.
pub fn format_diagnostics<T: ReadonlyFileSystem + ?Sized>(diagnostics: &[Diagnostic], fs: &T) -> String {
    let mut out = String::new();
    for diag in diagnostics {
        let file = diag.file();
        match fs.read_file(file) {
            Ok(text) => {
                let loc = ParseLocation::from_offset(&text, diag.span.start());
                let _ = write!(out, "{}:{}:{}", file, loc.line + 1, loc.col + 1);
            }
            Err(_) => {
                let _ = write!(out, "{}", file);
            }
        }
        let _ = writeln!(
            out,
            " - {} {}: {}",
            diag.category.as_str(),
            diag.code_label(),
            diag.message_text
        );
    }
    out
}
