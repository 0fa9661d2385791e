//! Compiler Core
//!
//! The compiler facade and its options.

pub mod compiler;

pub use compiler::{CompilationTicket, CompilationTicketKind, NgCompiler};

/// Options read from `angularCompilerOptions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NgCompilerOptions {
    /// Report semantic template errors, not only structural ones.
    pub strict_templates: bool,
}
