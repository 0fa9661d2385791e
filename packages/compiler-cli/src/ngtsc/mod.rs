//! Angular TypeScript Compiler (ngtsc)
//!
//! Component analysis and template type-checking on top of a reflected
//! TypeScript program.

pub mod annotations;
pub mod core;
pub mod diagnostics;
pub mod file_system;
pub mod incremental;
pub mod logging;
pub mod metadata;
pub mod program_driver;
pub mod reflection;
pub mod resource;
pub mod typecheck;
