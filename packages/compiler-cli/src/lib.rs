#![deny(clippy::all)]

/**
 * Angular Compiler CLI - Rust Implementation
 *
 * Template diagnostics for Angular components: the `ngtsc` compiler facade,
 * project configuration and the `ngc` command line.
 */
pub use angular_compiler as compiler;

pub mod config;
pub mod main_entry;
pub mod ngtsc;
pub mod perform_compile;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
