//! Incremental Module
//!
//! Caching of template type-check results keyed by component and fingerprint.

pub mod src;

pub use src::*;
