//! Logging
//!
//! Log levels and the `tracing` subscriber setup.

pub mod src;

pub use src::*;

#[cfg(test)]
mod test;
