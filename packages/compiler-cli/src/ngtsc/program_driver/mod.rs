//! Program Driver
//!
//! Builds the program the compiler analyzes.

pub mod src;

pub use src::*;
