//! File System Abstraction
//!
//! Path manipulation and file access behind traits, so the compiler runs
//! against the real disk or an in-memory tree.

pub mod src;
pub mod testing;

#[cfg(test)]
mod test;

pub use src::*;
