//! Decorator analysis.

pub mod component;
