// Incremental Source Module

pub mod api;
pub mod strategy;

pub use api::{template_fingerprint, IncrementalStrategy};
pub use strategy::{NoopIncrementalStrategy, TrackedIncrementalStrategy};
