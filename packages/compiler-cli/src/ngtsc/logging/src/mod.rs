// Logging Source Module

pub mod logger;
pub mod subscriber;

pub use logger::{LogLevel, UnknownLogLevel};
pub use subscriber::{env_filter, init_tracing};
