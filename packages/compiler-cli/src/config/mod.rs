//! Project configuration.

pub mod tsconfig;

pub use tsconfig::{read_configuration, ConfigError, ParsedConfiguration};
