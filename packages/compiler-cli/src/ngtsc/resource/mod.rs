//! Resource loading for component templates.

pub mod src;

pub use src::loader::{FileSystemResourceLoader, ResourceError, ResourceLoader};
