// Resource Loader
//
// Resolves and loads external component resources (templates).

use crate::ngtsc::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Resource not found: {url}")]
    NotFound { url: String, resolved: AbsoluteFsPath },
    #[error("Failed to load {path}: {source}")]
    LoadFailed {
        path: AbsoluteFsPath,
        #[source]
        source: io::Error,
    },
}

/// Resolves resource URLs relative to the file that declares them, and reads
/// the resolved files.
pub trait ResourceLoader {
    /// Resolve `url` against the directory of `from_file`. Fails when nothing
    /// exists at the resolved path.
    fn resolve(&self, url: &str, from_file: &AbsoluteFsPath) -> Result<AbsoluteFsPath, ResourceError>;

    fn load(&self, resolved: &AbsoluteFsPath) -> Result<String, ResourceError>;
}

/// Resource loader backed by a file system.
pub struct FileSystemResourceLoader<'a, T: ReadonlyFileSystem + ?Sized> {
    fs: &'a T,
}

impl<'a, T: ReadonlyFileSystem + ?Sized> FileSystemResourceLoader<'a, T> {
    pub fn new(fs: &'a T) -> Self {
        Self { fs }
    }

    fn candidate(&self, url: &str, from_file: &AbsoluteFsPath) -> AbsoluteFsPath {
        let dir = self.fs.dirname(from_file.as_str());
        self.fs.resolve(&[dir.as_str(), url])
    }
}

impl<'a, T: ReadonlyFileSystem + ?Sized> ResourceLoader for FileSystemResourceLoader<'a, T> {
    fn resolve(&self, url: &str, from_file: &AbsoluteFsPath) -> Result<AbsoluteFsPath, ResourceError> {
        let resolved = self.candidate(url, from_file);
        if self.fs.is_file(&resolved) {
            Ok(resolved)
        } else {
            tracing::debug!(%url, %resolved, "resource not found");
            Err(ResourceError::NotFound {
                url: url.to_string(),
                resolved,
            })
        }
    }

    fn load(&self, resolved: &AbsoluteFsPath) -> Result<String, ResourceError> {
        self.fs
            .read_file(resolved)
            .map_err(|source| ResourceError::LoadFailed {
                path: resolved.clone(),
                source,
            })
    }
}
