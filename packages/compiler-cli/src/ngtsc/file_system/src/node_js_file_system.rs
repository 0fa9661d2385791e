use super::types::{AbsoluteFsPath, FileSystem, PathManipulation, PathSegment, ReadonlyFileSystem};
use super::util::{clean_path, is_rooted, normalize_separators, resolve_against};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Path manipulation over POSIX-normalized strings, independent of the
/// host separator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeJSPathManipulation;

impl PathManipulation for NodeJSPathManipulation {
    fn pwd(&self) -> AbsoluteFsPath {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        AbsoluteFsPath::new(normalize_separators(cwd.to_string_lossy().as_ref()))
    }

    fn resolve(&self, paths: &[&str]) -> AbsoluteFsPath {
        let cwd = self.pwd();
        AbsoluteFsPath::new(resolve_against(cwd.as_str(), paths))
    }

    fn dirname(&self, file: &str) -> String {
        let normalized = normalize_separators(file);
        match normalized.rfind('/') {
            Some(0) => "/".to_string(),
            Some(idx) => normalized[..idx].to_string(),
            None => ".".to_string(),
        }
    }

    fn join(&self, base_path: &str, paths: &[&str]) -> String {
        let mut joined = normalize_separators(base_path);
        for p in paths {
            joined.push('/');
            joined.push_str(p);
        }
        clean_path(&joined)
    }

    fn is_rooted(&self, path: &str) -> bool {
        is_rooted(path)
    }

    fn basename(&self, file_path: &str, extension: Option<&str>) -> PathSegment {
        let normalized = normalize_separators(file_path);
        let mut name = normalized.rsplit('/').next().unwrap_or_default().to_string();
        if let Some(ext) = extension {
            if name.len() > ext.len() && name.ends_with(ext) {
                name.truncate(name.len() - ext.len());
            }
        }
        PathSegment::new(name)
    }

    fn extname(&self, path: &str) -> String {
        Path::new(path)
            .extension()
            .map(|s| format!(".{}", s.to_string_lossy()))
            .unwrap_or_default()
    }

    fn normalize(&self, path: &str) -> String {
        normalize_separators(path)
    }
}

/// The real file system, through `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeJSFileSystem {
    paths: NodeJSPathManipulation,
}

impl NodeJSFileSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PathManipulation for NodeJSFileSystem {
    fn extname(&self, path: &str) -> String { self.paths.extname(path) }
    fn is_rooted(&self, path: &str) -> bool { self.paths.is_rooted(path) }
    fn dirname(&self, file: &str) -> String { self.paths.dirname(file) }
    fn join(&self, base_path: &str, paths: &[&str]) -> String { self.paths.join(base_path, paths) }
    fn basename(&self, file_path: &str, extension: Option<&str>) -> PathSegment { self.paths.basename(file_path, extension) }
    fn normalize(&self, path: &str) -> String { self.paths.normalize(path) }
    fn resolve(&self, paths: &[&str]) -> AbsoluteFsPath { self.paths.resolve(paths) }
    fn pwd(&self) -> AbsoluteFsPath { self.paths.pwd() }
}

impl ReadonlyFileSystem for NodeJSFileSystem {
    fn is_case_sensitive(&self) -> bool {
        !cfg!(any(target_os = "macos", target_os = "windows"))
    }

    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        path.as_path().exists()
    }

    fn is_file(&self, path: &AbsoluteFsPath) -> bool {
        path.as_path().is_file()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        fs::read_to_string(path.as_str())
    }

    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<PathSegment>> {
        let mut result = Vec::new();
        for entry in fs::read_dir(path.as_str())? {
            let entry = entry?;
            result.push(PathSegment::new(entry.file_name().to_string_lossy().to_string()));
        }
        result.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(result)
    }
}

impl FileSystem for NodeJSFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8], exclusive: Option<bool>) -> io::Result<()> {
        if exclusive.unwrap_or(false) && self.exists(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path),
            ));
        }
        fs::write(path.as_str(), data)
    }

    fn remove_file(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        fs::remove_file(path.as_str())
    }

    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        fs::create_dir_all(path.as_str())
    }
}
