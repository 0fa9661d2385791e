use std::io;
use std::path::Path;

/// A fully qualified path in the file system, in POSIX form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsoluteFsPath(String);

impl AbsoluteFsPath {
    pub fn new(path: String) -> Self {
        AbsoluteFsPath(path)
    }

    pub fn from<P: AsRef<Path>>(path: P) -> Self {
        AbsoluteFsPath(path.as_ref().to_string_lossy().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AbsoluteFsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for AbsoluteFsPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl std::fmt::Display for AbsoluteFsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A path that's relative to another (unspecified) root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment(String);

impl PathSegment {
    pub fn new(path: String) -> Self {
        PathSegment(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An abstraction over the path manipulation aspects of a file-system.
pub trait PathManipulation {
    fn extname(&self, path: &str) -> String;
    fn is_rooted(&self, path: &str) -> bool;
    fn dirname(&self, file: &str) -> String;
    fn join(&self, base_path: &str, paths: &[&str]) -> String;
    fn basename(&self, file_path: &str, extension: Option<&str>) -> PathSegment;
    fn normalize(&self, path: &str) -> String;
    /// Resolve `paths` right to left against the working directory, like
    /// Node's `path.resolve`. The result need not exist.
    fn resolve(&self, paths: &[&str]) -> AbsoluteFsPath;
    fn pwd(&self) -> AbsoluteFsPath;
}

/// An abstraction over the read-only aspects of a file-system.
pub trait ReadonlyFileSystem: PathManipulation {
    fn is_case_sensitive(&self) -> bool;
    fn exists(&self, path: &AbsoluteFsPath) -> bool;
    fn is_file(&self, path: &AbsoluteFsPath) -> bool;
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String>;
    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<PathSegment>>;
}

/// A basic interface to abstract the underlying file-system.
pub trait FileSystem: ReadonlyFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8], exclusive: Option<bool>) -> io::Result<()>;
    fn remove_file(&self, path: &AbsoluteFsPath) -> io::Result<()>;
    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()>;
}
