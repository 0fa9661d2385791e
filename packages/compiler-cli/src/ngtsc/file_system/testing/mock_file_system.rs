use crate::ngtsc::file_system::src::types::{
    AbsoluteFsPath, FileSystem, PathManipulation, PathSegment, ReadonlyFileSystem,
};
use crate::ngtsc::file_system::src::util::{clean_path, is_rooted, resolve_against};
use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug)]
pub enum Entity {
    Folder,
    File(Vec<u8>),
}

/// An in-memory POSIX file system for tests.
///
/// Entries are keyed by their cleaned absolute path. Writing a file creates
/// any missing parent folders.
#[derive(Clone, Debug)]
pub struct MockFileSystem {
    cwd: Arc<Mutex<AbsoluteFsPath>>,
    entries: Arc<Mutex<BTreeMap<String, Entity>>>,
    case_sensitive: bool,
}

impl MockFileSystem {
    pub fn new_posix() -> Self {
        MockFileSystem {
            cwd: Arc::new(Mutex::new(AbsoluteFsPath::new("/".to_string()))),
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            case_sensitive: true,
        }
    }

    pub fn init_with_files(&self, files: Vec<(&str, &str)>) {
        for (path, content) in files {
            let _ = self.write_file(&self.resolve(&[path]), content.as_bytes(), None);
        }
    }

    pub fn chdir(&self, path: &AbsoluteFsPath) {
        *lock(&self.cwd) = path.clone();
    }

    fn key(&self, path: &AbsoluteFsPath) -> String {
        let cleaned = clean_path(path.as_str());
        if self.case_sensitive {
            cleaned
        } else {
            cleaned.to_lowercase()
        }
    }

    fn ensure_parents(entries: &mut BTreeMap<String, Entity>, key: &str) -> io::Result<()> {
        let mut prefix = String::new();
        let segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();
        for segment in &segments[..segments.len().saturating_sub(1)] {
            prefix.push('/');
            prefix.push_str(segment);
            match entries.get(&prefix) {
                Some(Entity::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!("{} is not a directory", prefix),
                    ))
                }
                Some(Entity::Folder) => {}
                None => {
                    entries.insert(prefix.clone(), Entity::Folder);
                }
            }
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FileSystem for MockFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8], exclusive: Option<bool>) -> io::Result<()> {
        let key = self.key(path);
        if key == "/" {
            return Err(io::Error::new(io::ErrorKind::Other, "Cannot write to root"));
        }
        let mut entries = lock(&self.entries);
        match entries.get(&key) {
            Some(Entity::Folder) => {
                return Err(io::Error::new(io::ErrorKind::Other, format!("{} is a directory", key)))
            }
            Some(Entity::File(_)) if exclusive.unwrap_or(false) => {
                return Err(io::Error::new(io::ErrorKind::AlreadyExists, format!("{} already exists", key)))
            }
            _ => {}
        }
        Self::ensure_parents(&mut entries, &key)?;
        entries.insert(key, Entity::File(data.to_vec()));
        Ok(())
    }

    fn remove_file(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        let key = self.key(path);
        let mut entries = lock(&self.entries);
        match entries.get(&key) {
            Some(Entity::File(_)) => {
                entries.remove(&key);
                Ok(())
            }
            Some(Entity::Folder) => Err(io::Error::new(io::ErrorKind::Other, format!("{} is a directory", key))),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("{} not found", key))),
        }
    }

    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        let key = self.key(path);
        if key == "/" {
            return Ok(());
        }
        let mut entries = lock(&self.entries);
        Self::ensure_parents(&mut entries, &key)?;
        match entries.get(&key) {
            Some(Entity::File(_)) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is not a directory", key),
            )),
            Some(Entity::Folder) => Ok(()),
            None => {
                entries.insert(key, Entity::Folder);
                Ok(())
            }
        }
    }
}

impl ReadonlyFileSystem for MockFileSystem {
    fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        let key = self.key(path);
        key == "/" || lock(&self.entries).contains_key(&key)
    }

    fn is_file(&self, path: &AbsoluteFsPath) -> bool {
        matches!(lock(&self.entries).get(&self.key(path)), Some(Entity::File(_)))
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        let key = self.key(path);
        match lock(&self.entries).get(&key) {
            Some(Entity::File(content)) => String::from_utf8(content.clone())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Some(Entity::Folder) => Err(io::Error::new(io::ErrorKind::Other, format!("{} is a directory", key))),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("{} not found", key))),
        }
    }

    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<PathSegment>> {
        let key = self.key(path);
        let entries = lock(&self.entries);
        if key != "/" && !matches!(entries.get(&key), Some(Entity::Folder)) {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("{} is not a directory", key)));
        }
        let prefix = if key == "/" { key.clone() } else { format!("{}/", key) };
        Ok(entries
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(|rest| PathSegment::new(rest.to_string()))
            .collect())
    }
}

impl PathManipulation for MockFileSystem {
    fn dirname(&self, file: &str) -> String {
        match file.rfind('/') {
            Some(0) => "/".to_string(),
            Some(idx) => file[..idx].to_string(),
            None => ".".to_string(),
        }
    }

    fn join(&self, base_path: &str, paths: &[&str]) -> String {
        let mut joined = base_path.to_string();
        for p in paths {
            joined.push('/');
            joined.push_str(p);
        }
        clean_path(&joined)
    }

    fn resolve(&self, paths: &[&str]) -> AbsoluteFsPath {
        let cwd = lock(&self.cwd).clone();
        AbsoluteFsPath::new(resolve_against(cwd.as_str(), paths))
    }

    fn basename(&self, path: &str, ext: Option<&str>) -> PathSegment {
        let name = path.rsplit('/').next().unwrap_or_default();
        let name = match ext {
            Some(ext) if name.len() > ext.len() && name.ends_with(ext) => &name[..name.len() - ext.len()],
            _ => name,
        };
        PathSegment::new(name.to_string())
    }

    fn extname(&self, path: &str) -> String {
        let name = path.rsplit('/').next().unwrap_or_default();
        match name.rfind('.') {
            Some(idx) if idx > 0 => name[idx..].to_string(),
            _ => String::new(),
        }
    }

    fn is_rooted(&self, path: &str) -> bool {
        is_rooted(path)
    }

    fn normalize(&self, path: &str) -> String {
        path.replace('\\', "/")
    }

    fn pwd(&self) -> AbsoluteFsPath {
        lock(&self.cwd).clone()
    }
}
