use crate::ngtsc::file_system::{
    AbsoluteFsPath, FileSystem, NodeJSFileSystem, NodeJSPathManipulation, PathManipulation,
    ReadonlyFileSystem,
};
use std::env;
use std::fs;
use std::path::PathBuf;

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = env::temp_dir().join(format!("ng_test_{}_{}", prefix, unique));
        fs::create_dir_all(&path).expect("Failed to create temp dir");
        TempDir { path }
    }

    fn abs(&self, rel: &str) -> AbsoluteFsPath {
        AbsoluteFsPath::from(self.path.join(rel))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[test]
fn should_report_pwd_with_forward_slashes() {
    let pwd = NodeJSPathManipulation.pwd();
    let expected = env::current_dir().unwrap().to_string_lossy().replace('\\', "/");
    assert_eq!(pwd.as_str(), expected);
}

#[cfg(unix)]
#[test]
fn should_resolve_without_touching_the_disk() {
    let paths = NodeJSPathManipulation;
    assert_eq!(paths.resolve(&["/a/b", "../c", "./d.html"]).as_str(), "/a/c/d.html");
    assert_eq!(paths.dirname("/a/b/c.ts"), "/a/b");
}

#[test]
fn should_round_trip_files_on_disk() {
    let tmp = TempDir::new("rw");
    let nfs = NodeJSFileSystem::new();
    let dir = tmp.abs("nested/dir");
    nfs.ensure_dir(&dir).unwrap();
    let file = tmp.abs("nested/dir/cmp.html");
    nfs.write_file(&file, b"<div></div>", None).unwrap();
    assert!(nfs.exists(&file));
    assert!(nfs.is_file(&file));
    assert_eq!(nfs.read_file(&file).unwrap(), "<div></div>");
    assert!(nfs.write_file(&file, b"again", Some(true)).is_err());

    let listing: Vec<String> = nfs
        .readdir(&dir)
        .unwrap()
        .into_iter()
        .map(|s| s.as_str().to_string())
        .collect();
    assert_eq!(listing, vec!["cmp.html".to_string()]);

    nfs.remove_file(&file).unwrap();
    assert!(!nfs.exists(&file));
}
