// Program Driver API
//
// A program is the set of TypeScript modules reachable from the root files,
// each reduced to its reflected declarations.

use crate::ngtsc::file_system::{AbsoluteFsPath, PathManipulation};
use crate::ngtsc::reflection::{ClassDeclaration, ClassId, ReflectedModule};
use indexmap::IndexMap;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("File '{0}' not found.")]
    RootNotFound(AbsoluteFsPath),
    #[error("Cannot read file '{path}': {source}")]
    Io {
        path: AbsoluteFsPath,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: AbsoluteFsPath,
    pub text: String,
    pub module: ReflectedModule,
}

impl SourceFile {
    pub fn class_id(&self, clazz: &ClassDeclaration) -> ClassId {
        ClassId::new(self.path.clone(), clazz.name.clone())
    }
}

/// Program representation.
#[derive(Debug, Clone, Default)]
pub struct Program {
    root_files: Vec<AbsoluteFsPath>,
    files: IndexMap<AbsoluteFsPath, SourceFile>,
}

/// Bound on `export ... from` hops followed when resolving a class.
const MAX_RE_EXPORT_DEPTH: usize = 16;

impl Program {
    pub fn new(root_files: Vec<AbsoluteFsPath>, files: IndexMap<AbsoluteFsPath, SourceFile>) -> Self {
        Self { root_files, files }
    }

    pub fn root_files(&self) -> &[AbsoluteFsPath] {
        &self.root_files
    }

    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    pub fn get_source_file(&self, path: &AbsoluteFsPath) -> Option<&SourceFile> {
        self.files.get(path)
    }

    pub fn get_class(&self, id: &ClassId) -> Option<&ClassDeclaration> {
        self.files.get(&id.file)?.module.get_class(&id.name)
    }

    /// Resolve the class an identifier names inside `file`: a class declared
    /// in the same file, or one imported from a module in the program.
    pub fn resolve_class_reference<P: PathManipulation + ?Sized>(
        &self,
        paths: &P,
        file: &AbsoluteFsPath,
        local_name: &str,
    ) -> Option<(&SourceFile, &ClassDeclaration)> {
        let sf = self.files.get(file)?;
        if let Some(clazz) = sf.module.get_class(local_name) {
            return Some((sf, clazz));
        }
        let import = sf.module.get_import(local_name)?;
        let target = resolve_module_path(paths, file, &import.from, |p| self.files.contains_key(p))?;
        self.resolve_export(paths, &target, &import.imported_name, 0)
    }

    fn resolve_export<P: PathManipulation + ?Sized>(
        &self,
        paths: &P,
        file: &AbsoluteFsPath,
        exported_name: &str,
        depth: usize,
    ) -> Option<(&SourceFile, &ClassDeclaration)> {
        if depth > MAX_RE_EXPORT_DEPTH {
            return None;
        }
        let sf = self.files.get(file)?;
        if let Some(clazz) = sf.module.classes.iter().find(|c| c.exported && c.name == exported_name) {
            return Some((sf, clazz));
        }
        let (_, import) = sf.module.re_exports.iter().find(|(name, _)| name == exported_name)?;
        let target = resolve_module_path(paths, file, &import.from, |p| self.files.contains_key(p))?;
        self.resolve_export(paths, &target, &import.imported_name, depth + 1)
    }
}

/// Resolve a relative module specifier the way TypeScript's classic
/// resolution does for `.ts` sources. Bare specifiers are not resolved.
pub fn resolve_module_path<P, F>(
    paths: &P,
    from_file: &AbsoluteFsPath,
    specifier: &str,
    exists: F,
) -> Option<AbsoluteFsPath>
where
    P: PathManipulation + ?Sized,
    F: Fn(&AbsoluteFsPath) -> bool,
{
    if !specifier.starts_with('.') && !paths.is_rooted(specifier) {
        return None;
    }
    let dir = paths.dirname(from_file.as_str());
    let base = paths.resolve(&[dir.as_str(), specifier]).into_string();
    let stem = base.strip_suffix(".js").unwrap_or(&base);

    let mut candidates = Vec::new();
    if base.ends_with(".ts") {
        candidates.push(base.clone());
    }
    candidates.push(format!("{}.ts", stem));
    candidates.push(format!("{}.d.ts", stem));
    candidates.push(format!("{}/index.ts", stem));
    candidates.push(format!("{}/index.d.ts", stem));
    candidates
        .into_iter()
        .map(AbsoluteFsPath::new)
        .find(|candidate| exists(candidate))
}

/// Program driver trait.
pub trait ProgramDriver {
    /// Build a program from `root_names`, reusing unchanged files of
    /// `old_program`.
    fn create_program(
        &self,
        root_names: &[AbsoluteFsPath],
        old_program: Option<&Program>,
    ) -> Result<Program, ProgramError>;
}
