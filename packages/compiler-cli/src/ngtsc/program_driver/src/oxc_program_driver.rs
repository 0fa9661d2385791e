// Oxc Program Driver
//
// Loads root files and every relatively imported module through the file
// system, parsing each with oxc.

use super::api::{resolve_module_path, Program, ProgramDriver, ProgramError, SourceFile};
use crate::ngtsc::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
use crate::ngtsc::reflection::{ReflectionHost, TypeScriptReflectionHost};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::io;

pub struct OxcProgramDriver<'a, T: ReadonlyFileSystem, H: ReflectionHost = TypeScriptReflectionHost> {
    fs: &'a T,
    host: H,
}

impl<'a, T: ReadonlyFileSystem> OxcProgramDriver<'a, T> {
    pub fn new(fs: &'a T) -> Self {
        Self {
            fs,
            host: TypeScriptReflectionHost::new(),
        }
    }
}

impl<'a, T: ReadonlyFileSystem, H: ReflectionHost> OxcProgramDriver<'a, T, H> {
    pub fn with_host(fs: &'a T, host: H) -> Self {
        Self { fs, host }
    }

    fn load(&self, path: &AbsoluteFsPath, old_program: Option<&Program>) -> io::Result<SourceFile> {
        let text = self.fs.read_file(path)?;
        if let Some(old) = old_program.and_then(|p| p.get_source_file(path)) {
            if old.text == text {
                tracing::trace!(file = %path, "reusing unchanged source file");
                return Ok(old.clone());
            }
        }
        let module = self.host.reflect_module(path, &text);
        if !module.parse_errors.is_empty() {
            tracing::warn!(file = %path, errors = ?module.parse_errors, "source file has syntax errors");
        }
        Ok(SourceFile {
            path: path.clone(),
            text,
            module,
        })
    }
}

impl<'a, T: ReadonlyFileSystem, H: ReflectionHost> ProgramDriver for OxcProgramDriver<'a, T, H> {
    #[tracing::instrument(level = "debug", skip_all, fields(roots = root_names.len()))]
    fn create_program(
        &self,
        root_names: &[AbsoluteFsPath],
        old_program: Option<&Program>,
    ) -> Result<Program, ProgramError> {
        let mut files: IndexMap<AbsoluteFsPath, SourceFile> = IndexMap::new();
        let mut queue: VecDeque<AbsoluteFsPath> = VecDeque::new();

        for root in root_names {
            if !self.fs.is_file(root) {
                return Err(ProgramError::RootNotFound(root.clone()));
            }
            if files.contains_key(root) {
                continue;
            }
            let sf = self.load(root, old_program).map_err(|source| ProgramError::Io {
                path: root.clone(),
                source,
            })?;
            queue.push_back(root.clone());
            files.insert(root.clone(), sf);
        }

        while let Some(path) = queue.pop_front() {
            let specifiers: Vec<String> = match files.get(&path) {
                Some(sf) => sf
                    .module
                    .imports
                    .iter()
                    .map(|i| i.from.clone())
                    .chain(sf.module.re_exports.iter().map(|(_, i)| i.from.clone()))
                    .collect(),
                None => continue,
            };
            for specifier in specifiers {
                let Some(target) = resolve_module_path(self.fs, &path, &specifier, |p| self.fs.is_file(p)) else {
                    continue;
                };
                if files.contains_key(&target) {
                    continue;
                }
                match self.load(&target, old_program) {
                    Ok(sf) => {
                        files.insert(target.clone(), sf);
                        queue.push_back(target);
                    }
                    Err(err) => tracing::debug!(file = %target, error = %err, "skipping unreadable import"),
                }
            }
        }

        tracing::debug!(files = files.len(), "program created");
        Ok(Program::new(root_names.to_vec(), files))
    }
}
