//! Perform Compile
//!
//! Runs the template diagnostics over a configured project.

use crate::config::ParsedConfiguration;
use crate::ngtsc::core::{CompilationTicket, NgCompiler};
use crate::ngtsc::diagnostics::Diagnostic;
use crate::ngtsc::file_system::{AbsoluteFsPath, FileSystem};
use crate::ngtsc::incremental::TrackedIncrementalStrategy;
use crate::ngtsc::program_driver::Program;
use crate::ngtsc::reflection::ClassId;

/// Compilation result.
#[derive(Debug)]
pub struct CompilationResult {
    /// Diagnostics of every root file, in root order.
    pub diagnostics: Vec<Diagnostic>,
    /// Owners of the requested template file, sorted.
    pub template_owners: Option<Vec<ClassId>>,
    /// The program, for reuse by a later compilation.
    pub program: Program,
}

/// Check every component of the project. Fails only when the program itself
/// cannot be built.
#[tracing::instrument(level = "debug", skip_all, fields(project = %config.project.display()))]
pub fn perform_compilation<T: FileSystem>(
    fs: &T,
    config: &ParsedConfiguration,
    template_file: Option<&AbsoluteFsPath>,
    old_program: Option<Program>,
) -> anyhow::Result<CompilationResult> {
    let ticket = match old_program {
        Some(old) => CompilationTicket::incremental(fs, config.root_names.clone(), config.options, old),
        None => CompilationTicket::fresh(fs, config.root_names.clone(), config.options),
    };
    let strategy = TrackedIncrementalStrategy::new();
    let compiler = NgCompiler::with_incremental_strategy(ticket, Box::new(&strategy));
    if let Some(err) = compiler.program_error() {
        anyhow::bail!("{}", err);
    }

    let diagnostics = compiler.get_template_diagnostics();
    let template_owners = template_file.map(|path| {
        let mut owners: Vec<ClassId> = compiler.get_components_with_template_file(path).into_iter().collect();
        owners.sort();
        owners
    });
    tracing::debug!(
        diagnostics = diagnostics.len(),
        components = compiler.registry().len(),
        "compilation finished"
    );

    Ok(CompilationResult {
        diagnostics,
        template_owners,
        program: compiler.into_program(),
    })
}

/// Get exit code from compilation result.
pub fn exit_code_from_result(diagnostics: &[Diagnostic]) -> i32 {
    if diagnostics.iter().any(Diagnostic::is_error) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngtsc::core::NgCompilerOptions;
    use crate::ngtsc::file_system::testing::MockFileSystem;
    use std::path::PathBuf;

    fn abs(path: &str) -> AbsoluteFsPath {
        AbsoluteFsPath::new(path.to_string())
    }

    fn config(roots: &[&str], strict: bool) -> ParsedConfiguration {
        ParsedConfiguration {
            project: PathBuf::from("/tsconfig.json"),
            root_names: roots.iter().map(|r| abs(r)).collect(),
            options: NgCompilerOptions { strict_templates: strict },
        }
    }

    mod perform_compilation_tests {
        use super::*;

        #[test]
        fn should_collect_diagnostics_and_template_owners() {
            let fs = MockFileSystem::new_posix();
            fs.init_with_files(vec![
                (
                    "/app/cmp.ts",
                    "import {Component} from '@angular/core';\n\
                     @Component({templateUrl: './cmp.html'}) export class CmpB {}\n\
                     @Component({templateUrl: './cmp.html'}) export class CmpA {}\n",
                ),
                ("/app/cmp.html", "{{ title }}"),
            ]);

            let result = perform_compilation(&fs, &config(&["/app/cmp.ts"], true), Some(&abs("/app/cmp.html")), None)
                .unwrap();
            assert_eq!(result.diagnostics.len(), 2);
            assert_eq!(exit_code_from_result(&result.diagnostics), 1);
            assert_eq!(
                result.template_owners,
                Some(vec![
                    ClassId::new(abs("/app/cmp.ts"), "CmpA"),
                    ClassId::new(abs("/app/cmp.ts"), "CmpB"),
                ])
            );

            let lenient = perform_compilation(&fs, &config(&["/app/cmp.ts"], false), None, Some(result.program))
                .unwrap();
            assert!(lenient.diagnostics.is_empty());
            assert_eq!(exit_code_from_result(&lenient.diagnostics), 0);
            assert!(lenient.template_owners.is_none());
        }

        #[test]
        fn should_fail_when_a_root_file_is_missing() {
            let fs = MockFileSystem::new_posix();
            let err = perform_compilation(&fs, &config(&["/app/missing.ts"], true), None, None).unwrap_err();
            assert_eq!(err.to_string(), "File '/app/missing.ts' not found.");
        }
    }
}
