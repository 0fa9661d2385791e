// Compiler Facade
//
// Owns the program and the component registry of one compilation and
// answers diagnostic queries against them.

use super::NgCompilerOptions;
use crate::ngtsc::annotations::component::{analyze_program, TemplateResourceLocator};
use crate::ngtsc::diagnostics::{Diagnostic, DiagnosticSpan, ErrorCode, FatalDiagnosticError};
use crate::ngtsc::file_system::{AbsoluteFsPath, FileSystem, PathManipulation};
use crate::ngtsc::incremental::{template_fingerprint, IncrementalStrategy, NoopIncrementalStrategy};
use crate::ngtsc::metadata::{
    ComponentRecord, ComponentRegistry, DecoratorMetadataReader, TemplateResource,
};
use crate::ngtsc::program_driver::{OxcProgramDriver, Program, ProgramDriver, ProgramError};
use crate::ngtsc::reflection::ClassId;
use crate::ngtsc::resource::FileSystemResourceLoader;
use crate::ngtsc::typecheck::{
    translate_diagnostic, BindingContextBuilder, DeclarationScope, ProgramTypeResolver,
    TemplateTypeChecker, TemplateTypeCheckerImpl, TypeCheckingConfig,
};
use std::collections::HashSet;

pub enum CompilationTicketKind {
    Fresh,
    /// Reuse the unchanged source files of a previous program.
    Incremental { old_program: Program },
}

pub struct CompilationTicket<'a, T: FileSystem> {
    pub kind: CompilationTicketKind,
    pub options: NgCompilerOptions,
    pub fs: &'a T,
    pub root_names: Vec<AbsoluteFsPath>,
}

impl<'a, T: FileSystem> CompilationTicket<'a, T> {
    pub fn fresh(fs: &'a T, root_names: Vec<AbsoluteFsPath>, options: NgCompilerOptions) -> Self {
        Self {
            kind: CompilationTicketKind::Fresh,
            options,
            fs,
            root_names,
        }
    }

    pub fn incremental(
        fs: &'a T,
        root_names: Vec<AbsoluteFsPath>,
        options: NgCompilerOptions,
        old_program: Program,
    ) -> Self {
        Self {
            kind: CompilationTicketKind::Incremental { old_program },
            options,
            fs,
            root_names,
        }
    }
}

pub struct NgCompiler<'a, T: FileSystem> {
    options: NgCompilerOptions,
    fs: &'a T,
    program: Program,
    program_error: Option<ProgramError>,
    registry: ComponentRegistry,
    incremental: Box<dyn IncrementalStrategy + 'a>,
}

impl<'a, T: FileSystem> NgCompiler<'a, T> {
    pub fn new(ticket: CompilationTicket<'a, T>) -> Self {
        Self::with_incremental_strategy(ticket, Box::new(NoopIncrementalStrategy))
    }

    /// Build the program and analyze every class in it. A program that
    /// cannot be built leaves the compiler with an empty registry.
    #[tracing::instrument(level = "debug", skip_all, fields(roots = ticket.root_names.len()))]
    pub fn with_incremental_strategy(
        ticket: CompilationTicket<'a, T>,
        incremental: Box<dyn IncrementalStrategy + 'a>,
    ) -> Self {
        let CompilationTicket {
            kind,
            options,
            fs,
            root_names,
        } = ticket;
        let old_program = match &kind {
            CompilationTicketKind::Fresh => None,
            CompilationTicketKind::Incremental { old_program } => Some(old_program),
        };

        let (program, program_error) = match OxcProgramDriver::new(fs).create_program(&root_names, old_program) {
            Ok(program) => (program, None),
            Err(err) => {
                tracing::warn!(error = %err, "program construction failed");
                (Program::default(), Some(err))
            }
        };

        let loader = FileSystemResourceLoader::new(fs);
        let registry = analyze_program(&program, &DecoratorMetadataReader::new(), &loader);

        NgCompiler {
            options,
            fs,
            program,
            program_error,
            registry,
            incremental,
        }
    }

    pub fn options(&self) -> &NgCompilerOptions {
        &self.options
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The error that prevented the program from being built, if any.
    pub fn program_error(&self) -> Option<&ProgramError> {
        self.program_error.as_ref()
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Hand the program over for reuse by the next compilation.
    pub fn into_program(self) -> Program {
        self.program
    }

    pub fn component(&self, id: &ClassId) -> Option<&ComponentRecord> {
        self.registry.component(id)
    }

    /// Every component whose `templateUrl` resolves to `path`. `path` is
    /// normalized first, so `/app/./t.html` finds `/app/t.html`.
    pub fn get_components_with_template_file(&self, path: &AbsoluteFsPath) -> HashSet<ClassId> {
        let resolved = self.fs.resolve(&[path.as_str()]);
        self.registry.classes_for_template_file(&resolved)
    }

    /// Diagnostics of every component declared in `file`: problems locating
    /// the template first, then the template's own diagnostics.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %file))]
    pub fn get_diagnostics(&self, file: &AbsoluteFsPath) -> Vec<Diagnostic> {
        let checker = TemplateTypeCheckerImpl::new(self.type_checking_config(), self.declaration_scope());
        let mut diagnostics = Vec::new();
        for record in self.registry.components_in_file(file) {
            diagnostics.extend(record.diagnostics.iter().cloned());
            if let Some(resource) = &record.resource {
                diagnostics.extend(self.check_component(&checker, record, resource));
            }
        }
        tracing::debug!(count = diagnostics.len(), "collected diagnostics");
        diagnostics
    }

    /// Diagnostics of every root file, in root order.
    pub fn get_template_diagnostics(&self) -> Vec<Diagnostic> {
        self.program
            .root_files()
            .iter()
            .flat_map(|file| self.get_diagnostics(file))
            .collect()
    }

    pub fn type_checking_config(&self) -> TypeCheckingConfig {
        TypeCheckingConfig {
            strict_templates: self.options.strict_templates,
        }
    }

    /// Pipes, structural directives and `exportAs` names declared in the
    /// program.
    pub fn declaration_scope(&self) -> DeclarationScope {
        let mut scope = DeclarationScope {
            pipes: self.registry.pipe_names().map(str::to_string).collect(),
            ..DeclarationScope::default()
        };
        for directive in self.registry.directives() {
            scope.structural_directives.extend(directive.attribute_selectors.iter().cloned());
            scope.export_as.extend(directive.export_as.iter().cloned());
        }
        scope
    }

    fn check_component(
        &self,
        checker: &TemplateTypeCheckerImpl,
        record: &ComponentRecord,
        resource: &TemplateResource,
    ) -> Vec<Diagnostic> {
        let id = record.id();
        let loader = FileSystemResourceLoader::new(self.fs);
        let template = match TemplateResourceLocator::new(&loader).read(resource) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(class = %id, error = %err, "template could not be read");
                let span = record.meta.decorator_span;
                let error = FatalDiagnosticError::new(
                    ErrorCode::ComponentResourceNotFound,
                    DiagnosticSpan::Class {
                        file: id.file.clone(),
                        start: span.start as usize,
                        end: span.end as usize,
                    },
                    err.to_string(),
                );
                return vec![error.to_diagnostic()];
            }
        };

        let Some(context) = BindingContextBuilder::new(&self.program, self.fs).build(id) else {
            tracing::trace!(class = %id, "component class is not in the program");
            return Vec::new();
        };

        let types = ProgramTypeResolver::new(&self.program, self.fs);
        let fingerprint = template_fingerprint(&template, &context, checker.config(), checker.scope(), &types);
        let template_diagnostics = match self.incremental.cached_template_diagnostics(id, fingerprint) {
            Some(cached) => cached,
            None => {
                let fresh = checker.check(&template, &context, &types);
                self.incremental.record_template_diagnostics(id, fingerprint, &fresh);
                fresh
            }
        };

        template_diagnostics
            .iter()
            .map(|diagnostic| translate_diagnostic(diagnostic, resource))
            .collect()
    }
}
