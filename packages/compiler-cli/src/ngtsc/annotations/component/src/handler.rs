use super::resources::TemplateResourceLocator;
use crate::ngtsc::metadata::{
    get_all_metadata, ComponentMeta, ComponentRecord, ComponentRegistry, DecoratorMetadata,
    MetadataReader,
};
use crate::ngtsc::program_driver::{Program, SourceFile};
use crate::ngtsc::resource::ResourceLoader;

/// Turns `@Component` metadata into registry records.
pub struct ComponentDecoratorHandler<'a, L: ResourceLoader + ?Sized> {
    locator: TemplateResourceLocator<'a, L>,
}

impl<'a, L: ResourceLoader + ?Sized> ComponentDecoratorHandler<'a, L> {
    pub fn new(loader: &'a L) -> Self {
        Self {
            locator: TemplateResourceLocator::new(loader),
        }
    }

    /// Never fails: a template that cannot be located leaves the record
    /// without a resource and with the error as a diagnostic.
    pub fn analyze(&self, sf: &SourceFile, meta: ComponentMeta) -> ComponentRecord {
        match self.locator.locate(sf, &meta) {
            Ok(resource) => ComponentRecord {
                meta,
                resource: Some(resource),
                diagnostics: Vec::new(),
            },
            Err(err) => ComponentRecord {
                meta,
                resource: None,
                diagnostics: vec![err.to_diagnostic()],
            },
        }
    }
}

/// Scan every class in the program and build the registry of components,
/// directives and pipes.
#[tracing::instrument(level = "debug", skip_all, fields(files = program.root_files().len()))]
pub fn analyze_program<R, L>(program: &Program, reader: &R, loader: &L) -> ComponentRegistry
where
    R: MetadataReader + ?Sized,
    L: ResourceLoader + ?Sized,
{
    let handler = ComponentDecoratorHandler::new(loader);
    let mut registry = ComponentRegistry::new();
    for sf in program.source_files() {
        for meta in get_all_metadata(reader, sf) {
            match meta {
                DecoratorMetadata::Component(meta) => registry.register(handler.analyze(sf, meta)),
                DecoratorMetadata::Directive(meta) => registry.register_directive(meta),
                DecoratorMetadata::Pipe(meta) => registry.register_pipe(meta),
            }
        }
    }
    tracing::debug!(components = registry.len(), "analyzed program");
    registry
}
