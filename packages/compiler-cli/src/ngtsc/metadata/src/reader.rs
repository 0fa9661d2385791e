//! Reading Angular decorator metadata from reflected classes.

use super::api::{ComponentMeta, DecoratorMetadata, DirectiveMeta, PipeMeta};
use super::util::{extract_component_metadata, extract_directive_metadata, extract_pipe_metadata, find_angular_decorator};
use crate::ngtsc::program_driver::SourceFile;
use crate::ngtsc::reflection::ClassDeclaration;

/// Trait for reading Angular decorator metadata off a class.
pub trait MetadataReader {
    fn get_component_metadata(&self, sf: &SourceFile, clazz: &ClassDeclaration) -> Option<ComponentMeta>;
    fn get_directive_metadata(&self, sf: &SourceFile, clazz: &ClassDeclaration) -> Option<DirectiveMeta>;
    fn get_pipe_metadata(&self, sf: &SourceFile, clazz: &ClassDeclaration) -> Option<PipeMeta>;
}

/// Reads `@Component`, `@Directive` and `@Pipe` object literals.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecoratorMetadataReader;

impl DecoratorMetadataReader {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataReader for DecoratorMetadataReader {
    fn get_component_metadata(&self, sf: &SourceFile, clazz: &ClassDeclaration) -> Option<ComponentMeta> {
        let decorator = find_angular_decorator(clazz, "Component")?;
        Some(extract_component_metadata(sf, clazz, decorator))
    }

    fn get_directive_metadata(&self, sf: &SourceFile, clazz: &ClassDeclaration) -> Option<DirectiveMeta> {
        let decorator = find_angular_decorator(clazz, "Directive")?;
        Some(extract_directive_metadata(sf, clazz, decorator))
    }

    fn get_pipe_metadata(&self, sf: &SourceFile, clazz: &ClassDeclaration) -> Option<PipeMeta> {
        let decorator = find_angular_decorator(clazz, "Pipe")?;
        extract_pipe_metadata(sf, clazz, decorator)
    }
}

/// Every piece of Angular metadata declared in a source file, in declaration
/// order.
pub fn get_all_metadata<R: MetadataReader + ?Sized>(reader: &R, sf: &SourceFile) -> Vec<DecoratorMetadata> {
    let mut metadata = Vec::new();
    for clazz in &sf.module.classes {
        if let Some(meta) = reader.get_component_metadata(sf, clazz) {
            metadata.push(DecoratorMetadata::Component(meta));
        }
        if let Some(meta) = reader.get_directive_metadata(sf, clazz) {
            metadata.push(DecoratorMetadata::Directive(meta));
        }
        if let Some(meta) = reader.get_pipe_metadata(sf, clazz) {
            metadata.push(DecoratorMetadata::Pipe(meta));
        }
    }
    metadata
}
