//! Angular metadata reader and types.
//!
//! Reads component, directive and pipe metadata from decorators and keeps the
//! component registry.

pub mod src;

pub use src::api::{
    ComponentMeta, DecoratorMetadata, DecoratorShapeError, DirectiveMeta, MetaKind, PipeMeta,
    TemplateDecl, TemplateResource,
};
pub use src::inline_source_map::InlineSourceMap;
pub use src::reader::{get_all_metadata, DecoratorMetadataReader, MetadataReader};
pub use src::registry::{ComponentRecord, ComponentRegistry};
pub use src::util::{
    decorator_fields, extract_component_metadata, extract_directive_metadata,
    extract_pipe_metadata, find_angular_decorator, is_angular_decorator, parse_attribute_selectors,
    value_span, ANGULAR_CORE,
};

#[cfg(test)]
mod test;
