//! Component registry.
//!
//! Tracks every component's template resource in both directions: class to
//! resource, and template file to the classes that use it. Pipes and
//! directives declared in the program are recorded alongside, since template
//! checking needs their names.

use super::api::{ComponentMeta, DirectiveMeta, PipeMeta, TemplateResource};
use crate::ngtsc::diagnostics::Diagnostic;
use crate::ngtsc::file_system::AbsoluteFsPath;
use crate::ngtsc::reflection::ClassId;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    pub meta: ComponentMeta,
    /// `None` when the template could not be located.
    pub resource: Option<TemplateResource>,
    /// Diagnostics raised while reading the decorator or locating the template.
    pub diagnostics: Vec<Diagnostic>,
}

impl ComponentRecord {
    pub fn id(&self) -> &ClassId {
        &self.meta.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: IndexMap<ClassId, ComponentRecord>,
    by_template_file: HashMap<AbsoluteFsPath, IndexSet<ClassId>>,
    pipes: IndexMap<String, PipeMeta>,
    directives: IndexMap<ClassId, DirectiveMeta>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a component. A class registered before is replaced, including
    /// its reverse entry.
    pub fn register(&mut self, record: ComponentRecord) {
        let id = record.id().clone();
        self.unregister(&id);
        if let Some(path) = record.resource.as_ref().and_then(|r| r.external_path()) {
            self.by_template_file
                .entry(path.clone())
                .or_default()
                .insert(id.clone());
        }
        tracing::trace!(class = %id, resource = ?record.resource, "registered component");
        self.components.insert(id, record);
    }

    pub fn unregister(&mut self, id: &ClassId) -> Option<ComponentRecord> {
        let record = self.components.shift_remove(id)?;
        if let Some(path) = record.resource.as_ref().and_then(|r| r.external_path()) {
            if let Some(owners) = self.by_template_file.get_mut(path) {
                owners.shift_remove(id);
                if owners.is_empty() {
                    self.by_template_file.remove(path);
                }
            }
        }
        Some(record)
    }

    /// Drop every component, directive and pipe declared in `file`.
    pub fn unregister_file(&mut self, file: &AbsoluteFsPath) {
        let ids: Vec<ClassId> = self
            .components
            .keys()
            .filter(|id| &id.file == file)
            .cloned()
            .collect();
        for id in &ids {
            self.unregister(id);
        }
        self.pipes.retain(|_, pipe| &pipe.id.file != file);
        self.directives.retain(|id, _| &id.file != file);
    }

    /// The classes whose template is the file at `path`. Empty for unknown
    /// paths and for inline templates.
    pub fn classes_for_template_file(&self, path: &AbsoluteFsPath) -> HashSet<ClassId> {
        self.by_template_file
            .get(path)
            .map(|owners| owners.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn resource_for_class(&self, id: &ClassId) -> Option<&TemplateResource> {
        self.components.get(id)?.resource.as_ref()
    }

    pub fn component(&self, id: &ClassId) -> Option<&ComponentRecord> {
        self.components.get(id)
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.components.values()
    }

    pub fn components_in_file<'r>(&'r self, file: &'r AbsoluteFsPath) -> impl Iterator<Item = &'r ComponentRecord> + 'r {
        self.components.values().filter(move |r| &r.id().file == file)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn register_pipe(&mut self, meta: PipeMeta) {
        if let Some(previous) = self.pipes.get(&meta.pipe_name) {
            tracing::warn!(pipe = %meta.pipe_name, previous = %previous.id, next = %meta.id, "duplicate pipe name");
        }
        self.pipes.insert(meta.pipe_name.clone(), meta);
    }

    pub fn register_directive(&mut self, meta: DirectiveMeta) {
        self.directives.insert(meta.id.clone(), meta);
    }

    pub fn get_pipe(&self, name: &str) -> Option<&PipeMeta> {
        self.pipes.get(name)
    }

    pub fn pipe_names(&self) -> impl Iterator<Item = &str> {
        self.pipes.keys().map(String::as_str)
    }

    /// Whether a directive in the program selects on attribute `name`.
    pub fn has_attribute_directive(&self, name: &str) -> bool {
        self.directives
            .values()
            .any(|d| d.attribute_selectors.iter().any(|attr| attr == name))
    }

    pub fn has_export_as(&self, name: &str) -> bool {
        self.directives
            .values()
            .any(|d| d.export_as.iter().any(|e| e == name))
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveMeta> {
        self.directives.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_span::Span;

    fn abs(path: &str) -> AbsoluteFsPath {
        AbsoluteFsPath::new(path.to_string())
    }

    fn external(file: &str, name: &str, template: &str) -> ComponentRecord {
        let id = ClassId::new(abs(file), name);
        ComponentRecord {
            meta: ComponentMeta {
                id: id.clone(),
                selector: None,
                template: Ok(crate::ngtsc::metadata::TemplateDecl::Missing),
                decorator_span: Span::default(),
            },
            resource: Some(TemplateResource::External {
                path: abs(template),
                owner: id,
            }),
            diagnostics: Vec::new(),
        }
    }

    fn inline(file: &str, name: &str) -> ComponentRecord {
        let mut record = external(file, name, "/unused.html");
        record.resource = Some(TemplateResource::Inline {
            text: String::new(),
            owner: record.meta.id.clone(),
            source_map: crate::ngtsc::metadata::InlineSourceMap::identity(0),
        });
        record
    }

    mod reverse_index {
        use super::*;

        #[test]
        fn should_map_a_shared_template_to_all_owners() {
            let mut registry = ComponentRegistry::new();
            registry.register(external("/a.ts", "A", "/t.html"));
            registry.register(inline("/b.ts", "B"));
            registry.register(external("/c.ts", "C", "/t.html"));

            let owners = registry.classes_for_template_file(&abs("/t.html"));
            let expected: HashSet<ClassId> =
                [ClassId::new(abs("/a.ts"), "A"), ClassId::new(abs("/c.ts"), "C")].into_iter().collect();
            assert_eq!(owners, expected);
            assert!(registry.classes_for_template_file(&abs("/unknown.html")).is_empty());
        }

        #[test]
        fn should_not_depend_on_registration_order() {
            let mut forward = ComponentRegistry::new();
            forward.register(external("/a.ts", "A", "/t.html"));
            forward.register(external("/c.ts", "C", "/t.html"));
            let mut backward = ComponentRegistry::new();
            backward.register(external("/c.ts", "C", "/t.html"));
            backward.register(external("/a.ts", "A", "/t.html"));
            assert_eq!(
                forward.classes_for_template_file(&abs("/t.html")),
                backward.classes_for_template_file(&abs("/t.html"))
            );
        }

        #[test]
        fn should_drop_stale_entries_when_a_class_switches_to_inline() {
            let mut registry = ComponentRegistry::new();
            registry.register(external("/a.ts", "A", "/t.html"));
            registry.register(inline("/a.ts", "A"));
            assert!(registry.classes_for_template_file(&abs("/t.html")).is_empty());
            assert_eq!(registry.len(), 1);
        }

        #[test]
        fn should_drop_stale_entries_when_a_class_moves_to_another_file() {
            let mut registry = ComponentRegistry::new();
            registry.register(external("/a.ts", "A", "/old.html"));
            registry.register(external("/a.ts", "A", "/new.html"));
            assert!(registry.classes_for_template_file(&abs("/old.html")).is_empty());
            assert_eq!(registry.classes_for_template_file(&abs("/new.html")).len(), 1);
        }
    }

    mod unregister {
        use super::*;

        #[test]
        fn should_remove_both_directions() {
            let mut registry = ComponentRegistry::new();
            registry.register(external("/a.ts", "A", "/t.html"));
            let id = ClassId::new(abs("/a.ts"), "A");
            assert!(registry.unregister(&id).is_some());
            assert!(registry.resource_for_class(&id).is_none());
            assert!(registry.classes_for_template_file(&abs("/t.html")).is_empty());
            assert!(registry.unregister(&id).is_none());
        }

        #[test]
        fn should_remove_everything_declared_in_a_file() {
            let mut registry = ComponentRegistry::new();
            registry.register(external("/a.ts", "A", "/t.html"));
            registry.register(external("/a.ts", "A2", "/t.html"));
            registry.register(external("/c.ts", "C", "/t.html"));
            registry.register_pipe(PipeMeta {
                id: ClassId::new(abs("/a.ts"), "P"),
                pipe_name: "p".to_string(),
                is_pure: true,
            });
            registry.register_directive(DirectiveMeta {
                id: ClassId::new(abs("/a.ts"), "D"),
                selector: Some("[appD]".to_string()),
                attribute_selectors: vec!["appD".to_string()],
                export_as: vec![],
            });

            registry.unregister_file(&abs("/a.ts"));
            let owners = registry.classes_for_template_file(&abs("/t.html"));
            assert_eq!(owners.len(), 1);
            assert!(owners.contains(&ClassId::new(abs("/c.ts"), "C")));
            assert!(registry.get_pipe("p").is_none());
            assert!(!registry.has_attribute_directive("appD"));
        }
    }
}
