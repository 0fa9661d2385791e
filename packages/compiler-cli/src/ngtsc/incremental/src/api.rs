// Incremental API
//
// Reuse of template type-check results between queries.

use crate::ngtsc::file_system::AbsoluteFsPath;
use crate::ngtsc::reflection::ClassId;
use crate::ngtsc::typecheck::{
    BindingContext, DeclarationScope, TemplateDiagnostic, TemplateType, TypeCheckingConfig, TypeResolver,
};
use std::collections::{HashSet, VecDeque};
use xxhash_rust::xxh3::Xxh3;

/// Decides whether a component's template must be checked again.
///
/// Implementations may keep state behind `&self`; the compiler only ever
/// queries from a single thread. A cached result must equal what a fresh
/// check would produce for the same fingerprint.
pub trait IncrementalStrategy {
    /// Diagnostics recorded for `class` under `fingerprint`, if any.
    fn cached_template_diagnostics(&self, class: &ClassId, fingerprint: u64) -> Option<Vec<TemplateDiagnostic>>;

    /// Record the result of checking `class`.
    fn record_template_diagnostics(&self, class: &ClassId, fingerprint: u64, diagnostics: &[TemplateDiagnostic]);
}

impl<S: IncrementalStrategy + ?Sized> IncrementalStrategy for &S {
    fn cached_template_diagnostics(&self, class: &ClassId, fingerprint: u64) -> Option<Vec<TemplateDiagnostic>> {
        (**self).cached_template_diagnostics(class, fingerprint)
    }

    fn record_template_diagnostics(&self, class: &ClassId, fingerprint: u64, diagnostics: &[TemplateDiagnostic]) {
        (**self).record_template_diagnostics(class, fingerprint, diagnostics)
    }
}

/// Hash of everything a template check depends on: the template text, the
/// component's members, and the members of every class reachable through
/// their types, resolved through `types`.
pub fn template_fingerprint<R: TypeResolver + ?Sized>(
    template: &str,
    context: &BindingContext,
    config: &TypeCheckingConfig,
    scope: &DeclarationScope,
    types: &R,
) -> u64 {
    let mut hasher = Xxh3::new();
    hasher.update(template.as_bytes());
    hasher.update(&[0]);
    hasher.update(format!("{:?}", context).as_bytes());
    hasher.update(&[config.strict_templates as u8]);
    for name in scope.pipes.iter().chain(&scope.structural_directives).chain(&scope.export_as) {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hash_referenced_types(&mut hasher, context, types);
    hasher.digest()
}

/// Folds in the resolved shape of each named type reachable from `context`,
/// in discovery order. Unresolved names hash as a marker so that a class
/// appearing later changes the fingerprint.
fn hash_referenced_types<R: TypeResolver + ?Sized>(hasher: &mut Xxh3, context: &BindingContext, types: &R) {
    let mut seen: HashSet<(String, AbsoluteFsPath)> = HashSet::new();
    let mut pending: VecDeque<(String, AbsoluteFsPath)> = VecDeque::new();
    for member in context.members() {
        collect_named(&member.ty, &mut pending);
    }
    while let Some(key) = pending.pop_front() {
        if !seen.insert(key.clone()) {
            continue;
        }
        let (name, origin) = &key;
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
        hasher.update(origin.as_str().as_bytes());
        hasher.update(&[0]);
        match types.resolve_named_type(name, origin) {
            Some(resolved) => {
                hasher.update(format!("{:?}", resolved).as_bytes());
                for member in resolved.members() {
                    collect_named(&member.ty, &mut pending);
                }
            }
            None => hasher.update(&[0xff]),
        }
    }
}

fn collect_named(ty: &TemplateType, out: &mut VecDeque<(String, AbsoluteFsPath)>) {
    match ty {
        TemplateType::Named { name, origin } => out.push_back((name.clone(), origin.clone())),
        TemplateType::Array(elem) => collect_named(elem, out),
        TemplateType::Function(func) => {
            for param in &func.params {
                collect_named(&param.ty, out);
            }
            collect_named(&func.ret, out);
        }
        TemplateType::Object(fields) => {
            for (_, field) in fields {
                collect_named(field, out);
            }
        }
        TemplateType::Union(parts) => {
            for part in parts {
                collect_named(part, out);
            }
        }
        _ => {}
    }
}
