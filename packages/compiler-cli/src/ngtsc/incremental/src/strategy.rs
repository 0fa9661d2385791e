// Incremental Strategy
//
// Strategies for reusing template type-check results.

use super::api::IncrementalStrategy;
use crate::ngtsc::reflection::ClassId;
use crate::ngtsc::typecheck::TemplateDiagnostic;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Checks every template on every query.
#[derive(Debug, Default)]
pub struct NoopIncrementalStrategy;

impl IncrementalStrategy for NoopIncrementalStrategy {
    fn cached_template_diagnostics(&self, _class: &ClassId, _fingerprint: u64) -> Option<Vec<TemplateDiagnostic>> {
        None
    }

    fn record_template_diagnostics(&self, _class: &ClassId, _fingerprint: u64, _diagnostics: &[TemplateDiagnostic]) {}
}

#[derive(Debug, Clone)]
struct CachedCheck {
    fingerprint: u64,
    diagnostics: Vec<TemplateDiagnostic>,
}

/// Keeps the last result per component and reuses it while the
/// fingerprint is unchanged.
#[derive(Debug, Default)]
pub struct TrackedIncrementalStrategy {
    cache: RefCell<HashMap<ClassId, CachedCheck>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl TrackedIncrementalStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the result recorded for a class.
    pub fn invalidate(&self, class: &ClassId) {
        self.cache.borrow_mut().remove(class);
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    pub fn misses(&self) -> usize {
        self.misses.get()
    }
}

impl IncrementalStrategy for TrackedIncrementalStrategy {
    fn cached_template_diagnostics(&self, class: &ClassId, fingerprint: u64) -> Option<Vec<TemplateDiagnostic>> {
        let cached = self
            .cache
            .borrow()
            .get(class)
            .filter(|entry| entry.fingerprint == fingerprint)
            .map(|entry| entry.diagnostics.clone());
        match cached {
            Some(_) => {
                self.hits.set(self.hits.get() + 1);
                tracing::trace!(class = %class, "reusing template diagnostics");
            }
            None => self.misses.set(self.misses.get() + 1),
        }
        cached
    }

    fn record_template_diagnostics(&self, class: &ClassId, fingerprint: u64, diagnostics: &[TemplateDiagnostic]) {
        self.cache.borrow_mut().insert(
            class.clone(),
            CachedCheck {
                fingerprint,
                diagnostics: diagnostics.to_vec(),
            },
        );
    }
}
