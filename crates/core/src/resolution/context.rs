//! Per-call resolution state
//!
//! A context lives for one top-level call tree. It tracks the uris currently
//! being resolved (cycle detection) and the ordered history of attempts
//! (diagnostics, resolution path).

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use super::history::{ResolutionHistory, ResolutionStep};
use crate::uri::Uri;

#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    resolving: HashSet<Uri>,
    history: Vec<ResolutionStep>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resolving(&self, uri: &Uri) -> bool {
        self.resolving.contains(uri)
    }

    /// Mark `uri` as in progress. Returns false if it already was.
    pub fn start_resolving(&mut self, uri: &Uri) -> bool {
        self.resolving.insert(uri.clone())
    }

    pub fn stop_resolving(&mut self, uri: &Uri) {
        self.resolving.remove(uri);
    }

    /// Mark `uri` as in progress until the returned guard is dropped, including
    /// on unwind.
    pub fn enter(&mut self, uri: &Uri) -> ResolvingGuard<'_> {
        self.start_resolving(uri);
        ResolvingGuard {
            context: self,
            uri: uri.clone(),
        }
    }

    pub fn track_step(&mut self, step: ResolutionStep) {
        tracing::debug!(
            "resolution step: {} => {}",
            step.source_uri,
            step.outcome
        );
        self.history.push(step);
    }

    pub fn steps(&self) -> &[ResolutionStep] {
        &self.history
    }

    pub fn history(&self) -> ResolutionHistory {
        ResolutionHistory::new(self.history.clone())
    }

    pub fn into_history(self) -> Vec<ResolutionStep> {
        self.history
    }

    /// Uris traversed to reach the terminal result, most specific last
    pub fn resolution_path(&self) -> Vec<Uri> {
        path_from_steps(&self.history)
    }

    /// Resolution path built only from steps recorded at or after `start`
    pub fn resolution_path_since(&self, start: usize) -> Vec<Uri> {
        path_from_steps(self.history.get(start..).unwrap_or_default())
    }

    /// Context for nested work: sees every uri in progress here, records its
    /// own history. Attach that history to a parent step with
    /// [`ResolutionStep::with_sub_history`].
    pub fn create_sub_context(&self) -> Self {
        Self {
            resolving: self.resolving.clone(),
            history: Vec::new(),
        }
    }
}

/// Borrow of a context that keeps one uri in progress while alive
pub struct ResolvingGuard<'a> {
    context: &'a mut ResolutionContext,
    uri: Uri,
}

impl Deref for ResolvingGuard<'_> {
    type Target = ResolutionContext;

    fn deref(&self) -> &ResolutionContext {
        self.context
    }
}

impl DerefMut for ResolvingGuard<'_> {
    fn deref_mut(&mut self) -> &mut ResolutionContext {
        self.context
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        self.context.stop_resolving(&self.uri);
    }
}

fn path_from_steps(steps: &[ResolutionStep]) -> Vec<Uri> {
    let mut path: Vec<Uri> = Vec::new();
    let mut push = |uri: &Uri| {
        if path.last() != Some(uri) {
            path.push(uri.clone());
        }
    };

    for step in steps {
        push(&step.source_uri);
    }
    if let Some(terminal) = steps.last().and_then(|step| step.outcome.uri()) {
        push(terminal);
    }
    path
}
