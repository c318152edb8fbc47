//! Debug context and the external sink interface

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use gimme_core::{Instance, Resolver, Result, TypeKey};

use crate::injector::Injector;

/// Type-to-instance associations recorded for one top-level resolution.
#[derive(Clone, Debug, Default)]
pub struct GimmeReport {
    /// Identity tag of the last instance produced for each key in the
    /// resolution tree.
    pub associations: HashMap<TypeKey, String>,
}

/// External observer of completed top-level resolutions.
///
/// Attaching a sink must not change resolution semantics: the engine only
/// adds the recording wrapper, it never alters what gets constructed.
pub trait DebugSink: Send + Sync {
    /// Called once per outermost resolution with the recorded
    /// associations for that resolution tree.
    fn on_gimme(&self, report: &GimmeReport);
}

/// Sink that logs each completed resolution through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDebugSink;

impl DebugSink for TracingDebugSink {
    fn on_gimme(&self, report: &GimmeReport) {
        for (key, tag) in &report.associations {
            debug!(key = %key, instance = %tag, "gimme");
        }
    }
}

/// Per-resolution decorator that records the identity of every instance a
/// provider produces. Resolution itself is delegated unchanged; with no
/// sink attached this context is never built.
pub(crate) struct DebugContext<'a> {
    injector: &'a Injector,
    records: RefCell<HashMap<TypeKey, String>>,
}

impl<'a> DebugContext<'a> {
    pub(crate) fn new(injector: &'a Injector) -> Self {
        Self {
            injector,
            records: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn into_report(self) -> GimmeReport {
        GimmeReport {
            associations: self.records.into_inner(),
        }
    }
}

impl Resolver for DebugContext<'_> {
    fn resolve_key(&self, key: &TypeKey) -> Result<Instance> {
        let (target, adapt) = self.injector.registry().target_of(key);
        let instance = self.resolve_target(&target, self)?;
        match adapt {
            Some(adapt) => adapt.as_ref()(instance),
            None => Ok(instance),
        }
    }

    fn resolve_target(&self, target: &TypeKey, top: &dyn Resolver) -> Result<Instance> {
        self.injector.resolve_target(target, top)
    }

    fn record(&self, target: &TypeKey, instance: &Instance) {
        self.records
            .borrow_mut()
            .insert(target.clone(), instance.tag());
    }
}
