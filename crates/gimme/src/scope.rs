//! Scoped-cache resolution context

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::trace;

use gimme_core::{Instance, Resolver, Result, TypeKey};

use crate::injector::Injector;

/// Per-resolution decorator that caches one instance per scoped key for
/// the lifetime of the enclosing root resolution.
///
/// Every cache slot is created in the constructor, before the root's
/// provider is invoked; installation never interleaves with construction,
/// so the order in which the root's dependencies are instantiated cannot
/// produce two instances of one scoped type inside the tree.
pub(crate) struct ScopeContext<'a> {
    injector: &'a Injector,
    parent: &'a (dyn Resolver + 'a),
    slots: HashMap<TypeKey, RefCell<Option<Instance>>>,
}

impl<'a> ScopeContext<'a> {
    pub(crate) fn new(
        injector: &'a Injector,
        parent: &'a (dyn Resolver + 'a),
        scoped: Vec<TypeKey>,
    ) -> Self {
        let slots = scoped
            .into_iter()
            .map(|key| (key, RefCell::new(None)))
            .collect();
        Self {
            injector,
            parent,
            slots,
        }
    }
}

impl Resolver for ScopeContext<'_> {
    fn resolve_key(&self, key: &TypeKey) -> Result<Instance> {
        let (target, adapt) = self.injector.registry().target_of(key);
        let instance = self.resolve_target(&target, self)?;
        match adapt {
            Some(adapt) => adapt.as_ref()(instance),
            None => Ok(instance),
        }
    }

    fn resolve_target(&self, target: &TypeKey, top: &dyn Resolver) -> Result<Instance> {
        let Some(slot) = self.slots.get(target) else {
            return self.parent.resolve_target(target, top);
        };
        let cached = slot.borrow().as_ref().cloned();
        if let Some(instance) = cached {
            trace!(target = %target, "scope cache hit");
            return Ok(instance);
        }
        // The slot stays unborrowed while the instance is constructed, so
        // a cyclic graph recurses here instead of poisoning the cell.
        let instance = self.parent.resolve_target(target, top)?;
        *slot.borrow_mut() = Some(instance.clone());
        trace!(target = %target, "scope cache filled");
        Ok(instance)
    }

    fn record(&self, target: &TypeKey, instance: &Instance) {
        self.parent.record(target, instance);
    }
}
