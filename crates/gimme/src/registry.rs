//! Provider, binding, and scope tables

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use gimme_core::{Error, Instance, Provider, Result, TypeKey};

/// Adapter applied to a concrete instance when the request came in through
/// a binding, e.g. the unsizing cast from `Arc<Concrete>` to
/// `Arc<dyn Abstract>`.
pub(crate) type Adapter = Arc<dyn Fn(Instance) -> Result<Instance> + Send + Sync>;

/// A binding-table entry: the key lookups are redirected to, plus the
/// optional payload adapter.
struct Binding {
    target: TypeKey,
    adapt: Option<Adapter>,
}

/// Owns the provider map, the binding (alias) table, and the scope-relation
/// table. Populated during setup through `&mut self`; read-only once
/// resolution starts.
#[derive(Default)]
pub(crate) struct Registry {
    providers: HashMap<TypeKey, Provider>,
    bindings: HashMap<TypeKey, Binding>,
    scopes: HashMap<TypeKey, Vec<TypeKey>>,
}

impl Registry {
    /// Store a provider under its exact key, replacing any previous one.
    pub(crate) fn insert_provider(&mut self, key: TypeKey, provider: Provider) {
        if self.providers.insert(key.clone(), provider).is_some() {
            debug!(key = %key, "replaced provider");
        } else {
            debug!(key = %key, "registered provider");
        }
    }

    pub(crate) fn insert_binding(
        &mut self,
        source: TypeKey,
        target: TypeKey,
        adapt: Option<Adapter>,
    ) {
        debug!(source = %source, target = %target, "registered binding");
        self.bindings.insert(source, Binding { target, adapt });
    }

    pub(crate) fn insert_scope(&mut self, root: TypeKey, scoped: TypeKey) {
        debug!(root = %root, scoped = %scoped, "registered scope relation");
        let entries = self.scopes.entry(root).or_default();
        if !entries.contains(&scoped) {
            entries.push(scoped);
        }
    }

    /// Follow the binding table by at most one hop. Returns the lookup key
    /// and the adapter to apply to the produced instance. The table is
    /// never chased transitively.
    pub(crate) fn target_of(&self, key: &TypeKey) -> (TypeKey, Option<Adapter>) {
        match self.bindings.get(key) {
            Some(binding) => {
                trace!(source = %key, target = %binding.target, "following binding");
                (binding.target.clone(), binding.adapt.clone())
            }
            None => (key.clone(), None),
        }
    }

    pub(crate) fn provider(&self, target: &TypeKey) -> Result<Provider> {
        self.providers
            .get(target)
            .cloned()
            .ok_or_else(|| Error::not_found(target))
    }

    /// Scoped keys declared for this root, normalized through the binding
    /// table so that scoping an abstract key caches its concrete target.
    pub(crate) fn scoped_targets(&self, root: &TypeKey) -> Option<Vec<TypeKey>> {
        let declared = self.scopes.get(root)?;
        Some(declared.iter().map(|key| self.target_of(key).0).collect())
    }

    pub(crate) fn is_registered(&self, key: &TypeKey) -> bool {
        self.providers.contains_key(key) || self.bindings.contains_key(key)
    }

    /// Every key that can currently be requested: provider keys plus
    /// binding sources.
    pub(crate) fn registered_keys(&self) -> Vec<TypeKey> {
        let mut keys: Vec<_> = self.providers.keys().cloned().collect();
        keys.extend(self.bindings.keys().cloned());
        keys
    }

    pub(crate) fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub(crate) fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn scope_count(&self) -> usize {
        self.scopes.values().map(Vec::len).sum()
    }
}
