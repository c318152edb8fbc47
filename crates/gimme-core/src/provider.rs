//! Provider and resolution-context contracts

use std::any::type_name;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::instance::{self, Instance};
use crate::key::TypeKey;

/// A unit of construction: given a live resolution context, produce an
/// instance or fail.
pub type Provider = Arc<dyn Fn(&dyn Resolver) -> Result<Instance> + Send + Sync>;

/// The resolution-context capability handed to providers.
///
/// A context is either the plain injector or a decorator wrapping it (a
/// scope cache, a debug recorder). Decorators intercept the lookups they
/// know about and delegate the rest inward, while every provider
/// invocation receives the outermost context, so nested requests re-enter
/// the full decorator chain. A context lives for exactly one outermost
/// resolution call and belongs to the call stack that created it.
pub trait Resolver {
    /// Resolve a key into an instance: one binding hop, then the chain
    /// walk, then the binding adapter.
    fn resolve_key(&self, key: &TypeKey) -> Result<Instance>;

    /// Chain-walk step on an already-hopped target key. `top` is the
    /// context that any provider invoked along the way will receive, so
    /// the whole chain stays visible to nested resolutions.
    fn resolve_target(&self, target: &TypeKey, top: &dyn Resolver) -> Result<Instance>;

    /// Observation hook fired once per provider invocation. Only the
    /// debug context does anything here.
    fn record(&self, target: &TypeKey, instance: &Instance) {
        let _ = (target, instance);
    }
}

/// Typed resolution sugar for any context, `&dyn Resolver` included.
///
/// Provider closures receive the context as a trait object; bringing this
/// extension into scope gives them the same `gimme` surface the injector
/// offers:
///
/// ```rust,ignore
/// injector.provider(|ctx: &dyn Resolver| Ok(Service::new(ctx.gimme()?)));
/// ```
pub trait ResolverExt: Resolver {
    /// Resolve and downcast an instance of `T` through this context.
    fn gimme<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        let resolved = self.resolve_key(&key)?;
        instance::extract::<T>(&resolved)
            .ok_or_else(|| Error::type_mismatch(&key, type_name::<T>()))
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}
