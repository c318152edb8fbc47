//! The injector: public registration and resolution API

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use gimme_core::{
    Error, Factory, Instance, Provider, Resolver, Result, TypeKey, extract, wrap,
};

use crate::debug::{DebugContext, DebugSink};
use crate::registry::{Adapter, Registry};
use crate::scope::ScopeContext;

/// The dependency-resolution engine: a provider registry, a one-hop
/// binding table, scope relations, and an optional debug sink.
///
/// Setup goes through `&mut self`, so registration is serialized by the
/// borrow checker. Resolution goes through `&self` and only reads the
/// tables; once setup is done, concurrent `gimme` calls from multiple
/// threads are safe, and each call builds its own ephemeral context chain.
pub struct Injector {
    registry: Registry,
    debug_sink: Option<Arc<dyn DebugSink>>,
}

impl Injector {
    pub fn new() -> Self {
        Self {
            registry: Registry::default(),
            debug_sink: None,
        }
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Register a derived provider for the factory's output type,
    /// replacing any provider previously stored under that exact key.
    ///
    /// The factory's parameters are resolved in declared order on every
    /// construction. Registering a factory whose dependency graph is
    /// cyclic is a configuration error: resolution recurses until the
    /// stack is exhausted, there is no cycle detection.
    pub fn register<Args, F>(&mut self, factory: F)
    where
        F: Factory<Args>,
    {
        let key = TypeKey::of::<F::Output>();
        let parameters = F::parameter_keys();
        debug!(
            key = %key,
            parameters = %parameters
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            "deriving provider from factory parameters"
        );
        let provider: Provider = Arc::new(move |ctx: &dyn Resolver| {
            let value = factory.build(ctx)?;
            Ok(wrap(Arc::new(value)))
        });
        self.registry.insert_provider(key, provider);
    }

    /// Register a derived provider under a runtime-built key, with the
    /// ordered parameter keys supplied by the host's type-metadata
    /// facility. `assemble` receives the resolved parameters in the same
    /// order.
    ///
    /// Fails with [`Error::InvalidRegistration`] before touching the
    /// registry if any key carries an unspecified generic argument.
    pub fn register_keyed<B>(
        &mut self,
        key: TypeKey,
        parameters: Vec<TypeKey>,
        assemble: B,
    ) -> Result<()>
    where
        B: Fn(Vec<Instance>) -> Result<Instance> + Send + Sync + 'static,
    {
        key.ensure_specified()?;
        for parameter in &parameters {
            parameter.ensure_specified()?;
        }
        let provider: Provider = Arc::new(move |ctx: &dyn Resolver| {
            let mut resolved = Vec::with_capacity(parameters.len());
            for parameter in &parameters {
                resolved.push(ctx.resolve_key(parameter)?);
            }
            assemble(resolved)
        });
        self.registry.insert_provider(key, provider);
        Ok(())
    }

    /// Register an explicit provider closure for `T`. The closure receives
    /// the live resolution context and may call back into it arbitrarily,
    /// including for its own declared type.
    pub fn provider<T, F>(&mut self, provide: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> Result<T> + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        let provider: Provider = Arc::new(move |ctx: &dyn Resolver| {
            let value = provide(ctx)?;
            Ok(wrap(Arc::new(value)))
        });
        self.registry.insert_provider(key, provider);
    }

    /// Register an explicit provider closure under a runtime-built key.
    pub fn provider_keyed<F>(&mut self, key: TypeKey, provide: F) -> Result<()>
    where
        F: Fn(&dyn Resolver) -> Result<Instance> + Send + Sync + 'static,
    {
        key.ensure_specified()?;
        self.registry.insert_provider(key, Arc::new(provide));
        Ok(())
    }

    /// Declare `C` as the resolution target whenever `A` is requested.
    ///
    /// `cast` is the unsizing conversion from the concrete payload to the
    /// abstract one; at the call site `|c| c` compiles whenever the
    /// coercion exists:
    /// `injector.bind::<dyn Greeter, ConsoleGreeter>(|c| c)`.
    ///
    /// The concrete provider does not have to exist yet, only by
    /// resolution time. The binding table maps directly to the concrete
    /// key and is never chained transitively.
    pub fn bind<A, C>(&mut self, cast: fn(Arc<C>) -> Arc<A>)
    where
        A: ?Sized + Send + Sync + 'static,
        C: ?Sized + Send + Sync + 'static,
    {
        let adapt: Adapter = Arc::new(move |instance: Instance| {
            let payload = extract::<C>(&instance)
                .ok_or_else(|| Error::type_mismatch(&TypeKey::of::<C>(), type_name::<C>()))?;
            Ok(wrap(cast(payload)))
        });
        self.registry
            .insert_binding(TypeKey::of::<A>(), TypeKey::of::<C>(), Some(adapt));
    }

    /// Declare a binding between runtime-built keys. No payload adaptation
    /// is applied; keyed hosts consume instances as opaque values.
    pub fn bind_keyed(&mut self, source: TypeKey, target: TypeKey) -> Result<()> {
        source.ensure_specified()?;
        target.ensure_specified()?;
        self.registry.insert_binding(source, target, None);
        Ok(())
    }

    /// Declare that every resolution of `Scoped` inside one resolution of
    /// `Root` yields the same instance, anywhere in the subtree. `Root` is
    /// matched by the key its provider is registered under.
    pub fn scope<Root, Scoped>(&mut self)
    where
        Root: ?Sized + 'static,
        Scoped: ?Sized + 'static,
    {
        self.registry
            .insert_scope(TypeKey::of::<Root>(), TypeKey::of::<Scoped>());
    }

    /// Declare a scope relation between runtime-built keys.
    pub fn scope_keyed(&mut self, root: TypeKey, scoped: TypeKey) -> Result<()> {
        root.ensure_specified()?;
        scoped.ensure_specified()?;
        self.registry.insert_scope(root, scoped);
        Ok(())
    }

    /// Attach an external debug sink. Every subsequent top-level
    /// resolution reports its type-to-instance associations to it; with no
    /// sink attached, no recording wrapper exists at all.
    pub fn attach_debug(&mut self, sink: Arc<dyn DebugSink>) {
        self.debug_sink = Some(sink);
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve an instance of `T`.
    pub fn gimme<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        let instance = self.gimme_key(&key)?;
        extract::<T>(&instance).ok_or_else(|| Error::type_mismatch(&key, type_name::<T>()))
    }

    /// Resolve an instance for a runtime-built key.
    pub fn gimme_key(&self, key: &TypeKey) -> Result<Instance> {
        match &self.debug_sink {
            Some(sink) => {
                let ctx = DebugContext::new(self);
                let instance = ctx.resolve_key(key)?;
                sink.on_gimme(&ctx.into_report());
                Ok(instance)
            }
            None => self.resolve_key(key),
        }
    }

    /// Construct a one-off value without registering its type: the
    /// factory's parameters are resolved in declared order through the
    /// same context machinery, then the factory is applied.
    pub fn gimme_now<Args, F>(&self, factory: F) -> Result<F::Output>
    where
        F: Factory<Args>,
    {
        match &self.debug_sink {
            Some(sink) => {
                let ctx = DebugContext::new(self);
                let value = factory.build(&ctx)?;
                sink.on_gimme(&ctx.into_report());
                Ok(value)
            }
            None => factory.build(self),
        }
    }

    /// Whether a provider or binding exists for this key.
    pub fn is_registered(&self, key: &TypeKey) -> bool {
        self.registry.is_registered(key)
    }

    /// Every key that can currently be requested: provider keys plus
    /// binding sources.
    pub fn registered_keys(&self) -> Vec<TypeKey> {
        self.registry.registered_keys()
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Resolver for Injector {
    fn resolve_key(&self, key: &TypeKey) -> Result<Instance> {
        let (target, adapt) = self.registry.target_of(key);
        let instance = self.resolve_target(&target, self)?;
        match adapt {
            Some(adapt) => adapt.as_ref()(instance),
            None => Ok(instance),
        }
    }

    fn resolve_target(&self, target: &TypeKey, top: &dyn Resolver) -> Result<Instance> {
        let provider = self.registry.provider(target)?;
        let instance = match self.registry.scoped_targets(target) {
            Some(scoped) => {
                // Every cache override is installed before the root's
                // provider runs; which dependency resolves first cannot
                // matter.
                let ctx = ScopeContext::new(self, top, scoped);
                trace!(root = %target, "invoking provider with scope overrides");
                provider.as_ref()(&ctx)?
            }
            None => {
                trace!(target = %target, "invoking provider");
                provider.as_ref()(top)?
            }
        };
        top.record(target, &instance);
        Ok(instance)
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("providers", &self.registry.provider_count())
            .field("bindings", &self.registry.binding_count())
            .field("scope_relations", &self.registry.scope_count())
            .field("debug_sink", &self.debug_sink.is_some())
            .finish()
    }
}
