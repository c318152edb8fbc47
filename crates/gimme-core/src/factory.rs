//! Derived construction from declared parameter lists

use std::sync::Arc;

use crate::error::Result;
use crate::key::TypeKey;
use crate::provider::{Resolver, ResolverExt};

/// A constructor with a statically declared, ordered parameter list.
///
/// This is the contract the engine derives providers from:
/// [`Factory::parameter_keys`] is the ordered list of dependency keys, and
/// [`Factory::build`] resolves each one through the context, in declared
/// order, then applies the function. Implemented for plain functions and
/// closures of arity 0..=8 whose parameters are `Arc<T>`, trait objects
/// included, so a constructor like `fn new(db: Arc<dyn Store>) -> Repo`
/// registers directly.
pub trait Factory<Args>: Send + Sync + 'static {
    /// The constructed type.
    type Output: Send + Sync + 'static;

    /// Dependency keys in declared parameter order.
    fn parameter_keys() -> Vec<TypeKey>;

    /// Resolve every parameter through `resolver`, then construct.
    fn build(&self, resolver: &dyn Resolver) -> Result<Self::Output>;
}

impl<Fun, Out> Factory<()> for Fun
where
    Fun: Fn() -> Out + Send + Sync + 'static,
    Out: Send + Sync + 'static,
{
    type Output = Out;

    fn parameter_keys() -> Vec<TypeKey> {
        Vec::new()
    }

    fn build(&self, _resolver: &dyn Resolver) -> Result<Out> {
        Ok((self)())
    }
}

macro_rules! impl_factory {
    ($($arg:ident: $ty:ident),+) => {
        impl<Fun, Out, $($ty),+> Factory<($(Arc<$ty>,)+)> for Fun
        where
            Fun: Fn($(Arc<$ty>),+) -> Out + Send + Sync + 'static,
            Out: Send + Sync + 'static,
            $($ty: ?Sized + Send + Sync + 'static,)+
        {
            type Output = Out;

            fn parameter_keys() -> Vec<TypeKey> {
                vec![$(TypeKey::of::<$ty>()),+]
            }

            fn build(&self, resolver: &dyn Resolver) -> Result<Out> {
                $(let $arg = resolver.gimme::<$ty>()?;)+
                Ok((self)($($arg),+))
            }
        }
    };
}

impl_factory!(a: A);
impl_factory!(a: A, b: B);
impl_factory!(a: A, b: B, c: C);
impl_factory!(a: A, b: B, c: C, d: D);
impl_factory!(a: A, b: B, c: C, d: D, e: E);
impl_factory!(a: A, b: B, c: C, d: D, e: E, f: F);
impl_factory!(a: A, b: B, c: C, d: D, e: E, f: F, g: G);
impl_factory!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H);
