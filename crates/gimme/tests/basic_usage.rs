//! End-to-end coverage of registration, binding, and resolution

use std::marker::PhantomData;
use std::sync::Arc;

use gimme::{Error, Injector, Resolver, ResolverExt, TypeKey};

trait Abstract: Send + Sync {
    fn name(&self) -> &'static str;
}

struct Concrete;

impl Concrete {
    fn new() -> Self {
        Self
    }
}

impl Abstract for Concrete {
    fn name(&self) -> &'static str {
        "concrete"
    }
}

struct Nested {
    an_abstract: Arc<dyn Abstract>,
}

impl Nested {
    fn new(an_abstract: Arc<dyn Abstract>) -> Self {
        Self { an_abstract }
    }
}

struct Holder<T> {
    _marker: PhantomData<T>,
}

impl<T> Holder<T> {
    fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

#[test]
fn gimme_constructs_a_registered_concrete_type() {
    let mut injector = Injector::new();
    injector.register(Concrete::new);

    let instance = injector.gimme::<Concrete>();

    assert!(instance.is_ok(), "expected resolution to succeed");
}

#[test]
fn every_gimme_call_constructs_a_fresh_instance() {
    let mut injector = Injector::new();
    injector.register(Concrete::new);

    let first = injector.gimme::<Concrete>().unwrap();
    let second = injector.gimme::<Concrete>().unwrap();

    assert!(
        !Arc::ptr_eq(&first, &second),
        "unscoped instances must be distinct"
    );
}

#[test]
fn a_bound_abstract_type_resolves_to_its_concrete_implementation() {
    let mut injector = Injector::new();
    injector.bind::<dyn Abstract, Concrete>(|concrete| concrete);
    injector.register(Concrete::new);

    let instance = injector.gimme::<dyn Abstract>().unwrap();

    assert_eq!(instance.name(), "concrete");
}

#[test]
fn constructor_parameters_are_resolved_through_bindings() {
    let mut injector = Injector::new();
    injector.bind::<dyn Abstract, Concrete>(|concrete| concrete);
    injector.register(Nested::new);
    injector.register(Concrete::new);

    let nested = injector.gimme::<Nested>().unwrap();

    assert_eq!(nested.an_abstract.name(), "concrete");
}

#[test]
fn gimme_now_constructs_without_registration() {
    let mut injector = Injector::new();
    injector.bind::<dyn Abstract, Concrete>(|concrete| concrete);
    injector.register(Concrete::new);

    let nested = injector.gimme_now(Nested::new).unwrap();

    assert_eq!(nested.an_abstract.name(), "concrete");
    assert!(!injector.is_registered(&TypeKey::of::<Nested>()));
}

#[test]
fn an_explicit_provider_can_resolve_through_its_context() {
    let mut injector = Injector::new();
    injector.bind::<dyn Abstract, Concrete>(|concrete| concrete);
    injector.register(Concrete::new);
    injector.provider(|ctx: &dyn Resolver| Ok(Nested::new(ctx.gimme::<dyn Abstract>()?)));

    let nested = injector.gimme::<Nested>().unwrap();

    assert_eq!(nested.an_abstract.name(), "concrete");
}

#[test]
fn generic_registrations_match_exactly() {
    let mut injector = Injector::new();
    injector.register(Holder::<Vec<String>>::new);

    assert!(injector.gimme::<Holder<Vec<String>>>().is_ok());

    let mismatch = injector.gimme::<Holder<String>>().err();
    assert!(
        matches!(mismatch, Some(Error::NotFound { .. })),
        "exact parameterization is required: {mismatch:?}"
    );
}

#[test]
fn re_registering_a_key_replaces_the_provider() {
    let mut injector = Injector::new();
    injector.provider(|_ctx: &dyn Resolver| Ok(1_u32));
    injector.provider(|_ctx: &dyn Resolver| Ok(2_u32));

    assert_eq!(*injector.gimme::<u32>().unwrap(), 2);
}

#[test]
fn resolution_fails_for_unregistered_types() {
    let injector = Injector::new();

    let missing = injector.gimme::<Concrete>().err();

    assert!(matches!(missing, Some(Error::NotFound { .. })));
}

#[test]
fn the_injector_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Injector>();
}

#[test]
fn the_debug_representation_summarizes_the_tables() {
    let mut injector = Injector::new();
    injector.register(Concrete::new);
    injector.bind::<dyn Abstract, Concrete>(|concrete| concrete);

    let rendered = format!("{injector:?}");

    assert!(rendered.contains("providers: 1"), "{rendered}");
    assert!(rendered.contains("bindings: 1"), "{rendered}");
}
