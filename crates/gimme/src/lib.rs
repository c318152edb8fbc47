//! gimme - a type-keyed dependency-resolution engine
//!
//! Register how to build things, bind abstractions to their concrete
//! targets, and ask for instances: the engine recursively resolves each
//! constructor's dependencies, optionally caches instances per declared
//! scope, and optionally reports completed resolution trees to an external
//! debug sink.
//!
//! ## Architecture
//!
//! ```text
//! Injector (provider map + binding table + scope relations)
//!     │ gimme::<T>()
//!     ▼
//! resolution context chain (plain │ scope cache │ debug recorder)
//!     │ invokes Provider with the outermost context
//!     ▼
//! Provider ──► recursively resolves its own dependencies
//! ```
//!
//! Contexts are ephemeral: each top-level call builds its own chain and
//! drops it on return, so concurrent resolutions never share scope caches.
//!
//! ## Quick start
//!
//! ```rust
//! use gimme::Injector;
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! struct App {
//!     greeter: Arc<dyn Greeter>,
//! }
//!
//! impl App {
//!     fn new(greeter: Arc<dyn Greeter>) -> Self {
//!         Self { greeter }
//!     }
//! }
//!
//! let mut injector = Injector::new();
//! injector.register(|| English);
//! injector.bind::<dyn Greeter, English>(|concrete| concrete);
//! injector.register(App::new);
//!
//! let app = injector.gimme::<App>().unwrap();
//! assert_eq!(app.greeter.greet(), "hello");
//! ```

pub mod debug;
pub mod injector;
mod registry;
mod scope;

pub use debug::{DebugSink, GimmeReport, TracingDebugSink};
pub use injector::Injector;

// Re-export the core contracts so depending on `gimme` alone is enough.
pub use gimme_core::{
    Error, Factory, Instance, Provider, Resolver, ResolverExt, Result, TypeKey, extract, wrap,
};
