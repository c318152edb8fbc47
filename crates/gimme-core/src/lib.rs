//! Core contracts for the gimme dependency-resolution engine
//!
//! This crate carries the pure pieces the engine is built from:
//!
//! - [`key::TypeKey`] - structural type identity, including exact generic
//!   parameterization
//! - [`instance::Instance`] - the opaque representation of produced values
//! - [`provider::Provider`] and [`provider::Resolver`] - the construction
//!   unit and the resolution-context capability handed to it
//! - [`factory::Factory`] - derived construction from a declared, ordered
//!   parameter list
//! - [`error::Error`] - the error taxonomy
//!
//! The engine itself (registry, scoping, debug reporting) lives in the
//! `gimme` crate.

pub mod error;
pub mod factory;
pub mod instance;
pub mod key;
pub mod provider;

pub use error::{Error, Result};
pub use factory::Factory;
pub use instance::{Instance, extract, wrap};
pub use key::TypeKey;
pub use provider::{Provider, Resolver, ResolverExt};
