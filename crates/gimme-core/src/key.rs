//! Structural type identity for registry lookups

use std::any::{TypeId, type_name};
use std::fmt;

use crate::error::{Error, Result};

/// Identity of a type as used for provider and binding lookups.
///
/// A key is the identity of the raw type plus the ordered keys of its
/// generic arguments (empty for non-generic types). Two keys are equal iff
/// the raw identities are equal and the argument lists match element-wise
/// and in length; there is no variance and no partial matching of any
/// kind, so `Holder<Vec<String>>` never satisfies a request for
/// `Holder<String>`.
///
/// Keys come from two construction paths:
///
/// - [`TypeKey::of`] for concrete Rust types, where monomorphization
///   already pins every generic argument inside the `TypeId`;
/// - [`TypeKey::parameterized`] for hosts that model erased generics and
///   assemble keys at runtime from a template marker plus argument keys.
///
/// A key carrying the [`TypeKey::unspecified`] placeholder anywhere in its
/// structure is invalid and is rejected before it can enter a registry.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TypeKey {
    raw: RawType,
    args: Vec<TypeKey>,
}

/// Identity of the raw (unparameterized) type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum RawType {
    /// A concrete Rust type. The name is carried for diagnostics only;
    /// equality and hashing are decided by the `TypeId`.
    Concrete { id: TypeId, name: &'static str },
    /// Placeholder for a generic argument the caller's context did not
    /// pin to a concrete type.
    Unspecified,
}

impl TypeKey {
    /// Key for a concrete Rust type, trait objects included.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            raw: RawType::Concrete {
                id: TypeId::of::<T>(),
                name: type_name::<T>(),
            },
            args: Vec::new(),
        }
    }

    /// The placeholder a type-metadata facility returns when a generic
    /// argument is not pinned. It may exist as a value but never enters a
    /// registry.
    pub fn unspecified() -> Self {
        Self {
            raw: RawType::Unspecified,
            args: Vec::new(),
        }
    }

    /// Key for a runtime-assembled generic parameterization: the template
    /// marker type `M` plus the ordered argument keys.
    ///
    /// Fails with [`Error::InvalidRegistration`] if any argument,
    /// recursively, is the unspecified placeholder.
    pub fn parameterized<M: ?Sized + 'static>(args: Vec<TypeKey>) -> Result<Self> {
        let key = Self {
            raw: RawType::Concrete {
                id: TypeId::of::<M>(),
                name: type_name::<M>(),
            },
            args,
        };
        key.ensure_specified()?;
        Ok(key)
    }

    /// Whether this key is the bare unspecified placeholder.
    pub fn is_unspecified(&self) -> bool {
        matches!(self.raw, RawType::Unspecified)
    }

    /// True when neither the key nor any generic argument, recursively, is
    /// the unspecified placeholder.
    pub fn is_fully_specified(&self) -> bool {
        !self.is_unspecified() && self.args.iter().all(TypeKey::is_fully_specified)
    }

    /// Ordered generic-argument keys; empty for non-generic keys.
    pub fn args(&self) -> &[TypeKey] {
        &self.args
    }

    /// Reject keys that may not enter a registry.
    pub fn ensure_specified(&self) -> Result<()> {
        if self.is_fully_specified() {
            Ok(())
        } else {
            Err(Error::invalid_registration(format!(
                "type key {self} carries an unspecified generic argument"
            )))
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            RawType::Concrete { name, .. } => f.write_str(name)?,
            RawType::Unspecified => f.write_str("_")?,
        }
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}
