//! Opaque produced values and their typed payloads

use std::any::Any;
use std::sync::Arc;

/// An opaque produced value.
///
/// The payload is always an `Arc<T>` for the registered `T`, which keeps
/// trait objects first-class (an `Arc<dyn Trait>` is a sized payload) and
/// lets a scope cache hand the same underlying allocation out repeatedly.
/// The payload's allocation address is captured at wrap time, so instance
/// identity survives re-wrapping by binding adapters.
#[derive(Clone)]
pub struct Instance {
    payload: Arc<dyn Any + Send + Sync>,
    address: usize,
}

impl Instance {
    /// Opaque identity tag for the underlying value. Clones and adapted
    /// views of one instance share a tag; instances alive at the same
    /// time never do.
    pub fn tag(&self) -> String {
        format!("{:#x}", self.address)
    }
}

/// Wrap a shared value into an [`Instance`].
pub fn wrap<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Instance {
    let address = Arc::as_ptr(&value).cast::<()>() as usize;
    Instance {
        payload: Arc::new(value),
        address,
    }
}

/// Extract the typed payload, if this instance carries a `T`.
pub fn extract<T: ?Sized + Send + Sync + 'static>(instance: &Instance) -> Option<Arc<T>> {
    instance.payload.downcast_ref::<Arc<T>>().cloned()
}
