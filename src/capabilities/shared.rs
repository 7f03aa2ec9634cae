//! Process-wide registry with a single writer lock.
//!
//! Host programs register their capabilities at startup through
//! [`global()`]; after that the registry is only read. Tests should build a
//! fresh [`SharedRegistry`] (or a plain [`CapabilityRegistry`]) instead of
//! touching the global one.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::capability::Capability;
use super::registry::{CapabilityRegistry, CapabilitySource, Registration};
use crate::errors::CompositionResult;

static GLOBAL: Lazy<SharedRegistry> = Lazy::new(SharedRegistry::new);

/// The process-wide registry.
pub fn global() -> &'static SharedRegistry {
    &GLOBAL
}

/// A [`CapabilityRegistry`] behind a reader/writer lock.
///
/// `register` is serialized by the write lock; lookups share the read lock.
#[derive(Debug, Default, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<CapabilityRegistry>>,
}

impl SharedRegistry {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already populated registry.
    pub fn from_registry(registry: CapabilityRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Register a capability under the write lock.
    pub fn register(&self, capability: Capability) -> CompositionResult<Registration> {
        self.inner.write().register(capability)
    }

    /// Resolve a capability by name.
    pub fn lookup(&self, name: &str) -> CompositionResult<Arc<Capability>> {
        self.inner.read().lookup(name)
    }

    /// Registration-ordered copy of every capability.
    ///
    /// The returned vector can be iterated any number of times without holding
    /// the lock.
    pub fn all(&self) -> Vec<Arc<Capability>> {
        self.inner.read().snapshot()
    }

    /// Run a closure with read access to the underlying registry.
    pub fn read<R>(&self, f: impl FnOnce(&CapabilityRegistry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a closure with write access, e.g. to load YAML files at startup.
    pub fn write<R>(&self, f: impl FnOnce(&mut CapabilityRegistry) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl CapabilitySource for SharedRegistry {
    fn lookup(&self, name: &str) -> CompositionResult<Arc<Capability>> {
        SharedRegistry::lookup(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::capability::OperationSignature;
    use std::thread;

    #[test]
    fn test_concurrent_registration_is_serialized() {
        let shared = SharedRegistry::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    // Half the threads race on the same name with the same shape.
                    let name = if i % 2 == 0 {
                        "Runnable".to_string()
                    } else {
                        format!("Cap{}", i)
                    };
                    shared
                        .register(Capability::new(name).operation(OperationSignature::new("run")))
                        .unwrap()
                })
            })
            .collect();

        let added = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| *r == Registration::Added)
            .count();

        assert_eq!(added, 5);
        assert_eq!(shared.len(), 5);
        assert!(shared.lookup("Runnable").is_ok());
    }

    #[test]
    fn test_all_snapshot_in_order() {
        let shared = SharedRegistry::new();
        shared
            .register(Capability::new("B").operation(OperationSignature::new("b")))
            .unwrap();
        shared
            .register(Capability::new("A").operation(OperationSignature::new("a")))
            .unwrap();

        let names: Vec<String> = shared.all().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(shared.read(|r| r.len()), 2);
    }
}
