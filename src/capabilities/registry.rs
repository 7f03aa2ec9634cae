//! Capability Registry: single source of truth for capability shapes.
//!
//! The registry loads capabilities from:
//! 1. Programmatic registration
//! 2. YAML files (a single `capability:` or a `capabilities:` list)
//! 3. Directories of YAML files, searched recursively
//!
//! Iteration order is registration order so diagnostics stay deterministic.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use super::capability::Capability;
use crate::errors::{CompositionError, CompositionResult};

/// Anything the composer can resolve capability names against.
pub trait CapabilitySource {
    /// Resolve a capability by name.
    fn lookup(&self, name: &str) -> CompositionResult<Arc<Capability>>;
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The capability was new.
    Added,
    /// An identical shape was already registered; nothing changed.
    Unchanged,
}

/// Registry of capabilities indexed by name, in registration order.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    capabilities: IndexMap<String, Arc<Capability>>,

    /// Directories searched by `load_all`
    search_paths: Vec<PathBuf>,
}

impl CapabilityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search path for capability YAML files.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// Register a capability.
    ///
    /// Re-registering an identical shape is a no-op. A different shape under an
    /// existing name fails and leaves the registry untouched.
    pub fn register(&mut self, capability: Capability) -> CompositionResult<Registration> {
        capability.check()?;

        if let Some(existing) = self.capabilities.get(&capability.name) {
            if existing.same_shape(&capability) {
                log::debug!("Capability '{}' already registered", capability.name);
                return Ok(Registration::Unchanged);
            }
            return Err(CompositionError::DuplicateCapability {
                name: capability.name,
            });
        }

        log::debug!(
            "Registered capability '{}' ({})",
            capability.name,
            capability.operation_names().join(", ")
        );
        self.capabilities
            .insert(capability.name.clone(), Arc::new(capability));
        Ok(Registration::Added)
    }

    /// Register capabilities from a YAML file.
    /// The file can contain a single `capability:` or a `capabilities:` list.
    ///
    /// Returns how many entries were newly added. The whole file is checked
    /// before anything is registered.
    pub fn register_from_file(&mut self, path: impl AsRef<Path>) -> CompositionResult<usize> {
        let content = std::fs::read_to_string(path)?;
        let parsed = parse_capability_file(&content)?;

        let mut in_file: IndexMap<&str, &Capability> = IndexMap::new();
        for cap in &parsed {
            cap.check()?;
            if let Some(previous) = in_file.insert(cap.name.as_str(), cap) {
                if !previous.same_shape(cap) {
                    return Err(CompositionError::DuplicateCapability {
                        name: cap.name.clone(),
                    });
                }
            }
            if let Some(existing) = self.capabilities.get(&cap.name) {
                if !existing.same_shape(cap) {
                    return Err(CompositionError::DuplicateCapability {
                        name: cap.name.clone(),
                    });
                }
            }
        }

        let mut added = 0;
        for cap in parsed {
            if self.register(cap)? == Registration::Added {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Load all capability YAML files from a directory (recursive).
    ///
    /// Files that fail to parse are logged and skipped; shape conflicts with
    /// already registered capabilities are returned as errors.
    pub fn load_directory(&mut self, dir: &Path) -> CompositionResult<usize> {
        let mut count = 0;
        if !dir.exists() {
            return Ok(0);
        }

        let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()?;
        entries.sort();

        for path in entries {
            if path.is_dir() {
                count += self.load_directory(&path)?;
            } else if path
                .extension()
                .map_or(false, |ext| ext == "yaml" || ext == "yml")
            {
                match self.register_from_file(&path) {
                    Ok(n) => count += n,
                    Err(CompositionError::Yaml(e)) => {
                        log::warn!(
                            "Failed to load capability from {}: {}",
                            path.display(),
                            e
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(count)
    }

    /// Load capabilities from all registered search paths.
    pub fn load_all(&mut self) -> CompositionResult<usize> {
        let mut count = 0;
        let paths = self.search_paths.clone();
        for path in &paths {
            count += self.load_directory(path)?;
        }
        Ok(count)
    }

    /// Resolve a capability by name.
    pub fn lookup(&self, name: &str) -> CompositionResult<Arc<Capability>> {
        self.capabilities
            .get(name)
            .cloned()
            .ok_or_else(|| CompositionError::UnknownCapability {
                name: name.to_string(),
            })
    }

    /// Iterate all capabilities in registration order.
    ///
    /// The iterator is `Clone`, so a sequence can be restarted from any copy.
    pub fn all(&self) -> Capabilities<'_> {
        Capabilities {
            inner: self.capabilities.values(),
        }
    }

    /// Shared handles to every capability, in registration order.
    pub fn snapshot(&self) -> Vec<Arc<Capability>> {
        self.capabilities.values().cloned().collect()
    }

    /// Capabilities that declare an operation with the given name.
    pub fn providers_of(&self, operation: &str) -> Vec<&Capability> {
        self.capabilities
            .values()
            .filter(|c| c.signature(operation).is_some())
            .map(|c| c.as_ref())
            .collect()
    }

    /// Whether a capability with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }

    /// Get the total number of registered capabilities.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl CapabilitySource for CapabilityRegistry {
    fn lookup(&self, name: &str) -> CompositionResult<Arc<Capability>> {
        CapabilityRegistry::lookup(self, name)
    }
}

/// Registration-ordered iterator returned by [`CapabilityRegistry::all`].
#[derive(Debug, Clone)]
pub struct Capabilities<'a> {
    inner: indexmap::map::Values<'a, String, Arc<Capability>>,
}

impl<'a> Iterator for Capabilities<'a> {
    type Item = &'a Capability;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|c| c.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Capabilities<'_> {}

/// Wrapper for YAML list of capabilities
#[derive(Debug, serde::Deserialize)]
struct CapabilityListWrapper {
    capabilities: Vec<Capability>,
}

/// The top-level key picks the shape, so a broken single capability reports
/// its own error instead of a missing `capabilities` list.
fn parse_capability_file(content: &str) -> Result<Vec<Capability>, serde_yaml::Error> {
    let document: serde_yaml::Value = serde_yaml::from_str(content)?;
    if document.get("capability").is_some() {
        return Ok(vec![Capability::from_yaml(content)?]);
    }
    let list: CapabilityListWrapper = serde_yaml::from_value(document)?;
    Ok(list.capabilities)
}
