//! # Capability Registry
//!
//! Declares atomic capability contracts: a name plus a set of operation
//! signatures. Entity contracts are composed from these by
//! [`crate::composition`], and checked by [`crate::validation`].
//!
//! ## Resolution Flow
//!
//! 1. Capabilities are registered at startup, in code or from YAML files
//! 2. `CapabilityRegistry::lookup("Flyable")` returns the shared `Capability`
//! 3. `Composer::compose(&["Flyable", "Runnable"])` builds a contract
//! 4. The registry is read-only from then on
//!
//! A process-wide instance lives behind [`shared::global()`]; tests build
//! their own registries.

pub mod capability;
pub mod registry;
pub mod shared;

pub use capability::{Capability, OperationSignature, ValueType};
pub use registry::{Capabilities, CapabilityRegistry, CapabilitySource, Registration};
pub use shared::{global, SharedRegistry};
