//! # Segregate
//!
//! A capability-composition model for the Interface Segregation Principle.
//!
//! An entity is described as the union of independently satisfiable
//! capabilities. The crate has three parts:
//!
//! - [`capabilities`]: registry of atomic capability shapes
//! - [`composition`]: builds contracts from capabilities and binds
//!   implementations to them
//! - [`validation`]: checks that an entity implements exactly its contract,
//!   with no faked operations
//!
//! [`katas`] holds six before/after refactorings expressed both as Rust traits
//! and as validated entities.
//!
//! ```rust
//! use segregate::capabilities::{Capability, CapabilityRegistry, OperationSignature};
//! use segregate::composition::{Composer, Implementation};
//! use segregate::validation::validate_entity;
//! use serde_json::Value;
//!
//! let mut registry = CapabilityRegistry::new();
//! registry.register(Capability::new("Flyable").operation(OperationSignature::new("fly"))).unwrap();
//! registry.register(Capability::new("Runnable").operation(OperationSignature::new("run"))).unwrap();
//!
//! let bird = Composer::new(&registry)
//!     .build(
//!         "Bird",
//!         ["Flyable", "Runnable"],
//!         Implementation::new()
//!             .operation("fly", |_| Ok(Value::Null))
//!             .operation("run", |_| Ok(Value::Null)),
//!     )
//!     .unwrap();
//!
//! assert!(validate_entity(&bird).is_empty());
//! ```

pub mod capabilities;
pub mod cli;
pub mod composition;
pub mod errors;
pub mod katas;
pub mod validation;

pub use capabilities::{Capability, CapabilityRegistry, OperationSignature, ValueType};
pub use composition::{bind, Composer, CompositeContract, Entity, Implementation};
pub use errors::{CompositionError, InvocationError};
pub use validation::{validate, validate_entity, Finding, ValidationPolicy, ViolationReport};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
