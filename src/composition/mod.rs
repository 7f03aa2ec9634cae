//! # Entity Composer
//!
//! Builds a [`CompositeContract`] from registered capability names and binds
//! a concrete [`Implementation`] to it, producing an [`Entity`].
//!
//! ```text
//! CapabilityRegistry
//!   │ lookup() for each name
//!   ▼
//! Composer::compose(["Flyable", "Runnable"])
//!   │ conflict check, first-occurrence order
//!   ▼
//! CompositeContract { fly, run }
//!   │ bind(name, contract, implementation)
//!   ▼
//! Entity  ──► validation::validate()
//! ```

pub mod composer;
pub mod contract;
pub mod entity;

pub use composer::{bind, Composer};
pub use contract::{CompositeContract, ContractOperation};
pub use entity::{Entity, Implementation, OperationFn, OperationImpl};
