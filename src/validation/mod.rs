//! # Composition Validator
//!
//! Checks an [`Entity`](crate::composition::Entity) against a contract and
//! reports interface segregation problems:
//!
//! | Finding | Severity | Meaning |
//! |---------|----------|---------|
//! | `MissingOperation` | error | declared but not implemented |
//! | `UnadvertisedCapability` | warning | implemented but not declared |
//! | `FakeImplementation` | warning | implemented only as an always-fails stub |
//!
//! [`validate`] never fails; [`ViolationReport::enforce`] applies a
//! [`ValidationPolicy`] to decide what the caller treats as fatal.

pub mod policy;
pub mod report;
pub mod validator;

pub use policy::{ValidationPolicy, STRICT_ENV};
pub use report::{Finding, Severity, ViolationReport};
pub use validator::{validate, validate_entity};
