//! Error types for capability registration, composition and invocation.

use thiserror::Error;

/// Fatal errors raised by the registry, composer and policy enforcement.
///
/// Every variant is raised at the offending call and leaves no partial state
/// behind.
#[derive(Debug, Error)]
pub enum CompositionError {
    /// A different shape is already registered under this name.
    #[error("Capability '{name}' is already registered with a different operation set")]
    DuplicateCapability { name: String },

    /// The name was never registered.
    #[error("Unknown capability: {name}")]
    UnknownCapability { name: String },

    /// Two capabilities in one composition disagree on an operation's signature.
    #[error("Capabilities '{first}' and '{second}' both define '{operation}' with different signatures ({first_signature} vs {second_signature})")]
    CapabilityConflict {
        operation: String,
        first: String,
        first_signature: String,
        second: String,
        second_signature: String,
    },

    /// A declared operation has no implementation.
    #[error("Entity '{entity}' is missing declared operations: {}", missing.join(", "))]
    IncompleteImplementation { entity: String, missing: Vec<String> },

    /// The capability itself is malformed.
    #[error("Invalid capability '{name}': {reason}")]
    InvalidCapability { name: String, reason: String },

    /// A policy promoted report warnings to errors.
    #[error("Entity '{entity}' violates interface segregation: {}", findings.join("; "))]
    StrictViolation { entity: String, findings: Vec<String> },

    /// YAML parsing failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned when calling an operation on an entity.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The entity has no operation with this name.
    #[error("Entity '{entity}' does not implement '{operation}'")]
    NotImplemented { entity: String, operation: String },

    /// The operation exists only as an always-fails stub.
    #[error("Unsupported operation '{operation}': {reason}")]
    Unsupported { operation: String, reason: String },

    /// Argument count does not match the declared signature.
    #[error("Operation '{operation}' expects {expected} arguments, got {actual}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// The operation ran and failed.
    #[error("Operation '{operation}' failed: {message}")]
    Failed { operation: String, message: String },
}

/// Result alias for composition operations.
pub type CompositionResult<T> = Result<T, CompositionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offenders() {
        let err = CompositionError::IncompleteImplementation {
            entity: "Bird".to_string(),
            missing: vec!["run".to_string(), "swim".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Entity 'Bird' is missing declared operations: run, swim"
        );

        let err = CompositionError::CapabilityConflict {
            operation: "move".to_string(),
            first: "Flyable".to_string(),
            first_signature: "move(): void".to_string(),
            second: "Drivable".to_string(),
            second_signature: "move(number): void".to_string(),
        };
        assert!(err.to_string().contains("'Flyable' and 'Drivable'"));
    }
}
