//! Capability definition: the atomic unit of behavior an entity can claim.
//!
//! A capability is a named set of operation signatures. Capabilities are
//! registered once in a [`super::CapabilityRegistry`] and never mutated; entity
//! contracts are composed from them by the composer.
//!
//! Capabilities can be declared in code or loaded from YAML:
//!
//! ```yaml
//! capability:
//!   name: "WiFiConnectable"
//!   description: "Join a wireless network"
//!   operations:
//!     - name: "connect_to_wifi"
//!       params: [text, text]
//!       returns: void
//! ```
//!
//! Types other than `void`, `number`, `text` and `boolean` are written with
//! the `!custom` tag, e.g. `params: [!custom Money]`. The map form
//! `{custom: Money}` is rejected.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CompositionError;

/// A capability: the unit of segregated behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Unique name within a registry (e.g. "Flyable")
    pub name: String,

    /// Human-readable description of the behavior
    #[serde(default)]
    pub description: String,

    /// Operations provided by this capability, in declaration order
    pub operations: Vec<OperationSignature>,
}

/// Signature of a single operation: name, ordered parameter types, return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationSignature {
    pub name: String,

    #[serde(default)]
    pub params: Vec<ValueType>,

    #[serde(default)]
    pub returns: ValueType,
}

/// Types that can appear in an operation signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// No value
    #[default]
    Void,
    /// Floating point number
    Number,
    /// UTF-8 string
    Text,
    /// Boolean
    Boolean,
    /// Any other named type
    Custom(String),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Number => write!(f, "number"),
            Self::Text => write!(f, "text"),
            Self::Boolean => write!(f, "boolean"),
            Self::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl OperationSignature {
    /// Create a signature with no parameters returning `void`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: ValueType::Void,
        }
    }

    /// Append a parameter type.
    pub fn param(mut self, ty: ValueType) -> Self {
        self.params.push(ty);
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: ValueType) -> Self {
        self.returns = ty;
        self
    }
}

impl fmt::Display for OperationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        write!(f, "{}({}): {}", self.name, params.join(", "), self.returns)
    }
}

impl Capability {
    /// Create a capability with no operations yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            operations: Vec::new(),
        }
    }

    /// Set the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an operation signature.
    pub fn operation(mut self, signature: OperationSignature) -> Self {
        self.operations.push(signature);
        self
    }

    /// Parse a capability from a YAML string nested under `capability:`.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let wrapper: CapabilityWrapper = serde_yaml::from_str(yaml)?;
        Ok(wrapper.capability)
    }

    /// Look up one of this capability's operations by name.
    pub fn signature(&self, operation: &str) -> Option<&OperationSignature> {
        self.operations.iter().find(|op| op.name == operation)
    }

    /// All operation names, in declaration order.
    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name.as_str()).collect()
    }

    /// Whether `other` declares the same operation set, ignoring order.
    ///
    /// Description is not part of the shape.
    pub fn same_shape(&self, other: &Capability) -> bool {
        if self.operations.len() != other.operations.len() {
            return false;
        }
        let ours: HashSet<&OperationSignature> = self.operations.iter().collect();
        other.operations.iter().all(|op| ours.contains(op))
    }

    /// Check the structural rules every registered capability must satisfy.
    pub fn check(&self) -> Result<(), CompositionError> {
        if self.name.trim().is_empty() {
            return Err(CompositionError::InvalidCapability {
                name: self.name.clone(),
                reason: "capability name is empty".to_string(),
            });
        }
        if self.operations.is_empty() {
            return Err(CompositionError::InvalidCapability {
                name: self.name.clone(),
                reason: "capability declares no operations".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for op in &self.operations {
            if op.name.trim().is_empty() {
                return Err(CompositionError::InvalidCapability {
                    name: self.name.clone(),
                    reason: "operation name is empty".to_string(),
                });
            }
            if !seen.insert(op.name.as_str()) {
                return Err(CompositionError::InvalidCapability {
                    name: self.name.clone(),
                    reason: format!("operation '{}' declared twice", op.name),
                });
            }
        }
        Ok(())
    }
}

/// Wrapper for YAML deserialization (capability is nested under `capability:` key)
#[derive(Debug, Deserialize)]
struct CapabilityWrapper {
    capability: Capability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capability_yaml() {
        let yaml = r#"
capability:
  name: "WiFiConnectable"
  description: "Join a wireless network"
  operations:
    - name: "connect_to_wifi"
      params: [text, text]
      returns: void
"#;

        let cap = Capability::from_yaml(yaml).unwrap();
        assert_eq!(cap.name, "WiFiConnectable");
        assert_eq!(cap.operations.len(), 1);
        let op = cap.signature("connect_to_wifi").unwrap();
        assert_eq!(op.params, vec![ValueType::Text, ValueType::Text]);
        assert_eq!(op.returns, ValueType::Void);
        assert!(cap.check().is_ok());
    }

    #[test]
    fn test_defaults_and_custom_types() {
        let yaml = r#"
capability:
  name: "Ledger"
  operations:
    - name: "close"
    - name: "balance"
      returns: number
"#;

        let cap = Capability::from_yaml(yaml).unwrap();
        assert_eq!(cap.description, "");
        assert_eq!(cap.signature("close").unwrap(), &OperationSignature::new("close"));
        assert_eq!(cap.signature("balance").unwrap().returns, ValueType::Number);

        let entry = OperationSignature::new("entry")
            .param(ValueType::Custom("Money".to_string()))
            .returns(ValueType::Boolean);
        assert_eq!(entry.to_string(), "entry(Money): boolean");
    }

    #[test]
    fn test_custom_types_use_yaml_tags() {
        let yaml = r#"
capability:
  name: "Ledger"
  operations:
    - name: "transfer"
      params: [!custom Money, text]
      returns: !custom Receipt
"#;

        let cap = Capability::from_yaml(yaml).unwrap();
        let op = cap.signature("transfer").unwrap();
        assert_eq!(
            op.params,
            vec![ValueType::Custom("Money".to_string()), ValueType::Text]
        );
        assert_eq!(op.returns, ValueType::Custom("Receipt".to_string()));

        let map_form = r#"
capability:
  name: "Ledger"
  operations:
    - name: "transfer"
      params: [{custom: Money}]
"#;
        assert!(Capability::from_yaml(map_form).is_err());
    }

    #[test]
    fn test_same_shape_ignores_order_and_description() {
        let a = Capability::new("Power")
            .operation(OperationSignature::new("turn_on"))
            .operation(OperationSignature::new("turn_off"));
        let b = Capability::new("Power")
            .describe("switches")
            .operation(OperationSignature::new("turn_off"))
            .operation(OperationSignature::new("turn_on"));
        let c = Capability::new("Power").operation(OperationSignature::new("turn_on"));

        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }

    #[test]
    fn test_check_rejects_malformed_capabilities() {
        let empty = Capability::new("Nothing");
        assert!(matches!(
            empty.check(),
            Err(CompositionError::InvalidCapability { .. })
        ));

        let doubled = Capability::new("Twice")
            .operation(OperationSignature::new("go"))
            .operation(OperationSignature::new("go").param(ValueType::Number));
        assert!(matches!(
            doubled.check(),
            Err(CompositionError::InvalidCapability { .. })
        ));

        let unnamed = Capability::new(" ").operation(OperationSignature::new("go"));
        assert!(unnamed.check().is_err());
    }
}
