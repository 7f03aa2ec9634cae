//! Entities: concrete implementations bound to a contract.
//!
//! An [`Implementation`] maps operation names to callables. Operations that
//! can only ever fail are registered with [`Implementation::unsupported`] so
//! the validator can see them without calling anything.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::contract::CompositeContract;
use crate::errors::InvocationError;

/// Callable behind an implemented operation.
pub type OperationFn = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// How an operation is implemented.
#[derive(Clone)]
pub enum OperationImpl {
    /// Real behavior.
    Callable(OperationFn),
    /// Present only to satisfy a contract; every call fails.
    Unsupported { reason: String },
}

impl OperationImpl {
    /// Whether this operation can never succeed.
    pub fn is_always_failing(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

impl fmt::Debug for OperationImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable"),
            Self::Unsupported { reason } => f
                .debug_struct("Unsupported")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Operation name → implementation, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Implementation {
    operations: IndexMap<String, OperationImpl>,
}

impl Implementation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a real operation.
    pub fn operation<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.insert(name, OperationImpl::Callable(Arc::new(f)));
        self
    }

    /// Add an always-fails stub.
    pub fn unsupported(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.insert(
            name,
            OperationImpl::Unsupported {
                reason: reason.into(),
            },
        );
        self
    }

    /// Insert or replace an operation.
    pub fn insert(&mut self, name: impl Into<String>, operation: OperationImpl) {
        self.operations.insert(name.into(), operation);
    }

    pub fn get(&self, name: &str) -> Option<&OperationImpl> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Operation names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone {
        self.operations.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OperationImpl)> {
        self.operations.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// A named implementation claiming one [`CompositeContract`].
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    contract: CompositeContract,
    implementation: Implementation,
}

impl Entity {
    /// Pair an implementation with a contract without any checks.
    ///
    /// Use [`super::bind`] for checked construction; entities built here are
    /// expected to go through the validator.
    pub fn unchecked(
        name: impl Into<String>,
        contract: CompositeContract,
        implementation: Implementation,
    ) -> Self {
        Self {
            name: name.into(),
            contract,
            implementation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The contract this entity claims.
    pub fn contract(&self) -> &CompositeContract {
        &self.contract
    }

    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    /// Implemented operation names, in insertion order.
    pub fn operations(&self) -> impl Iterator<Item = &str> + Clone {
        self.implementation.names()
    }

    /// Call an operation.
    ///
    /// Argument count is checked against the contract when the operation is
    /// declared there.
    pub fn invoke(&self, operation: &str, args: &[Value]) -> Result<Value, InvocationError> {
        let imp = self
            .implementation
            .get(operation)
            .ok_or_else(|| InvocationError::NotImplemented {
                entity: self.name.clone(),
                operation: operation.to_string(),
            })?;

        if let Some(signature) = self.contract.signature(operation) {
            if signature.params.len() != args.len() {
                return Err(InvocationError::ArityMismatch {
                    operation: operation.to_string(),
                    expected: signature.params.len(),
                    actual: args.len(),
                });
            }
        }

        match imp {
            OperationImpl::Callable(f) => f(args).map_err(|message| InvocationError::Failed {
                operation: operation.to_string(),
                message,
            }),
            OperationImpl::Unsupported { reason } => Err(InvocationError::Unsupported {
                operation: operation.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{Capability, OperationSignature, ValueType};
    use serde_json::json;

    fn printer_contract() -> CompositeContract {
        CompositeContract::from_capabilities(vec![Arc::new(
            Capability::new("Printable")
                .operation(OperationSignature::new("print").param(ValueType::Text)),
        )])
        .unwrap()
    }

    #[test]
    fn test_invoke_callable() {
        let imp = Implementation::new().operation("print", |args| {
            let doc = args[0].as_str().ok_or("document must be text")?;
            Ok(json!(format!("printed {}", doc)))
        });
        let entity = Entity::unchecked("BasicPrinter", printer_contract(), imp);

        assert_eq!(
            entity.invoke("print", &[json!("report")]).unwrap(),
            json!("printed report")
        );
        assert!(matches!(
            entity.invoke("print", &[json!(3)]),
            Err(InvocationError::Failed { .. })
        ));
    }

    #[test]
    fn test_invoke_errors() {
        let imp = Implementation::new()
            .operation("print", |_| Ok(Value::Null))
            .unsupported("scan", "this printer cannot scan");
        let entity = Entity::unchecked("BasicPrinter", printer_contract(), imp);

        assert!(matches!(
            entity.invoke("fax", &[]),
            Err(InvocationError::NotImplemented { .. })
        ));
        assert!(matches!(
            entity.invoke("print", &[]),
            Err(InvocationError::ArityMismatch { expected: 1, actual: 0, .. })
        ));
        match entity.invoke("scan", &[json!("doc")]) {
            Err(InvocationError::Unsupported { operation, reason }) => {
                assert_eq!(operation, "scan");
                assert_eq!(reason, "this printer cannot scan");
            }
            other => panic!("expected unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_operations_keep_insertion_order() {
        let imp = Implementation::new()
            .unsupported("swim", "no")
            .operation("fly", |_| Ok(Value::Null))
            .operation("run", |_| Ok(Value::Null));

        assert_eq!(imp.names().collect::<Vec<_>>(), vec!["swim", "fly", "run"]);
        assert!(imp.get("swim").unwrap().is_always_failing());
        assert!(!imp.get("fly").unwrap().is_always_failing());
    }
}
