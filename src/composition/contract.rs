//! CompositeContract: the union of capabilities an entity type declares.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::capabilities::{Capability, OperationSignature};
use crate::errors::{CompositionError, CompositionResult};

/// An operation in a contract, with the capabilities that declare it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractOperation {
    pub signature: OperationSignature,

    /// Capability names declaring this operation, in contract order.
    /// More than one entry means several capabilities agree on the signature.
    pub provided_by: Vec<String>,
}

/// Ordered, duplicate-free set of capabilities and the union of their operations.
///
/// Contracts are immutable once built. Build them with
/// [`super::Composer::compose`] or [`CompositeContract::from_capabilities`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeContract {
    capabilities: Vec<Arc<Capability>>,
    operations: IndexMap<String, ContractOperation>,
}

impl CompositeContract {
    /// Build a contract from resolved capabilities.
    ///
    /// The first occurrence of a capability fixes its position; later repeats
    /// are dropped. Fails if two capabilities declare the same operation name
    /// with different signatures.
    pub fn from_capabilities<I>(capabilities: I) -> CompositionResult<Self>
    where
        I: IntoIterator<Item = Arc<Capability>>,
    {
        let mut selected: Vec<Arc<Capability>> = Vec::new();
        let mut operations: IndexMap<String, ContractOperation> = IndexMap::new();

        for capability in capabilities {
            if selected.iter().any(|c| c.name == capability.name) {
                continue;
            }

            for op in &capability.operations {
                match operations.get_mut(&op.name) {
                    Some(existing) if existing.signature != *op => {
                        return Err(CompositionError::CapabilityConflict {
                            operation: op.name.clone(),
                            first: existing.provided_by[0].clone(),
                            first_signature: existing.signature.to_string(),
                            second: capability.name.clone(),
                            second_signature: op.to_string(),
                        });
                    }
                    Some(existing) => existing.provided_by.push(capability.name.clone()),
                    None => {
                        operations.insert(
                            op.name.clone(),
                            ContractOperation {
                                signature: op.clone(),
                                provided_by: vec![capability.name.clone()],
                            },
                        );
                    }
                }
            }

            selected.push(capability);
        }

        Ok(Self {
            capabilities: selected,
            operations,
        })
    }

    /// Capabilities in contract order.
    pub fn capabilities(&self) -> &[Arc<Capability>] {
        &self.capabilities
    }

    /// Capability names in contract order.
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities.iter().map(|c| c.name.as_str()).collect()
    }

    /// All operations, first-declared first.
    pub fn operations(&self) -> impl Iterator<Item = &ContractOperation> + Clone {
        self.operations.values()
    }

    /// All operation names, first-declared first.
    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.keys().map(String::as_str).collect()
    }

    /// Whether an operation with this name belongs to the contract.
    pub fn declares(&self, operation: &str) -> bool {
        self.operations.contains_key(operation)
    }

    /// Signature of a declared operation.
    pub fn signature(&self, operation: &str) -> Option<&OperationSignature> {
        self.operations.get(operation).map(|op| &op.signature)
    }

    /// Number of distinct operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl std::fmt::Display for CompositeContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.capability_names().join(" + "))
    }
}
