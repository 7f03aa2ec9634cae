//! Entity Composer: builds contracts from capability names and binds
//! implementations to them.
//!
//! Composition and binding are all-or-nothing: a failed call returns an error
//! and produces no contract or entity. Binding only checks completeness;
//! extra operations are left for the validator to report.

use super::contract::CompositeContract;
use super::entity::{Entity, Implementation};
use crate::capabilities::{CapabilityRegistry, CapabilitySource};
use crate::errors::{CompositionError, CompositionResult};

/// Composes contracts against a capability source.
pub struct Composer<'r, S: ?Sized = CapabilityRegistry> {
    source: &'r S,
}

impl<'r, S: CapabilitySource + ?Sized> Composer<'r, S> {
    pub fn new(source: &'r S) -> Self {
        Self { source }
    }

    /// Build a contract from capability names.
    ///
    /// Names keep their first-occurrence order; repeats are collapsed.
    pub fn compose<I, N>(&self, names: I) -> CompositionResult<CompositeContract>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let capabilities = names
            .into_iter()
            .map(|name| self.source.lookup(name.as_ref()))
            .collect::<CompositionResult<Vec<_>>>()?;

        let contract = CompositeContract::from_capabilities(capabilities)?;
        log::debug!(
            "Composed contract [{}] with operations {{{}}}",
            contract,
            contract.operation_names().join(", ")
        );
        Ok(contract)
    }

    /// Bind an implementation to a contract. See [`bind`].
    pub fn bind(
        &self,
        name: impl Into<String>,
        contract: CompositeContract,
        implementation: Implementation,
    ) -> CompositionResult<Entity> {
        bind(name, contract, implementation)
    }

    /// Compose and bind in one step.
    pub fn build<I, N>(
        &self,
        name: impl Into<String>,
        capabilities: I,
        implementation: Implementation,
    ) -> CompositionResult<Entity>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let contract = self.compose(capabilities)?;
        bind(name, contract, implementation)
    }
}

/// Bind an implementation to a contract, producing an [`Entity`].
///
/// Fails with `IncompleteImplementation` naming every declared operation that
/// has no implementation, in contract order.
pub fn bind(
    name: impl Into<String>,
    contract: CompositeContract,
    implementation: Implementation,
) -> CompositionResult<Entity> {
    let name = name.into();
    let missing: Vec<String> = contract
        .operation_names()
        .into_iter()
        .filter(|op| !implementation.contains(op))
        .map(String::from)
        .collect();

    if !missing.is_empty() {
        return Err(CompositionError::IncompleteImplementation {
            entity: name,
            missing,
        });
    }

    log::debug!("Bound entity '{}' to [{}]", name, contract);
    Ok(Entity::unchecked(name, contract, implementation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{Capability, OperationSignature, SharedRegistry, ValueType};
    use serde_json::Value;

    fn registry() -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        registry
            .register(Capability::new("Flyable").operation(OperationSignature::new("fly")))
            .unwrap();
        registry
            .register(Capability::new("Runnable").operation(OperationSignature::new("run")))
            .unwrap();
        registry
            .register(
                Capability::new("Drivable")
                    .operation(OperationSignature::new("fly").param(ValueType::Number)),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_compose_orders_by_first_occurrence() {
        let registry = registry();
        let composer = Composer::new(&registry);

        let contract = composer
            .compose(["Runnable", "Flyable", "Runnable"])
            .unwrap();
        assert_eq!(contract.capability_names(), vec!["Runnable", "Flyable"]);
        assert_eq!(contract.operation_names(), vec!["run", "fly"]);
    }

    #[test]
    fn test_compose_unknown_fails() {
        let registry = registry();
        let composer = Composer::new(&registry);

        assert!(matches!(
            composer.compose(["Flyable", "Swimmable"]),
            Err(CompositionError::UnknownCapability { name }) if name == "Swimmable"
        ));
    }

    #[test]
    fn test_compose_conflict_fails() {
        let registry = registry();
        let composer = Composer::new(&registry);

        assert!(matches!(
            composer.compose(["Flyable", "Drivable"]),
            Err(CompositionError::CapabilityConflict { .. })
        ));
    }

    #[test]
    fn test_bind_reports_every_missing_operation() {
        let registry = registry();
        let composer = Composer::new(&registry);
        let contract = composer.compose(["Flyable", "Runnable"]).unwrap();

        match composer.bind("Stone", contract, Implementation::new()) {
            Err(CompositionError::IncompleteImplementation { entity, missing }) => {
                assert_eq!(entity, "Stone");
                assert_eq!(missing, vec!["fly", "run"]);
            }
            other => panic!("expected incomplete implementation, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_allows_extra_operations() {
        let registry = registry();
        let composer = Composer::new(&registry);

        let entity = composer
            .build(
                "Duck",
                ["Flyable"],
                Implementation::new()
                    .operation("fly", |_| Ok(Value::Null))
                    .operation("swim", |_| Ok(Value::Null)),
            )
            .unwrap();
        assert_eq!(entity.operations().collect::<Vec<_>>(), vec!["fly", "swim"]);
    }

    #[test]
    fn test_compose_against_shared_registry() {
        let shared = SharedRegistry::from_registry(registry());
        let composer = Composer::new(&shared);

        let contract = composer.compose(vec!["Flyable".to_string()]).unwrap();
        assert!(contract.declares("fly"));
    }
}
