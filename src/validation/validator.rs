//! Composition Validator: detects ISP violations in an entity.
//!
//! Validation is a pure function of the entity and a contract; it never
//! calls an operation and never fails. Run it once per entity type.

use super::report::{Finding, ViolationReport};
use crate::composition::{CompositeContract, Entity, OperationImpl};

/// Check an entity against a contract.
///
/// Findings come out in a fixed order: missing operations in contract order,
/// then unadvertised and fake operations in implementation order.
pub fn validate(entity: &Entity, contract: &CompositeContract) -> ViolationReport {
    let implementation = entity.implementation();
    let mut findings = Vec::new();

    for declared in contract.operation_names() {
        if !implementation.contains(declared) {
            findings.push(Finding::MissingOperation {
                operation: declared.to_string(),
            });
        }
    }

    for (name, _) in implementation.iter() {
        if !contract.declares(name) {
            findings.push(Finding::UnadvertisedCapability {
                operation: name.to_string(),
            });
        }
    }

    for (name, imp) in implementation.iter() {
        if let OperationImpl::Unsupported { reason } = imp {
            findings.push(Finding::FakeImplementation {
                operation: name.to_string(),
                reason: reason.clone(),
            });
        }
    }

    ViolationReport {
        entity: entity.name().to_string(),
        contract: contract
            .capability_names()
            .into_iter()
            .map(String::from)
            .collect(),
        findings,
    }
}

/// Check an entity against the contract it claims.
pub fn validate_entity(entity: &Entity) -> ViolationReport {
    validate(entity, entity.contract())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{Capability, CapabilityRegistry, OperationSignature};
    use crate::composition::{Composer, Implementation};
    use serde_json::Value;

    fn registry() -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        for (name, op) in [("Flyable", "fly"), ("Runnable", "run"), ("Swimmable", "swim")] {
            registry
                .register(Capability::new(name).operation(OperationSignature::new(op)))
                .unwrap();
        }
        registry
    }

    fn noop() -> impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static {
        |_: &[Value]| -> Result<Value, String> { Ok(Value::Null) }
    }

    #[test]
    fn test_missing_is_detected_for_unchecked_entities() {
        let registry = registry();
        let contract = Composer::new(&registry)
            .compose(["Flyable", "Runnable", "Swimmable"])
            .unwrap();
        let entity = Entity::unchecked(
            "Penguin",
            contract,
            Implementation::new().operation("swim", noop()),
        );

        let report = validate_entity(&entity);
        assert_eq!(report.missing(), vec!["fly", "run"]);
        assert!(report.has_errors());
    }

    #[test]
    fn test_findings_are_ordered() {
        let registry = registry();
        let composer = Composer::new(&registry);
        let contract = composer.compose(["Flyable", "Runnable"]).unwrap();
        let entity = Entity::unchecked(
            "Odd",
            contract,
            Implementation::new()
                .operation("dig", noop())
                .unsupported("fly", "cannot fly")
                .operation("sing", noop()),
        );

        let report = validate_entity(&entity);
        let kinds: Vec<String> = report.findings.iter().map(ToString::to_string).collect();
        assert_eq!(
            kinds,
            vec![
                "missing operation 'run'",
                "unadvertised operation 'dig'",
                "unadvertised operation 'sing'",
                "fake implementation of 'fly' (cannot fly)",
            ]
        );
    }

    #[test]
    fn test_validate_against_other_contract() {
        let registry = registry();
        let composer = Composer::new(&registry);
        let entity = composer
            .build(
                "Bird",
                ["Flyable", "Runnable"],
                Implementation::new()
                    .operation("fly", noop())
                    .operation("run", noop()),
            )
            .unwrap();

        let narrower = composer.compose(["Flyable"]).unwrap();
        let report = validate(&entity, &narrower);
        assert_eq!(report.unadvertised(), vec!["run"]);
        assert_eq!(report.contract, vec!["Flyable"]);
        assert!(validate_entity(&entity).is_empty());
    }
}
