//! Catalog of every kata capability and entity.

use serde::Serialize;

use super::{animals, devices, payments, printers, sensors, vehicles, Kata, KataEntity, Stage};
use crate::capabilities::{Capability, CapabilityRegistry, CapabilitySource, Registration};
use crate::composition::Composer;
use crate::errors::CompositionResult;
use crate::validation::{validate_entity, ViolationReport};

/// Validation result for one kata entity.
#[derive(Debug, Clone, Serialize)]
pub struct KataReport {
    pub kata: Kata,
    pub stage: Stage,
    #[serde(flatten)]
    pub report: ViolationReport,
}

/// Every kata capability, monolithic and segregated, kata by kata.
///
/// `Flyable` appears twice; both copies have the same shape.
pub fn capabilities() -> Vec<Capability> {
    let mut all = animals::capabilities();
    all.extend(printers::capabilities());
    all.extend(vehicles::capabilities());
    all.extend(sensors::capabilities());
    all.extend(devices::capabilities());
    all.extend(payments::capabilities());
    all
}

/// Register every kata capability. Returns how many were new.
pub fn register_all(registry: &mut CapabilityRegistry) -> CompositionResult<usize> {
    let mut added = 0;
    for capability in capabilities() {
        if registry.register(capability)? == Registration::Added {
            added += 1;
        }
    }
    Ok(added)
}

/// A fresh registry holding every kata capability.
pub fn registry() -> CompositionResult<CapabilityRegistry> {
    let mut registry = CapabilityRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}

/// Compose and bind every kata entity against `source`.
pub fn entities<S>(source: &S) -> CompositionResult<Vec<KataEntity>>
where
    S: CapabilitySource + ?Sized,
{
    let composer = Composer::new(source);
    let mut all = animals::entities(&composer)?;
    all.extend(printers::entities(&composer)?);
    all.extend(vehicles::entities(&composer)?);
    all.extend(sensors::entities(&composer)?);
    all.extend(devices::entities(&composer)?);
    all.extend(payments::entities(&composer)?);
    Ok(all)
}

/// Validate every kata entity against the contract it claims.
pub fn validate_all<S>(source: &S) -> CompositionResult<Vec<KataReport>>
where
    S: CapabilitySource + ?Sized,
{
    Ok(entities(source)?
        .into_iter()
        .map(|k| KataReport {
            kata: k.kata,
            stage: k.stage,
            report: validate_entity(&k.entity),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_holds_every_capability_once() {
        let registry = registry().unwrap();
        // 6 monolithic + 18 segregated, Flyable shared by two katas
        assert_eq!(registry.len(), 6 + 18 - 1);
        assert_eq!(capabilities().len(), 24);
        assert_eq!(registry.all().next().unwrap().name, "Animal");
    }

    #[test]
    fn test_register_all_is_idempotent() {
        let mut registry = registry().unwrap();
        assert_eq!(register_all(&mut registry).unwrap(), 0);
    }

    #[test]
    fn test_entities_cover_every_kata() {
        let registry = registry().unwrap();
        let entities = entities(&registry).unwrap();

        for kata in Kata::ALL {
            assert!(entities
                .iter()
                .any(|k| k.kata == kata && k.stage == Stage::Before));
            assert!(entities
                .iter()
                .any(|k| k.kata == kata && k.stage == Stage::After));
        }
    }

    #[test]
    fn test_entities_need_registered_capabilities() {
        let empty = CapabilityRegistry::new();
        assert!(entities(&empty).is_err());
    }
}
