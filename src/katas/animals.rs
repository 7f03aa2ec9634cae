//! Kata 1: monolithic interface.
//!
//! `Animal` forces every animal to fly, swim and run. A bird cannot swim, so
//! `LegacyBird` has to fake it. Splitting into `Flyable`, `Swimmable` and
//! `Runnable` lets `Bird` take only what it does.

use serde_json::Value;

use super::{unit, Kata, KataEntity, Unsupported};
use crate::capabilities::{Capability, CapabilitySource, OperationSignature};
use crate::composition::{Composer, Implementation};
use crate::errors::CompositionResult;

const BIRD_CANNOT_SWIM: &str = "a bird cannot swim";

pub trait Animal {
    fn fly(&self) -> Result<(), Unsupported>;
    fn swim(&self) -> Result<(), Unsupported>;
    fn run(&self) -> Result<(), Unsupported>;
}

pub trait Flyable {
    fn fly(&self);
}

pub trait Swimmable {
    fn swim(&self);
}

pub trait Runnable {
    fn run(&self);
}

/// A bird forced into the monolithic contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBird;

impl Animal for LegacyBird {
    fn fly(&self) -> Result<(), Unsupported> {
        log::info!("The bird flies");
        Ok(())
    }

    fn swim(&self) -> Result<(), Unsupported> {
        Err(Unsupported(BIRD_CANNOT_SWIM))
    }

    fn run(&self) -> Result<(), Unsupported> {
        log::info!("The bird runs");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Bird;

impl Flyable for Bird {
    fn fly(&self) {
        log::info!("The bird flies");
    }
}

impl Runnable for Bird {
    fn run(&self) {
        log::info!("The bird runs");
    }
}

pub fn flyable() -> Capability {
    Capability::new("Flyable")
        .describe("Move through the air")
        .operation(OperationSignature::new("fly"))
}

pub fn swimmable() -> Capability {
    Capability::new("Swimmable")
        .describe("Move through water")
        .operation(OperationSignature::new("swim"))
}

pub fn runnable() -> Capability {
    Capability::new("Runnable")
        .describe("Move on foot")
        .operation(OperationSignature::new("run"))
}

/// Monolithic and segregated capabilities for this kata.
pub fn capabilities() -> Vec<Capability> {
    vec![
        Capability::new("Animal")
            .describe("Everything an animal might do")
            .operation(OperationSignature::new("fly"))
            .operation(OperationSignature::new("swim"))
            .operation(OperationSignature::new("run")),
        flyable(),
        swimmable(),
        runnable(),
    ]
}

pub fn entities<S>(composer: &Composer<'_, S>) -> CompositionResult<Vec<KataEntity>>
where
    S: CapabilitySource + ?Sized,
{
    let legacy = composer.build(
        "LegacyBird",
        ["Animal"],
        Implementation::new()
            .operation("fly", |_| unit(Animal::fly(&LegacyBird)))
            .unsupported("swim", BIRD_CANNOT_SWIM)
            .operation("run", |_| unit(Animal::run(&LegacyBird))),
    )?;

    let bird = composer.build(
        "Bird",
        ["Flyable", "Runnable"],
        Implementation::new()
            .operation("fly", |_| {
                Flyable::fly(&Bird);
                Ok(Value::Null)
            })
            .operation("run", |_| {
                Runnable::run(&Bird);
                Ok(Value::Null)
            }),
    )?;

    Ok(vec![
        KataEntity::before(Kata::Animals, legacy),
        KataEntity::after(Kata::Animals, bird),
    ])
}
