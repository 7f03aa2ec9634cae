//! Kata 3: unsupported operations.
//!
//! Every `Vehicle` must drive, fly and sail, so each legacy vehicle fails two
//! of the three. After the split a car is `Drivable`, a plane reuses the
//! animals kata's `Flyable`, and a boat is `Sailable`.

use serde_json::Value;

use super::animals::{self, Flyable};
use super::{unit, Kata, KataEntity, Unsupported};
use crate::capabilities::{Capability, CapabilitySource, OperationSignature};
use crate::composition::{Composer, Implementation};
use crate::errors::CompositionResult;

const CAR_CANNOT_FLY: &str = "a car cannot fly";
const CAR_CANNOT_SAIL: &str = "a car cannot sail";
const PLANE_CANNOT_DRIVE: &str = "a plane cannot drive like a car";
const PLANE_CANNOT_SAIL: &str = "a plane cannot sail";
const BOAT_CANNOT_DRIVE: &str = "a boat cannot drive";
const BOAT_CANNOT_FLY: &str = "a boat cannot fly";

pub trait Vehicle {
    fn drive(&self) -> Result<(), Unsupported>;
    fn fly(&self) -> Result<(), Unsupported>;
    fn sail(&self) -> Result<(), Unsupported>;
}

pub trait Drivable {
    fn drive(&self);
}

pub trait Sailable {
    fn sail(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCar;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyPlane;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBoat;

impl Vehicle for LegacyCar {
    fn drive(&self) -> Result<(), Unsupported> {
        log::info!("The car is driving");
        Ok(())
    }

    fn fly(&self) -> Result<(), Unsupported> {
        Err(Unsupported(CAR_CANNOT_FLY))
    }

    fn sail(&self) -> Result<(), Unsupported> {
        Err(Unsupported(CAR_CANNOT_SAIL))
    }
}

impl Vehicle for LegacyPlane {
    fn drive(&self) -> Result<(), Unsupported> {
        Err(Unsupported(PLANE_CANNOT_DRIVE))
    }

    fn fly(&self) -> Result<(), Unsupported> {
        log::info!("The plane is flying");
        Ok(())
    }

    fn sail(&self) -> Result<(), Unsupported> {
        Err(Unsupported(PLANE_CANNOT_SAIL))
    }
}

impl Vehicle for LegacyBoat {
    fn drive(&self) -> Result<(), Unsupported> {
        Err(Unsupported(BOAT_CANNOT_DRIVE))
    }

    fn fly(&self) -> Result<(), Unsupported> {
        Err(Unsupported(BOAT_CANNOT_FLY))
    }

    fn sail(&self) -> Result<(), Unsupported> {
        log::info!("The boat is sailing");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Car;

#[derive(Debug, Clone, Copy, Default)]
pub struct Plane;

#[derive(Debug, Clone, Copy, Default)]
pub struct Boat;

impl Drivable for Car {
    fn drive(&self) {
        log::info!("The car is driving");
    }
}

impl Flyable for Plane {
    fn fly(&self) {
        log::info!("The plane is flying");
    }
}

impl Sailable for Boat {
    fn sail(&self) {
        log::info!("The boat is sailing");
    }
}

/// Includes `Flyable`; registering it twice is a no-op.
pub fn capabilities() -> Vec<Capability> {
    vec![
        Capability::new("Vehicle")
            .describe("Drive, fly and sail in one contract")
            .operation(OperationSignature::new("drive"))
            .operation(OperationSignature::new("fly"))
            .operation(OperationSignature::new("sail")),
        Capability::new("Drivable").operation(OperationSignature::new("drive")),
        animals::flyable(),
        Capability::new("Sailable").operation(OperationSignature::new("sail")),
    ]
}

pub fn entities<S>(composer: &Composer<'_, S>) -> CompositionResult<Vec<KataEntity>>
where
    S: CapabilitySource + ?Sized,
{
    let legacy_car = composer.build(
        "LegacyCar",
        ["Vehicle"],
        Implementation::new()
            .operation("drive", |_| unit(LegacyCar.drive()))
            .unsupported("fly", CAR_CANNOT_FLY)
            .unsupported("sail", CAR_CANNOT_SAIL),
    )?;
    let legacy_plane = composer.build(
        "LegacyPlane",
        ["Vehicle"],
        Implementation::new()
            .unsupported("drive", PLANE_CANNOT_DRIVE)
            .operation("fly", |_| unit(LegacyPlane.fly()))
            .unsupported("sail", PLANE_CANNOT_SAIL),
    )?;
    let legacy_boat = composer.build(
        "LegacyBoat",
        ["Vehicle"],
        Implementation::new()
            .unsupported("drive", BOAT_CANNOT_DRIVE)
            .unsupported("fly", BOAT_CANNOT_FLY)
            .operation("sail", |_| unit(LegacyBoat.sail())),
    )?;

    let car = composer.build(
        "Car",
        ["Drivable"],
        Implementation::new().operation("drive", |_| {
            Car.drive();
            Ok(Value::Null)
        }),
    )?;
    let plane = composer.build(
        "Plane",
        ["Flyable"],
        Implementation::new().operation("fly", |_| {
            Plane.fly();
            Ok(Value::Null)
        }),
    )?;
    let boat = composer.build(
        "Boat",
        ["Sailable"],
        Implementation::new().operation("sail", |_| {
            Boat.sail();
            Ok(Value::Null)
        }),
    )?;

    Ok(vec![
        KataEntity::before(Kata::Vehicles, legacy_car),
        KataEntity::before(Kata::Vehicles, legacy_plane),
        KataEntity::before(Kata::Vehicles, legacy_boat),
        KataEntity::after(Kata::Vehicles, car),
        KataEntity::after(Kata::Vehicles, plane),
        KataEntity::after(Kata::Vehicles, boat),
    ])
}
