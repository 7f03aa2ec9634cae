//! # Interface segregation katas
//!
//! Six before/after pairs. Each kata has a monolithic trait whose "legacy"
//! implementors fill impossible operations with [`Unsupported`] errors, and a
//! set of narrow traits whose implementors only take on what they can do.
//!
//! Every type is also exposed as an [`Entity`] so the validator can show the
//! difference: legacy entities come back with `FakeImplementation` findings,
//! segregated ones come back clean.
//!
//! | Kata | Monolithic | Segregated |
//! |------|------------|------------|
//! | animals | `Animal` | `Flyable`, `Swimmable`, `Runnable` |
//! | printers | `LegacyPrinter` | `Printable`, `Scannable`, `Faxable` |
//! | vehicles | `Vehicle` | `Drivable`, `Flyable`, `Sailable` |
//! | sensors | `Sensor` | `TemperatureReadable`, `PressureReadable`, `HumidityReadable` |
//! | devices | `SmartDevice` | `PowerControllable`, `WiFiConnectable`, `MusicPlayable` |
//! | payments | `PaymentProcessor` | `CreditCardPayment`, `PayPalPayment`, `CryptoPayment` |

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::composition::Entity;

pub mod animals;
pub mod catalog;
pub mod devices;
pub mod payments;
pub mod printers;
pub mod sensors;
pub mod vehicles;

/// Error returned by a monolithic trait method the implementor cannot perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported operation: {0}")]
pub struct Unsupported(pub &'static str);

/// Which kata an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kata {
    Animals,
    Printers,
    Vehicles,
    Sensors,
    Devices,
    Payments,
}

impl Kata {
    pub const ALL: [Kata; 6] = [
        Kata::Animals,
        Kata::Printers,
        Kata::Vehicles,
        Kata::Sensors,
        Kata::Devices,
        Kata::Payments,
    ];

    /// Short description of the problem the kata addresses.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Animals => "Monolithic interface",
            Self::Printers => "Legacy system with unused methods",
            Self::Vehicles => "Unsupported operations",
            Self::Sensors => "Sensor management in a monitoring system",
            Self::Devices => "IoT device interface",
            Self::Payments => "E-commerce payment system",
        }
    }
}

impl fmt::Display for Kata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Animals => "animals",
            Self::Printers => "printers",
            Self::Vehicles => "vehicles",
            Self::Sensors => "sensors",
            Self::Devices => "devices",
            Self::Payments => "payments",
        };
        f.write_str(name)
    }
}

/// Before or after the refactoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Implements the monolithic contract.
    Before,
    /// Implements only the segregated capabilities it can honor.
    After,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// An entity tagged with its kata and stage.
#[derive(Debug, Clone)]
pub struct KataEntity {
    pub kata: Kata,
    pub stage: Stage,
    pub entity: Entity,
}

impl KataEntity {
    pub(crate) fn before(kata: Kata, entity: Entity) -> Self {
        Self {
            kata,
            stage: Stage::Before,
            entity,
        }
    }

    pub(crate) fn after(kata: Kata, entity: Entity) -> Self {
        Self {
            kata,
            stage: Stage::After,
            entity,
        }
    }
}

fn text_arg(args: &[Value], index: usize) -> Result<&str, String> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("argument {} must be text", index))
}

fn number_arg(args: &[Value], index: usize) -> Result<f64, String> {
    args.get(index)
        .and_then(Value::as_f64)
        .ok_or_else(|| format!("argument {} must be a number", index))
}

/// Adapt a monolithic trait call to an operation result.
fn unit(result: Result<(), Unsupported>) -> Result<Value, String> {
    result.map(|_| Value::Null).map_err(|e| e.to_string())
}

fn reading(result: Result<f64, Unsupported>) -> Result<Value, String> {
    result.map(Value::from).map_err(|e| e.to_string())
}
