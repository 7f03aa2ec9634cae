//! Kata 4: sensors in a monitoring system.

use serde_json::Value;

use super::{reading, Kata, KataEntity, Unsupported};
use crate::capabilities::{Capability, CapabilitySource, OperationSignature, ValueType};
use crate::composition::{Composer, Implementation};
use crate::errors::CompositionResult;

pub const TEMPERATURE_CELSIUS: f64 = 22.5;
pub const PRESSURE_HPA: f64 = 1013.25;
pub const HUMIDITY_PERCENT: f64 = 45.0;

const NO_TEMPERATURE: &str = "this sensor does not measure temperature";
const NO_PRESSURE: &str = "this sensor does not measure pressure";
const NO_HUMIDITY: &str = "this sensor does not measure humidity";

pub trait Sensor {
    fn read_temperature(&self) -> Result<f64, Unsupported>;
    fn read_pressure(&self) -> Result<f64, Unsupported>;
    fn read_humidity(&self) -> Result<f64, Unsupported>;
}

pub trait TemperatureReadable {
    fn read_temperature(&self) -> f64;
}

pub trait PressureReadable {
    fn read_pressure(&self) -> f64;
}

pub trait HumidityReadable {
    fn read_humidity(&self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyTemperatureSensor;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyPressureSensor;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyHumiditySensor;

impl Sensor for LegacyTemperatureSensor {
    fn read_temperature(&self) -> Result<f64, Unsupported> {
        Ok(TEMPERATURE_CELSIUS)
    }

    fn read_pressure(&self) -> Result<f64, Unsupported> {
        Err(Unsupported(NO_PRESSURE))
    }

    fn read_humidity(&self) -> Result<f64, Unsupported> {
        Err(Unsupported(NO_HUMIDITY))
    }
}

impl Sensor for LegacyPressureSensor {
    fn read_temperature(&self) -> Result<f64, Unsupported> {
        Err(Unsupported(NO_TEMPERATURE))
    }

    fn read_pressure(&self) -> Result<f64, Unsupported> {
        Ok(PRESSURE_HPA)
    }

    fn read_humidity(&self) -> Result<f64, Unsupported> {
        Err(Unsupported(NO_HUMIDITY))
    }
}

impl Sensor for LegacyHumiditySensor {
    fn read_temperature(&self) -> Result<f64, Unsupported> {
        Err(Unsupported(NO_TEMPERATURE))
    }

    fn read_pressure(&self) -> Result<f64, Unsupported> {
        Err(Unsupported(NO_PRESSURE))
    }

    fn read_humidity(&self) -> Result<f64, Unsupported> {
        Ok(HUMIDITY_PERCENT)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureSensor;

#[derive(Debug, Clone, Copy, Default)]
pub struct PressureSensor;

#[derive(Debug, Clone, Copy, Default)]
pub struct HumiditySensor;

impl TemperatureReadable for TemperatureSensor {
    fn read_temperature(&self) -> f64 {
        TEMPERATURE_CELSIUS
    }
}

impl PressureReadable for PressureSensor {
    fn read_pressure(&self) -> f64 {
        PRESSURE_HPA
    }
}

impl HumidityReadable for HumiditySensor {
    fn read_humidity(&self) -> f64 {
        HUMIDITY_PERCENT
    }
}

fn read_op(name: &str) -> OperationSignature {
    OperationSignature::new(name).returns(ValueType::Number)
}

pub fn capabilities() -> Vec<Capability> {
    vec![
        Capability::new("Sensor")
            .describe("Every reading a sensor might take")
            .operation(read_op("read_temperature"))
            .operation(read_op("read_pressure"))
            .operation(read_op("read_humidity")),
        Capability::new("TemperatureReadable").operation(read_op("read_temperature")),
        Capability::new("PressureReadable").operation(read_op("read_pressure")),
        Capability::new("HumidityReadable").operation(read_op("read_humidity")),
    ]
}

pub fn entities<S>(composer: &Composer<'_, S>) -> CompositionResult<Vec<KataEntity>>
where
    S: CapabilitySource + ?Sized,
{
    let legacy_temperature = composer.build(
        "LegacyTemperatureSensor",
        ["Sensor"],
        Implementation::new()
            .operation("read_temperature", |_| {
                reading(LegacyTemperatureSensor.read_temperature())
            })
            .unsupported("read_pressure", NO_PRESSURE)
            .unsupported("read_humidity", NO_HUMIDITY),
    )?;
    let legacy_pressure = composer.build(
        "LegacyPressureSensor",
        ["Sensor"],
        Implementation::new()
            .unsupported("read_temperature", NO_TEMPERATURE)
            .operation("read_pressure", |_| reading(LegacyPressureSensor.read_pressure()))
            .unsupported("read_humidity", NO_HUMIDITY),
    )?;
    let legacy_humidity = composer.build(
        "LegacyHumiditySensor",
        ["Sensor"],
        Implementation::new()
            .unsupported("read_temperature", NO_TEMPERATURE)
            .unsupported("read_pressure", NO_PRESSURE)
            .operation("read_humidity", |_| reading(LegacyHumiditySensor.read_humidity())),
    )?;

    let temperature = composer.build(
        "TemperatureSensor",
        ["TemperatureReadable"],
        Implementation::new().operation("read_temperature", |_| {
            Ok(Value::from(TemperatureSensor.read_temperature()))
        }),
    )?;
    let pressure = composer.build(
        "PressureSensor",
        ["PressureReadable"],
        Implementation::new().operation("read_pressure", |_| {
            Ok(Value::from(PressureSensor.read_pressure()))
        }),
    )?;
    let humidity = composer.build(
        "HumiditySensor",
        ["HumidityReadable"],
        Implementation::new().operation("read_humidity", |_| {
            Ok(Value::from(HumiditySensor.read_humidity()))
        }),
    )?;

    Ok(vec![
        KataEntity::before(Kata::Sensors, legacy_temperature),
        KataEntity::before(Kata::Sensors, legacy_pressure),
        KataEntity::before(Kata::Sensors, legacy_humidity),
        KataEntity::after(Kata::Sensors, temperature),
        KataEntity::after(Kata::Sensors, pressure),
        KataEntity::after(Kata::Sensors, humidity),
    ])
}
