//! Kata 5: IoT device interface.
//!
//! A smart light has no business playing music. The legacy speaker is the
//! one type that fits `SmartDevice` honestly, which is why that contract
//! looked reasonable in the first place.

use serde_json::Value;

use super::{text_arg, unit, Kata, KataEntity, Unsupported};
use crate::capabilities::{Capability, CapabilitySource, OperationSignature, ValueType};
use crate::composition::{Composer, Implementation};
use crate::errors::CompositionResult;

const LIGHT_CANNOT_PLAY: &str = "smart lights do not play music";

pub trait SmartDevice {
    fn turn_on(&self) -> Result<(), Unsupported>;
    fn turn_off(&self) -> Result<(), Unsupported>;
    fn connect_to_wifi(&self, ssid: &str, password: &str) -> Result<(), Unsupported>;
    fn play_music(&self, song: &str) -> Result<(), Unsupported>;
}

pub trait PowerControllable {
    fn turn_on(&self);
    fn turn_off(&self);
}

pub trait WiFiConnectable {
    fn connect_to_wifi(&self, ssid: &str, password: &str);
}

pub trait MusicPlayable {
    fn play_music(&self, song: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySmartLight;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySmartSpeaker;

impl SmartDevice for LegacySmartLight {
    fn turn_on(&self) -> Result<(), Unsupported> {
        log::info!("Light on");
        Ok(())
    }

    fn turn_off(&self) -> Result<(), Unsupported> {
        log::info!("Light off");
        Ok(())
    }

    fn connect_to_wifi(&self, ssid: &str, _password: &str) -> Result<(), Unsupported> {
        log::info!("Connecting light to WiFi network {}", ssid);
        Ok(())
    }

    fn play_music(&self, _song: &str) -> Result<(), Unsupported> {
        Err(Unsupported(LIGHT_CANNOT_PLAY))
    }
}

impl SmartDevice for LegacySmartSpeaker {
    fn turn_on(&self) -> Result<(), Unsupported> {
        log::info!("Speaker on");
        Ok(())
    }

    fn turn_off(&self) -> Result<(), Unsupported> {
        log::info!("Speaker off");
        Ok(())
    }

    fn connect_to_wifi(&self, ssid: &str, _password: &str) -> Result<(), Unsupported> {
        log::info!("Connecting speaker to WiFi network {}", ssid);
        Ok(())
    }

    fn play_music(&self, song: &str) -> Result<(), Unsupported> {
        log::info!("Playing: {}", song);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SmartLight;

#[derive(Debug, Clone, Copy, Default)]
pub struct SmartSpeaker;

impl PowerControllable for SmartLight {
    fn turn_on(&self) {
        log::info!("Light on");
    }

    fn turn_off(&self) {
        log::info!("Light off");
    }
}

impl WiFiConnectable for SmartLight {
    fn connect_to_wifi(&self, ssid: &str, _password: &str) {
        log::info!("Light connected to WiFi: {}", ssid);
    }
}

impl PowerControllable for SmartSpeaker {
    fn turn_on(&self) {
        log::info!("Speaker on");
    }

    fn turn_off(&self) {
        log::info!("Speaker off");
    }
}

impl WiFiConnectable for SmartSpeaker {
    fn connect_to_wifi(&self, ssid: &str, _password: &str) {
        log::info!("Speaker connected to WiFi: {}", ssid);
    }
}

impl MusicPlayable for SmartSpeaker {
    fn play_music(&self, song: &str) {
        log::info!("Playing: {}", song);
    }
}

fn wifi_op() -> OperationSignature {
    OperationSignature::new("connect_to_wifi")
        .param(ValueType::Text)
        .param(ValueType::Text)
}

fn music_op() -> OperationSignature {
    OperationSignature::new("play_music").param(ValueType::Text)
}

pub fn capabilities() -> Vec<Capability> {
    vec![
        Capability::new("SmartDevice")
            .describe("Power, network and media in one contract")
            .operation(OperationSignature::new("turn_on"))
            .operation(OperationSignature::new("turn_off"))
            .operation(wifi_op())
            .operation(music_op()),
        Capability::new("PowerControllable")
            .operation(OperationSignature::new("turn_on"))
            .operation(OperationSignature::new("turn_off")),
        Capability::new("WiFiConnectable").operation(wifi_op()),
        Capability::new("MusicPlayable").operation(music_op()),
    ]
}

/// Power and WiFi operations for any segregated device.
fn connected_device<D>(device: D) -> Implementation
where
    D: PowerControllable + WiFiConnectable + Copy + Send + Sync + 'static,
{
    Implementation::new()
        .operation("turn_on", move |_| {
            device.turn_on();
            Ok(Value::Null)
        })
        .operation("turn_off", move |_| {
            device.turn_off();
            Ok(Value::Null)
        })
        .operation("connect_to_wifi", move |args| {
            device.connect_to_wifi(text_arg(args, 0)?, text_arg(args, 1)?);
            Ok(Value::Null)
        })
}

/// All four operations for a legacy device; `play_music` is filled by the caller.
fn legacy_device<D>(device: D) -> Implementation
where
    D: SmartDevice + Copy + Send + Sync + 'static,
{
    Implementation::new()
        .operation("turn_on", move |_| unit(device.turn_on()))
        .operation("turn_off", move |_| unit(device.turn_off()))
        .operation("connect_to_wifi", move |args| {
            unit(device.connect_to_wifi(text_arg(args, 0)?, text_arg(args, 1)?))
        })
}

pub fn entities<S>(composer: &Composer<'_, S>) -> CompositionResult<Vec<KataEntity>>
where
    S: CapabilitySource + ?Sized,
{
    let legacy_light = composer.build(
        "LegacySmartLight",
        ["SmartDevice"],
        legacy_device(LegacySmartLight).unsupported("play_music", LIGHT_CANNOT_PLAY),
    )?;
    let legacy_speaker = composer.build(
        "LegacySmartSpeaker",
        ["SmartDevice"],
        legacy_device(LegacySmartSpeaker).operation("play_music", |args| {
            unit(LegacySmartSpeaker.play_music(text_arg(args, 0)?))
        }),
    )?;

    let light = composer.build(
        "SmartLight",
        ["PowerControllable", "WiFiConnectable"],
        connected_device(SmartLight),
    )?;
    let speaker = composer.build(
        "SmartSpeaker",
        ["PowerControllable", "WiFiConnectable", "MusicPlayable"],
        connected_device(SmartSpeaker).operation("play_music", |args| {
            SmartSpeaker.play_music(text_arg(args, 0)?);
            Ok(Value::Null)
        }),
    )?;

    Ok(vec![
        KataEntity::before(Kata::Devices, legacy_light),
        KataEntity::before(Kata::Devices, legacy_speaker),
        KataEntity::after(Kata::Devices, light),
        KataEntity::after(Kata::Devices, speaker),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::CapabilityRegistry;
    use crate::errors::InvocationError;
    use serde_json::json;

    #[test]
    fn test_legacy_light_cannot_play_music() {
        assert!(LegacySmartLight.turn_on().is_ok());
        assert_eq!(
            LegacySmartLight.play_music("song"),
            Err(Unsupported(LIGHT_CANNOT_PLAY))
        );
        assert!(LegacySmartSpeaker.play_music("song").is_ok());
    }

    #[test]
    fn test_wifi_takes_two_arguments() {
        let mut registry = CapabilityRegistry::new();
        for cap in capabilities() {
            registry.register(cap).unwrap();
        }
        let entities = entities(&Composer::new(&registry)).unwrap();
        let light = &entities[2].entity;

        assert!(light
            .invoke("connect_to_wifi", &[json!("home"), json!("secret")])
            .is_ok());
        assert!(matches!(
            light.invoke("connect_to_wifi", &[json!("home")]),
            Err(InvocationError::ArityMismatch { expected: 2, actual: 1, .. })
        ));
    }
}
