//! Kata 2: legacy system with unused methods.
//!
//! A basic printer can only print, yet `LegacyPrinter` makes it scan and fax
//! too. Anyone calling those gets a runtime failure.

use serde_json::Value;

use super::{text_arg, unit, Kata, KataEntity, Unsupported};
use crate::capabilities::{Capability, CapabilitySource, OperationSignature, ValueType};
use crate::composition::{Composer, Implementation};
use crate::errors::CompositionResult;

const CANNOT_SCAN: &str = "this printer cannot scan";
const CANNOT_FAX: &str = "this printer cannot fax";

pub trait LegacyPrinter {
    fn print(&self, document: &str) -> Result<(), Unsupported>;
    fn scan(&self, document: &str) -> Result<(), Unsupported>;
    fn fax(&self, document: &str) -> Result<(), Unsupported>;
}

pub trait Printable {
    fn print(&self, document: &str);
}

pub trait Scannable {
    fn scan(&self, document: &str);
}

pub trait Faxable {
    fn fax(&self, document: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBasicPrinter;

impl LegacyPrinter for LegacyBasicPrinter {
    fn print(&self, document: &str) -> Result<(), Unsupported> {
        log::info!("Printing document: {}", document);
        Ok(())
    }

    fn scan(&self, _document: &str) -> Result<(), Unsupported> {
        Err(Unsupported(CANNOT_SCAN))
    }

    fn fax(&self, _document: &str) -> Result<(), Unsupported> {
        Err(Unsupported(CANNOT_FAX))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPrinter;

impl Printable for BasicPrinter {
    fn print(&self, document: &str) {
        log::info!("Printing: {}", document);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdvancedPrinter;

impl Printable for AdvancedPrinter {
    fn print(&self, document: &str) {
        log::info!("Printing: {}", document);
    }
}

impl Scannable for AdvancedPrinter {
    fn scan(&self, document: &str) {
        log::info!("Scanning: {}", document);
    }
}

impl Faxable for AdvancedPrinter {
    fn fax(&self, document: &str) {
        log::info!("Sending fax: {}", document);
    }
}

fn document_op(name: &str) -> OperationSignature {
    OperationSignature::new(name).param(ValueType::Text)
}

pub fn capabilities() -> Vec<Capability> {
    vec![
        Capability::new("LegacyPrinter")
            .describe("Print, scan and fax in one contract")
            .operation(document_op("print"))
            .operation(document_op("scan"))
            .operation(document_op("fax")),
        Capability::new("Printable").operation(document_op("print")),
        Capability::new("Scannable").operation(document_op("scan")),
        Capability::new("Faxable").operation(document_op("fax")),
    ]
}

pub fn entities<S>(composer: &Composer<'_, S>) -> CompositionResult<Vec<KataEntity>>
where
    S: CapabilitySource + ?Sized,
{
    let legacy = composer.build(
        "LegacyBasicPrinter",
        ["LegacyPrinter"],
        Implementation::new()
            .operation("print", |args| {
                unit(LegacyPrinter::print(&LegacyBasicPrinter, text_arg(args, 0)?))
            })
            .unsupported("scan", CANNOT_SCAN)
            .unsupported("fax", CANNOT_FAX),
    )?;

    let basic = composer.build(
        "BasicPrinter",
        ["Printable"],
        Implementation::new().operation("print", |args| {
            Printable::print(&BasicPrinter, text_arg(args, 0)?);
            Ok(Value::Null)
        }),
    )?;

    let advanced = composer.build(
        "AdvancedPrinter",
        ["Printable", "Scannable", "Faxable"],
        Implementation::new()
            .operation("print", |args| {
                Printable::print(&AdvancedPrinter, text_arg(args, 0)?);
                Ok(Value::Null)
            })
            .operation("scan", |args| {
                AdvancedPrinter.scan(text_arg(args, 0)?);
                Ok(Value::Null)
            })
            .operation("fax", |args| {
                AdvancedPrinter.fax(text_arg(args, 0)?);
                Ok(Value::Null)
            }),
    )?;

    Ok(vec![
        KataEntity::before(Kata::Printers, legacy),
        KataEntity::after(Kata::Printers, basic),
        KataEntity::after(Kata::Printers, advanced),
    ])
}
