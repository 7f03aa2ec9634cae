//! Kata 6: e-commerce payment processors.

use serde_json::Value;

use super::{number_arg, unit, Kata, KataEntity, Unsupported};
use crate::capabilities::{Capability, CapabilitySource, OperationSignature, ValueType};
use crate::composition::{Composer, Implementation};
use crate::errors::CompositionResult;

const NO_CARDS: &str = "this processor does not handle cards";
const NO_PAYPAL: &str = "this processor does not handle PayPal";
const NO_CRYPTO: &str = "this processor does not handle crypto";

pub trait PaymentProcessor {
    fn process_credit_card(&self, amount: f64) -> Result<(), Unsupported>;
    fn process_paypal(&self, amount: f64) -> Result<(), Unsupported>;
    fn process_crypto(&self, amount: f64) -> Result<(), Unsupported>;
}

pub trait CreditCardPayment {
    fn process_credit_card(&self, amount: f64);
}

pub trait PayPalPayment {
    fn process_paypal(&self, amount: f64);
}

pub trait CryptoPayment {
    fn process_crypto(&self, amount: f64);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCreditCardProcessor;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyPayPalProcessor;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCryptoProcessor;

impl PaymentProcessor for LegacyCreditCardProcessor {
    fn process_credit_card(&self, amount: f64) -> Result<(), Unsupported> {
        log::info!("Processing credit card payment: ${}", amount);
        Ok(())
    }

    fn process_paypal(&self, _amount: f64) -> Result<(), Unsupported> {
        Err(Unsupported(NO_PAYPAL))
    }

    fn process_crypto(&self, _amount: f64) -> Result<(), Unsupported> {
        Err(Unsupported(NO_CRYPTO))
    }
}

impl PaymentProcessor for LegacyPayPalProcessor {
    fn process_credit_card(&self, _amount: f64) -> Result<(), Unsupported> {
        Err(Unsupported(NO_CARDS))
    }

    fn process_paypal(&self, amount: f64) -> Result<(), Unsupported> {
        log::info!("Processing PayPal payment: ${}", amount);
        Ok(())
    }

    fn process_crypto(&self, _amount: f64) -> Result<(), Unsupported> {
        Err(Unsupported(NO_CRYPTO))
    }
}

impl PaymentProcessor for LegacyCryptoProcessor {
    fn process_credit_card(&self, _amount: f64) -> Result<(), Unsupported> {
        Err(Unsupported(NO_CARDS))
    }

    fn process_paypal(&self, _amount: f64) -> Result<(), Unsupported> {
        Err(Unsupported(NO_PAYPAL))
    }

    fn process_crypto(&self, amount: f64) -> Result<(), Unsupported> {
        log::info!("Processing crypto payment: ${}", amount);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CreditCardProcessor;

#[derive(Debug, Clone, Copy, Default)]
pub struct PayPalProcessor;

#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoProcessor;

impl CreditCardPayment for CreditCardProcessor {
    fn process_credit_card(&self, amount: f64) {
        log::info!("Card payment: ${}", amount);
    }
}

impl PayPalPayment for PayPalProcessor {
    fn process_paypal(&self, amount: f64) {
        log::info!("PayPal payment: ${}", amount);
    }
}

impl CryptoPayment for CryptoProcessor {
    fn process_crypto(&self, amount: f64) {
        log::info!("Crypto payment: ${}", amount);
    }
}

fn amount_op(name: &str) -> OperationSignature {
    OperationSignature::new(name).param(ValueType::Number)
}

pub fn capabilities() -> Vec<Capability> {
    vec![
        Capability::new("PaymentProcessor")
            .describe("Every payment method in one contract")
            .operation(amount_op("process_credit_card"))
            .operation(amount_op("process_paypal"))
            .operation(amount_op("process_crypto")),
        Capability::new("CreditCardPayment").operation(amount_op("process_credit_card")),
        Capability::new("PayPalPayment").operation(amount_op("process_paypal")),
        Capability::new("CryptoPayment").operation(amount_op("process_crypto")),
    ]
}

pub fn entities<S>(composer: &Composer<'_, S>) -> CompositionResult<Vec<KataEntity>>
where
    S: CapabilitySource + ?Sized,
{
    let legacy_card = composer.build(
        "LegacyCreditCardProcessor",
        ["PaymentProcessor"],
        Implementation::new()
            .operation("process_credit_card", |args| {
                unit(LegacyCreditCardProcessor.process_credit_card(number_arg(args, 0)?))
            })
            .unsupported("process_paypal", NO_PAYPAL)
            .unsupported("process_crypto", NO_CRYPTO),
    )?;
    let legacy_paypal = composer.build(
        "LegacyPayPalProcessor",
        ["PaymentProcessor"],
        Implementation::new()
            .unsupported("process_credit_card", NO_CARDS)
            .operation("process_paypal", |args| {
                unit(LegacyPayPalProcessor.process_paypal(number_arg(args, 0)?))
            })
            .unsupported("process_crypto", NO_CRYPTO),
    )?;
    let legacy_crypto = composer.build(
        "LegacyCryptoProcessor",
        ["PaymentProcessor"],
        Implementation::new()
            .unsupported("process_credit_card", NO_CARDS)
            .unsupported("process_paypal", NO_PAYPAL)
            .operation("process_crypto", |args| {
                unit(LegacyCryptoProcessor.process_crypto(number_arg(args, 0)?))
            }),
    )?;

    let card = composer.build(
        "CreditCardProcessor",
        ["CreditCardPayment"],
        Implementation::new().operation("process_credit_card", |args| {
            CreditCardProcessor.process_credit_card(number_arg(args, 0)?);
            Ok(Value::Null)
        }),
    )?;
    let paypal = composer.build(
        "PayPalProcessor",
        ["PayPalPayment"],
        Implementation::new().operation("process_paypal", |args| {
            PayPalProcessor.process_paypal(number_arg(args, 0)?);
            Ok(Value::Null)
        }),
    )?;
    let crypto = composer.build(
        "CryptoProcessor",
        ["CryptoPayment"],
        Implementation::new().operation("process_crypto", |args| {
            CryptoProcessor.process_crypto(number_arg(args, 0)?);
            Ok(Value::Null)
        }),
    )?;

    Ok(vec![
        KataEntity::before(Kata::Payments, legacy_card),
        KataEntity::before(Kata::Payments, legacy_paypal),
        KataEntity::before(Kata::Payments, legacy_crypto),
        KataEntity::after(Kata::Payments, card),
        KataEntity::after(Kata::Payments, paypal),
        KataEntity::after(Kata::Payments, crypto),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_processors_reject_foreign_methods() {
        assert!(LegacyCreditCardProcessor.process_credit_card(10.0).is_ok());
        assert_eq!(
            LegacyCreditCardProcessor.process_crypto(10.0),
            Err(Unsupported(NO_CRYPTO))
        );
        assert_eq!(
            LegacyCryptoProcessor.process_paypal(10.0),
            Err(Unsupported(NO_PAYPAL))
        );
    }
}
