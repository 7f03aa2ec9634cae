//! ViolationReport: findings from validating one entity.

use std::fmt;

use serde::Serialize;

use super::policy::ValidationPolicy;
use crate::errors::{CompositionError, CompositionResult};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The entity is not well-formed.
    Error,
    /// A design smell; the caller decides what to do with it.
    Warning,
}

/// A single validator finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Declared by the contract but not implemented.
    MissingOperation { operation: String },

    /// Implemented but not advertised by the contract.
    UnadvertisedCapability { operation: String },

    /// Implemented only as an always-fails stub.
    FakeImplementation { operation: String, reason: String },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingOperation { .. } => Severity::Error,
            Self::UnadvertisedCapability { .. } | Self::FakeImplementation { .. } => {
                Severity::Warning
            }
        }
    }

    /// The operation this finding is about.
    pub fn operation(&self) -> &str {
        match self {
            Self::MissingOperation { operation }
            | Self::UnadvertisedCapability { operation }
            | Self::FakeImplementation { operation, .. } => operation,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOperation { operation } => {
                write!(f, "missing operation '{}'", operation)
            }
            Self::UnadvertisedCapability { operation } => {
                write!(f, "unadvertised operation '{}'", operation)
            }
            Self::FakeImplementation { operation, reason } => {
                write!(f, "fake implementation of '{}' ({})", operation, reason)
            }
        }
    }
}

/// Everything the validator found for one entity.
///
/// An empty report means the entity cleanly satisfies its contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationReport {
    /// Entity name
    pub entity: String,

    /// Capability names of the declared contract
    pub contract: Vec<String>,

    /// Missing first (contract order), then unadvertised and fake
    /// (implementation order)
    pub findings: Vec<Finding>,
}

impl ViolationReport {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Declared operations with no implementation.
    pub fn missing(&self) -> Vec<&str> {
        self.operations_where(|f| matches!(f, Finding::MissingOperation { .. }))
    }

    /// Implemented operations outside the contract.
    pub fn unadvertised(&self) -> Vec<&str> {
        self.operations_where(|f| matches!(f, Finding::UnadvertisedCapability { .. }))
    }

    /// Operations implemented only as always-fails stubs.
    pub fn fake(&self) -> Vec<&str> {
        self.operations_where(|f| matches!(f, Finding::FakeImplementation { .. }))
    }

    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity() == Severity::Warning)
    }

    /// Apply a policy to this report.
    ///
    /// Missing operations always fail with `IncompleteImplementation`.
    /// Warnings fail with `StrictViolation` when the policy promotes them and
    /// are logged otherwise.
    pub fn enforce(&self, policy: &ValidationPolicy) -> CompositionResult<()> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(CompositionError::IncompleteImplementation {
                entity: self.entity.clone(),
                missing: missing.into_iter().map(String::from).collect(),
            });
        }

        let mut promoted = Vec::new();
        for finding in self.warnings() {
            if policy.promotes(finding) {
                promoted.push(finding.to_string());
            } else {
                log::warn!("{}: {}", self.entity, finding);
            }
        }

        if promoted.is_empty() {
            Ok(())
        } else {
            Err(CompositionError::StrictViolation {
                entity: self.entity.clone(),
                findings: promoted,
            })
        }
    }

    fn operations_where(&self, pred: impl Fn(&Finding) -> bool) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|f| pred(f))
            .map(Finding::operation)
            .collect()
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.entity, self.contract.join(" + "))?;
        if self.findings.is_empty() {
            return write!(f, ": clean");
        }
        for finding in &self.findings {
            let tag = match finding.severity() {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            write!(f, "\n  {}: {}", tag, finding)?;
        }
        Ok(())
    }
}
