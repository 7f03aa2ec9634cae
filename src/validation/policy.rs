//! Validation policy: decides which warnings are treated as errors.
//!
//! # Environment Variables
//!
//! - `SEGREGATE_STRICT`: `1`/`true` promotes every warning to an error
//!
//! # Example YAML
//!
//! ```yaml
//! fake_is_error: true
//! unadvertised_is_error: false
//! ```

use serde::{Deserialize, Serialize};

use super::report::Finding;

/// Environment variable enabling strict mode.
pub const STRICT_ENV: &str = "SEGREGATE_STRICT";

/// Which report warnings fail [`super::ViolationReport::enforce`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Promote every warning.
    pub strict: bool,

    /// Promote always-fails stubs.
    pub fake_is_error: bool,

    /// Promote operations outside the contract.
    pub unadvertised_is_error: bool,
}

impl ValidationPolicy {
    /// Report warnings, never fail on them.
    pub fn advisory() -> Self {
        Self::default()
    }

    /// Fail on every warning.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Parse a policy from YAML. Missing keys default to `false`.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Advisory unless `SEGREGATE_STRICT` is set to `1` or `true`.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(STRICT_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "1" || v == "true" => Self::strict(),
            _ => Self::advisory(),
        }
    }

    /// Whether this policy turns the finding into an error.
    pub fn promotes(&self, finding: &Finding) -> bool {
        match finding {
            Finding::MissingOperation { .. } => true,
            Finding::FakeImplementation { .. } => self.strict || self.fake_is_error,
            Finding::UnadvertisedCapability { .. } => self.strict || self.unadvertised_is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_defaults_missing_keys() {
        let policy = ValidationPolicy::from_yaml("fake_is_error: true\n").unwrap();
        assert!(policy.fake_is_error);
        assert!(!policy.unadvertised_is_error);
        assert!(!policy.strict);
    }

    #[test]
    fn test_env_values() {
        assert_eq!(
            ValidationPolicy::from_env_value(Some("TRUE")),
            ValidationPolicy::strict()
        );
        assert_eq!(
            ValidationPolicy::from_env_value(Some("1")),
            ValidationPolicy::strict()
        );
        assert_eq!(
            ValidationPolicy::from_env_value(Some("no")),
            ValidationPolicy::advisory()
        );
        assert_eq!(
            ValidationPolicy::from_env_value(None),
            ValidationPolicy::advisory()
        );
    }

    #[test]
    fn test_promotes() {
        let unadvertised = Finding::UnadvertisedCapability {
            operation: "swim".to_string(),
        };
        assert!(!ValidationPolicy::advisory().promotes(&unadvertised));
        assert!(ValidationPolicy::strict().promotes(&unadvertised));

        let policy = ValidationPolicy {
            unadvertised_is_error: true,
            ..ValidationPolicy::default()
        };
        assert!(policy.promotes(&unadvertised));
    }
}
