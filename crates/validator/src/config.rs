//! Validator configuration.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::RuleError;
use crate::messages::default_template;
use crate::rules::RuleKind;

/// Default upper bound on one DNS lookup, in milliseconds.
pub const DEFAULT_DNS_TIMEOUT_MS: u64 = 2_000;

/// Tunables shared by every validation run of a [`Validator`](crate::Validator).
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::prelude::*;
///
/// let config = ValidatorConfig::from_json_str(
///     r#"{ "dns_timeout_ms": 500, "messages": { "required": "{field} is missing" } }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.dns_timeout(), std::time::Duration::from_millis(500));
/// assert_eq!(config.template(RuleKind::Required), "{field} is missing");
/// assert_eq!(config.template(RuleKind::Alpha), "{field} must contain only letters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// How long `activeUrl` waits for one DNS lookup.
    ///
    /// With [`SystemResolver`](crate::foundation::SystemResolver) a lookup
    /// that times out still holds its helper thread until the OS answers;
    /// at most [`MAX_PENDING_LOOKUPS`](crate::foundation::MAX_PENDING_LOOKUPS)
    /// of them are kept alive, and lookups beyond that fail right away.
    pub dns_timeout_ms: u64,

    /// Per-rule overrides of the default message templates.
    pub messages: HashMap<RuleKind, String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            dns_timeout_ms: DEFAULT_DNS_TIMEOUT_MS,
            messages: HashMap::new(),
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, RuleError> {
        serde_json::from_str(input).map_err(|e| RuleError::Parse {
            document: "validator config",
            message: e.to_string(),
        })
    }

    /// Sets the DNS lookup timeout.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Overrides the default template of one rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, kind: RuleKind, template: impl Into<String>) -> Self {
        self.messages.insert(kind, template.into());
        self
    }

    /// The DNS lookup timeout.
    #[must_use]
    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    /// Template used when a check of `kind` has no message of its own.
    #[must_use]
    pub fn template(&self, kind: RuleKind) -> &str {
        self.messages
            .get(&kind)
            .map_or_else(|| default_template(kind), String::as_str)
    }
}
