use crate::domain::service::{ServiceItem, studio_catalog};
use crate::error::{BookingError, Result};
use crate::infrastructure::simulated_gateway::SimulatedOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Studio settings, read from a TOML file.
///
/// Every section is optional; missing values fall back to the defaults the
/// studio ships with, including the built-in service catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StudioConfig {
    /// Prefix used when showing amounts, e.g. `MK`.
    pub currency: String,
    pub payment: PaymentConfig,
    pub services: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaymentConfig {
    /// How long the simulated gateway takes to answer.
    pub delay_ms: u64,
    /// Upper bound on any charge before it counts as timed out.
    pub timeout_ms: u64,
    pub outcome: SimulatedOutcome,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            currency: "MK".to_string(),
            payment: PaymentConfig::default(),
            services: studio_catalog(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            timeout_ms: 10_000,
            outcome: SimulatedOutcome::Approve,
        }
    }
}

impl PaymentConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl StudioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), services = config.services.len(), "configuration loaded");
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.payment.timeout_ms == 0 {
            return Err(BookingError::ConfigError(
                "payment.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.services.is_empty() {
            return Err(BookingError::ConfigError(
                "the service catalog cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for service in &self.services {
            if service.id.trim().is_empty() {
                return Err(BookingError::ConfigError(format!(
                    "service '{}' has an empty id",
                    service.title
                )));
            }
            if !seen.insert(service.id.as_str()) {
                return Err(BookingError::ConfigError(format!(
                    "duplicate service id '{}'",
                    service.id
                )));
            }
            if service.packages.iter().any(|p| p.name.trim().is_empty()) {
                return Err(BookingError::ConfigError(format!(
                    "service '{}' has a package without a name",
                    service.id
                )));
            }
        }
        Ok(())
    }
}
