//! Engine constants and process configuration.
//!
//! [`EngineConfig`] gathers every constant the calculations use.  Its
//! `Default` is the canonical constant set; a JSON file can override any
//! subset of it (missing fields keep their defaults).  [`AppConfig`]
//! covers the binary: bind address, log level and where to find the
//! engine constants.

use crate::error::{EngineError, Result};
use crate::tax::TaxTables;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings for the self-employed regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfEmployedSettings {
    /// Share of the total paid out as labor compensation; the rest is
    /// treated as corporate revenue.
    pub labor_share: f64,
    pub accounting_fee: f64,
    pub administrative_fee: f64,
}

impl Default for SelfEmployedSettings {
    fn default() -> Self {
        Self {
            labor_share: 0.40,
            accounting_fee: 300.0,
            administrative_fee: 80.0,
        }
    }
}

/// Constants behind the minimum/ideal/maximum figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSettings {
    /// Subjective value of one hour of free time.
    pub free_time_hourly_rate: f64,
    pub weeks_per_month: f64,
    pub base_multiplier: f64,
    pub growth_weight: f64,
    pub stability_weight: f64,
    pub benefits_weight: f64,
    /// Compatibility above this lowers the ideal figure.
    pub high_compatibility: f64,
    pub high_compatibility_factor: f64,
    /// Compatibility below this raises the ideal figure.
    pub low_compatibility: f64,
    pub low_compatibility_factor: f64,
    pub stretch_factor: f64,
}

impl Default for RangeSettings {
    fn default() -> Self {
        Self {
            free_time_hourly_rate: 30.0,
            weeks_per_month: 4.33,
            base_multiplier: 1.3,
            growth_weight: 0.02,
            stability_weight: 0.015,
            benefits_weight: 0.015,
            high_compatibility: 80.0,
            high_compatibility_factor: 0.95,
            low_compatibility: 50.0,
            low_compatibility_factor: 1.10,
            stretch_factor: 1.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlySettings {
    pub standard_monthly_work_hours: f64,
    pub workdays_per_month: f64,
}

impl Default for HourlySettings {
    fn default() -> Self {
        Self {
            standard_monthly_work_hours: 220.0,
            workdays_per_month: 22.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilitySettings {
    /// Weight of a dimension listed among the top-3 priorities.
    pub priority_weight: f64,
    pub default_weight: f64,
}

impl Default for CompatibilitySettings {
    fn default() -> Self {
        Self {
            priority_weight: 1.5,
            default_weight: 1.0,
        }
    }
}

/// Mandatory salaried benefits used to annualise a monthly figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnualSettings {
    /// Net salaries paid per year, the extra month included.
    pub salaried_payments_per_year: f64,
    /// Paid-leave premium as a fraction of gross.
    pub paid_leave_premium: f64,
    /// Monthly savings-fund deposit as a fraction of gross.
    pub savings_fund_rate: f64,
    pub self_employed_payments_per_year: f64,
}

impl Default for AnnualSettings {
    fn default() -> Self {
        Self {
            salaried_payments_per_year: 13.0,
            paid_leave_premium: 1.0 / 3.0,
            savings_fund_rate: 0.08,
            self_employed_payments_per_year: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationSettings {
    /// Markup over a received offer that lands between minimum and ideal.
    pub counter_offer_markup: f64,
}

impl Default for NegotiationSettings {
    fn default() -> Self {
        Self {
            counter_offer_markup: 1.15,
        }
    }
}

/// Every constant the engine uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tax: TaxTables,
    pub self_employed: SelfEmployedSettings,
    /// Markup that makes a self-employed figure equivalent to a salaried
    /// one.
    pub equivalence_factor: f64,
    pub range: RangeSettings,
    pub hourly: HourlySettings,
    pub compatibility: CompatibilitySettings,
    pub annual: AnnualSettings,
    pub negotiation: NegotiationSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax: TaxTables::default(),
            self_employed: SelfEmployedSettings::default(),
            equivalence_factor: 1.35,
            range: RangeSettings::default(),
            hourly: HourlySettings::default(),
            compatibility: CompatibilitySettings::default(),
            annual: AnnualSettings::default(),
            negotiation: NegotiationSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document, filling missing fields with defaults.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Checks the constants the range ordering and conversions depend on.
    pub fn validate(&self) -> Result<()> {
        self.tax.validate()?;
        if !(self.equivalence_factor > 0.0) {
            return Err(EngineError::invalid("equivalence_factor", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.self_employed.labor_share) {
            return Err(EngineError::invalid("self_employed.labor_share", "must be within 0..=1"));
        }
        // ideal >= minimum relies on this even with the high-compatibility discount
        if self.range.base_multiplier * self.range.high_compatibility_factor < 1.0 {
            return Err(EngineError::invalid(
                "range.base_multiplier",
                "base_multiplier * high_compatibility_factor must be at least 1",
            ));
        }
        if self.range.stretch_factor < 1.0 {
            return Err(EngineError::invalid("range.stretch_factor", "must be at least 1"));
        }
        if self.hourly.standard_monthly_work_hours < 0.0 || self.hourly.workdays_per_month < 0.0 {
            return Err(EngineError::invalid("hourly", "hours must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OFFER_BIND_ADDR must be a socket address like 127.0.0.1:3000 (got `{0}`)")]
    InvalidBindAddr(String),
    #[error("failed to load engine constants from {}: {source}", path.display())]
    EngineConstants {
        path: PathBuf,
        #[source]
        source: EngineError,
    },
}

/// Process configuration read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_addr = env::var("OFFER_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;
        let log_level = env::var("OFFER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let engine = match env::var("OFFER_ENGINE_CONFIG") {
            Ok(path) => {
                let path = PathBuf::from(path);
                EngineConfig::from_json_file(&path)
                    .map_err(|source| ConfigError::EngineConstants { path, source })?
            }
            Err(_) => EngineConfig::default(),
        };

        Ok(Self {
            bind_addr,
            log_level,
            engine,
        })
    }
}
