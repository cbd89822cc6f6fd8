//! Lot, level and tariff configuration structures.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{
    AppResult, HourlyRates, PremiumPricingPolicy, PricingPolicy, StandardPricingPolicy,
};

/// Environment variable naming the JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "PARKING_LOT_CONFIG";

/// Spot inventory of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Number of two-wheeled spots.
    #[serde(default)]
    pub two_wheeled: usize,
    /// Number of standard spots.
    #[serde(default)]
    pub standard: usize,
    /// Number of oversized spots.
    #[serde(default)]
    pub oversized: usize,
}

/// Tariff configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat fee per stay.
    #[serde(default = "default_base_fee")]
    pub base_fee: f64,
    /// Per-hour rates.
    #[serde(default)]
    pub hourly_rates: HourlyRates,
    /// Surcharge factor; when set the lot bills premium rates.
    #[serde(default)]
    pub premium_multiplier: Option<f64>,
}

/// Root lot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotConfig {
    /// Lot name.
    pub name: String,
    /// Levels in search order.
    pub levels: Vec<LevelConfig>,
    /// Tariff.
    #[serde(default)]
    pub pricing: PricingConfig,
}

const fn default_base_fee() -> f64 {
    StandardPricingPolicy::DEFAULT_BASE_FEE
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_fee: default_base_fee(),
            hourly_rates: HourlyRates::default(),
            premium_multiplier: None,
        }
    }
}

impl LevelConfig {
    /// Spot counts for one level.
    pub const fn new(two_wheeled: usize, standard: usize, oversized: usize) -> Self {
        Self {
            two_wheeled,
            standard,
            oversized,
        }
    }

    /// Total spots on the level.
    pub const fn total(&self) -> usize {
        self.two_wheeled + self.standard + self.oversized
    }

    /// Validate level inventory.
    pub fn validate(&self) -> Result<(), String> {
        if self.total() == 0 {
            return Err("level must have at least one spot".into());
        }
        Ok(())
    }
}

impl PricingConfig {
    /// Validate tariff values.
    pub fn validate(&self) -> Result<(), String> {
        check_amount("base_fee", self.base_fee)?;
        check_amount("hourly_rates.two_wheeled", self.hourly_rates.two_wheeled)?;
        check_amount("hourly_rates.standard", self.hourly_rates.standard)?;
        check_amount("hourly_rates.oversized", self.hourly_rates.oversized)?;
        if let Some(m) = self.premium_multiplier {
            if !m.is_finite() || m <= 0.0 {
                return Err(format!("premium_multiplier must be positive, got {m}"));
            }
        }
        Ok(())
    }

    /// Build the configured policy: standard, or premium over standard.
    pub fn build_policy(&self) -> Arc<dyn PricingPolicy> {
        let standard = StandardPricingPolicy::new(self.base_fee, self.hourly_rates);
        match self.premium_multiplier {
            Some(m) => Arc::new(PremiumPricingPolicy::wrapping(standard, m)),
            None => Arc::new(standard),
        }
    }
}

impl LotConfig {
    /// Validate the name, every level and the tariff.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("lot name cannot be empty".into());
        }
        if self.levels.is_empty() {
            return Err("at least one level must be defined".into());
        }
        for (index, level) in self.levels.iter().enumerate() {
            level
                .validate()
                .map_err(|e| format!("level {index} invalid: {e}"))?;
        }
        self.pricing
            .validate()
            .map_err(|e| format!("pricing invalid: {e}"))
    }

    /// Parse lot configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading lot config {}", path.display()))?;
        Self::from_json_str(&raw)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading lot config {}", path.display()))
    }

    /// Load the file named by `PARKING_LOT_CONFIG`, reading `.env` first if present.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_ENV)
            .with_context(|| format!("{CONFIG_PATH_ENV} is not set"))?;
        Self::from_path(path)
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{field} must be a non-negative amount, got {value}"));
    }
    Ok(())
}
