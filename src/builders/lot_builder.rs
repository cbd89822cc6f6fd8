//! Builders to construct parking lots from configuration.

use std::sync::Arc;

use crate::config::{LevelConfig, LotConfig};
use crate::core::{AuditSink, ParkingError, ParkingLevel, ParkingLot, PricingPolicy};
use crate::util::clock::Clock;

/// Fluent builder for [`ParkingLot`].
///
/// Levels get indices in the order they are added.
pub struct LotBuilder {
    name: String,
    levels: Vec<LevelConfig>,
    pricing: Option<Arc<dyn PricingPolicy>>,
    clock: Option<Arc<dyn Clock>>,
    audit: Option<Box<dyn AuditSink>>,
}

impl LotBuilder {
    /// Start a builder for a lot called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            levels: Vec::new(),
            pricing: None,
            clock: None,
            audit: None,
        }
    }

    /// Start a builder from a validated configuration.
    pub fn from_config(cfg: &LotConfig) -> Result<Self, ParkingError> {
        cfg.validate().map_err(ParkingError::InvalidConfig)?;
        Ok(Self::new(cfg.name.clone())
            .levels(cfg.levels.iter().copied())
            .pricing(cfg.pricing.build_policy()))
    }

    /// Lot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Level inventories added so far.
    pub fn level_configs(&self) -> &[LevelConfig] {
        &self.levels
    }

    /// Append a level.
    #[must_use]
    pub fn level(mut self, level: LevelConfig) -> Self {
        self.levels.push(level);
        self
    }

    /// Append several levels.
    #[must_use]
    pub fn levels(mut self, levels: impl IntoIterator<Item = LevelConfig>) -> Self {
        self.levels.extend(levels);
        self
    }

    /// Use `policy` instead of the standard tariff.
    #[must_use]
    pub fn pricing(mut self, policy: Arc<dyn PricingPolicy>) -> Self {
        self.pricing = Some(policy);
        self
    }

    /// Use `clock` instead of the wall clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn audit(mut self, sink: Box<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Build the lot.
    pub fn build(self) -> Result<ParkingLot, ParkingError> {
        if self.name.trim().is_empty() {
            return Err(ParkingError::InvalidConfig("lot name cannot be empty".into()));
        }
        if self.levels.is_empty() {
            return Err(ParkingError::InvalidConfig(
                "at least one level must be defined".into(),
            ));
        }
        for (index, level) in self.levels.iter().enumerate() {
            level
                .validate()
                .map_err(|e| ParkingError::InvalidConfig(format!("level {index} invalid: {e}")))?;
        }

        let levels = self
            .levels
            .iter()
            .enumerate()
            .map(|(index, l)| ParkingLevel::new(index, l.two_wheeled, l.standard, l.oversized))
            .collect();

        let mut lot = ParkingLot::new(self.name, levels);
        if let Some(policy) = self.pricing {
            lot = lot.with_pricing_policy(policy);
        }
        if let Some(clock) = self.clock {
            lot = lot.with_clock(clock);
        }
        if let Some(sink) = self.audit {
            lot = lot.with_audit(sink);
        }
        tracing::debug!(lot = %lot.name(), levels = lot.levels().len(), "lot built");
        Ok(lot)
    }
}

/// Build a lot from configuration.
pub fn build_lot(cfg: &LotConfig) -> Result<ParkingLot, ParkingError> {
    LotBuilder::from_config(cfg)?.build()
}
