//! Pluggable tariff strategies.
//!
//! Policies are pure: they hold no mutable state, so the lot can swap one for
//! another at runtime behind a single lock.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::core::VehicleCategory;

/// One hour in milliseconds.
pub const HOUR_MS: u128 = 3_600_000;

/// Strategy turning a category and a stay into a fee.
pub trait PricingPolicy: Debug + Send + Sync {
    /// Fee for a stay from `entry_ms` to `exit_ms`.
    ///
    /// Never negative: implementations clamp at zero, including when built
    /// with negative tariffs or multipliers.
    fn calculate_fee(&self, category: VehicleCategory, entry_ms: u128, exit_ms: u128) -> f64;

    /// Flat fee charged on every stay.
    fn base_fee(&self) -> f64;

    /// Per-hour rate for a category.
    fn hourly_rate(&self, category: VehicleCategory) -> f64;
}

/// Per-category hourly rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRates {
    /// Rate for two-wheeled vehicles.
    pub two_wheeled: f64,
    /// Rate for standard vehicles.
    pub standard: f64,
    /// Rate for oversized vehicles.
    pub oversized: f64,
}

impl HourlyRates {
    /// Rate for one category.
    pub const fn get(&self, category: VehicleCategory) -> f64 {
        match category {
            VehicleCategory::TwoWheeled => self.two_wheeled,
            VehicleCategory::Standard => self.standard,
            VehicleCategory::Oversized => self.oversized,
        }
    }
}

impl Default for HourlyRates {
    fn default() -> Self {
        Self {
            two_wheeled: 0.5,
            standard: 1.0,
            oversized: 3.0,
        }
    }
}

/// Hours billed for a stay: rounded up, at least one.
///
/// Returns `None` when the exit precedes the entry.
pub fn billable_hours(entry_ms: u128, exit_ms: u128) -> Option<u128> {
    let elapsed = exit_ms.checked_sub(entry_ms)?;
    Some(elapsed.div_ceil(HOUR_MS).max(1))
}

/// Base fee plus an hourly rate per started hour.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardPricingPolicy {
    base_fee: f64,
    rates: HourlyRates,
}

impl StandardPricingPolicy {
    /// Default base fee.
    pub const DEFAULT_BASE_FEE: f64 = 2.0;

    /// Build with explicit tariffs.
    pub const fn new(base_fee: f64, rates: HourlyRates) -> Self {
        Self { base_fee, rates }
    }

    /// Configured hourly rates.
    pub const fn rates(&self) -> HourlyRates {
        self.rates
    }
}

impl Default for StandardPricingPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_FEE, HourlyRates::default())
    }
}

impl PricingPolicy for StandardPricingPolicy {
    #[allow(clippy::cast_precision_loss)]
    fn calculate_fee(&self, category: VehicleCategory, entry_ms: u128, exit_ms: u128) -> f64 {
        // Exit before entry bills nothing rather than a negative amount.
        billable_hours(entry_ms, exit_ms)
            .map_or(0.0, |hours| {
                self.base_fee + self.rates.get(category) * hours as f64
            })
            .max(0.0)
    }

    fn base_fee(&self) -> f64 {
        self.base_fee
    }

    fn hourly_rate(&self, category: VehicleCategory) -> f64 {
        self.rates.get(category)
    }
}

/// Applies a multiplicative surcharge on top of another policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PremiumPricingPolicy<P = StandardPricingPolicy> {
    inner: P,
    multiplier: f64,
}

impl PremiumPricingPolicy {
    /// Surcharge over the default standard tariff.
    pub fn new(multiplier: f64) -> Self {
        Self::wrapping(StandardPricingPolicy::default(), multiplier)
    }
}

impl<P: PricingPolicy> PremiumPricingPolicy<P> {
    /// Surcharge over an arbitrary policy.
    pub const fn wrapping(inner: P, multiplier: f64) -> Self {
        Self { inner, multiplier }
    }

    /// Surcharge factor.
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Wrapped policy.
    pub const fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: PricingPolicy> PricingPolicy for PremiumPricingPolicy<P> {
    fn calculate_fee(&self, category: VehicleCategory, entry_ms: u128, exit_ms: u128) -> f64 {
        (self.inner.calculate_fee(category, entry_ms, exit_ms) * self.multiplier).max(0.0)
    }

    fn base_fee(&self) -> f64 {
        self.inner.base_fee()
    }

    fn hourly_rate(&self, category: VehicleCategory) -> f64 {
        self.inner.hourly_rate(category)
    }
}
