//! Configuration models for lots, levels and tariffs.

pub mod lot;

pub use lot::{LevelConfig, LotConfig, PricingConfig, CONFIG_PATH_ENV};
