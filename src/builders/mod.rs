//! Builders to construct lots from code or configuration.

pub mod lot_builder;

pub use lot_builder::{build_lot, LotBuilder};
