//! # Parking Allocator
//!
//! A thread-safe allocator for a fixed inventory of parking spots, organized
//! into levels, with ticket issuance and pluggable tariffs layered on top.
//!
//! ## Core Problem Solved
//!
//! Many callers park and unpark at once. The allocator guarantees that:
//!
//! - **Exclusive occupancy**: a spot is never handed to two vehicles
//! - **Consistent bookkeeping**: a plate holds an active ticket if and only if
//!   exactly one spot in the lot is occupied by it
//! - **Tight packing**: vehicles take the smallest compatible spot first, so
//!   large spots stay free for large vehicles
//!
//! ## Key Features
//!
//! - **Fine-grained locking**: a lock per spot, per level and one for the
//!   ticket directory, held for the shortest span that keeps the invariants
//! - **First-fit search**: levels are tried in order, the first reservation wins
//! - **Idempotent tickets**: a ticket redeems exactly once; stale or forged
//!   tickets are rejected
//! - **Swappable pricing**: standard and premium tariffs, composable and
//!   replaceable at runtime
//! - **Audit trail**: optional sink recording every park, unpark and rejection
//!
//! ## Example
//!
//! ```
//! use parking_allocator::builders::LotBuilder;
//! use parking_allocator::config::LevelConfig;
//! use parking_allocator::core::{ParkingError, Vehicle, VehicleCategory};
//!
//! let lot = LotBuilder::new("CityCenter Mall")
//!     .level(LevelConfig::new(1, 1, 1))
//!     .build()?;
//!
//! let car = Vehicle::new("ka01ab1234", VehicleCategory::Standard)?;
//! let ticket = lot.park(&car)?;
//! assert_eq!(lot.availability_summary().total.standard, 0);
//!
//! let fee = lot.unpark(&ticket)?;
//! assert!(fee >= 3.0);
//! # Ok::<(), ParkingError>(())
//! ```
//!
//! For complete scenarios, see:
//! - `tests/allocator_scenarios_test.rs` - End-to-end behavior
//! - `tests/concurrency_test.rs` - Multi-threaded stress tests

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Allocator core: vehicles, spots, levels, tickets, pricing and the lot.
pub mod core;
/// Configuration models for lots, levels and tariffs.
pub mod config;
/// Builders to construct lots from code or configuration.
pub mod builders;
/// Shared utilities.
pub mod util;
