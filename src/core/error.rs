//! Error types for allocator operations.

use thiserror::Error;

use crate::core::{LevelIndex, LicensePlate, SpotCategory, SpotId, VehicleCategory};

/// Errors produced by allocator components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkingError {
    /// License plate was empty after normalization.
    #[error("license plate cannot be empty")]
    EmptyPlate,
    /// Spot is already held by another vehicle.
    #[error("spot {spot} is already occupied")]
    AlreadyOccupied {
        /// Spot that rejected the occupy.
        spot: SpotId,
    },
    /// Spot was vacated while free.
    #[error("spot {spot} is not occupied")]
    NotOccupied {
        /// Spot that rejected the vacate.
        spot: SpotId,
    },
    /// Spot id does not exist on the level.
    #[error("spot {spot} does not exist on level {level}")]
    InvalidSpot {
        /// Level that was asked.
        level: LevelIndex,
        /// Unknown spot id.
        spot: SpotId,
    },
    /// Level index does not exist in the lot.
    #[error("level {level} does not exist")]
    InvalidLevel {
        /// Unknown level index.
        level: LevelIndex,
    },
    /// No compatible free spot on a single level.
    #[error("no available spot for {category} on level {level}")]
    NoAvailableSpot {
        /// Level that was searched.
        level: LevelIndex,
        /// Vehicle category being placed.
        category: VehicleCategory,
    },
    /// No compatible free spot anywhere in the lot.
    #[error("no available spots for {category}")]
    NoAvailableSpots {
        /// Vehicle category being placed.
        category: VehicleCategory,
    },
    /// Plate already holds an active ticket.
    #[error("vehicle {plate} is already parked")]
    AlreadyParked {
        /// Plate of the rejected vehicle.
        plate: LicensePlate,
    },
    /// Plate has no active ticket.
    #[error("no active ticket for {plate}")]
    TicketNotFound {
        /// Plate named by the presented ticket.
        plate: LicensePlate,
    },
    /// Presented ticket id differs from the active one.
    #[error("ticket mismatch for {plate}")]
    TicketMismatch {
        /// Plate named by the presented ticket.
        plate: LicensePlate,
    },
    /// Recorded spot is not held by the ticket's plate.
    #[error("spot {spot} ({category}) on level {level} is not held by {plate}")]
    OccupantMismatch {
        /// Level recorded on the ticket.
        level: LevelIndex,
        /// Spot recorded on the ticket.
        spot: SpotId,
        /// Category of the recorded spot.
        category: SpotCategory,
        /// Plate named by the ticket.
        plate: LicensePlate,
    },
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
