//! A single allocatable parking spot.
//!
//! Each spot guards its own occupant behind a `parking_lot::Mutex`. The
//! occupied flag is derived from the occupant, so the two can never be
//! observed out of step.

use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{LicensePlate, ParkingError, SpotCategory, SpotId};

/// Atomic snapshot of a spot's occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotStatus {
    /// Whether a vehicle holds the spot.
    pub occupied: bool,
    /// Plate of the holding vehicle, if any.
    pub occupant: Option<LicensePlate>,
}

/// A physical parking spot with a fixed category.
#[derive(Debug)]
pub struct ParkingSpot {
    id: SpotId,
    category: SpotCategory,
    occupant: Mutex<Option<LicensePlate>>,
}

impl ParkingSpot {
    /// Create a free spot.
    pub const fn new(id: SpotId, category: SpotCategory) -> Self {
        Self {
            id,
            category,
            occupant: Mutex::new(None),
        }
    }

    /// Spot identifier, unique within its level.
    pub const fn id(&self) -> SpotId {
        self.id
    }

    /// Fixed size class.
    pub const fn category(&self) -> SpotCategory {
        self.category
    }

    /// Mark the spot as held by `plate`.
    pub fn occupy(&self, plate: LicensePlate) -> Result<(), ParkingError> {
        let mut occupant = self.occupant.lock();
        if occupant.is_some() {
            return Err(ParkingError::AlreadyOccupied { spot: self.id });
        }
        *occupant = Some(plate);
        Ok(())
    }

    /// Free the spot, returning the plate that held it.
    pub fn vacate(&self) -> Result<LicensePlate, ParkingError> {
        self.occupant
            .lock()
            .take()
            .ok_or(ParkingError::NotOccupied { spot: self.id })
    }

    /// Snapshot of occupancy taken under the spot lock.
    pub fn status(&self) -> SpotStatus {
        let occupant = self.occupant.lock().clone();
        SpotStatus {
            occupied: occupant.is_some(),
            occupant,
        }
    }

    /// Whether a vehicle holds the spot.
    pub fn is_occupied(&self) -> bool {
        self.occupant.lock().is_some()
    }
}

impl fmt::Display for ParkingSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status().occupant {
            Some(plate) => write!(f, "Spot {} ({}): occupied by {plate}", self.id, self.category),
            None => write!(f, "Spot {} ({}): available", self.id, self.category),
        }
    }
}
