//! Tickets minted on successful allocation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{LevelIndex, LicensePlate, SpotCategory, SpotId, VehicleCategory};

/// Receipt proving a vehicle holds a spot since `entry_ms`.
///
/// Immutable once issued. Serializable so it can leave the process and be
/// presented back on exit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: String,
    /// Plate of the parked vehicle.
    pub plate: LicensePlate,
    /// Category of the parked vehicle.
    pub vehicle_category: VehicleCategory,
    /// Entry time in milliseconds since epoch.
    pub entry_ms: u128,
    /// Level holding the spot.
    pub level: LevelIndex,
    /// Spot within the level.
    pub spot: SpotId,
    /// Category of the spot at issuance.
    pub spot_category: SpotCategory,
}

impl Ticket {
    /// Issue a ticket. `sequence` disambiguates tickets minted in the same millisecond.
    pub fn issue(
        plate: LicensePlate,
        vehicle_category: VehicleCategory,
        level: LevelIndex,
        spot: SpotId,
        spot_category: SpotCategory,
        entry_ms: u128,
        sequence: u64,
    ) -> Self {
        Self {
            id: format!("{plate}-L{level}-S{spot}-{entry_ms}-{sequence}"),
            plate,
            vehicle_category,
            entry_ms,
            level,
            spot,
            spot_category,
        }
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticket {}: {} ({}) at Level {}, Spot {} ({})",
            self.id, self.plate, self.vehicle_category, self.level, self.spot, self.spot_category
        )
    }
}
