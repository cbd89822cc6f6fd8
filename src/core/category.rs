//! Size classes shared by vehicles and spots, plus the matching rule between them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a level within its lot.
pub type LevelIndex = usize;

/// Identifier of a spot within its level.
pub type SpotId = usize;

/// Size class of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    /// Motorcycles, scooters, bicycles.
    TwoWheeled,
    /// Ordinary cars.
    Standard,
    /// Buses, trucks, vans.
    Oversized,
}

/// Size class of a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotCategory {
    /// Fits two-wheeled vehicles only.
    TwoWheeled,
    /// Fits two-wheeled and standard vehicles.
    Standard,
    /// Fits every vehicle.
    Oversized,
}

impl VehicleCategory {
    /// Every vehicle category, smallest first.
    pub const ALL: [Self; 3] = [Self::TwoWheeled, Self::Standard, Self::Oversized];

    /// Spot categories this vehicle may use, tightest fit first.
    ///
    /// Smaller spots are always tried before larger ones so large spots stay
    /// free for the vehicles that need them.
    pub const fn compatible_spots(self) -> &'static [SpotCategory] {
        match self {
            Self::TwoWheeled => &[
                SpotCategory::TwoWheeled,
                SpotCategory::Standard,
                SpotCategory::Oversized,
            ],
            Self::Standard => &[SpotCategory::Standard, SpotCategory::Oversized],
            Self::Oversized => &[SpotCategory::Oversized],
        }
    }

    /// Whether a spot of `spot` category can hold this vehicle.
    pub fn fits(self, spot: SpotCategory) -> bool {
        self.compatible_spots().contains(&spot)
    }
}

impl SpotCategory {
    /// Every spot category, smallest first.
    pub const ALL: [Self; 3] = [Self::TwoWheeled, Self::Standard, Self::Oversized];

    /// Dense index used for per-category tables.
    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::TwoWheeled => 0,
            Self::Standard => 1,
            Self::Oversized => 2,
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoWheeled => write!(f, "two-wheeled"),
            Self::Standard => write!(f, "standard"),
            Self::Oversized => write!(f, "oversized"),
        }
    }
}

impl fmt::Display for SpotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoWheeled => write!(f, "two-wheeled"),
            Self::Standard => write!(f, "standard"),
            Self::Oversized => write!(f, "oversized"),
        }
    }
}
