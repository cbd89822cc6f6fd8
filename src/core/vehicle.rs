//! Vehicle value type and plate normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{ParkingError, VehicleCategory};

/// Normalized license plate: trimmed, upper-cased and never empty.
///
/// Two plates that differ only in case or surrounding whitespace compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicensePlate(String);

impl LicensePlate {
    /// Normalize and validate a raw plate string.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ParkingError> {
        let normalized = raw.as_ref().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ParkingError::EmptyPlate);
        }
        Ok(Self(normalized))
    }

    /// Normalized plate text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LicensePlate {
    type Error = ParkingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LicensePlate> for String {
    fn from(plate: LicensePlate) -> Self {
        plate.0
    }
}

impl AsRef<str> for LicensePlate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vehicle asking for a spot. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    plate: LicensePlate,
    category: VehicleCategory,
}

impl Vehicle {
    /// Build a vehicle, normalizing the plate.
    ///
    /// Fails with [`ParkingError::EmptyPlate`] when the plate is blank.
    pub fn new(plate: impl AsRef<str>, category: VehicleCategory) -> Result<Self, ParkingError> {
        Ok(Self {
            plate: LicensePlate::parse(plate)?,
            category,
        })
    }

    /// Build a vehicle from an already-normalized plate.
    pub const fn with_plate(plate: LicensePlate, category: VehicleCategory) -> Self {
        Self { plate, category }
    }

    /// Normalized plate.
    pub const fn plate(&self) -> &LicensePlate {
        &self.plate
    }

    /// Size class.
    pub const fn category(&self) -> VehicleCategory {
        self.category
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.plate, self.category)
    }
}
