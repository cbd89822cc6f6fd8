//! A level of the lot: a fixed spot inventory with per-category free queues.
//!
//! The level lock covers the free queues and is held across every
//! "pop id → occupy spot" and "vacate spot → push id" sequence, so the queues
//! always match the real occupancy of the spots. The level lock is always
//! taken before a spot lock, never the reverse.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::ops::{Add, AddAssign};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    LevelIndex, LicensePlate, ParkingError, ParkingSpot, SpotCategory, SpotId, Vehicle,
};

/// Free spot counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Free two-wheeled spots.
    pub two_wheeled: usize,
    /// Free standard spots.
    pub standard: usize,
    /// Free oversized spots.
    pub oversized: usize,
}

impl Availability {
    /// Build from explicit counts.
    pub const fn new(two_wheeled: usize, standard: usize, oversized: usize) -> Self {
        Self {
            two_wheeled,
            standard,
            oversized,
        }
    }

    /// Free count for one category.
    pub const fn get(&self, category: SpotCategory) -> usize {
        match category {
            SpotCategory::TwoWheeled => self.two_wheeled,
            SpotCategory::Standard => self.standard,
            SpotCategory::Oversized => self.oversized,
        }
    }

    /// Free count across all categories.
    pub const fn total(&self) -> usize {
        self.two_wheeled + self.standard + self.oversized
    }
}

impl Add for Availability {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            two_wheeled: self.two_wheeled + rhs.two_wheeled,
            standard: self.standard + rhs.standard,
            oversized: self.oversized + rhs.oversized,
        }
    }
}

impl AddAssign for Availability {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} two-wheeled, {} standard, {} oversized",
            self.two_wheeled, self.standard, self.oversized
        )
    }
}

/// Outcome of a successful reservation on a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// Level holding the spot.
    pub level: LevelIndex,
    /// Reserved spot.
    pub spot: SpotId,
    /// Category of the reserved spot.
    pub spot_category: SpotCategory,
}

/// One FIFO queue of free spot ids per category.
#[derive(Debug, Default)]
struct FreeSpots {
    queues: [VecDeque<SpotId>; 3],
}

impl FreeSpots {
    fn pop(&mut self, category: SpotCategory) -> Option<SpotId> {
        self.queues[category.slot()].pop_front()
    }

    fn push(&mut self, category: SpotCategory, id: SpotId) {
        self.queues[category.slot()].push_back(id);
    }

    /// Put back an id that was popped but could not be occupied.
    fn restore(&mut self, category: SpotCategory, id: SpotId) {
        self.queues[category.slot()].push_front(id);
    }

    fn len(&self, category: SpotCategory) -> usize {
        self.queues[category.slot()].len()
    }
}

/// A single level of the lot.
#[derive(Debug)]
pub struct ParkingLevel {
    index: LevelIndex,
    spots: Vec<ParkingSpot>,
    free: Mutex<FreeSpots>,
}

impl ParkingLevel {
    /// Create a level with the given number of spots per category.
    ///
    /// Spot ids are assigned densely from zero: two-wheeled spots first, then
    /// standard, then oversized.
    pub fn new(index: LevelIndex, two_wheeled: usize, standard: usize, oversized: usize) -> Self {
        let mut spots = Vec::with_capacity(two_wheeled + standard + oversized);
        let mut free = FreeSpots::default();

        for (category, count) in [
            (SpotCategory::TwoWheeled, two_wheeled),
            (SpotCategory::Standard, standard),
            (SpotCategory::Oversized, oversized),
        ] {
            for _ in 0..count {
                let id = spots.len();
                spots.push(ParkingSpot::new(id, category));
                free.push(category, id);
            }
        }

        Self {
            index,
            spots,
            free: Mutex::new(free),
        }
    }

    /// Position within the lot.
    pub const fn index(&self) -> LevelIndex {
        self.index
    }

    /// Move the level to position `index`.
    pub(crate) fn renumber(&mut self, index: LevelIndex) {
        self.index = index;
    }

    /// Reserve a free spot compatible with `vehicle`, tightest fit first.
    ///
    /// The candidate id is popped and the spot occupied under the level lock.
    /// If the occupy fails the id goes back to the front of its queue before
    /// the error is returned.
    pub fn find_and_reserve(&self, vehicle: &Vehicle) -> Result<Reservation, ParkingError> {
        let mut free = self.free.lock();

        for &category in vehicle.category().compatible_spots() {
            let Some(id) = free.pop(category) else {
                continue;
            };

            if let Err(err) = self.spots[id].occupy(vehicle.plate().clone()) {
                free.restore(category, id);
                warn!(level = self.index, spot = id, %err, "free spot could not be occupied");
                return Err(err);
            }

            debug!(
                level = self.index,
                spot = id,
                %category,
                plate = %vehicle.plate(),
                "spot reserved"
            );
            return Ok(Reservation {
                level: self.index,
                spot: id,
                spot_category: category,
            });
        }

        Err(ParkingError::NoAvailableSpot {
            level: self.index,
            category: vehicle.category(),
        })
    }

    /// Vacate `spot_id` and return it to its free queue.
    pub fn release(&self, spot_id: SpotId) -> Result<LicensePlate, ParkingError> {
        let spot = self.spot_or_err(spot_id)?;
        let mut free = self.free.lock();
        let plate = spot.vacate()?;
        free.push(spot.category(), spot_id);
        debug!(level = self.index, spot = spot_id, %plate, "spot released");
        Ok(plate)
    }

    /// Vacate `spot_id` only if `plate` holds it.
    ///
    /// The occupant check and the vacate happen under one level lock.
    pub fn release_held_by(&self, spot_id: SpotId, plate: &LicensePlate) -> Result<(), ParkingError> {
        let spot = self.spot_or_err(spot_id)?;
        let mut free = self.free.lock();

        match spot.status().occupant {
            None => return Err(ParkingError::NotOccupied { spot: spot_id }),
            Some(ref current) if current != plate => {
                return Err(ParkingError::OccupantMismatch {
                    level: self.index,
                    spot: spot_id,
                    category: spot.category(),
                    plate: plate.clone(),
                });
            }
            Some(_) => {}
        }

        spot.vacate()?;
        free.push(spot.category(), spot_id);
        debug!(level = self.index, spot = spot_id, %plate, "spot released");
        Ok(())
    }

    /// Point-in-time free counts per category.
    pub fn availability(&self) -> Availability {
        let free = self.free.lock();
        Availability::new(
            free.len(SpotCategory::TwoWheeled),
            free.len(SpotCategory::Standard),
            free.len(SpotCategory::Oversized),
        )
    }

    /// Spot by id.
    pub fn spot(&self, spot_id: SpotId) -> Option<&ParkingSpot> {
        self.spots.get(spot_id)
    }

    /// All spots in id order.
    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    /// Number of spots on the level.
    pub fn total_spots(&self) -> usize {
        self.spots.len()
    }

    /// Number of spots currently held.
    pub fn occupied_spots(&self) -> usize {
        self.spots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Check that every free queue holds exactly the free spots of its category.
    pub fn check_free_queues(&self) -> Result<(), String> {
        let free = self.free.lock();

        for category in SpotCategory::ALL {
            let queue = &free.queues[category.slot()];
            let queued: BTreeSet<SpotId> = queue.iter().copied().collect();
            if queued.len() != queue.len() {
                return Err(format!(
                    "level {}: duplicate ids in {category} free queue",
                    self.index
                ));
            }

            let actual: BTreeSet<SpotId> = self
                .spots
                .iter()
                .filter(|s| s.category() == category && !s.is_occupied())
                .map(ParkingSpot::id)
                .collect();
            if queued != actual {
                return Err(format!(
                    "level {}: {category} free queue {queued:?} != free spots {actual:?}",
                    self.index
                ));
            }
        }
        Ok(())
    }

    fn spot_or_err(&self, spot_id: SpotId) -> Result<&ParkingSpot, ParkingError> {
        self.spots.get(spot_id).ok_or(ParkingError::InvalidSpot {
            level: self.index,
            spot: spot_id,
        })
    }
}

impl fmt::Display for ParkingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.availability();
        write!(
            f,
            "Level {}: {}/{}/{} available (two-wheeled/standard/oversized), {}/{} occupied",
            self.index,
            a.two_wheeled,
            a.standard,
            a.oversized,
            self.occupied_spots(),
            self.total_spots()
        )
    }
}
