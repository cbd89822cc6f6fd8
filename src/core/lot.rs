//! The top-level allocator.
//!
//! Locking, coarsest first:
//! - the directory lock guards plate → ticket bookkeeping,
//! - each level lock guards that level's free queues,
//! - each spot lock guards its occupant.
//!
//! Locks are always taken in that order. `park` holds the directory lock only
//! to claim the plate and to publish the ticket, so level searches from
//! different callers proceed in parallel. `unpark` holds it across
//! verify → release → fee → remove so no caller ever sees a ticket without its
//! spot or a freed spot that still has a ticket.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    build_audit_event, AuditAction, AuditSink, Availability, LevelIndex, LicensePlate,
    ParkingError, ParkingLevel, PricingPolicy, Reservation, SpotId, StandardPricingPolicy, Ticket,
    Vehicle,
};
use crate::util::clock::{Clock, SystemClock};

/// Free counts of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelAvailability {
    /// Level index.
    pub level: LevelIndex,
    /// Free spots per category.
    pub available: Availability,
}

/// Lot-wide free counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotAvailability {
    /// Per-level counts in search order.
    pub levels: Vec<LevelAvailability>,
    /// Sum over all levels.
    pub total: Availability,
}

impl fmt::Display for LotAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in &self.levels {
            writeln!(f, "Level {}: {}", level.level, level.available)?;
        }
        write!(f, "Total: {}", self.total)
    }
}

/// Directory slot for a plate.
#[derive(Debug, Clone)]
enum DirectoryEntry {
    /// A `park` for this plate is searching levels.
    Reserving,
    /// The plate holds this ticket.
    Active(Ticket),
}

/// Thread-safe parking lot made of levels, with ticketing and pricing.
pub struct ParkingLot {
    name: String,
    levels: Vec<ParkingLevel>,
    pricing: RwLock<Arc<dyn PricingPolicy>>,
    directory: Mutex<HashMap<LicensePlate, DirectoryEntry>>,
    clock: Arc<dyn Clock>,
    audit: Option<Mutex<Box<dyn AuditSink>>>,
    issued: AtomicU64,
}

impl ParkingLot {
    /// Create a lot with the standard tariff and the wall clock.
    ///
    /// Levels are searched in the order given and renumbered by position, so
    /// level `i` of the lot always reports index `i`.
    pub fn new(name: impl Into<String>, mut levels: Vec<ParkingLevel>) -> Self {
        for (position, level) in levels.iter_mut().enumerate() {
            if level.index() != position {
                debug!(from = level.index(), to = position, "level renumbered");
                level.renumber(position);
            }
        }
        Self {
            name: name.into().trim().to_string(),
            levels,
            pricing: RwLock::new(Arc::new(StandardPricingPolicy::default())),
            directory: Mutex::new(HashMap::new()),
            clock: Arc::new(SystemClock),
            audit: None,
            issued: AtomicU64::new(0),
        }
    }

    /// Use `policy` for fee calculation.
    #[must_use]
    pub fn with_pricing_policy(self, policy: Arc<dyn PricingPolicy>) -> Self {
        *self.pricing.write() = policy;
        self
    }

    /// Read time from `clock`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(Mutex::new(audit));
        self
    }

    /// Lot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Levels in search order.
    pub fn levels(&self) -> &[ParkingLevel] {
        &self.levels
    }

    /// Level by index.
    pub fn level(&self, index: LevelIndex) -> Option<&ParkingLevel> {
        self.levels.get(index)
    }

    /// Park `vehicle` in the first level with a compatible free spot.
    ///
    /// Fails with [`ParkingError::AlreadyParked`] if the plate already holds a
    /// ticket (or another `park` for it is in flight), and with
    /// [`ParkingError::NoAvailableSpots`] if no level can take the vehicle.
    pub fn park(&self, vehicle: &Vehicle) -> Result<Ticket, ParkingError> {
        let plate = vehicle.plate();

        let claimed = {
            let mut directory = self.directory.lock();
            match directory.entry(plate.clone()) {
                Entry::Occupied(_) => false,
                Entry::Vacant(slot) => {
                    slot.insert(DirectoryEntry::Reserving);
                    true
                }
            }
        };
        if !claimed {
            let err = ParkingError::AlreadyParked {
                plate: plate.clone(),
            };
            self.reject(plate, &err);
            return Err(err);
        }

        let Some(reservation) = self.reserve_first_fit(vehicle) else {
            self.directory.lock().remove(plate);
            let err = ParkingError::NoAvailableSpots {
                category: vehicle.category(),
            };
            self.reject(plate, &err);
            return Err(err);
        };

        let entry_ms = self.clock.now_ms();
        let ticket = Ticket::issue(
            plate.clone(),
            vehicle.category(),
            reservation.level,
            reservation.spot,
            reservation.spot_category,
            entry_ms,
            self.issued.fetch_add(1, Ordering::Relaxed),
        );
        self.directory
            .lock()
            .insert(plate.clone(), DirectoryEntry::Active(ticket.clone()));

        info!(
            ticket = %ticket.id,
            level = ticket.level,
            spot = ticket.spot,
            "vehicle {} parked",
            plate
        );
        self.record(plate, AuditAction::Park, Some(ticket.id.clone()));
        Ok(ticket)
    }

    /// Release the spot held by `ticket` and return the fee.
    ///
    /// The fee uses the policy in effect now, not the one in effect when the
    /// ticket was issued.
    pub fn unpark(&self, ticket: &Ticket) -> Result<f64, ParkingError> {
        let result = {
            let mut directory = self.directory.lock();
            self.redeem(&mut directory, ticket)
        };

        match &result {
            Ok(fee) => {
                info!(ticket = %ticket.id, fee, "vehicle {} released", ticket.plate);
                self.record(&ticket.plate, AuditAction::Unpark, Some(format!("{fee:.2}")));
            }
            Err(err) => self.reject(&ticket.plate, err),
        }
        result
    }

    /// Replace the pricing policy for every later `unpark`.
    pub fn set_pricing_policy(&self, policy: Arc<dyn PricingPolicy>) {
        info!(lot = %self.name, ?policy, "pricing policy replaced");
        *self.pricing.write() = policy;
    }

    /// Current pricing policy.
    pub fn pricing_policy(&self) -> Arc<dyn PricingPolicy> {
        Arc::clone(&*self.pricing.read())
    }

    /// Free counts per level and for the whole lot.
    pub fn availability_summary(&self) -> LotAvailability {
        let levels: Vec<LevelAvailability> = self
            .levels
            .iter()
            .map(|l| LevelAvailability {
                level: l.index(),
                available: l.availability(),
            })
            .collect();
        let total = levels
            .iter()
            .fold(Availability::default(), |acc, l| acc + l.available);
        LotAvailability { levels, total }
    }

    /// Snapshot of active tickets, oldest first.
    pub fn active_tickets(&self) -> Vec<Ticket> {
        let mut tickets: Vec<Ticket> = self
            .directory
            .lock()
            .values()
            .filter_map(|e| match e {
                DirectoryEntry::Active(t) => Some(t.clone()),
                DirectoryEntry::Reserving => None,
            })
            .collect();
        tickets.sort_by(|a, b| a.entry_ms.cmp(&b.entry_ms).then_with(|| a.id.cmp(&b.id)));
        tickets
    }

    /// Whether `plate` holds an active ticket.
    pub fn is_parked(&self, plate: &LicensePlate) -> bool {
        matches!(
            self.directory.lock().get(plate),
            Some(DirectoryEntry::Active(_))
        )
    }

    /// Active ticket for `plate`.
    pub fn ticket_for(&self, plate: &LicensePlate) -> Option<Ticket> {
        match self.directory.lock().get(plate) {
            Some(DirectoryEntry::Active(t)) => Some(t.clone()),
            _ => None,
        }
    }

    /// Check the bookkeeping invariants.
    ///
    /// Verifies every level's free queues, that every active ticket's plate
    /// occupies exactly its recorded spot, and that every occupied spot is
    /// accounted for in the directory. Meaningful while no `park` or
    /// `unpark` is running.
    pub fn verify_invariants(&self) -> Result<(), String> {
        let directory = self.directory.lock();

        let mut held: HashMap<LicensePlate, Vec<(LevelIndex, SpotId)>> = HashMap::new();
        for level in &self.levels {
            level.check_free_queues()?;
            for spot in level.spots() {
                if let Some(plate) = spot.status().occupant {
                    held.entry(plate).or_default().push((level.index(), spot.id()));
                }
            }
        }

        for (plate, spots) in &held {
            if spots.len() > 1 {
                return Err(format!("{plate} occupies {} spots: {spots:?}", spots.len()));
            }
            if !directory.contains_key(plate) {
                return Err(format!("{plate} occupies {spots:?} without a ticket"));
            }
        }

        for (plate, entry) in directory.iter() {
            let DirectoryEntry::Active(ticket) = entry else {
                continue;
            };
            match held.get(plate).map(Vec::as_slice) {
                Some([(level, spot)]) if *level == ticket.level && *spot == ticket.spot => {}
                other => {
                    return Err(format!(
                        "ticket {} expects level {} spot {}, found {other:?}",
                        ticket.id, ticket.level, ticket.spot
                    ));
                }
            }
        }
        Ok(())
    }

    fn reserve_first_fit(&self, vehicle: &Vehicle) -> Option<Reservation> {
        for level in &self.levels {
            match level.find_and_reserve(vehicle) {
                Ok(reservation) => return Some(reservation),
                Err(ParkingError::NoAvailableSpot { .. }) => {}
                Err(err) => debug!(level = level.index(), %err, "level skipped"),
            }
        }
        None
    }

    fn redeem(
        &self,
        directory: &mut HashMap<LicensePlate, DirectoryEntry>,
        presented: &Ticket,
    ) -> Result<f64, ParkingError> {
        let stored = match directory.get(&presented.plate) {
            Some(DirectoryEntry::Active(stored)) => stored.clone(),
            _ => {
                return Err(ParkingError::TicketNotFound {
                    plate: presented.plate.clone(),
                })
            }
        };
        if stored.id != presented.id {
            return Err(ParkingError::TicketMismatch {
                plate: presented.plate.clone(),
            });
        }

        let level = self
            .level(stored.level)
            .ok_or(ParkingError::InvalidLevel {
                level: stored.level,
            })?;
        level.release_held_by(stored.spot, &stored.plate)?;

        let exit_ms = self.clock.now_ms();
        let fee = self
            .pricing_policy()
            .calculate_fee(stored.vehicle_category, stored.entry_ms, exit_ms);
        directory.remove(&stored.plate);
        Ok(fee)
    }

    fn reject(&self, plate: &LicensePlate, err: &ParkingError) {
        warn!(lot = %self.name, %plate, %err, "request rejected");
        self.record(plate, AuditAction::Reject, Some(err.to_string()));
    }

    fn record(&self, plate: &LicensePlate, action: AuditAction, payload: Option<String>) {
        if let Some(sink) = &self.audit {
            let event = build_audit_event(
                plate.as_str(),
                self.name.as_str(),
                action,
                self.clock.now_ms(),
                payload,
            );
            sink.lock().record(event);
        }
    }
}

impl fmt::Debug for ParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParkingLot")
            .field("name", &self.name)
            .field("levels", &self.levels.len())
            .field("pricing", &self.pricing.read())
            .field("clock", &self.clock)
            .field("active", &self.directory.lock().len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parking Lot: {}", self.name)?;
        for level in &self.levels {
            writeln!(f, "{level}")?;
        }
        write!(f, "Total available: {}", self.availability_summary().total)
    }
}
