//! Allocator core: vehicles, spots, levels, tickets, pricing and the lot.

pub mod audit;
pub mod category;
pub mod error;
pub mod level;
pub mod lot;
pub mod pricing;
pub mod spot;
pub mod ticket;
pub mod vehicle;

pub use audit::{build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink};
pub use category::{LevelIndex, SpotCategory, SpotId, VehicleCategory};
pub use error::{AppResult, ParkingError};
pub use level::{Availability, ParkingLevel, Reservation};
pub use lot::{LevelAvailability, LotAvailability, ParkingLot};
pub use pricing::{
    billable_hours, HourlyRates, PremiumPricingPolicy, PricingPolicy, StandardPricingPolicy,
    HOUR_MS,
};
pub use spot::{ParkingSpot, SpotStatus};
pub use ticket::Ticket;
pub use vehicle::{LicensePlate, Vehicle};
