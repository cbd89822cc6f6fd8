//! Tests for error types

use parking_allocator::core::{LicensePlate, ParkingError, SpotCategory, VehicleCategory};

fn plate(raw: &str) -> LicensePlate {
    LicensePlate::parse(raw).unwrap()
}

#[test]
fn test_empty_plate_error() {
    let err = ParkingError::EmptyPlate;
    assert_eq!(format!("{}", err), "license plate cannot be empty");
}

#[test]
fn test_spot_state_errors() {
    assert_eq!(
        ParkingError::AlreadyOccupied { spot: 3 }.to_string(),
        "spot 3 is already occupied"
    );
    assert_eq!(
        ParkingError::NotOccupied { spot: 4 }.to_string(),
        "spot 4 is not occupied"
    );
    assert_eq!(
        ParkingError::InvalidSpot { level: 1, spot: 99 }.to_string(),
        "spot 99 does not exist on level 1"
    );
    assert_eq!(
        ParkingError::InvalidLevel { level: 7 }.to_string(),
        "level 7 does not exist"
    );
}

#[test]
fn test_capacity_errors() {
    assert_eq!(
        ParkingError::NoAvailableSpot {
            level: 0,
            category: VehicleCategory::Oversized
        }
        .to_string(),
        "no available spot for oversized on level 0"
    );
    assert_eq!(
        ParkingError::NoAvailableSpots {
            category: VehicleCategory::TwoWheeled
        }
        .to_string(),
        "no available spots for two-wheeled"
    );
}

#[test]
fn test_identity_errors() {
    assert_eq!(
        ParkingError::AlreadyParked { plate: plate("ab1") }.to_string(),
        "vehicle AB1 is already parked"
    );
    assert_eq!(
        ParkingError::TicketNotFound { plate: plate("ab1") }.to_string(),
        "no active ticket for AB1"
    );
    assert_eq!(
        ParkingError::TicketMismatch { plate: plate("ab1") }.to_string(),
        "ticket mismatch for AB1"
    );
    assert_eq!(
        ParkingError::OccupantMismatch {
            level: 0,
            spot: 2,
            category: SpotCategory::Standard,
            plate: plate("ab1"),
        }
        .to_string(),
        "spot 2 (standard) on level 0 is not held by AB1"
    );
}

#[test]
fn test_invalid_config_error() {
    let err = ParkingError::InvalidConfig("lot name cannot be empty".to_string());
    assert_eq!(format!("{}", err), "invalid configuration: lot name cannot be empty");
}
