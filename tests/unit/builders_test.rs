//! Tests for builder modules

use std::sync::Arc;

use parking_allocator::builders::{build_lot, LotBuilder};
use parking_allocator::config::{LevelConfig, LotConfig, PricingConfig};
use parking_allocator::core::{
    Availability, InMemoryAuditSink, ParkingError, PremiumPricingPolicy, Vehicle, VehicleCategory,
};
use parking_allocator::util::ManualClock;

#[test]
fn test_lot_builder_defaults() {
    let builder = LotBuilder::new("Mall").level(LevelConfig::new(1, 2, 3));
    assert_eq!(builder.name(), "Mall");
    assert_eq!(builder.level_configs(), &[LevelConfig::new(1, 2, 3)]);

    let lot = builder.build().unwrap();
    assert_eq!(lot.levels().len(), 1);
    assert_eq!(lot.availability_summary().total, Availability::new(1, 2, 3));
    assert!((lot.pricing_policy().base_fee() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_lot_builder_assigns_level_indices() {
    let lot = LotBuilder::new("Mall")
        .levels([LevelConfig::new(1, 0, 0), LevelConfig::new(0, 1, 0), LevelConfig::new(0, 0, 1)])
        .build()
        .unwrap();
    let indices: Vec<usize> = lot.levels().iter().map(|l| l.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_lot_builder_rejects_bad_inventory() {
    assert_eq!(
        LotBuilder::new("Mall").build().unwrap_err(),
        ParkingError::InvalidConfig("at least one level must be defined".into())
    );
    assert!(matches!(
        LotBuilder::new(" ").level(LevelConfig::new(1, 0, 0)).build(),
        Err(ParkingError::InvalidConfig(_))
    ));
    assert!(matches!(
        LotBuilder::new("Mall").level(LevelConfig::new(0, 0, 0)).build(),
        Err(ParkingError::InvalidConfig(_))
    ));
}

#[test]
fn test_lot_builder_wires_components() {
    let clock = Arc::new(ManualClock::new(0));
    let sink = InMemoryAuditSink::new(4);
    let lot = LotBuilder::new("Mall")
        .level(LevelConfig::new(0, 1, 0))
        .pricing(Arc::new(PremiumPricingPolicy::new(2.0)))
        .clock(clock)
        .audit(Box::new(sink.clone()))
        .build()
        .unwrap();

    let ticket = lot.park(&Vehicle::new("AB1", VehicleCategory::Standard).unwrap()).unwrap();
    assert_eq!(ticket.entry_ms, 0);
    let fee = lot.unpark(&ticket).unwrap();
    assert!((fee - 6.0).abs() < f64::EPSILON);
    assert_eq!(sink.events().len(), 2);
}

#[test]
fn test_build_lot_from_config() {
    let cfg = LotConfig {
        name: "Mall".into(),
        levels: vec![LevelConfig::new(2, 2, 1), LevelConfig::new(1, 2, 1)],
        pricing: PricingConfig {
            premium_multiplier: Some(1.5),
            ..PricingConfig::default()
        },
    };

    let lot = build_lot(&cfg).unwrap();
    assert_eq!(lot.name(), "Mall");
    assert_eq!(lot.availability_summary().total, Availability::new(3, 4, 2));
    let fee = lot.pricing_policy().calculate_fee(VehicleCategory::TwoWheeled, 0, 0);
    assert!((fee - 3.75).abs() < f64::EPSILON);
}

#[test]
fn test_build_lot_rejects_invalid_config() {
    let cfg = LotConfig {
        name: "Mall".into(),
        levels: vec![],
        pricing: PricingConfig::default(),
    };
    assert!(matches!(build_lot(&cfg), Err(ParkingError::InvalidConfig(_))));
}
