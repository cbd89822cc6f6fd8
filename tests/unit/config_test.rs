//! Tests for configuration validation

use parking_allocator::config::{LevelConfig, LotConfig, PricingConfig, CONFIG_PATH_ENV};
use parking_allocator::core::{HourlyRates, VehicleCategory, HOUR_MS};

fn valid_config() -> LotConfig {
    LotConfig {
        name: "CityCenter Mall".to_string(),
        levels: vec![LevelConfig::new(2, 2, 1), LevelConfig::new(1, 2, 1)],
        pricing: PricingConfig::default(),
    }
}

#[test]
fn test_lot_config_validation() {
    assert!(valid_config().validate().is_ok());
}

#[test]
fn test_lot_config_empty_name() {
    let mut cfg = valid_config();
    cfg.name = "   ".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_lot_config_no_levels() {
    let mut cfg = valid_config();
    cfg.levels.clear();
    assert_eq!(
        cfg.validate(),
        Err("at least one level must be defined".to_string())
    );
}

#[test]
fn test_lot_config_empty_level() {
    let mut cfg = valid_config();
    cfg.levels.push(LevelConfig::new(0, 0, 0));
    assert_eq!(
        cfg.validate(),
        Err("level 2 invalid: level must have at least one spot".to_string())
    );
}

#[test]
fn test_pricing_config_rejects_negative_rates() {
    let pricing = PricingConfig {
        base_fee: 2.0,
        hourly_rates: HourlyRates {
            two_wheeled: -0.5,
            standard: 1.0,
            oversized: 3.0,
        },
        premium_multiplier: None,
    };
    assert!(pricing.validate().is_err());
}

#[test]
fn test_pricing_config_rejects_bad_multiplier() {
    for m in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let pricing = PricingConfig {
            premium_multiplier: Some(m),
            ..PricingConfig::default()
        };
        assert!(pricing.validate().is_err(), "multiplier {m} accepted");
    }
}

#[test]
fn test_pricing_config_builds_policy() {
    let standard = PricingConfig::default().build_policy();
    let fee = standard.calculate_fee(VehicleCategory::Standard, 0, HOUR_MS);
    assert!((fee - 3.0).abs() < f64::EPSILON);

    let premium = PricingConfig {
        premium_multiplier: Some(2.0),
        ..PricingConfig::default()
    }
    .build_policy();
    let fee = premium.calculate_fee(VehicleCategory::Standard, 0, HOUR_MS);
    assert!((fee - 6.0).abs() < f64::EPSILON);
}

#[test]
fn test_lot_config_from_json() {
    let json = r#"{
        "name": "CityCenter Mall",
        "levels": [
            { "two_wheeled": 2, "standard": 2, "oversized": 1 },
            { "standard": 4 }
        ],
        "pricing": {
            "base_fee": 1.0,
            "premium_multiplier": 1.5
        }
    }"#;

    let config = LotConfig::from_json_str(json).unwrap();
    assert_eq!(config.levels[1], LevelConfig::new(0, 4, 0));
    assert!((config.pricing.base_fee - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.pricing.hourly_rates, HourlyRates::default());
    assert_eq!(config.pricing.premium_multiplier, Some(1.5));
}

#[test]
fn test_lot_config_from_json_defaults_pricing() {
    let config = LotConfig::from_json_str(r#"{"name": "Lot", "levels": [{"oversized": 1}]}"#).unwrap();
    assert_eq!(config.pricing, PricingConfig::default());
}

#[test]
fn test_lot_config_from_json_errors() {
    let parse = LotConfig::from_json_str("{ not json").unwrap_err();
    assert!(parse.starts_with("parse error"));

    let invalid = LotConfig::from_json_str(r#"{"name": "Lot", "levels": []}"#).unwrap_err();
    assert_eq!(invalid, "at least one level must be defined");
}

#[test]
fn test_lot_config_from_path_missing_file() {
    let err = LotConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("reading lot config"));
}

#[test]
fn test_lot_config_from_env() {
    let path = std::env::temp_dir().join(format!("parking-allocator-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&valid_config()).unwrap()).unwrap();
    std::env::set_var(CONFIG_PATH_ENV, &path);

    let loaded = LotConfig::from_env().unwrap();
    assert_eq!(loaded, valid_config());

    std::fs::remove_file(&path).unwrap();
}
