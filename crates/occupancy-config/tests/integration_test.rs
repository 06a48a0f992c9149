//! Integration tests for occupancy-config crate.

use occupancy_common::test_utils::date;
use occupancy_config::{
    Config, ConfigLoader, Granularity, ReportConfig, SettingsStore,
};
use std::io::Write;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate_all().is_ok());

    config.report.tails = 7;
    assert!(config.validate_all().is_err());
}

#[test]
fn test_load_from_file_converts_errors() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(b"filters:\n  date_range:\n    start: 2025-04-01\n    end: 2025-03-01\n")
        .unwrap();

    let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_store_seeded_from_loaded_config() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(b"report:\n  granularity: weekly\nfilters:\n  date_range:\n    start: 2025-06-01\n    end: 2025-07-15\n")
        .unwrap();

    let config = ConfigLoader::load_from_file(file.path()).unwrap();
    let store = SettingsStore::new(ReportConfig::from_config(&config));
    let snapshot = store.snapshot();

    assert_eq!(snapshot.version, 0);
    assert_eq!(snapshot.settings.granularity, Granularity::Weekly);
    assert_eq!(snapshot.filters.date_range.start, date(2025, 6, 1));
    assert_eq!(snapshot.filters.date_range.days(), 44);
}

#[test]
fn test_concurrent_writers_produce_distinct_versions() {
    let store = SettingsStore::default();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..25 {
                    store.update_settings(|settings| settings.show_yoy = !settings.show_yoy);
                    let snapshot = store.snapshot();
                    assert!(snapshot.version >= 1);
                }
            });
        }
    });

    let last = store.snapshot();
    assert_eq!(last.version, 100);
    // an even number of toggles leaves the flag unchanged
    assert!(!last.settings.show_yoy);
}
