//! Tests for the site-night fact model in occupancy-common.
//!
//! This test suite covers:
//! - Newtype identifiers implementing expected traits
//! - Builder-derived calendar fields and indicators
//! - Date range semantics

use chrono::NaiveDate;
use occupancy_common::*;
use std::collections::BTreeSet;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn tent_site() -> Site {
    Site::new("site-3", "Site 003", "type-3", "Tent Site")
}

#[cfg(test)]
mod newtype_trait_tests {
    use super::*;

    #[test]
    fn test_site_id_implements_expected_traits() {
        let site_id = SiteId::from("site-12");

        assert_eq!(format!("{site_id:?}"), "SiteId(\"site-12\")");
        assert_eq!(format!("{site_id}"), "site-12");
        assert_eq!(site_id.clone(), site_id);
        assert_eq!(serde_json::to_string(&site_id).unwrap(), "\"site-12\"");
    }

    #[test]
    fn test_ids_order_lexically() {
        let ids: BTreeSet<SiteId> = ["site-2", "site-10", "site-1"]
            .into_iter()
            .map(SiteId::from)
            .collect();
        let ordered: Vec<&str> = ids.iter().map(SiteId::as_str).collect();
        assert_eq!(ordered, vec!["site-1", "site-10", "site-2"]);
    }

    #[test]
    fn test_reservation_id_deserializes_from_plain_string() {
        let id: ReservationId = serde_json::from_str("\"res-42\"").unwrap();
        assert_eq!(id, ReservationId::from("res-42".to_string()));
    }
}

#[cfg(test)]
mod fact_model_tests {
    use super::*;

    #[test]
    fn test_every_weekday_maps_from_sunday_zero() {
        // 2025-03-02 is a Sunday
        let site = tent_site();
        for offset in 0..7u8 {
            let night = SiteNight::builder(&site, date(2025, 3, 2 + u32::from(offset))).build();
            assert_eq!(night.weekday, offset);
            assert_eq!(night.weekend_flag, offset >= 5);
        }
    }

    #[test]
    fn test_year_boundary_uses_iso_week() {
        // 2024-12-30 belongs to ISO week 1 of 2025 but calendar year 2024
        let night = SiteNight::builder(&tent_site(), date(2024, 12, 30)).build();
        assert_eq!(night.week_iso, 1);
        assert_eq!(night.year, 2024);
        assert_eq!(night.month, 12);
    }

    #[test]
    fn test_fact_file_deserializes_from_producer_format() {
        let json = r#"{
            "date": "2025-02-07",
            "siteId": "site-3",
            "siteName": "Site 003",
            "siteTypeId": "type-3",
            "siteTypeName": "Tent Site",
            "isBlocked": false,
            "isOccupied": true,
            "on": 1,
            "an": 1,
            "weekday": 5,
            "weekIso": 6,
            "month": 2,
            "year": 2025,
            "revenueLodgingNet": 35.5,
            "weekendFlag": true,
            "reservationId": "res-7"
        }"#;

        let night: SiteNight = serde_json::from_str(json).unwrap();
        let expected = SiteNight::builder(&tent_site(), date(2025, 2, 7))
            .occupied("res-7", 35.5)
            .build();
        assert_eq!(night, expected);
    }

    #[test]
    fn test_date_range_shift_preserves_length() {
        let range = DateRange::from_nights(date(2025, 2, 1), 30);
        let shifted = range.shifted(-364);
        assert_eq!(shifted.days(), 30);
        assert_eq!(shifted.start, date(2024, 2, 3));
        assert_eq!(range.to_string(), "2025-02-01..2025-03-03");
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "facts.json");
        let err: OccupancyError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_inverted_range_is_input_error() {
        let err = DateRange::new(date(2025, 3, 2), date(2025, 3, 1)).unwrap_err();
        assert!(err.is_input_error());
    }
}
