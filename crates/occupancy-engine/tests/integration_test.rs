//! Integration tests for occupancy-engine crate.
//!
//! These tests run the full report pipeline over generated portfolios.

use occupancy_common::test_utils::{date, fixtures, init_test_logging};
use occupancy_common::{DateRange, SiteNight};
use occupancy_config::{ReportConfig, ReportFilters, ReportSettings};
use occupancy_engine::{
    adjust_site_nights_for_blocked_setting, calculate_donut_data, calculate_table_data,
    calculate_trend_data, calculate_weekday_data, BucketGranularity, ReportEngine, TrendOptions,
};
use std::thread;

fn engine(settings: ReportSettings, filters: ReportFilters) -> ReportEngine {
    ReportEngine::new(ReportConfig {
        version: 1,
        settings,
        filters,
    })
}

#[test]
fn test_site_type_filter_limits_rows() {
    init_test_logging();
    let data = fixtures::portfolio(10, date(2025, 1, 1), 90);
    let filters = ReportFilters {
        site_type_ids: vec!["type-4".into()],
        ..ReportFilters::default()
    };

    let report = engine(ReportSettings::default(), filters)
        .build(&data.site_nights, &data.reservations)
        .unwrap();

    let ids: Vec<&str> = report.table.iter().map(|row| row.site_id.as_str()).collect();
    assert_eq!(ids, vec!["site-4", "site-9"]);
    assert!(report.table.iter().all(|row| row.site_type == "Cabin"));
}

#[test]
fn test_including_blocked_nights_widens_capacity() {
    let data = fixtures::portfolio(4, date(2025, 1, 1), 90);

    let excluded = engine(ReportSettings::default(), ReportFilters::default())
        .build(&data.site_nights, &data.reservations)
        .unwrap();
    let included = engine(
        ReportSettings {
            include_blocked: true,
            ..ReportSettings::default()
        },
        ReportFilters::default(),
    )
    .build(&data.site_nights, &data.reservations)
    .unwrap();

    let blocked = included.donut.blocked.unwrap();
    assert!(blocked > 0);
    assert_eq!(included.donut.occupied, excluded.donut.occupied);
    assert_eq!(
        included.donut.available,
        excluded.donut.available + i64::from(blocked)
    );
}

#[test]
fn test_table_totals_match_donut() {
    let data = fixtures::portfolio(6, date(2025, 1, 1), 90);
    let report = engine(ReportSettings::default(), ReportFilters::default())
        .build(&data.site_nights, &data.reservations)
        .unwrap();

    let on: u32 = report.table.iter().map(|row| row.on).sum();
    let an: u32 = report.table.iter().map(|row| row.an).sum();
    assert_eq!(on, report.donut.occupied);
    assert_eq!(i64::from(an), i64::from(on) + report.donut.available);

    let weekday_on: u32 = report.weekday.iter().map(|entry| entry.current_period.on).sum();
    assert_eq!(weekday_on, on);
}

#[test]
fn test_weekly_trend_keeps_tails_around_selection() {
    let data = fixtures::portfolio(3, date(2024, 12, 1), 150);
    let filters = ReportFilters {
        date_range: DateRange::from_nights(date(2025, 2, 1), 45),
        ..ReportFilters::default()
    };
    let settings = ReportSettings {
        tails: 1,
        ..ReportSettings::default()
    };

    let report = engine(settings, filters)
        .build(&data.site_nights, &data.reservations)
        .unwrap();
    assert_eq!(report.granularity, BucketGranularity::Weekly);

    let flags: Vec<bool> = report.trend.iter().map(|bucket| bucket.is_in_selection).collect();
    let first = flags.iter().position(|in_selection| *in_selection).unwrap();
    let last = flags.iter().rposition(|in_selection| *in_selection).unwrap();
    assert!(first <= 1);
    assert!(flags.len() - 1 - last <= 1);
    assert!(flags[first..=last].iter().all(|in_selection| *in_selection));
    assert_eq!(report.trend[first].bucket_key, "2025-W05");
}

#[test]
fn test_report_json_shape() {
    let data = fixtures::portfolio(2, date(2025, 1, 1), 90);
    let report = engine(ReportSettings::default(), ReportFilters::default())
        .build(&data.site_nights, &data.reservations)
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["selection"]["start"], "2025-02-01");
    assert_eq!(json["granularity"], "daily");
    assert_eq!(json["trend"][0]["bucketKey"], "2025-02-01");
    assert!(json["trend"][0].get("yoyOccupancy").is_none());
    assert_eq!(json["weekday"].as_array().unwrap().len(), 7);
    assert!(json["table"][0].get("weekendOccupancyPercentage").is_some());
}

#[test]
fn test_aggregators_share_one_fact_slice_across_threads() {
    let data = fixtures::portfolio(5, date(2025, 1, 1), 120);
    let selection = DateRange::from_nights(date(2025, 1, 1), 120);
    let nights: Vec<SiteNight> = adjust_site_nights_for_blocked_setting(&data.site_nights, false);
    let options = TrendOptions::new(selection, BucketGranularity::Monthly);

    let (donut, weekday, trend, table) = thread::scope(|scope| {
        let donut = scope.spawn(|| calculate_donut_data(&nights, false));
        let weekday = scope.spawn(|| calculate_weekday_data(&nights, None));
        let trend = scope.spawn(|| calculate_trend_data(&nights, options, None));
        let table = scope.spawn(|| calculate_table_data(&nights, &data.reservations));
        (
            donut.join().unwrap(),
            weekday.join().unwrap(),
            trend.join().unwrap(),
            table.join().unwrap(),
        )
    });

    assert_eq!(donut, calculate_donut_data(&nights, false));
    assert_eq!(weekday, calculate_weekday_data(&nights, None));
    assert_eq!(trend, calculate_trend_data(&nights, options, None));
    assert_eq!(trend.len(), 4);
    assert_eq!(table, calculate_table_data(&nights, &data.reservations));
}
