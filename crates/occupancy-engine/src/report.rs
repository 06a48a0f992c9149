//! Report pipeline: validated facts in, the four views out.

use crate::aggregator::Aggregator;
use crate::alignment::{yoy_context_range, yoy_range};
use crate::donut::{DonutAggregator, DonutSummary};
use crate::export::{export_file_name, export_table_csv};
use crate::filter::filter_site_nights;
use crate::granularity::{resolve_granularity, tail_context_range, BucketGranularity};
use crate::policy::adjust_site_nights_for_blocked_setting;
use crate::table::{SiteTableRow, TableAggregator};
use crate::trend::{TrendAggregator, TrendBucket, TrendOptions};
use crate::validation::{validate_reservations, validate_site_nights};
use crate::weekday::{WeekdayAggregator, WeekdayProfileEntry};
use occupancy_common::{format_date_range, DateRange, Reservation, Result, SiteNight};
use occupancy_config::{ExportOptions, ReportConfig, SettingsStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    /// Selected nights.
    pub selection: DateRange,
    /// Resolved trend granularity.
    pub granularity: BucketGranularity,
    /// Display header such as `Feb 1 – Mar 3, 2025 (30 nights)`.
    pub headline: String,
    /// Occupied, available and blocked split.
    pub donut: DonutSummary,
    /// Sunday-first weekday profile.
    pub weekday: Vec<WeekdayProfileEntry>,
    /// Trend buckets including tail context.
    pub trend: Vec<TrendBucket>,
    /// Per-site rows.
    pub table: Vec<SiteTableRow>,
}

/// Chart series carried by an export that includes charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Donut chart data.
    pub donut: DonutSummary,
    /// Weekday bar chart data.
    pub weekday: Vec<WeekdayProfileEntry>,
    /// Trend line data.
    pub trend: Vec<TrendBucket>,
}

/// A download-ready export of one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport {
    /// Suggested download name.
    pub file_name: String,
    /// The per-site table as CSV.
    pub table_csv: String,
    /// Chart series, for [`ExportOptions::IncludeCharts`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts: Option<ChartSeries>,
}

impl OccupancyReport {
    /// Per-site table as CSV.
    pub fn to_csv(&self) -> Result<String> {
        export_table_csv(&self.table)
    }

    /// Export named after the selection start, with chart series when requested.
    pub fn export(&self, options: ExportOptions) -> Result<ReportExport> {
        let charts = match options {
            ExportOptions::TableOnly => None,
            ExportOptions::IncludeCharts => Some(ChartSeries {
                donut: self.donut,
                weekday: self.weekday.clone(),
                trend: self.trend.clone(),
            }),
        };

        Ok(ReportExport {
            file_name: export_file_name(self.selection.start),
            table_csv: self.to_csv()?,
            charts,
        })
    }
}

/// Builds reports from one immutable configuration snapshot.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    config: Arc<ReportConfig>,
}

impl ReportEngine {
    /// Create an engine for `config`.
    pub fn new(config: impl Into<Arc<ReportConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// Create an engine for the store's current snapshot.
    pub fn from_store(store: &SettingsStore) -> Self {
        Self::new(store.snapshot())
    }

    /// The snapshot this engine builds with.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Validate `facts` and `reservations`, then build every view.
    ///
    /// Validation runs on the full input; the blocked-inventory policy and the
    /// site filters apply to the selection, the trend context and the
    /// year-over-year ranges alike.
    #[instrument(skip(self, facts, reservations), fields(version = self.config.version, facts = facts.len()))]
    pub fn build(&self, facts: &[SiteNight], reservations: &[Reservation]) -> Result<OccupancyReport> {
        validate_site_nights(facts)?;
        validate_reservations(reservations)?;

        let settings = self.config.settings;
        let filters = &self.config.filters;
        let selection = filters.date_range;

        let adjusted = adjust_site_nights_for_blocked_setting(facts, settings.include_blocked);
        let granularity = resolve_granularity(settings.granularity, &selection);
        let context_range = tail_context_range(&selection, granularity, settings.tails);

        let current = filter_site_nights(&adjusted, filters, &selection);
        let context = filter_site_nights(&adjusted, filters, &context_range);
        let (yoy_current, yoy_context) = if settings.show_yoy {
            (
                Some(filter_site_nights(&adjusted, filters, &yoy_range(&selection))),
                Some(filter_site_nights(
                    &adjusted,
                    filters,
                    &yoy_context_range(&context_range, granularity),
                )),
            )
        } else {
            (None, None)
        };
        debug!(
            "Selected {} site-nights ({} with trend context) for {}",
            current.len(),
            context.len(),
            selection
        );

        let trend_options = TrendOptions {
            selection,
            granularity,
            tails: Some(settings.tails),
            selection_occupancy: settings.selection_occupancy,
        };

        let report = OccupancyReport {
            selection,
            granularity,
            headline: format_date_range(selection.start, selection.end),
            donut: DonutAggregator {
                include_blocked: settings.include_blocked,
            }
            .aggregate(&current),
            weekday: WeekdayAggregator {
                yoy: yoy_current.as_deref(),
            }
            .aggregate(&current),
            trend: TrendAggregator {
                options: trend_options,
                yoy: yoy_context.as_deref(),
            }
            .aggregate(&context),
            table: TableAggregator { reservations }.aggregate(&current),
        };

        info!(
            "Built {} report for {} with {} trend buckets and {} site rows",
            granularity,
            report.headline,
            report.trend.len(),
            report.table.len()
        );
        Ok(report)
    }
}
