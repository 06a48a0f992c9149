//! Versioned report configuration with arc-swap for lock-free reads.

use crate::schema::{Config, ReportFilters, ReportSettings};
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Immutable snapshot of everything that parameterizes one report build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportConfig {
    /// Monotonic version, bumped on every change.
    pub version: u64,
    /// Report settings.
    pub settings: ReportSettings,
    /// Selection filters.
    pub filters: ReportFilters,
}

impl ReportConfig {
    /// Version 0 built from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            version: 0,
            settings: config.report,
            filters: config.filters.clone(),
        }
    }
}

/// Single owner of the current [`ReportConfig`].
///
/// Readers take `Arc` snapshots without locking; writers are serialized and
/// each produces the next version.
pub struct SettingsStore {
    current: ArcSwap<ReportConfig>,
    write_lock: Mutex<()>,
}

impl SettingsStore {
    /// Creates a store holding `config` as its first version.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
            write_lock: Mutex::new(()),
        }
    }

    /// Gets the current snapshot.
    pub fn snapshot(&self) -> Arc<ReportConfig> {
        self.current.load_full()
    }

    /// Applies `update` to a copy of the current settings and publishes it.
    pub fn update_settings<F>(&self, update: F) -> Arc<ReportConfig>
    where
        F: FnOnce(&mut ReportSettings),
    {
        self.publish(|next| update(&mut next.settings))
    }

    /// Applies `update` to a copy of the current filters and publishes it.
    pub fn update_filters<F>(&self, update: F) -> Arc<ReportConfig>
    where
        F: FnOnce(&mut ReportFilters),
    {
        self.publish(|next| update(&mut next.filters))
    }

    /// Restores default settings and filters as a new version.
    pub fn reset(&self) -> Arc<ReportConfig> {
        self.publish(|next| {
            next.settings = ReportSettings::default();
            next.filters = ReportFilters::default();
        })
    }

    fn publish<F>(&self, change: F) -> Arc<ReportConfig>
    where
        F: FnOnce(&mut ReportConfig),
    {
        // The guarded value is (), so a poisoned lock holds no broken state
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut next = ReportConfig::clone(&self.current.load());
        change(&mut next);
        next.version += 1;

        let next = Arc::new(next);
        self.current.store(Arc::clone(&next));
        debug!("Published report configuration version {}", next.version);
        next
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}
