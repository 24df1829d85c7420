//! Toolbar coordinator.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use filterbar_shared::config::ToolbarConfig;
use filterbar_shared::types::{ItemId, Tier};
use tracing::{debug, info};

use super::event::ToolbarEvent;
use super::store::FilterStore;
use crate::clock::Clock;
use crate::hierarchy::{HierarchyEngine, OptionCatalog, OptionGroup, RawCatalog, SelectedItem};
use crate::period::{DateEngine, DateInterval, Month, Quarter};

/// One filter toolbar instance.
///
/// Owns both engines and the store they write to. Every store write happens
/// after the engine transition that caused it has completed, so the store
/// never sees a half-cascaded state.
#[derive(Debug)]
pub struct Toolbar<S: FilterStore> {
    config: ToolbarConfig,
    clock: Arc<dyn Clock>,
    tz: Tz,
    hierarchy: HierarchyEngine,
    dates: Option<DateEngine>,
    route: Option<String>,
    store: S,
}

impl<S: FilterStore> Toolbar<S> {
    /// Builds a toolbar and publishes its initial date.
    pub fn new(config: ToolbarConfig, clock: Arc<dyn Clock>, tz: Tz, mut store: S) -> Self {
        let hierarchy = HierarchyEngine::new(config.tier_modes(), config.root_key.as_str());
        let dates = config
            .date_mode()
            .map(|mode| DateEngine::new(mode, Arc::clone(&clock), tz));
        publish_date(&mut store, dates.as_ref().map(DateEngine::interval));

        Self {
            config,
            clock,
            tz,
            hierarchy,
            dates,
            route: None,
            store,
        }
    }

    /// Instance configuration.
    #[must_use]
    pub const fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    /// Hierarchy engine.
    #[must_use]
    pub const fn hierarchy(&self) -> &HierarchyEngine {
        &self.hierarchy
    }

    /// Date engine, if a date filter is configured.
    #[must_use]
    pub const fn dates(&self) -> Option<&DateEngine> {
        self.dates.as_ref()
    }

    /// Store the toolbar writes to.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the toolbar and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Replaces the configuration, starting a new instance lifetime.
    ///
    /// Tiers with a committed selection are cleared in the store first. The
    /// current catalog is carried over.
    pub fn apply_config(&mut self, config: ToolbarConfig) {
        let cleared = self.hierarchy.reset();
        self.publish_tiers(&cleared);

        let mut hierarchy = HierarchyEngine::new(config.tier_modes(), config.root_key.as_str());
        hierarchy.set_options(self.hierarchy.catalog().clone());
        self.hierarchy = hierarchy;

        self.dates = config
            .date_mode()
            .map(|mode| DateEngine::new(mode, Arc::clone(&self.clock), self.tz));
        publish_date(
            &mut self.store,
            self.dates.as_ref().map(DateEngine::interval),
        );

        info!(
            data_filter = config.data_filter.is_some(),
            date_filter = config.date_filter.is_some(),
            "Toolbar configuration applied"
        );
        self.config = config;
    }

    /// Normalizes and installs a catalog from the catalog provider.
    pub fn set_catalog(&mut self, raw: &RawCatalog) {
        let catalog = OptionCatalog::from_raw(raw, self.config.root_key.as_str());
        self.hierarchy.set_options(catalog);
    }

    /// Whether the selector of `tier` can be interacted with.
    #[must_use]
    pub fn is_available(&self, tier: Tier) -> bool {
        self.config.show_data_filters && self.hierarchy.is_available(tier)
    }

    /// Option groups of `tier`; empty while the tier is unavailable.
    #[must_use]
    pub fn options_for(&self, tier: Tier) -> Vec<OptionGroup> {
        if !self.is_available(tier) {
            return Vec::new();
        }
        self.hierarchy.options_for(tier)
    }

    /// Picks `item` at `tier`.
    pub fn select(&mut self, tier: Tier, item: &SelectedItem) {
        if !self.config.show_data_filters {
            debug!(tier = %tier, "Ignoring selection, data filters hidden");
            return;
        }
        let changed = self.hierarchy.select(tier, item);
        self.publish_tiers(&changed);
    }

    /// Unpicks `id` at a multiple-mode `tier`.
    pub fn deselect(&mut self, tier: Tier, id: &ItemId) {
        self.hierarchy.deselect(tier, id);
    }

    /// Closes the selector of `tier`, committing its pending set.
    pub fn blur(&mut self, tier: Tier) {
        let changed = self.hierarchy.commit(tier);
        self.publish_tiers(&changed);
    }

    /// Picks a year.
    pub fn set_year(&mut self, year: i32) {
        let interval = self.dates.as_mut().and_then(|dates| dates.set_year(year));
        self.publish_accepted(interval);
    }

    /// Picks a quarter by number (0 for the rolling window).
    pub fn set_quarter(&mut self, quarter: u32) {
        let quarter = match Quarter::new(quarter) {
            Ok(quarter) => quarter,
            Err(err) => {
                debug!(error = %err, "Ignoring quarter");
                return;
            }
        };
        let interval = self
            .dates
            .as_mut()
            .and_then(|dates| dates.set_quarter(quarter));
        self.publish_accepted(interval);
    }

    /// Picks a month by number.
    pub fn set_month(&mut self, month: u32) {
        let month = match Month::new(month) {
            Ok(month) => month,
            Err(err) => {
                debug!(error = %err, "Ignoring month");
                return;
            }
        };
        let interval = self
            .dates
            .as_mut()
            .and_then(|dates| dates.set_month(month));
        self.publish_accepted(interval);
    }

    /// Picks a day range.
    pub fn set_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        let interval = self
            .dates
            .as_mut()
            .and_then(|dates| dates.set_range(start, end));
        self.publish_accepted(interval);
    }

    /// Reacts to navigation.
    ///
    /// On a new path every tier is cleared in the store, the hierarchy is
    /// reset and the date goes back to its default.
    pub fn route_changed(&mut self, path: &str) {
        if self.route.as_deref() == Some(path) {
            return;
        }
        info!(path, "Route changed, resetting filters");
        self.route = Some(path.to_string());

        self.hierarchy.reset();
        for tier in Tier::ALL {
            self.store.set_selection(tier, &[]);
        }

        let interval = self.dates.as_mut().map(DateEngine::reset);
        publish_date(&mut self.store, interval);
    }

    /// Current route, once one has been seen.
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// Whether the quarter picker is shown on the current route.
    #[must_use]
    pub fn is_quarter_visible(&self) -> bool {
        let configured = self
            .dates
            .as_ref()
            .is_some_and(|dates| dates.mode().quarter_selector().is_some());
        let hidden = self
            .route
            .as_ref()
            .is_some_and(|route| self.config.hide_quarter_on.contains(route));
        configured && !hidden
    }

    /// Handles one event.
    pub fn dispatch(&mut self, event: ToolbarEvent) {
        match event {
            ToolbarEvent::SetCatalog { catalog } => self.set_catalog(&catalog),
            ToolbarEvent::Select { tier, id, name } => {
                self.select(tier, &SelectedItem::new(id, name));
            }
            ToolbarEvent::Deselect { tier, id } => self.deselect(tier, &id),
            ToolbarEvent::Blur { tier } => self.blur(tier),
            ToolbarEvent::SetYear { year } => self.set_year(year),
            ToolbarEvent::SetQuarter { quarter } => self.set_quarter(quarter),
            ToolbarEvent::SetMonth { month } => self.set_month(month),
            ToolbarEvent::SetRange { start, end } => self.set_range(start, end),
            ToolbarEvent::RouteChanged { path } => self.route_changed(&path),
        }
    }

    fn publish_tiers(&mut self, tiers: &[Tier]) {
        for &tier in tiers {
            self.store.set_selection(tier, self.hierarchy.committed(tier));
        }
    }

    fn publish_accepted(&mut self, interval: Option<DateInterval>) {
        if let Some(interval) = interval {
            self.store.set_date(&interval);
        }
    }
}

fn publish_date<S: FilterStore>(store: &mut S, interval: Option<DateInterval>) {
    match interval {
        Some(interval) => store.set_date(&interval),
        None => store.reset_date(),
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
