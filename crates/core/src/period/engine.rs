//! Stateful date engine.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use filterbar_shared::types::{DateMode, QuarterSelector, YearSelector};
use tracing::{debug, warn};

use super::options::{self, is_enabled};
use super::resolve::{ResolutionStrategy, day_interval, is_resolvable_year};
use super::types::{DateInterval, DateOption, DateSelection, Month, Quarter};
use crate::clock::{CalendarContext, Clock};

/// Date resolution engine.
///
/// Keeps the chosen year / quarter / month / range for one [`DateMode`] and
/// the interval resolved from it. "Today" is captured from the clock on
/// construction and on every reset, so resolution never depends on when it
/// is called.
///
/// Setters return the freshly resolved interval when the input was accepted
/// and `None` when it was ignored.
#[derive(Debug, Clone)]
pub struct DateEngine {
    mode: DateMode,
    tz: Tz,
    clock: Arc<dyn Clock>,
    context: CalendarContext,
    selection: DateSelection,
    interval: DateInterval,
}

impl DateEngine {
    /// Creates an engine for `mode` with defaults taken from `clock`.
    #[must_use]
    pub fn new(mode: DateMode, clock: Arc<dyn Clock>, tz: Tz) -> Self {
        let context = CalendarContext::capture(clock.as_ref(), tz);
        let today = context.today();
        let mut engine = Self {
            mode,
            tz,
            clock,
            context,
            selection: default_selection(&mode, &context),
            interval: day_interval(today, today, tz),
        };
        engine.interval = engine.resolve();
        engine
    }

    /// Active date mode.
    #[must_use]
    pub const fn mode(&self) -> &DateMode {
        &self.mode
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &DateSelection {
        &self.selection
    }

    /// "Today" as of the last reset.
    #[must_use]
    pub const fn context(&self) -> &CalendarContext {
        &self.context
    }

    /// Time zone used for day boundaries.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// Last resolved interval.
    #[must_use]
    pub const fn interval(&self) -> DateInterval {
        self.interval
    }

    /// Strategy the current selection resolves with.
    #[must_use]
    pub fn strategy(&self) -> ResolutionStrategy {
        ResolutionStrategy::choose(&self.mode, &self.selection, &self.context)
    }

    /// Switches to `mode` and resets the selection.
    pub fn configure(&mut self, mode: DateMode) -> DateInterval {
        self.mode = mode;
        self.reset()
    }

    /// Re-reads today from the clock and restores the default selection.
    pub fn reset(&mut self) -> DateInterval {
        self.context = CalendarContext::capture(self.clock.as_ref(), self.tz);
        self.selection = default_selection(&self.mode, &self.context);
        debug!(today = %self.context.today(), "Date selection reset");
        self.refresh()
    }

    /// Computes the interval for the current selection.
    ///
    /// Pure: calling it repeatedly without changes gives the same interval.
    #[must_use]
    pub fn resolve(&self) -> DateInterval {
        let strategy = self.strategy();
        strategy.resolve(self.tz).unwrap_or_else(|| {
            warn!(?strategy, "Unresolvable date selection, falling back to today");
            let today = self.context.today();
            day_interval(today, today, self.tz)
        })
    }

    /// Selects `year`.
    ///
    /// Moving to the current year pulls a future month or quarter back to the
    /// current one. Only years listed in [`Self::year_options`] are accepted,
    /// so nothing changes without a year selector and a read-only selector
    /// stays on the current year.
    pub fn set_year(&mut self, year: i32) -> Option<DateInterval> {
        if !is_resolvable_year(year) {
            debug!(year, "Ignoring unrepresentable year");
            return None;
        }
        if !is_enabled(&self.year_options(), &year) {
            debug!(year, "Ignoring year not offered by the selector");
            return None;
        }

        if year == self.context.year() {
            let current_month = self.context.month();
            if self.selection.month > current_month {
                debug!(month = %self.selection.month, "Pulling future month back to current");
                self.selection.month = current_month;
            }
            let current_quarter = self.context.quarter();
            if !self.selection.quarter.is_forecast() && self.selection.quarter > current_quarter {
                debug!(quarter = %self.selection.quarter, "Pulling future quarter back to current");
                self.selection.quarter = current_quarter;
            }
        }

        self.selection.year = year;
        Some(self.refresh())
    }

    /// Selects `quarter` if it is an enabled quarter option.
    pub fn set_quarter(&mut self, quarter: Quarter) -> Option<DateInterval> {
        if !is_enabled(&self.quarter_options(), &quarter) {
            debug!(quarter = quarter.number(), "Ignoring unavailable quarter");
            return None;
        }
        self.selection.quarter = quarter;
        Some(self.refresh())
    }

    /// Selects `month` if it is an enabled month option.
    pub fn set_month(&mut self, month: Month) -> Option<DateInterval> {
        if !is_enabled(&self.month_options(), &month) {
            debug!(month = month.number(), "Ignoring unavailable month");
            return None;
        }
        self.selection.month = month;
        Some(self.refresh())
    }

    /// Selects a day range.
    ///
    /// A missing bound or a bound after today resets the range to
    /// today-today. Reversed bounds are swapped. Ignored outside range mode.
    pub fn set_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<DateInterval> {
        if !self.mode.is_range() {
            debug!("Ignoring day range, date filter uses selectors");
            return None;
        }
        let (start, end) = match (start, end) {
            (Some(start), Some(end))
                if self.is_date_selectable(start) && self.is_date_selectable(end) =>
            {
                (start.min(end), start.max(end))
            }
            _ => {
                debug!(?start, ?end, "Invalid range, resetting to today");
                let today = self.context.today();
                (today, today)
            }
        };
        self.selection.range_start = start;
        self.selection.range_end = end;
        Some(self.refresh())
    }

    /// Years offered by the year selector; empty when it is not shown.
    #[must_use]
    pub fn year_options(&self) -> Vec<DateOption<i32>> {
        self.mode
            .selector()
            .and_then(|flags| flags.year)
            .map(|kind| options::year_options(kind, &self.context))
            .unwrap_or_default()
    }

    /// Whether the year selector is shown but locked to the current year.
    #[must_use]
    pub fn is_year_read_only(&self) -> bool {
        self.mode
            .selector()
            .is_some_and(|flags| flags.year == Some(YearSelector::CurrentReadOnly))
    }

    /// Quarters offered for the selected year; empty when not shown.
    #[must_use]
    pub fn quarter_options(&self) -> Vec<DateOption<Quarter>> {
        self.mode
            .quarter_selector()
            .map(|kind| options::quarter_options(kind, self.selection.year, &self.context))
            .unwrap_or_default()
    }

    /// Months offered for the selected year; empty when not shown.
    #[must_use]
    pub fn month_options(&self) -> Vec<DateOption<Month>> {
        if self.mode.selector().is_some_and(|flags| flags.month) {
            options::month_options(self.selection.year, &self.context)
        } else {
            Vec::new()
        }
    }

    /// Whether `date` may be picked in range mode.
    #[must_use]
    pub fn is_date_selectable(&self, date: NaiveDate) -> bool {
        options::is_date_selectable(date, &self.context)
    }

    fn refresh(&mut self) -> DateInterval {
        self.interval = self.resolve();
        debug!(
            start = %self.interval.date_start(),
            end = %self.interval.date_end(),
            "Date interval resolved"
        );
        self.interval
    }
}

/// Defaults: current year, month and quarter (the rolling window for a
/// forecast quarter selector), and a today-today range.
fn default_selection(mode: &DateMode, context: &CalendarContext) -> DateSelection {
    let quarter = match mode.quarter_selector() {
        Some(QuarterSelector::Forecast) => Quarter::FORECAST,
        _ => context.quarter(),
    };
    let today = context.today();
    DateSelection {
        year: context.year(),
        quarter,
        month: context.month(),
        range_start: today,
        range_end: today,
    }
}
