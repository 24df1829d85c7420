//! Resolution strategies.
//!
//! Each date mode maps onto exactly one [`ResolutionStrategy`] variant, and
//! each variant onto one pure function producing the inclusive range of
//! calendar days it covers. Day ranges become instants in the configured
//! time zone and are emitted in UTC.

use chrono::{
    DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;
use filterbar_shared::types::DateMode;
use serde::{Deserialize, Serialize};

use super::types::{DateInterval, DateSelection, Month, Quarter};
use crate::clock::CalendarContext;

/// Number of calendar months covered by the rolling window.
pub const FORECAST_MONTHS: u32 = 3;

/// How the current selection is turned into an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Calendar quarter of the selected year.
    CalendarQuarter {
        /// Selected year.
        year: i32,
        /// Calendar quarter (never the rolling window).
        quarter: Quarter,
    },
    /// Three months starting at the current month, in the selected year.
    ForecastWindow {
        /// Selected year.
        year: i32,
        /// Month the window starts at.
        month: Month,
    },
    /// Calendar month of the selected year.
    CalendarMonth {
        /// Selected year.
        year: i32,
        /// Selected month.
        month: Month,
    },
    /// The whole selected year.
    CalendarYear {
        /// Selected year.
        year: i32,
    },
    /// Free range of days, both ends inclusive.
    DayRange {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
}

impl ResolutionStrategy {
    /// Picks the strategy for `mode` given the current selection.
    ///
    /// Quarter wins over month, month over year. A selector with no
    /// sub-selector enabled falls back to the whole year.
    #[must_use]
    pub fn choose(mode: &DateMode, selection: &DateSelection, context: &CalendarContext) -> Self {
        let Some(flags) = mode.selector() else {
            return Self::DayRange {
                start: selection.range_start,
                end: selection.range_end,
            };
        };

        if flags.quarter.is_some() {
            if selection.quarter.is_forecast() {
                Self::ForecastWindow {
                    year: selection.year,
                    month: context.month(),
                }
            } else {
                Self::CalendarQuarter {
                    year: selection.year,
                    quarter: selection.quarter,
                }
            }
        } else if flags.month {
            Self::CalendarMonth {
                year: selection.year,
                month: selection.month,
            }
        } else {
            Self::CalendarYear {
                year: selection.year,
            }
        }
    }

    /// Inclusive first and last day covered by this strategy.
    ///
    /// Returns `None` only for years chrono cannot represent.
    #[must_use]
    pub fn days(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Self::CalendarQuarter { year, quarter } => quarter_days(year, quarter),
            Self::ForecastWindow { year, month } => forecast_days(year, month),
            Self::CalendarMonth { year, month } => month_span(year, month.number(), 1),
            Self::CalendarYear { year } => month_span(year, 1, 12),
            Self::DayRange { start, end } => Some(range_days(start, end)),
        }
    }

    /// Resolves to instants, start-of-day and end-of-day taken in `tz`.
    #[must_use]
    pub fn resolve(&self, tz: Tz) -> Option<DateInterval> {
        let (first, last) = self.days()?;
        Some(day_interval(first, last, tz))
    }
}

/// Days of a calendar quarter.
fn quarter_days(year: i32, quarter: Quarter) -> Option<(NaiveDate, NaiveDate)> {
    let first = quarter.first_month()?;
    month_span(year, first.number(), 3)
}

/// Days of the rolling window starting at `month` of `year`.
fn forecast_days(year: i32, month: Month) -> Option<(NaiveDate, NaiveDate)> {
    month_span(year, month.number(), FORECAST_MONTHS)
}

/// Days of a free range, reversed bounds swapped.
fn range_days(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    if start <= end { (start, end) } else { (end, start) }
}

/// First day of `month` through the last day of the month `count - 1`
/// months later, rolling into the following year when needed.
fn month_span(year: i32, month: u32, count: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let months_after = month - 1 + count;
    let next_year = year.checked_add(i32::try_from(months_after / 12).ok()?)?;
    let after = NaiveDate::from_ymd_opt(next_year, months_after % 12 + 1, 1)?;
    Some((first, after.pred_opt()?))
}

/// Interval from the start of `first` to the last millisecond of `last`.
#[must_use]
pub fn day_interval(first: NaiveDate, last: NaiveDate, tz: Tz) -> DateInterval {
    DateInterval {
        start: localize(tz, first.and_time(NaiveTime::MIN), Edge::Start),
        end: localize(tz, last.and_time(end_of_day()), Edge::End),
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

/// Maps a local wall-clock time to UTC.
///
/// Ambiguous times (clocks turned back) take the earlier instant for a start
/// and the later one for an end, so the interval never shrinks. Times that do
/// not exist (clocks turned forward) move to the first instant after the gap.
fn localize(tz: Tz, local: NaiveDateTime, edge: Edge) -> DateTime<Utc> {
    let mapped = tz.from_local_datetime(&local);
    let chosen = match edge {
        Edge::Start => mapped.earliest(),
        Edge::End => mapped.latest(),
    };
    if let Some(instant) = chosen {
        return instant.with_timezone(&Utc);
    }

    // Gaps are at most a few hours wide; step forward 15 minutes at a time.
    (1..=16)
        .filter_map(|step| local.checked_add_signed(TimeDelta::minutes(15 * step)))
        .find_map(|shifted| tz.from_local_datetime(&shifted).earliest())
        .map_or_else(
            || Utc.from_utc_datetime(&local),
            |instant| {
                let shifted = instant.with_timezone(&Utc);
                match edge {
                    Edge::Start => shifted,
                    // The end must stay before the following period's start.
                    Edge::End => shifted - TimeDelta::milliseconds(1),
                }
            },
        )
}

/// Canonical wire form of an instant: UTC, millisecond precision, `Z` suffix.
#[must_use]
pub fn canonical_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether both the year and the one after it are representable, so every
/// strategy for `year` resolves.
#[must_use]
pub fn is_resolvable_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some()
        && year
            .checked_add(1)
            .and_then(|next| NaiveDate::from_ymd_opt(next, 12, 31))
            .is_some()
}
