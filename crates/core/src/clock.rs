//! Injected time source.
//!
//! The engines never read the wall clock directly. They take a [`Clock`]
//! and snapshot "today" into a [`CalendarContext`] whenever they reset.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::period::{Month, Quarter};

/// Source of the current instant.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Freezes the clock at noon UTC on the given calendar day.
    ///
    /// Returns `None` for dates chrono cannot represent.
    #[must_use]
    pub fn at_noon(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let noon = date.and_hms_opt(12, 0, 0)?;
        Some(Self(Utc.from_utc_datetime(&noon)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Snapshot of "today" in the toolbar's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    today: NaiveDate,
}

impl CalendarContext {
    /// Captures today's date from `clock` as seen in `tz`.
    #[must_use]
    pub fn capture(clock: &dyn Clock, tz: Tz) -> Self {
        Self {
            today: clock.now().with_timezone(&tz).date_naive(),
        }
    }

    /// Builds a context for a known date.
    #[must_use]
    pub const fn for_date(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Today's date.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Current calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.today.year()
    }

    /// Current calendar month.
    #[must_use]
    pub fn month(&self) -> Month {
        Month::of(self.today)
    }

    /// Current calendar quarter (never the rolling sentinel).
    #[must_use]
    pub fn quarter(&self) -> Quarter {
        Quarter::of(self.today)
    }
}
