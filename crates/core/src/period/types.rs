//! Period value types.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use filterbar_shared::error::{FilterError, FilterResult};
use serde::{Deserialize, Serialize};

const QUARTER_LABELS: [&str; 5] = ["30/90", "I КВ", "II КВ", "III КВ", "IV КВ"];

const MONTH_LABELS: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Calendar quarter 1..=4, or the rolling 30/90 window (0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quarter(u8);

impl Quarter {
    /// The rolling three-month forecast window.
    pub const FORECAST: Self = Self(0);

    /// Validates a quarter number (0 is the rolling window).
    pub fn new(number: u32) -> FilterResult<Self> {
        match u8::try_from(number) {
            Ok(n) if n <= 4 => Ok(Self(n)),
            _ => Err(FilterError::InvalidQuarter(number)),
        }
    }

    /// Calendar quarter containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        // month0 is 0..=11, so the quotient fits in a u8.
        Self(u8::try_from(date.month0() / 3 + 1).unwrap_or(1))
    }

    /// Quarter number, 0 for the rolling window.
    #[must_use]
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Returns true for the rolling window.
    #[must_use]
    pub const fn is_forecast(self) -> bool {
        self.0 == 0
    }

    /// First month of a calendar quarter; `None` for the rolling window.
    #[must_use]
    pub fn first_month(self) -> Option<Month> {
        if self.is_forecast() {
            return None;
        }
        Month::new(u32::from(self.0 - 1) * 3 + 1).ok()
    }

    /// Selector label.
    #[must_use]
    pub fn label(self) -> &'static str {
        QUARTER_LABELS[usize::from(self.0)]
    }

    /// The rolling window followed by the four calendar quarters.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=4).map(Self)
    }
}

impl TryFrom<u32> for Quarter {
    type Error = FilterError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quarter> for u32 {
    fn from(quarter: Quarter) -> Self {
        quarter.number()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar month 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Month(u8);

impl Month {
    /// Validates a month number.
    pub fn new(number: u32) -> FilterResult<Self> {
        match u8::try_from(number) {
            Ok(n) if (1..=12).contains(&n) => Ok(Self(n)),
            _ => Err(FilterError::InvalidMonth(number)),
        }
    }

    /// Month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self(u8::try_from(date.month()).unwrap_or(1))
    }

    /// Month number 1..=12.
    #[must_use]
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Selector label.
    #[must_use]
    pub fn label(self) -> &'static str {
        MONTH_LABELS[usize::from(self.0 - 1)]
    }

    /// January through December.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=12).map(Self)
    }
}

impl TryFrom<u32> for Month {
    type Error = FilterError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Currently chosen period values. Only the fields relevant to the active
/// date mode are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    /// Selected year.
    pub year: i32,
    /// Selected quarter or rolling window.
    pub quarter: Quarter,
    /// Selected month.
    pub month: Month,
    /// First day of the free range.
    pub range_start: NaiveDate,
    /// Last day of the free range.
    pub range_end: NaiveDate,
}

/// Resolved instant pair, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    /// First instant of the period.
    #[serde(rename = "dateStart", with = "canonical")]
    pub start: DateTime<Utc>,
    /// Last instant (millisecond) of the period.
    #[serde(rename = "dateEnd", with = "canonical")]
    pub end: DateTime<Utc>,
}

impl DateInterval {
    /// Canonical timestamp of the start.
    #[must_use]
    pub fn date_start(&self) -> String {
        super::resolve::canonical_timestamp(self.start)
    }

    /// Canonical timestamp of the end.
    #[must_use]
    pub fn date_end(&self) -> String {
        super::resolve::canonical_timestamp(self.end)
    }
}

mod canonical {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::period::resolve::canonical_timestamp(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// One entry of a period selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOption<T> {
    /// Option value.
    pub value: T,
    /// Display label.
    pub label: String,
    /// Whether the option is shown but cannot be picked.
    pub disabled: bool,
}

impl<T> DateOption<T> {
    /// Creates an enabled option.
    #[must_use]
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: false,
        }
    }

    /// Marks the option as disabled when `disabled` is true.
    #[must_use]
    pub fn disabled_if(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_quarter_validation() {
        assert_eq!(Quarter::new(0), Ok(Quarter::FORECAST));
        assert_eq!(Quarter::new(4).unwrap().number(), 4);
        assert_eq!(Quarter::new(5), Err(FilterError::InvalidQuarter(5)));
        assert_eq!(Quarter::new(300), Err(FilterError::InvalidQuarter(300)));
    }

    #[test]
    fn test_quarter_of_date() {
        let date = |m| NaiveDate::from_ymd_opt(2026, m, 10).unwrap();
        assert_eq!(Quarter::of(date(1)).number(), 1);
        assert_eq!(Quarter::of(date(3)).number(), 1);
        assert_eq!(Quarter::of(date(4)).number(), 2);
        assert_eq!(Quarter::of(date(9)).number(), 3);
        assert_eq!(Quarter::of(date(12)).number(), 4);
    }

    #[test]
    fn test_quarter_first_month_and_labels() {
        assert_eq!(Quarter::FORECAST.first_month(), None);
        assert_eq!(Quarter::new(3).unwrap().first_month().unwrap().number(), 7);
        assert_eq!(Quarter::FORECAST.label(), "30/90");
        assert_eq!(Quarter::new(2).unwrap().to_string(), "II КВ");
        assert_eq!(Quarter::all().count(), 5);
    }

    #[test]
    fn test_month_validation_and_labels() {
        assert_eq!(Month::new(0), Err(FilterError::InvalidMonth(0)));
        assert_eq!(Month::new(13), Err(FilterError::InvalidMonth(13)));
        assert_eq!(Month::new(1).unwrap().label(), "Январь");
        assert_eq!(Month::new(12).unwrap().label(), "Декабрь");
        assert_eq!(
            Month::all().map(Month::number).collect::<Vec<_>>(),
            (1..=12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_quarter_serde_validates() {
        let quarter: Quarter = serde_json::from_str("2").unwrap();
        assert_eq!(quarter.number(), 2);
        assert!(serde_json::from_str::<Quarter>("9").is_err());
        assert_eq!(serde_json::to_string(&Quarter::FORECAST).unwrap(), "0");
        assert!(serde_json::from_str::<Month>("13").is_err());
    }

    #[test]
    fn test_interval_serializes_canonically() {
        let interval = DateInterval {
            start: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 8, 31, 23, 59, 59).unwrap()
                + chrono::TimeDelta::milliseconds(999),
        };

        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(
            json,
            r#"{"dateStart":"2026-06-01T00:00:00.000Z","dateEnd":"2026-08-31T23:59:59.999Z"}"#
        );

        let parsed: DateInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, interval);
    }
}
