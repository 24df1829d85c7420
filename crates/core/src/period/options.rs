//! Period option availability.
//!
//! Future periods of the current year are listed but disabled; days after
//! today cannot be picked in range mode.

use chrono::NaiveDate;
use filterbar_shared::types::{QuarterSelector, YearSelector};

use super::types::{DateOption, Month, Quarter};
use crate::clock::CalendarContext;

/// Years offered in the year selector, ascending.
#[must_use]
pub fn year_options(kind: YearSelector, context: &CalendarContext) -> Vec<DateOption<i32>> {
    let current = context.year();
    let years = match kind {
        YearSelector::Retrospective => current.saturating_sub(4)..=current,
        YearSelector::Forecast => current.saturating_sub(1)..=current.saturating_add(1),
        YearSelector::CurrentReadOnly => current..=current,
    };
    years
        .map(|year| DateOption::new(year, year.to_string()))
        .collect()
}

/// Quarters offered for `selected_year`.
///
/// The rolling window comes first unless the selector is
/// [`QuarterSelector::Base`].
#[must_use]
pub fn quarter_options(
    kind: QuarterSelector,
    selected_year: i32,
    context: &CalendarContext,
) -> Vec<DateOption<Quarter>> {
    let in_current_year = selected_year == context.year();
    let current = context.quarter();

    Quarter::all()
        .filter(|quarter| !(quarter.is_forecast() && kind == QuarterSelector::Base))
        .map(|quarter| {
            let future = in_current_year && !quarter.is_forecast() && quarter > current;
            DateOption::new(quarter, quarter.label()).disabled_if(future)
        })
        .collect()
}

/// Months offered for `selected_year`.
#[must_use]
pub fn month_options(selected_year: i32, context: &CalendarContext) -> Vec<DateOption<Month>> {
    let in_current_year = selected_year == context.year();
    let current = context.month();

    Month::all()
        .map(|month| {
            DateOption::new(month, month.label()).disabled_if(in_current_year && month > current)
        })
        .collect()
}

/// Whether `date` may be picked in range mode.
#[must_use]
pub fn is_date_selectable(date: NaiveDate, context: &CalendarContext) -> bool {
    date <= context.today()
}

/// Returns true when `value` is listed and enabled in `options`.
pub(crate) fn is_enabled<T: PartialEq>(options: &[DateOption<T>], value: &T) -> bool {
    options
        .iter()
        .any(|option| option.value == *value && !option.disabled)
}
