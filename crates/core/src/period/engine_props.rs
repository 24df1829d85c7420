//! Property-based tests for DateEngine.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, TimeDelta};
use filterbar_shared::types::{DateMode, QuarterSelector, SelectorFlags, YearSelector};
use proptest::prelude::*;

use super::engine::DateEngine;
use super::types::{Month, Quarter};
use crate::clock::{Clock, FixedClock};

fn arb_today() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_tz() -> impl Strategy<Value = chrono_tz::Tz> {
    prop_oneof![
        Just(chrono_tz::UTC),
        Just(chrono_tz::Europe::Moscow),
        Just(chrono_tz::Asia::Yekaterinburg),
        Just(chrono_tz::America::New_York),
    ]
}

fn arb_mode() -> impl Strategy<Value = DateMode> {
    let year = prop_oneof![
        Just(None),
        Just(Some(YearSelector::Retrospective)),
        Just(Some(YearSelector::Forecast)),
    ];
    let quarter = prop_oneof![
        Just(None),
        Just(Some(QuarterSelector::Base)),
        Just(Some(QuarterSelector::Forecast)),
        Just(Some(QuarterSelector::Standard)),
    ];
    prop_oneof![
        (year, quarter, any::<bool>()).prop_map(|(year, quarter, month)| {
            DateMode::Selector(SelectorFlags {
                year,
                quarter,
                month,
            })
        }),
        Just(DateMode::Range),
    ]
}

fn clock_on(today: NaiveDate) -> Arc<dyn Clock> {
    Arc::new(FixedClock::at_noon(today.year(), today.month(), today.day()).unwrap())
}

#[derive(Debug, Clone)]
enum Op {
    Year(i32),
    Quarter(u32),
    Month(u32),
    Range(Option<i64>, Option<i64>),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-3i32..=2).prop_map(Op::Year),
        (0u32..=4).prop_map(Op::Quarter),
        (1u32..=12).prop_map(Op::Month),
        (proptest::option::of(-60i64..5), proptest::option::of(-60i64..5))
            .prop_map(|(a, b)| Op::Range(a, b)),
    ]
}

fn apply(engine: &mut DateEngine, op: &Op) {
    let today = engine.context().today();
    match *op {
        Op::Year(offset) => {
            engine.set_year(today.year() + offset);
        }
        Op::Quarter(q) => {
            engine.set_quarter(Quarter::new(q).unwrap());
        }
        Op::Month(m) => {
            engine.set_month(Month::new(m).unwrap());
        }
        Op::Range(a, b) => {
            let shift = |days: i64| today + TimeDelta::days(days);
            engine.set_range(a.map(shift), b.map(shift));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// resolve() is a pure function of the selection and always yields a
    /// non-empty interval.
    #[test]
    fn prop_resolve_is_idempotent(
        today in arb_today(),
        tz in arb_tz(),
        mode in arb_mode(),
        ops in proptest::collection::vec(arb_op(), 0..20),
    ) {
        let mut engine = DateEngine::new(mode, clock_on(today), tz);
        for op in &ops {
            apply(&mut engine, op);
            let first = engine.resolve();
            prop_assert_eq!(first, engine.resolve());
            prop_assert_eq!(first, engine.interval());
            prop_assert!(first.start < first.end);
        }
    }

    /// The rolling quarter always covers three calendar months starting on
    /// the first day of the current month.
    #[test]
    fn prop_rolling_quarter_spans_three_months(today in arb_today()) {
        let engine = DateEngine::new(
            DateMode::quarter(YearSelector::Forecast, QuarterSelector::Forecast),
            clock_on(today),
            chrono_tz::UTC,
        );

        let start = engine.interval().start.date_naive();
        let end = engine.interval().end.date_naive();
        prop_assert_eq!(start, today.with_day(1).unwrap());

        let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
        prop_assert_eq!(months, 2);
        prop_assert!(end.succ_opt().unwrap().day() == 1);
        let date_end = engine.interval().date_end();
        prop_assert_eq!(date_end.get(11..), Some("23:59:59.999Z"));
    }

    /// Returning to the current year never leaves a future month or quarter
    /// selected.
    #[test]
    fn prop_current_year_has_no_future_period(
        today in arb_today(),
        month in 1u32..=12,
        quarter in 1u32..=4,
    ) {
        let flags = SelectorFlags {
            year: Some(YearSelector::Retrospective),
            quarter: Some(QuarterSelector::Standard),
            month: true,
        };
        let mut engine =
            DateEngine::new(DateMode::Selector(flags), clock_on(today), chrono_tz::UTC);
        engine.set_year(today.year() - 1);
        engine.set_month(Month::new(month).unwrap());
        engine.set_quarter(Quarter::new(quarter).unwrap());
        engine.set_year(today.year());

        let selection = engine.selection();
        prop_assert!(selection.month <= Month::of(today));
        prop_assert!(selection.quarter <= Quarter::of(today));
        prop_assert_eq!(selection.month.number(), month.min(today.month()));
    }

    /// Any range with a missing or future bound collapses to today.
    #[test]
    fn prop_invalid_range_resets_to_today(
        today in arb_today(),
        tz in arb_tz(),
        start in proptest::option::of(-30i64..30),
        end in proptest::option::of(-30i64..30),
    ) {
        let mut engine = DateEngine::new(DateMode::Range, clock_on(today), tz);
        let shift = |days: i64| today + TimeDelta::days(days);
        let valid = matches!((start, end), (Some(a), Some(b)) if a <= 0 && b <= 0);

        engine.set_range(start.map(shift), end.map(shift));

        let selection = engine.selection();
        if valid {
            prop_assert!(selection.range_start <= selection.range_end);
            prop_assert!(selection.range_end <= today);
        } else {
            prop_assert_eq!(selection.range_start, today);
            prop_assert_eq!(selection.range_end, today);
        }
    }
}
