//! Inputs the toolbar reacts to.

use chrono::NaiveDate;
use filterbar_shared::types::{ItemId, Tier};
use serde::{Deserialize, Serialize};

use crate::hierarchy::RawCatalog;

/// A catalog refresh, a selector interaction or a navigation signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ToolbarEvent {
    /// The catalog provider sent a new catalog.
    SetCatalog {
        /// Wire catalog.
        catalog: RawCatalog,
    },
    /// An option was picked.
    Select {
        /// Tier of the selector.
        tier: Tier,
        /// Picked item id.
        id: ItemId,
        /// Picked item name.
        name: String,
    },
    /// An option was unpicked in a multiple-mode selector.
    Deselect {
        /// Tier of the selector.
        tier: Tier,
        /// Unpicked item id.
        id: ItemId,
    },
    /// A selector lost focus.
    Blur {
        /// Tier of the selector.
        tier: Tier,
    },
    /// A year was picked.
    SetYear {
        /// Year.
        year: i32,
    },
    /// A quarter was picked (0 for the rolling window).
    SetQuarter {
        /// Quarter number.
        quarter: u32,
    },
    /// A month was picked.
    SetMonth {
        /// Month number 1..=12.
        month: u32,
    },
    /// A day range was picked. Missing bounds reset the range.
    SetRange {
        /// First day.
        #[serde(default)]
        start: Option<NaiveDate>,
        /// Last day.
        #[serde(default)]
        end: Option<NaiveDate>,
    },
    /// The active route changed.
    RouteChanged {
        /// New route path.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_script() {
        let events: Vec<ToolbarEvent> = serde_json::from_str(
            r#"[
                {"event":"select","tier":"subsidiary","id":"s1","name":"North"},
                {"event":"blur","tier":"field"},
                {"event":"set_quarter","quarter":0},
                {"event":"set_range","start":"2026-06-01"},
                {"event":"route_changed","path":"/reports"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events[0],
            ToolbarEvent::Select {
                tier: Tier::Subsidiary,
                id: ItemId::new("s1"),
                name: "North".to_string(),
            }
        );
        assert_eq!(events[2], ToolbarEvent::SetQuarter { quarter: 0 });
        assert_eq!(
            events[3],
            ToolbarEvent::SetRange {
                start: NaiveDate::from_ymd_opt(2026, 6, 1),
                end: None,
            }
        );
    }

    #[test]
    fn test_parse_catalog_event_tolerates_malformed_items() {
        let event: ToolbarEvent = serde_json::from_str(
            r#"{"event":"set_catalog","catalog":{"subsidiary":{"root":[{"uid":"s1","name":"North"},{"name":"No id"}]}}}"#,
        )
        .unwrap();

        let ToolbarEvent::SetCatalog { catalog } = event else {
            panic!("expected a catalog event");
        };
        assert_eq!(catalog[&Tier::Subsidiary]["root"].len(), 2);
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        assert!(serde_json::from_str::<ToolbarEvent>(r#"{"event":"blur","tier":"well"}"#).is_err());
    }
}
