//! Global store seam.

use filterbar_shared::types::Tier;
use serde::{Deserialize, Serialize};

use crate::hierarchy::SelectedItem;
use crate::period::DateInterval;

/// Receiver of committed filter values.
#[cfg_attr(test, mockall::automock)]
pub trait FilterStore {
    /// Replaces the committed selection of `tier`.
    fn set_selection(&mut self, tier: Tier, items: &[SelectedItem]);

    /// Replaces the resolved date interval.
    fn set_date(&mut self, interval: &DateInterval);

    /// Clears the date interval (toolbar without a date filter).
    fn reset_date(&mut self);
}

/// One store write, as recorded by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A tier's committed selection.
    SetSelection {
        /// Tier written.
        tier: Tier,
        /// Its committed items.
        items: Vec<SelectedItem>,
    },
    /// A resolved interval.
    SetDate(DateInterval),
    /// Date cleared.
    ResetDate,
}

/// Store that keeps every write in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    events: Vec<StoreEvent>,
}

impl RecordingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes recorded so far.
    #[must_use]
    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    /// Drains the recorded writes.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }
}

impl FilterStore for RecordingStore {
    fn set_selection(&mut self, tier: Tier, items: &[SelectedItem]) {
        self.events.push(StoreEvent::SetSelection {
            tier,
            items: items.to_vec(),
        });
    }

    fn set_date(&mut self, interval: &DateInterval) {
        self.events.push(StoreEvent::SetDate(*interval));
    }

    fn reset_date(&mut self) {
        self.events.push(StoreEvent::ResetDate);
    }
}
