//! Toolbar coordinator.
//!
//! Feeds catalogs, configuration and UI events into the hierarchy and date
//! engines and forwards what they commit to the global store.

pub mod coordinator;
pub mod event;
pub mod store;

pub use coordinator::Toolbar;
pub use event::ToolbarEvent;
pub use store::{FilterStore, RecordingStore, StoreEvent};

#[cfg(test)]
pub use store::MockFilterStore;
