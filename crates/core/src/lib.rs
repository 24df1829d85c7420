//! Core filter-toolbar logic for Filterbar.
//!
//! This crate contains the toolbar's state machines with ZERO I/O dependencies.
//! Every operation is synchronous and total: invalid input degrades to an
//! empty or default state instead of failing.
//!
//! # Modules
//!
//! - `clock` - Injected time source and calendar snapshot
//! - `hierarchy` - Cascading subsidiary → field → station → compressor selection
//! - `period` - Year / quarter / month / range resolution into an instant pair
//! - `toolbar` - Coordinator wiring both engines to the global store

pub mod clock;
pub mod hierarchy;
pub mod period;
pub mod toolbar;

pub use clock::{CalendarContext, Clock, FixedClock, SystemClock};
pub use hierarchy::{HierarchyEngine, OptionCatalog, SelectedItem, SelectionState};
pub use period::{DateEngine, DateInterval, Month, Quarter};
pub use toolbar::{FilterStore, RecordingStore, StoreEvent, Toolbar, ToolbarEvent};
