//! Common types used across the workspace.

pub mod date_mode;
pub mod id;
pub mod mode;
pub mod tier;

pub use date_mode::{DateMode, QuarterSelector, SelectorFlags, YearSelector};
pub use id::ItemId;
pub use mode::{SelectionMode, TierModes};
pub use tier::Tier;
