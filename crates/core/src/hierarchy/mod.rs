//! Hierarchical selection for the subsidiary → field → station → compressor chain.
//!
//! This module implements the cascading selection state machine that keeps
//! four dependent selection lists consistent as upstream selections change.
//!
//! # Modules
//!
//! - `catalog` - Option catalog normalization and lookup
//! - `state` - Selection state and the pure transition function
//! - `options` - Option derivation, ordering and reconciliation
//! - `engine` - Stateful facade driven by selector events

pub mod catalog;
pub mod engine;
pub mod options;
pub mod state;

#[cfg(test)]
mod engine_props;

pub use catalog::{CatalogItem, OptionCatalog, RawCatalog, RawCatalogItem};
pub use engine::HierarchyEngine;
pub use options::{OptionGroup, display_order, options_for};
pub use state::{PendingOption, SelectedItem, SelectionState, apply_selection};
