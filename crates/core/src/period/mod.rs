//! Date resolution for the toolbar's period selector.
//!
//! This module turns the currently chosen year / quarter / month / day range
//! into one canonical `{start, end}` instant pair.
//!
//! # Modules
//!
//! - `types` - Quarter and month values, selection and interval types
//! - `resolve` - Resolution strategies, one pure function per variant
//! - `options` - Which years, quarters, months and days may be picked
//! - `engine` - Stateful facade that re-resolves on every change

pub mod engine;
pub mod options;
pub mod resolve;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::DateEngine;
pub use resolve::{ResolutionStrategy, canonical_timestamp};
pub use types::{DateInterval, DateOption, DateSelection, Month, Quarter};
