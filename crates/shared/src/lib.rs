//! Shared vocabulary, errors, and configuration for Filterbar.
//!
//! This crate provides the types every other crate speaks in:
//! - Typed item ids for catalog entries
//! - The four-tier hierarchy and per-tier selection modes
//! - Date-mode configuration for the period selector
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DataFilterConfig, DateFilterConfig, ToolbarConfig};
pub use error::{FilterError, FilterResult};
