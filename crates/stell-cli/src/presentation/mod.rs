//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod tables;
pub mod value_display;

pub use tables::{format_optional, print_separator, truncate_string};
pub use value_display::{display_audit_report, display_reconciled, display_value};
