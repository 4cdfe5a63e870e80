//! Dashboard module
//!
//! Provides an overview page and a JSON summary that group and sum every kind
//! of record, plus a derived total built from a few named General entries.

mod aggregation;
mod cards;
mod handlers;

pub use handlers::{get_dashboard_page, get_summary_endpoint};
