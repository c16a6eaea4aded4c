//! Observability for the storefront tools.
//!
//! This crate provides:
//! - `init` - `tracing` subscriber set-up in human or JSON format
//! - `MetricsCollector` - Step timings and counts for one CLI session

mod error;
mod logging;
mod metrics;

pub use error::*;
pub use logging::*;
pub use metrics::*;
