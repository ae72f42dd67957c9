//! feedchart: viewport and series-reshaping core for long time-series charts.
//!
//! The crate windows large energy-monitoring feeds into a bounded viewport,
//! drives pan/zoom/drag-select navigation over a preset zoom catalog, ranges
//! independent left/right Y axes and reshapes raw per-feed sample tuples into
//! chart-ready rows. Fetching and drawing stay with the host application.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{ViewportConfig, ViewportStateMachine};
pub use error::{ChartError, ChartResult};
