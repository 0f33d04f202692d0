//! stockchart-view: interactive stock price chart view engine.
//!
//! The crate owns the stateful part of a market-data price chart: projecting
//! OHLCV records into candle/volume/trend series, driving an abstract drawing
//! surface through mount/rebuild/dispose, and keeping the pointer tooltip and
//! year-boundary overlays in sync with the surface's visible range.

pub mod core;
pub mod error;
pub mod surface;
pub mod telemetry;
pub mod view;

pub use error::{ChartViewError, ChartViewResult};
pub use view::{ChartView, ChartViewConfig};
