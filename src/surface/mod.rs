//! Capability boundary to the drawing-surface primitive.
//!
//! The chart view never talks to a concrete rendering backend. Everything it
//! needs from the plotting primitive is captured by [`DrawingSurface`]:
//! attach typed series, replace their datasets wholesale, convert axis time
//! to a pixel coordinate, manage the visible logical range, draw fixed price
//! guides, and hand out counted notification subscriptions. [`MockSurface`]
//! implements the contract for tests and headless use.

mod mock;
mod style;

pub use mock::{MockFactory, MockSeriesKind, MockSeriesRecord, MockSurface};
pub use style::{
    CandlestickStyle, ChartOptions, Color, CrosshairOptions, GuideLineStyle, HistogramStyle,
    InputHandles, LineStyle, OptionalChartOptions, PriceGuide, PriceScaleOptions, ScaleMargins,
    TickLabelMode, TimeScaleOptions,
};

use thiserror::Error;

use crate::core::projection::{CandleSample, TrendPoint, VolumeBar};

pub type SurfaceResult<T> = Result<T, SurfaceError>;

#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The installed surface version does not implement an optional call.
    #[error("surface does not support `{call}`")]
    Unsupported { call: &'static str },
}

/// Identifies one attached series on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(pub u64);

/// Identifies one active notification subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Contract implemented by any drawing-surface backend.
///
/// The lifecycle manager exclusively mutates the surface; overlay controllers
/// only read geometry (`time_to_coordinate`, `visible_logical_range`, sizes).
pub trait DrawingSurface {
    fn apply_chart_options(&mut self, options: &ChartOptions);

    /// Applies configuration not every surface version supports.
    ///
    /// Returns [`SurfaceError::Unsupported`] when the installed version lacks
    /// the call; the surface keeps its default appearance in that case.
    fn apply_optional_options(&mut self, options: &OptionalChartOptions) -> SurfaceResult<()>;

    fn add_candlestick_series(&mut self, style: &CandlestickStyle) -> SeriesId;
    fn add_histogram_series(&mut self, style: &HistogramStyle) -> SeriesId;
    fn add_line_series(&mut self, style: &LineStyle) -> SeriesId;

    /// Overrides the vertical scale margins of one series' own price scale.
    fn set_series_scale_margins(&mut self, series: SeriesId, margins: ScaleMargins);

    fn set_candle_data(&mut self, series: SeriesId, data: &[CandleSample]);
    fn set_volume_data(&mut self, series: SeriesId, data: &[VolumeBar]);
    fn set_line_data(&mut self, series: SeriesId, data: &[TrendPoint]);

    fn create_price_line(&mut self, series: SeriesId, guide: &PriceGuide);

    /// Converts an axis timestamp to a pixel x-coordinate.
    ///
    /// Returns `None` when the timestamp is outside the projectable range.
    fn time_to_coordinate(&self, time: i64) -> Option<f64>;

    fn visible_logical_range(&self) -> Option<(f64, f64)>;
    fn set_visible_logical_range(&mut self, from: f64, to: f64);

    /// Auto-fits the viewport to the bound data, including the empty case.
    fn fit_content(&mut self);

    fn width(&self) -> u32;
    fn set_width(&mut self, width: u32);
    fn height(&self) -> u32;

    fn subscribe_crosshair_move(&mut self) -> SubscriptionId;
    fn subscribe_visible_range_change(&mut self) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
    fn active_subscriptions(&self) -> usize;

    /// Destroys the surface. Idempotent.
    fn destroy(&mut self);
}

/// Creates surfaces bound to a container size.
///
/// The lifecycle manager owns a factory so a full rebuild can discard the old
/// surface and start from a fresh one.
pub trait SurfaceFactory {
    type Surface: DrawingSurface;

    fn create(&mut self, width: u32, height: u32) -> Self::Surface;
}
