//! In-memory drawing surface used by tests and headless engine usage.
//!
//! The mock records every call so tests can assert on the exact surface state
//! a lifecycle pass produced, and it keeps a simple linear index-based
//! time-to-pixel mapping so overlay geometry is deterministic without a real
//! rendering backend.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::core::projection::{CandleSample, TrendPoint, VolumeBar};
use crate::surface::style::{
    CandlestickStyle, ChartOptions, HistogramStyle, LineStyle, OptionalChartOptions, PriceGuide,
    ScaleMargins,
};
use crate::surface::{
    DrawingSurface, SeriesId, SubscriptionId, SurfaceError, SurfaceFactory, SurfaceResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockSeriesKind {
    Candlestick,
    Histogram,
    Line,
}

/// Everything the mock knows about one attached series.
#[derive(Debug, Clone)]
pub struct MockSeriesRecord {
    pub kind: MockSeriesKind,
    pub candlestick_style: Option<CandlestickStyle>,
    pub histogram_style: Option<HistogramStyle>,
    pub line_style: Option<LineStyle>,
    pub scale_margins: Option<ScaleMargins>,
    pub candle_data: Vec<CandleSample>,
    pub volume_data: Vec<VolumeBar>,
    pub line_data: Vec<TrendPoint>,
    pub price_guides: Vec<PriceGuide>,
}

impl MockSeriesRecord {
    fn new(kind: MockSeriesKind) -> Self {
        Self {
            kind,
            candlestick_style: None,
            histogram_style: None,
            line_style: None,
            scale_margins: None,
            candle_data: Vec::new(),
            volume_data: Vec::new(),
            line_data: Vec::new(),
            price_guides: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct MockState {
    width: u32,
    height: u32,
    options: Option<ChartOptions>,
    optional_options: Vec<OptionalChartOptions>,
    reject_optional_options: bool,
    series: Vec<MockSeriesRecord>,
    visible_range: Option<(f64, f64)>,
    fit_content_calls: usize,
    next_subscription: u64,
    active: BTreeSet<u64>,
    destroyed: bool,
    destroy_calls: usize,
    calls_after_destroy: usize,
    time_to_coordinate_calls: usize,
}

impl MockState {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            options: None,
            optional_options: Vec::new(),
            reject_optional_options: false,
            series: Vec::new(),
            visible_range: None,
            fit_content_calls: 0,
            next_subscription: 0,
            active: BTreeSet::new(),
            destroyed: false,
            destroy_calls: 0,
            calls_after_destroy: 0,
            time_to_coordinate_calls: 0,
        }
    }

    fn guard(&mut self) -> bool {
        if self.destroyed {
            self.calls_after_destroy += 1;
        }
        self.destroyed
    }

    fn subscribe(&mut self) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.active.insert(id);
        SubscriptionId(id)
    }
}

/// Shared-handle mock surface; clones observe the same recorded state.
#[derive(Debug, Clone)]
pub struct MockSurface {
    state: Rc<RefCell<MockState>>,
}

impl MockSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new(width, height))),
        }
    }

    /// Makes `apply_optional_options` report `Unsupported` from now on.
    pub fn reject_optional_options(&self) {
        self.state.borrow_mut().reject_optional_options = true;
    }

    #[must_use]
    pub fn applied_options(&self) -> Option<ChartOptions> {
        self.state.borrow().options.clone()
    }

    #[must_use]
    pub fn applied_optional_options(&self) -> Vec<OptionalChartOptions> {
        self.state.borrow().optional_options.clone()
    }

    #[must_use]
    pub fn series_records(&self) -> Vec<MockSeriesRecord> {
        self.state.borrow().series.clone()
    }

    #[must_use]
    pub fn fit_content_calls(&self) -> usize {
        self.state.borrow().fit_content_calls
    }

    #[must_use]
    pub fn destroy_calls(&self) -> usize {
        self.state.borrow().destroy_calls
    }

    /// Spy counter: any surface call observed after `destroy`.
    #[must_use]
    pub fn calls_after_destroy(&self) -> usize {
        self.state.borrow().calls_after_destroy
    }

    #[must_use]
    pub fn time_to_coordinate_calls(&self) -> usize {
        self.state.borrow().time_to_coordinate_calls
    }

    fn candle_timestamps(state: &MockState) -> Option<&[CandleSample]> {
        state
            .series
            .iter()
            .find(|s| s.kind == MockSeriesKind::Candlestick)
            .map(|s| s.candle_data.as_slice())
    }
}

impl DrawingSurface for MockSurface {
    fn apply_chart_options(&mut self, options: &ChartOptions) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        state.options = Some(options.clone());
    }

    fn apply_optional_options(&mut self, options: &OptionalChartOptions) -> SurfaceResult<()> {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return Ok(());
        }
        state.optional_options.push(*options);
        if state.reject_optional_options {
            return Err(SurfaceError::Unsupported {
                call: "apply_optional_options",
            });
        }
        Ok(())
    }

    fn add_candlestick_series(&mut self, style: &CandlestickStyle) -> SeriesId {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return SeriesId(u64::MAX);
        }
        let mut record = MockSeriesRecord::new(MockSeriesKind::Candlestick);
        record.candlestick_style = Some(*style);
        state.series.push(record);
        SeriesId(state.series.len() as u64 - 1)
    }

    fn add_histogram_series(&mut self, style: &HistogramStyle) -> SeriesId {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return SeriesId(u64::MAX);
        }
        let mut record = MockSeriesRecord::new(MockSeriesKind::Histogram);
        record.histogram_style = Some(style.clone());
        state.series.push(record);
        SeriesId(state.series.len() as u64 - 1)
    }

    fn add_line_series(&mut self, style: &LineStyle) -> SeriesId {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return SeriesId(u64::MAX);
        }
        let mut record = MockSeriesRecord::new(MockSeriesKind::Line);
        record.line_style = Some(*style);
        state.series.push(record);
        SeriesId(state.series.len() as u64 - 1)
    }

    fn set_series_scale_margins(&mut self, series: SeriesId, margins: ScaleMargins) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        if let Some(record) = state.series.get_mut(series.0 as usize) {
            record.scale_margins = Some(margins);
        }
    }

    fn set_candle_data(&mut self, series: SeriesId, data: &[CandleSample]) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        if let Some(record) = state.series.get_mut(series.0 as usize) {
            record.candle_data = data.to_vec();
        }
    }

    fn set_volume_data(&mut self, series: SeriesId, data: &[VolumeBar]) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        if let Some(record) = state.series.get_mut(series.0 as usize) {
            record.volume_data = data.to_vec();
        }
    }

    fn set_line_data(&mut self, series: SeriesId, data: &[TrendPoint]) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        if let Some(record) = state.series.get_mut(series.0 as usize) {
            record.line_data = data.to_vec();
        }
    }

    fn create_price_line(&mut self, series: SeriesId, guide: &PriceGuide) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        if let Some(record) = state.series.get_mut(series.0 as usize) {
            record.price_guides.push(guide.clone());
        }
    }

    fn time_to_coordinate(&self, time: i64) -> Option<f64> {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return None;
        }
        state.time_to_coordinate_calls += 1;

        let candles = Self::candle_timestamps(&state)?;
        let upper = candles.partition_point(|c| c.time < time);
        // Exact samples map to their index; times between samples interpolate
        // linearly; times outside the data range are not projectable.
        let logical = if upper < candles.len() && candles[upper].time == time {
            upper as f64
        } else if upper == 0 || upper >= candles.len() {
            return None;
        } else {
            let before = candles[upper - 1].time;
            let after = candles[upper].time;
            (upper - 1) as f64 + (time - before) as f64 / (after - before) as f64
        };

        let (from, to) = state
            .visible_range
            .unwrap_or((0.0, candles.len() as f64));
        if to <= from {
            return None;
        }

        let width = f64::from(state.width);
        let x = (logical - from) / (to - from) * width;
        if !x.is_finite() || x < 0.0 || x > width {
            return None;
        }
        Some(x)
    }

    fn visible_logical_range(&self) -> Option<(f64, f64)> {
        self.state.borrow().visible_range
    }

    fn set_visible_logical_range(&mut self, from: f64, to: f64) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        state.visible_range = Some((from, to));
    }

    fn fit_content(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        state.fit_content_calls += 1;
        let bars = Self::candle_timestamps(&state).map_or(0, <[CandleSample]>::len);
        state.visible_range = Some((0.0, bars as f64));
    }

    fn width(&self) -> u32 {
        self.state.borrow().width
    }

    fn set_width(&mut self, width: u32) {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return;
        }
        state.width = width;
    }

    fn height(&self) -> u32 {
        self.state.borrow().height
    }

    fn subscribe_crosshair_move(&mut self) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return SubscriptionId(u64::MAX);
        }
        state.subscribe()
    }

    fn subscribe_visible_range_change(&mut self) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        if state.guard() {
            return SubscriptionId(u64::MAX);
        }
        state.subscribe()
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let mut state = self.state.borrow_mut();
        state.active.remove(&id.0);
    }

    fn active_subscriptions(&self) -> usize {
        self.state.borrow().active.len()
    }

    fn destroy(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.destroyed {
            return;
        }
        state.destroyed = true;
        state.destroy_calls += 1;
    }
}

#[derive(Debug, Default)]
struct FactoryState {
    reject_optional_options: bool,
    created: Vec<MockSurface>,
}

/// Factory handing out [`MockSurface`]s; clones observe the same creations,
/// so a test can keep a probe handle while the view owns the factory.
#[derive(Debug, Clone, Default)]
pub struct MockFactory {
    state: Rc<RefCell<FactoryState>>,
}

impl MockFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every surface created from now on reports optional options as unsupported.
    pub fn reject_optional_options(&self) {
        self.state.borrow_mut().reject_optional_options = true;
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.state.borrow().created.len()
    }

    #[must_use]
    pub fn surface(&self, index: usize) -> Option<MockSurface> {
        self.state.borrow().created.get(index).cloned()
    }

    #[must_use]
    pub fn last_surface(&self) -> Option<MockSurface> {
        self.state.borrow().created.last().cloned()
    }
}

impl SurfaceFactory for MockFactory {
    type Surface = MockSurface;

    fn create(&mut self, width: u32, height: u32) -> MockSurface {
        let surface = MockSurface::new(width, height);
        let mut state = self.state.borrow_mut();
        if state.reject_optional_options {
            surface.reject_optional_options();
        }
        state.created.push(surface.clone());
        surface
    }
}
