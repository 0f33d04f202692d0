//! The chart view: lifecycle manager and overlay controllers.
//!
//! [`ChartView`] is the root component. It owns the drawing surface and every
//! derived series bound to it, rebuilding everything from scratch whenever
//! data, granularity, dimensions or reference levels change. The tooltip and
//! year-guide controllers only read surface geometry and write to their own
//! overlay state.

pub mod frame;
pub mod palette;
pub mod tooltip;
pub mod viewport;
pub mod year_guides;

pub use frame::{FrameJob, FrameScheduler};
pub use tooltip::{
    ChangeRow, CrosshairEvent, HoverGuide, PixelPoint, TooltipContent, TooltipPanel,
};
pub use viewport::initial_visible_range;
pub use year_guides::{YearBoundary, YearGuideLayer, YearGuideMark, year_boundaries};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::projection::ProjectionCache;
use crate::core::types::{Granularity, PeriodRecord, ReferenceLevels, TREND_LINE_COUNT};
use crate::error::{ChartViewError, ChartViewResult};
use crate::surface::{
    CandlestickStyle, ChartOptions, CrosshairOptions, DrawingSurface, GuideLineStyle,
    HistogramStyle, InputHandles, LineStyle, OptionalChartOptions, PriceGuide, PriceScaleOptions,
    ScaleMargins, SeriesId, SubscriptionId, SurfaceFactory, TickLabelMode, TimeScaleOptions,
};

/// Default fixed pixel height of the chart container.
pub const DEFAULT_HEIGHT: u32 = 350;

/// External inputs of the chart view: ordered records, display granularity,
/// container dimensions, and optional reference levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartViewConfig {
    pub records: Vec<PeriodRecord>,
    pub granularity: Granularity,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub reference_levels: ReferenceLevels,
}

impl ChartViewConfig {
    #[must_use]
    pub fn new(records: Vec<PeriodRecord>, granularity: Granularity, width: u32) -> Self {
        Self {
            records,
            granularity,
            width,
            height: DEFAULT_HEIGHT,
            reference_levels: ReferenceLevels::default(),
        }
    }

    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_reference_levels(mut self, levels: ReferenceLevels) -> Self {
        self.reference_levels = levels;
        self
    }
}

/// Lifecycle of the drawing surface owned by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Uninitialized,
    Mounted,
    Rebuilding,
    Disposed,
}

#[derive(Debug, Clone, Copy)]
struct Subscriptions {
    crosshair: SubscriptionId,
    range: SubscriptionId,
}

/// Stateful chart view bound to one drawing surface at a time.
pub struct ChartView<F: SurfaceFactory> {
    factory: F,
    surface: Option<F::Surface>,
    config: Option<ChartViewConfig>,
    phase: LifecyclePhase,
    projection: ProjectionCache,
    subscriptions: Option<Subscriptions>,
    scheduler: FrameScheduler,
    tooltip: TooltipPanel,
    hover_guide: HoverGuide,
    year_guides: YearGuideLayer,
    pending_pointer: Option<PixelPoint>,
}

impl<F: SurfaceFactory> ChartView<F> {
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            surface: None,
            config: None,
            phase: LifecyclePhase::Uninitialized,
            projection: ProjectionCache::new(),
            subscriptions: None,
            scheduler: FrameScheduler::default(),
            tooltip: TooltipPanel::default(),
            hover_guide: HoverGuide::default(),
            year_guides: YearGuideLayer::default(),
            pending_pointer: None,
        }
    }

    /// Creates the surface and builds the full chart from the given inputs.
    ///
    /// Mounting an already-mounted view delegates to [`Self::update`].
    pub fn mount(&mut self, config: ChartViewConfig) -> ChartViewResult<()> {
        match self.phase {
            LifecyclePhase::Disposed => Err(ChartViewError::Disposed),
            LifecyclePhase::Mounted | LifecyclePhase::Rebuilding => self.update(config),
            LifecyclePhase::Uninitialized => {
                self.config = Some(config);
                self.build()
            }
        }
    }

    /// Tears down and fully rebuilds the surface from the new inputs.
    ///
    /// No incremental diffing: rebuild cost is bounded by the dataset that is
    /// being re-derived anyway, and a clean rebuild cannot drift from the
    /// inputs.
    pub fn update(&mut self, config: ChartViewConfig) -> ChartViewResult<()> {
        match self.phase {
            LifecyclePhase::Disposed => return Err(ChartViewError::Disposed),
            LifecyclePhase::Uninitialized => return Err(ChartViewError::NotMounted),
            LifecyclePhase::Mounted | LifecyclePhase::Rebuilding => {}
        }

        debug!("rebuilding chart view");
        self.phase = LifecyclePhase::Rebuilding;
        self.teardown();
        self.config = Some(config);
        self.build()
    }

    /// Follows a container width change and schedules the year-guide pass.
    ///
    /// Height is a fixed external input and never auto-derived.
    pub fn resize(&mut self, width: u32) -> ChartViewResult<()> {
        if self.phase == LifecyclePhase::Disposed {
            return Err(ChartViewError::Disposed);
        }
        let Some(surface) = self.surface.as_mut() else {
            return Err(ChartViewError::NotMounted);
        };

        surface.set_width(width);
        if let Some(config) = self.config.as_mut() {
            config.width = width;
        }
        self.scheduler.schedule(FrameJob::YearGuides);
        Ok(())
    }

    /// Handles one crosshair-move notification from the surface.
    ///
    /// Within one event: hover-guide positioning first, then tooltip content,
    /// then repositioning on the next frame so the just-rendered size is used
    /// for clamping.
    pub fn crosshair_moved(&mut self, event: CrosshairEvent) {
        if self.phase != LifecyclePhase::Mounted {
            return;
        }
        let Some(surface) = self.surface.as_ref() else {
            return;
        };

        let (Some(time), Some(point)) = (event.time, event.point) else {
            self.tooltip.hide();
            self.hover_guide.clear();
            return;
        };

        self.hover_guide.set(surface.time_to_coordinate(time));

        let derived = self.projection.series();
        let Some(candle) = derived.candle_at(time) else {
            // A gap: no sample at this timestamp. Keep the guide positioned.
            self.tooltip.hide();
            return;
        };

        let trend = std::array::from_fn(|slot| derived.trend_at(slot, time));
        let prev_close = self
            .config
            .as_ref()
            .and_then(|config| config.reference_levels.prev_close);
        let content =
            TooltipContent::build(time, candle, derived.volume_at(time), trend, prev_close);
        self.tooltip.render(content);

        self.pending_pointer = Some(point);
        self.scheduler.schedule(FrameJob::TooltipPosition);
    }

    /// Handles one visible-range-change notification from the surface.
    pub fn visible_range_changed(&mut self) {
        if self.phase == LifecyclePhase::Mounted {
            self.scheduler.schedule(FrameJob::YearGuides);
        }
    }

    /// Executes work deferred to the next animation frame.
    ///
    /// Multiple triggers since the last frame have been coalesced into at
    /// most one run per job. Does nothing once disposed.
    pub fn run_frame(&mut self) {
        if self.phase != LifecyclePhase::Mounted {
            return;
        }

        if self.scheduler.take(FrameJob::YearGuides) {
            self.rebuild_year_guides();
        }

        if self.scheduler.take(FrameJob::TooltipPosition) {
            if let Some(point) = self.pending_pointer.take() {
                self.position_tooltip(point);
            }
        }
    }

    /// Cancels pending frame work, detaches subscriptions, hides overlays and
    /// destroys the surface. Idempotent: a second call is a no-op.
    pub fn dispose(&mut self) {
        if self.phase == LifecyclePhase::Disposed {
            return;
        }
        debug!("disposing chart view");
        self.teardown();
        self.phase = LifecyclePhase::Disposed;
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipPanel {
        &self.tooltip
    }

    #[must_use]
    pub fn hover_guide(&self) -> &HoverGuide {
        &self.hover_guide
    }

    #[must_use]
    pub fn year_guides(&self) -> &YearGuideLayer {
        &self.year_guides
    }

    #[must_use]
    pub fn projection(&self) -> &ProjectionCache {
        &self.projection
    }

    #[must_use]
    pub fn config(&self) -> Option<&ChartViewConfig> {
        self.config.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&F::Surface> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn has_pending_frame_work(&self) -> bool {
        self.scheduler.has_pending()
    }

    fn build(&mut self) -> ChartViewResult<()> {
        let config = self.config.as_ref().ok_or(ChartViewError::NotMounted)?;
        if config.width == 0 || config.height == 0 {
            return Err(ChartViewError::InvalidViewport {
                width: config.width,
                height: config.height,
            });
        }

        debug!(
            bars = config.records.len(),
            granularity = ?config.granularity,
            "mounting chart view"
        );

        let derived = self.projection.project(&config.records)?;

        let mut surface = self.factory.create(config.width, config.height);
        surface.apply_chart_options(&chart_options(config));

        let optional = OptionalChartOptions {
            attribution_logo_visible: Some(false),
        };
        if let Err(error) = surface.apply_optional_options(&optional) {
            // Feature detection: older surfaces keep their default appearance.
            debug!(%error, "optional surface options not supported");
        }

        let candle = surface.add_candlestick_series(&candlestick_style());

        let volume = surface.add_histogram_series(&histogram_style());
        surface.set_series_scale_margins(
            volume,
            ScaleMargins {
                top: 0.82,
                bottom: 0.0,
            },
        );

        let mut trend = [candle; TREND_LINE_COUNT];
        for (slot, stroke) in palette::TREND_STROKES.iter().enumerate() {
            trend[slot] = surface.add_line_series(&trend_style(*stroke));
        }

        surface.set_candle_data(candle, &derived.candles);
        surface.set_volume_data(volume, &derived.volume);
        for slot in 0..TREND_LINE_COUNT {
            surface.set_line_data(trend[slot], &derived.trend[slot]);
        }

        draw_reference_guides(&mut surface, candle, config.reference_levels);

        match viewport::initial_visible_range(config.granularity, config.records.len()) {
            Some((from, to)) => surface.set_visible_logical_range(from, to),
            None => surface.fit_content(),
        }

        let subscriptions = Subscriptions {
            crosshair: surface.subscribe_crosshair_move(),
            range: surface.subscribe_visible_range_change(),
        };

        self.surface = Some(surface);
        self.subscriptions = Some(subscriptions);
        self.phase = LifecyclePhase::Mounted;
        self.scheduler.schedule(FrameJob::YearGuides);
        Ok(())
    }

    fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.pending_pointer = None;
        self.hover_guide.clear();
        self.tooltip.hide();
        self.year_guides.clear();

        if let Some(mut surface) = self.surface.take() {
            if let Some(subscriptions) = self.subscriptions.take() {
                surface.unsubscribe(subscriptions.crosshair);
                surface.unsubscribe(subscriptions.range);
            }
            surface.destroy();
        }
        self.subscriptions = None;
    }

    fn rebuild_year_guides(&mut self) {
        let (Some(surface), Some(config)) = (self.surface.as_ref(), self.config.as_ref()) else {
            return;
        };

        self.year_guides.clear();
        if config.granularity == Granularity::Yearly || config.records.is_empty() {
            return;
        }

        if let Err(error) = self
            .year_guides
            .rebuild(surface, &config.records, config.height)
        {
            warn!(%error, "year guide rebuild skipped");
        }
    }

    fn position_tooltip(&mut self, point: PixelPoint) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let container = (f64::from(surface.width()), f64::from(surface.height()));
        let (left, top) = tooltip::clamped_panel_position(point, self.tooltip.size(), container);
        self.tooltip.set_position(left, top);
    }
}

impl<F: SurfaceFactory> Drop for ChartView<F> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn chart_options(config: &ChartViewConfig) -> ChartOptions {
    ChartOptions {
        width: config.width,
        height: config.height,
        text_color: palette::MUTED,
        grid_visible: false,
        crosshair: CrosshairOptions {
            vertical_label_visible: false,
            horizontal_label_visible: true,
            line_color: palette::BORDER,
            line_width: 1,
        },
        right_price_scale: PriceScaleOptions {
            border_visible: false,
            margins: ScaleMargins {
                top: 0.08,
                bottom: 0.22,
            },
        },
        time_scale: TimeScaleOptions {
            border_visible: false,
            right_offset: 6,
            bar_spacing: 8,
            tick_label: if config.granularity.tick_labels_show_year() {
                TickLabelMode::Year
            } else {
                TickLabelMode::Month
            },
        },
        input: InputHandles {
            mouse_wheel_scroll: true,
            pressed_mouse_move: true,
            horizontal_touch_drag: true,
            vertical_touch_drag: false,
            mouse_wheel_scale: true,
            axis_pressed_mouse_move: true,
            pinch: true,
        },
    }
}

fn candlestick_style() -> CandlestickStyle {
    CandlestickStyle {
        up_color: palette::UP,
        down_color: palette::DOWN,
        border_up_color: palette::UP,
        border_down_color: palette::DOWN,
        wick_up_color: palette::UP,
        wick_down_color: palette::DOWN,
        last_value_visible: true,
        price_line_visible: true,
    }
}

fn histogram_style() -> HistogramStyle {
    HistogramStyle {
        price_scale_id: String::new(),
        last_value_visible: false,
        price_line_visible: false,
    }
}

fn trend_style(stroke: crate::surface::Color) -> LineStyle {
    LineStyle {
        color: stroke,
        line_width: 2,
        last_value_visible: false,
        price_line_visible: false,
        crosshair_marker_visible: false,
    }
}

fn draw_reference_guides<S: DrawingSurface>(
    surface: &mut S,
    candle: SeriesId,
    levels: ReferenceLevels,
) {
    if let Some(prev_close) = levels.prev_close {
        surface.create_price_line(
            candle,
            &PriceGuide {
                price: prev_close,
                color: palette::BORDER,
                line_width: 1,
                style: GuideLineStyle::Dashed,
                axis_label_visible: true,
                title: "전일".to_owned(),
            },
        );
    }
    if let Some(session_high) = levels.session_high {
        surface.create_price_line(
            candle,
            &PriceGuide {
                price: session_high,
                color: palette::MUTED,
                line_width: 1,
                style: GuideLineStyle::Dotted,
                axis_label_visible: false,
                title: "고".to_owned(),
            },
        );
    }
    if let Some(session_low) = levels.session_low {
        surface.create_price_line(
            candle,
            &PriceGuide {
                price: session_low,
                color: palette::MUTED,
                line_width: 1,
                style: GuideLineStyle::Dotted,
                axis_label_visible: false,
                title: "저".to_owned(),
            },
        );
    }
}
