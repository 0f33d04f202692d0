use serde::{Deserialize, Serialize};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
            1.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Dash pattern of a fixed horizontal price guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideLineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// A fixed horizontal guide drawn on one series at an exact price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceGuide {
    pub price: f64,
    pub color: Color,
    pub line_width: u32,
    pub style: GuideLineStyle,
    pub axis_label_visible: bool,
    pub title: String,
}

/// Candlestick series styling, colored by up/down close-vs-open comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlestickStyle {
    pub up_color: Color,
    pub down_color: Color,
    pub border_up_color: Color,
    pub border_down_color: Color,
    pub wick_up_color: Color,
    pub wick_down_color: Color,
    pub last_value_visible: bool,
    pub price_line_visible: bool,
}

/// Histogram series styling for the volume track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramStyle {
    /// Empty id overlays the histogram on the pane with its own hidden scale.
    pub price_scale_id: String,
    pub last_value_visible: bool,
    pub price_line_visible: bool,
}

/// Line series styling for one trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub line_width: u32,
    pub last_value_visible: bool,
    pub price_line_visible: bool,
    pub crosshair_marker_visible: bool,
}

/// Vertical fraction of the pane reserved above/below a price scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMargins {
    pub top: f64,
    pub bottom: f64,
}

/// Crosshair cursor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairOptions {
    pub vertical_label_visible: bool,
    pub horizontal_label_visible: bool,
    pub line_color: Color,
    pub line_width: u32,
}

/// Time-axis configuration, including the granularity-dependent label mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScaleOptions {
    pub border_visible: bool,
    pub right_offset: u32,
    pub bar_spacing: u32,
    pub tick_label: TickLabelMode,
}

/// Which calendar component the time-axis tick labels show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickLabelMode {
    Year,
    Month,
}

/// Right-side price-axis configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScaleOptions {
    pub border_visible: bool,
    pub margins: ScaleMargins,
}

/// Pointer scroll/scale gestures the surface should handle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputHandles {
    pub mouse_wheel_scroll: bool,
    pub pressed_mouse_move: bool,
    pub horizontal_touch_drag: bool,
    pub vertical_touch_drag: bool,
    pub mouse_wheel_scale: bool,
    pub axis_pressed_mouse_move: bool,
    pub pinch: bool,
}

/// Full surface configuration applied at mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub text_color: Color,
    pub grid_visible: bool,
    pub crosshair: CrosshairOptions,
    pub right_price_scale: PriceScaleOptions,
    pub time_scale: TimeScaleOptions,
    pub input: InputHandles,
}

/// Configuration calls not every surface version supports.
///
/// Application is fallible; an unsupported call falls back to the surface's
/// default appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionalChartOptions {
    pub attribution_logo_visible: Option<bool>,
}
