//! Pointer-tracking tooltip panel and vertical hover guide.
//!
//! The controller is driven by crosshair events forwarded from the surface.
//! It only writes to its own overlay state; series data and surface geometry
//! are read-only to it. Panel positioning is deferred to the next frame so
//! clamping uses the size of the just-rendered content.

use serde::{Deserialize, Serialize};

use crate::core::calendar::{
    clamp, coerce_finite, format_change, format_price, format_tooltip_date, format_volume,
};
use crate::core::projection::{BarDirection, CandleSample};
use crate::core::types::TREND_LINE_COUNT;

/// Offset between the pointer and the panel's top-left corner.
pub const POINTER_OFFSET: f64 = 12.0;

/// Fallback panel size used before content has ever been measured.
const FALLBACK_PANEL_SIZE: (f64, f64) = (180.0, 100.0);

const MIN_PANEL_WIDTH: f64 = 180.0;
const CHAR_WIDTH: f64 = 7.2;
const ROW_GAP: f64 = 10.0;
const PADDING_X: f64 = 24.0;
const PADDING_Y: f64 = 20.0;
const HEADER_HEIGHT: f64 = 14.4;
const ROW_HEIGHT: f64 = 16.4;
const SECTION_SPACING: f64 = 13.0;

/// Pixel position inside the plotted area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// One crosshair-move notification from the surface.
///
/// Either field may be absent, e.g. when the pointer leaves the plotted data
/// region; such events hide the tooltip and the hover guide.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairEvent {
    pub time: Option<i64>,
    pub point: Option<PixelPoint>,
}

impl CrosshairEvent {
    #[must_use]
    pub fn at(time: i64, x: f64, y: f64) -> Self {
        Self {
            time: Some(time),
            point: Some(PixelPoint { x, y }),
        }
    }

    /// Event with no resolvable sample, as sent when the pointer leaves.
    #[must_use]
    pub fn leave() -> Self {
        Self::default()
    }
}

/// The vertical guide line tracking the hovered timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverGuide {
    x: Option<f64>,
}

impl HoverGuide {
    /// Positions the guide, or hides it when no coordinate resolved.
    pub fn set(&mut self, x: Option<f64>) {
        self.x = x.filter(|v| v.is_finite());
    }

    pub fn clear(&mut self) {
        self.x = None;
    }

    #[must_use]
    pub fn x(&self) -> Option<f64> {
        self.x
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.x.is_some()
    }
}

/// The change-versus-previous-close row, colored by the sign of the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRow {
    pub label: String,
    pub direction: BarDirection,
}

/// Fully rendered tooltip content for one hovered sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub date_label: String,
    pub close_label: String,
    pub direction: BarDirection,
    pub open_label: String,
    pub high_label: String,
    pub low_label: String,
    pub volume_label: String,
    pub change: Option<ChangeRow>,
    pub trend_labels: [String; TREND_LINE_COUNT],
}

impl TooltipContent {
    /// Derives all display fields for the hovered sample.
    ///
    /// The change row appears only when a previous close is set; its
    /// percentage is computed only when that level is positive. Trend values
    /// absent at this timestamp render as `-`. Non-finite inputs are coerced
    /// to zero rather than failing.
    #[must_use]
    pub fn build(
        time: i64,
        candle: CandleSample,
        volume: Option<u64>,
        trend: [Option<f64>; TREND_LINE_COUNT],
        prev_close: Option<f64>,
    ) -> Self {
        let open = coerce_finite(candle.open);
        let close = coerce_finite(candle.close);

        let change = prev_close.map(|prev| {
            let prev = coerce_finite(prev);
            let diff = close - prev;
            let percent = (prev > 0.0).then(|| diff / prev * 100.0);
            let direction = if diff >= 0.0 {
                BarDirection::Up
            } else {
                BarDirection::Down
            };
            ChangeRow {
                label: format_change(diff, percent),
                direction,
            }
        });

        Self {
            date_label: format_tooltip_date(time),
            close_label: format_price(close),
            direction: BarDirection::from_open_close(open, close),
            open_label: format_price(candle.open),
            high_label: format_price(candle.high),
            low_label: format_price(candle.low),
            volume_label: format_volume(volume.unwrap_or(0) as f64),
            change,
            trend_labels: trend.map(|value| value.map_or_else(|| "-".to_owned(), format_price)),
        }
    }

    /// Deterministic text-metrics estimate of the rendered panel size.
    #[must_use]
    pub fn measure(&self) -> (f64, f64) {
        let mut widest = self.date_label.chars().count() + self.close_label.chars().count();
        let mut rows = 0usize;

        let mut row = |label: &str, value: &str| {
            widest = widest.max(label.chars().count() + value.chars().count());
            rows += 1;
        };
        row("시", &self.open_label);
        row("고", &self.high_label);
        row("저", &self.low_label);
        row("거래량", &self.volume_label);
        if let Some(change) = &self.change {
            row("전일대비", &change.label);
        }
        for (slot, label) in self.trend_labels.iter().enumerate() {
            row(&format!("MA{}", [5, 20, 60, 120][slot]), label);
        }

        let width = (PADDING_X + ROW_GAP + widest as f64 * CHAR_WIDTH).max(MIN_PANEL_WIDTH);
        let height =
            PADDING_Y + HEADER_HEIGHT + rows as f64 * ROW_HEIGHT + 2.0 * SECTION_SPACING;
        (width, height)
    }
}

/// The positioned info panel; hidden until a sample resolves under the pointer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipPanel {
    visible: bool,
    left: f64,
    top: f64,
    content: Option<TooltipContent>,
}

impl TooltipPanel {
    /// Replaces the panel content and makes it visible.
    ///
    /// Positioning happens separately, one frame later, so it can use the
    /// measured size of this content.
    pub fn render(&mut self, content: TooltipContent) {
        self.content = Some(content);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn set_position(&mut self, left: f64, top: f64) {
        self.left = left;
        self.top = top;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    /// Measured size of the current content, or a fallback before first render.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        self.content
            .as_ref()
            .map_or(FALLBACK_PANEL_SIZE, TooltipContent::measure)
    }
}

/// Places the panel near the pointer, clamped into the plotted area.
#[must_use]
pub fn clamped_panel_position(
    point: PixelPoint,
    panel_size: (f64, f64),
    container_size: (f64, f64),
) -> (f64, f64) {
    let left = clamp(
        point.x + POINTER_OFFSET,
        0.0,
        (container_size.0 - panel_size.0).max(0.0),
    );
    let top = clamp(
        point.y + POINTER_OFFSET,
        0.0,
        (container_size.1 - panel_size.1).max(0.0),
    );
    (left, top)
}
