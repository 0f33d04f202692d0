//! Fixed hex palette of the stock chart, shared by series and overlays.

use crate::surface::Color;

pub const FOREGROUND: Color = Color::from_rgb8(0x11, 0x18, 0x27);
pub const MUTED: Color = Color::from_rgb8(0x6B, 0x72, 0x80);
pub const BORDER: Color = Color::from_rgb8(0xE5, 0xE7, 0xEB);

pub const UP: Color = Color::from_rgb8(0xE1, 0x1D, 0x48);
pub const DOWN: Color = Color::from_rgb8(0x25, 0x63, 0xEB);

/// Stroke colors for the four trend lines (5/20/60/120-period averages).
pub const TREND_STROKES: [Color; 4] = [
    Color::from_rgb8(0xF5, 0x9E, 0x0B),
    Color::from_rgb8(0x22, 0xC5, 0x5E),
    Color::from_rgb8(0xA8, 0x55, 0xF7),
    Color::from_rgb8(0x06, 0xB6, 0xD4),
];

pub const HOVER_LINE_OPACITY: f64 = 0.95;
pub const YEAR_LINE_OPACITY: f64 = 0.65;
pub const YEAR_LABEL_OPACITY: f64 = 0.14;
