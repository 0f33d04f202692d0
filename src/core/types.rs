use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartViewError, ChartViewResult};

/// Number of smoothed trend lines a record may carry (5/20/60/120-period averages).
pub const TREND_LINE_COUNT: usize = 4;

/// One trading interval as delivered by the upstream data source.
///
/// Records are immutable once produced, ordered ascending by `date_key`, and
/// date keys are unique within a sequence fed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Calendar-date key in fixed 8-digit `YYYYMMDD` form.
    #[serde(rename = "date")]
    pub date_key: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    #[serde(default)]
    pub ma5: Option<f64>,
    #[serde(default)]
    pub ma20: Option<f64>,
    #[serde(default)]
    pub ma60: Option<f64>,
    #[serde(default)]
    pub ma120: Option<f64>,
}

impl PeriodRecord {
    /// Builds a validated record from raw values.
    ///
    /// Invariants:
    /// - `date_key` is exactly 8 ASCII digits
    /// - all prices are finite and non-negative
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(
        date_key: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> ChartViewResult<Self> {
        let date_key = date_key.into();
        if date_key.len() != 8 || !date_key.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ChartViewError::InvalidDateKey { key: date_key });
        }

        for (field, value) in [("open", open), ("high", high), ("low", low), ("close", close)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartViewError::InvalidRecord(format!(
                    "`{field}` must be finite and >= 0"
                )));
            }
        }

        if low > high {
            return Err(ChartViewError::InvalidRecord(
                "low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartViewError::InvalidRecord(
                "open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            date_key,
            open,
            high,
            low,
            close,
            volume,
            ma5: None,
            ma20: None,
            ma60: None,
            ma120: None,
        })
    }

    /// Converts strongly-typed decimal prices into a validated record.
    pub fn from_decimal(
        date_key: impl Into<String>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> ChartViewResult<Self> {
        Self::new(
            date_key,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            volume,
        )
    }

    /// Attaches optional smoothed averages.
    ///
    /// Non-finite values are tolerated by omission: they become `None` rather
    /// than an error, matching how absent averages are treated downstream.
    #[must_use]
    pub fn with_averages(
        mut self,
        ma5: Option<f64>,
        ma20: Option<f64>,
        ma60: Option<f64>,
        ma120: Option<f64>,
    ) -> Self {
        self.ma5 = ma5.filter(|v| v.is_finite());
        self.ma20 = ma20.filter(|v| v.is_finite());
        self.ma60 = ma60.filter(|v| v.is_finite());
        self.ma120 = ma120.filter(|v| v.is_finite());
        self
    }

    /// Returns `true` when close is greater than or equal to open.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    /// The `YYYY` prefix of the date key.
    #[must_use]
    pub fn year(&self) -> &str {
        &self.date_key[..4]
    }

    /// Smoothed-average value for trend slot `0..TREND_LINE_COUNT`.
    #[must_use]
    pub fn trend_value(&self, slot: usize) -> Option<f64> {
        match slot {
            0 => self.ma5,
            1 => self.ma20,
            2 => self.ma60,
            3 => self.ma120,
            _ => None,
        }
    }
}

fn decimal_to_f64(value: Decimal, field: &str) -> ChartViewResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartViewError::InvalidRecord(format!("`{field}` cannot be represented as f64"))
    })
}

/// Requested display zoom mode, selected outside the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
    #[serde(rename = "Y")]
    Yearly,
}

impl Granularity {
    /// How many trailing bars the initial viewport shows by default.
    #[must_use]
    pub fn default_visible_bars(self) -> usize {
        match self {
            Self::Daily => 30,
            Self::Weekly => 60,
            Self::Monthly => 140,
            Self::Yearly => 260,
        }
    }

    /// Whether time-axis tick labels show only the year at this zoom level.
    #[must_use]
    pub fn tick_labels_show_year(self) -> bool {
        matches!(self, Self::Monthly | Self::Yearly)
    }
}

/// Optional horizontal reference levels drawn as static guides on the price series.
///
/// `None` means "do not draw this guide".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceLevels {
    pub prev_close: Option<f64>,
    pub session_high: Option<f64>,
    pub session_low: Option<f64>,
}

impl ReferenceLevels {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.prev_close.is_none() && self.session_high.is_none() && self.session_low.is_none()
    }
}
