//! Derivation of the four parallel series bound to the drawing surface.
//!
//! Projection is pure: an ordered sequence of [`PeriodRecord`]s maps to
//! candle, volume and trend-line samples keyed by the shared axis timestamp.
//! Series are always recomputed wholesale, never patched incrementally; the
//! [`ProjectionCache`] makes repeated projection of unchanged input cheap.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::calendar::date_key_to_unix_seconds;
use crate::core::types::{PeriodRecord, TREND_LINE_COUNT};
use crate::error::{ChartViewError, ChartViewResult};

/// Up/down classification shared by candle coloring and volume bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarDirection {
    Up,
    Down,
}

impl BarDirection {
    /// Classifies a bar from its own open/close pair. Equal counts as up.
    #[must_use]
    pub fn from_open_close(open: f64, close: f64) -> Self {
        if close >= open { Self::Up } else { Self::Down }
    }
}

/// One price-range sample on the shared time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleSample {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl CandleSample {
    /// Returns `true` when close is greater than or equal to open.
    #[must_use]
    pub fn is_up(self) -> bool {
        self.close >= self.open
    }
}

/// One traded-volume sample, colored per-entry by its own open/close pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub time: i64,
    pub value: u64,
    pub direction: BarDirection,
}

/// One smoothed trend-line sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub time: i64,
    pub value: f64,
}

/// The four parallel series derived from one record sequence.
///
/// Candles and volume are 1:1 with the source; each trend series omits
/// entries where the corresponding optional average is absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub candles: Vec<CandleSample>,
    pub volume: Vec<VolumeBar>,
    pub trend: [Vec<TrendPoint>; TREND_LINE_COUNT],
}

impl DerivedSeries {
    /// Looks up the candle at an exact axis timestamp.
    #[must_use]
    pub fn candle_at(&self, time: i64) -> Option<CandleSample> {
        self.candles
            .binary_search_by_key(&time, |c| c.time)
            .ok()
            .map(|i| self.candles[i])
    }

    /// Looks up the traded volume at an exact axis timestamp.
    #[must_use]
    pub fn volume_at(&self, time: i64) -> Option<u64> {
        self.volume
            .binary_search_by_key(&time, |v| v.time)
            .ok()
            .map(|i| self.volume[i].value)
    }

    /// Looks up one trend line's value at an exact axis timestamp.
    #[must_use]
    pub fn trend_at(&self, slot: usize, time: i64) -> Option<f64> {
        let series = self.trend.get(slot)?;
        series
            .binary_search_by_key(&time, |p| p.time)
            .ok()
            .map(|i| series[i].value)
    }
}

/// Projects an ordered record sequence into its derived series.
///
/// Timestamps must come out strictly increasing; duplicate or descending
/// date keys are a contract violation by the upstream data source.
pub fn project_records(records: &[PeriodRecord]) -> ChartViewResult<DerivedSeries> {
    let timestamps = derive_timestamps(records)?;

    for pair in timestamps.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ChartViewError::InvalidRecord(
                "date keys must be unique and strictly ascending".to_owned(),
            ));
        }
    }

    let mut series = DerivedSeries {
        candles: Vec::with_capacity(records.len()),
        volume: Vec::with_capacity(records.len()),
        trend: Default::default(),
    };

    for (record, &time) in records.iter().zip(&timestamps) {
        series.candles.push(CandleSample {
            time,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        });
        series.volume.push(VolumeBar {
            time,
            value: record.volume,
            direction: BarDirection::from_open_close(record.open, record.close),
        });
        for slot in 0..TREND_LINE_COUNT {
            if let Some(value) = record.trend_value(slot) {
                series.trend[slot].push(TrendPoint { time, value });
            }
        }
    }

    Ok(series)
}

#[cfg(feature = "parallel-projection")]
fn derive_timestamps(records: &[PeriodRecord]) -> ChartViewResult<Vec<i64>> {
    records
        .par_iter()
        .map(|record| date_key_to_unix_seconds(&record.date_key))
        .collect()
}

#[cfg(not(feature = "parallel-projection"))]
fn derive_timestamps(records: &[PeriodRecord]) -> ChartViewResult<Vec<i64>> {
    records
        .iter()
        .map(|record| date_key_to_unix_seconds(&record.date_key))
        .collect()
}

/// Memoizes projection over the identity/content of the source sequence.
///
/// `project` recomputes only when the record fingerprint changes, so callers
/// may re-run it on every rebuild without re-deriving unchanged series.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    fingerprint: Option<u64>,
    series: DerivedSeries,
    recomputes: u64,
}

impl ProjectionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&mut self, records: &[PeriodRecord]) -> ChartViewResult<&DerivedSeries> {
        let fingerprint = fingerprint_records(records);
        if self.fingerprint != Some(fingerprint) {
            self.series = project_records(records)?;
            self.fingerprint = Some(fingerprint);
            self.recomputes += 1;
        }
        Ok(&self.series)
    }

    #[must_use]
    pub fn series(&self) -> &DerivedSeries {
        &self.series
    }

    /// How many times the cache actually recomputed, for tests.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

fn fingerprint_records(records: &[PeriodRecord]) -> u64 {
    let mut hasher = std::hash::DefaultHasher::new();
    records.len().hash(&mut hasher);
    for record in records {
        record.date_key.hash(&mut hasher);
        record.open.to_bits().hash(&mut hasher);
        record.high.to_bits().hash(&mut hasher);
        record.low.to_bits().hash(&mut hasher);
        record.close.to_bits().hash(&mut hasher);
        record.volume.hash(&mut hasher);
        for slot in 0..TREND_LINE_COUNT {
            record.trend_value(slot).map(f64::to_bits).hash(&mut hasher);
        }
    }
    hasher.finish()
}
