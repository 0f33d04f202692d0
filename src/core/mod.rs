pub mod calendar;
pub mod projection;
pub mod types;

pub use calendar::{
    clamp, coerce_finite, date_key_to_unix_seconds, format_change, format_price,
    format_tick_label, format_tooltip_date, format_volume,
};
pub use projection::{
    BarDirection, CandleSample, DerivedSeries, ProjectionCache, TrendPoint, VolumeBar,
    project_records,
};
pub use types::{Granularity, PeriodRecord, ReferenceLevels, TREND_LINE_COUNT};
