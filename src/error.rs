use thiserror::Error;

pub type ChartViewResult<T> = Result<T, ChartViewError>;

#[derive(Debug, Error)]
pub enum ChartViewError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid date key `{key}`: expected 8 numeric digits (YYYYMMDD)")]
    InvalidDateKey { key: String },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("chart view has not been mounted")]
    NotMounted,

    #[error("chart view has been disposed")]
    Disposed,
}
