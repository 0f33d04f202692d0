//! Initial visible-window selection.

use crate::core::types::Granularity;

/// Extra logical bars kept free at the right edge so the most recent candle
/// is not flush against it.
const TRAILING_WHITESPACE_BARS: usize = 2;

/// Selects the initial visible logical range for a dataset.
///
/// Returns `None` for an empty dataset; the caller auto-fits instead.
#[must_use]
pub fn initial_visible_range(granularity: Granularity, total_bars: usize) -> Option<(f64, f64)> {
    if total_bars == 0 {
        return None;
    }
    let from = total_bars.saturating_sub(granularity.default_visible_bars());
    Some((from as f64, (total_bars + TRAILING_WHITESPACE_BARS) as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_window_shows_trailing_thirty_bars() {
        assert_eq!(
            initial_visible_range(Granularity::Daily, 100),
            Some((70.0, 102.0))
        );
    }

    #[test]
    fn short_dataset_starts_at_zero() {
        assert_eq!(
            initial_visible_range(Granularity::Daily, 10),
            Some((0.0, 12.0))
        );
    }

    #[test]
    fn empty_dataset_defers_to_fit_content() {
        assert_eq!(initial_visible_range(Granularity::Weekly, 0), None);
    }

    #[test]
    fn default_bar_counts_per_granularity() {
        assert_eq!(Granularity::Daily.default_visible_bars(), 30);
        assert_eq!(Granularity::Weekly.default_visible_bars(), 60);
        assert_eq!(Granularity::Monthly.default_visible_bars(), 140);
        assert_eq!(Granularity::Yearly.default_visible_bars(), 260);
    }
}
