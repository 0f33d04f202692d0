//! Calendar-year transition markers drawn as an absolutely positioned overlay.
//!
//! The mark set depends only on the record sequence; pixel positions depend
//! on the surface's visible range and width, so the layer is rebuilt
//! wholesale whenever either changes. Marks whose timestamp falls outside the
//! projectable range are dropped.

use smallvec::SmallVec;

use crate::core::calendar::date_key_to_unix_seconds;
use crate::core::types::PeriodRecord;
use crate::error::ChartViewResult;
use crate::surface::DrawingSurface;

/// Horizontal gap between a guide line and its year label.
const LABEL_OFFSET: f64 = 6.0;

const LINE_WIDTH: f64 = 2.0;

/// One year-boundary candidate: the record index opening a new calendar year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearBoundary {
    pub index: usize,
    pub year: String,
}

/// One positioned overlay mark that survived coordinate projection.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGuideMark {
    pub x: f64,
    pub label: String,
}

impl YearGuideMark {
    #[must_use]
    pub fn label_x(&self) -> f64 {
        self.x + LABEL_OFFSET
    }

    #[must_use]
    pub fn line_width(&self) -> f64 {
        LINE_WIDTH
    }
}

/// The rebuilt-wholesale overlay layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearGuideLayer {
    width: f64,
    height: f64,
    marks: SmallVec<[YearGuideMark; 8]>,
}

impl YearGuideLayer {
    /// Discards all marks; the layer draws nothing until the next rebuild.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.width = 0.0;
        self.height = 0.0;
    }

    #[must_use]
    pub fn marks(&self) -> &[YearGuideMark] {
        &self.marks
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Recomputes the layer from scratch against current surface geometry.
    pub(crate) fn rebuild<S: DrawingSurface>(
        &mut self,
        surface: &S,
        records: &[PeriodRecord],
        height: u32,
    ) -> ChartViewResult<()> {
        self.clear();

        for boundary in year_boundaries(records) {
            let time = date_key_to_unix_seconds(&records[boundary.index].date_key)?;
            let Some(x) = surface.time_to_coordinate(time) else {
                continue;
            };
            self.marks.push(YearGuideMark {
                x,
                label: boundary.year,
            });
        }

        self.width = f64::from(surface.width());
        self.height = f64::from(height);
        Ok(())
    }
}

/// Scans the sequence once, emitting a boundary at the first record and at
/// every record whose year differs from the immediately preceding record's.
#[must_use]
pub fn year_boundaries(records: &[PeriodRecord]) -> Vec<YearBoundary> {
    let mut boundaries = Vec::new();
    let mut previous_year: Option<&str> = None;

    for (index, record) in records.iter().enumerate() {
        let year = record.year();
        if previous_year != Some(year) {
            boundaries.push(YearBoundary {
                index,
                year: year.to_owned(),
            });
        }
        previous_year = Some(year);
    }

    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date_key: &str) -> PeriodRecord {
        PeriodRecord::new(date_key, 10.0, 12.0, 9.0, 11.0, 100).expect("valid record")
    }

    #[test]
    fn boundaries_mark_first_record_and_year_changes_only() {
        let records = vec![record("20231230"), record("20231231"), record("20240102")];
        let boundaries = year_boundaries(&records);

        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0].index, 0);
        assert_eq!(boundaries[0].year, "2023");
        assert_eq!(boundaries[1].index, 2);
        assert_eq!(boundaries[1].year, "2024");
    }

    #[test]
    fn empty_sequence_has_no_boundaries() {
        assert!(year_boundaries(&[]).is_empty());
    }

    #[test]
    fn single_year_sequence_marks_only_the_first_record() {
        let records = vec![record("20240102"), record("20240103"), record("20241230")];
        let boundaries = year_boundaries(&records);
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].index, 0);
    }
}
