//! Animation-frame work coalescing.
//!
//! Year-guide recomputation and tooltip repositioning both yield to the next
//! frame so they observe just-applied layout. Scheduling is cancel-and-
//! reschedule: any number of triggers within one frame collapses into a
//! single pending slot per job.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameJob {
    YearGuides,
    TooltipPosition,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    year_guides: bool,
    tooltip_position: bool,
}

impl FrameScheduler {
    pub fn schedule(&mut self, job: FrameJob) {
        match job {
            FrameJob::YearGuides => self.year_guides = true,
            FrameJob::TooltipPosition => self.tooltip_position = true,
        }
    }

    /// Clears the pending slot and reports whether the job was due.
    pub fn take(&mut self, job: FrameJob) -> bool {
        let slot = match job {
            FrameJob::YearGuides => &mut self.year_guides,
            FrameJob::TooltipPosition => &mut self.tooltip_position,
        };
        std::mem::take(slot)
    }

    /// Drops all pending work. Disposal must call this before the surface is
    /// destroyed so nothing fires afterwards.
    pub fn cancel_all(&mut self) {
        self.year_guides = false;
        self.tooltip_position = false;
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.year_guides || self.tooltip_position
    }
}
