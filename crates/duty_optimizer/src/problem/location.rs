use serde::Serialize;

use crate::define_index_newtype;

use super::leg::Minutes;

define_index_newtype!(LocationIdx);

/// Fixed pre-shift and post-shift overhead of every location.
///
/// A shift starting at a location begins `start_work` minutes before the first leg, and a shift
/// ending at a location ends `end_work` minutes after the last leg.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ShiftOverheads {
    start_work: Vec<Minutes>,
    end_work: Vec<Minutes>,
}

impl ShiftOverheads {
    pub fn new(start_work: Vec<Minutes>, end_work: Vec<Minutes>) -> Self {
        ShiftOverheads {
            start_work,
            end_work,
        }
    }

    pub fn uniform(num_locations: usize, start_work: Minutes, end_work: Minutes) -> Self {
        ShiftOverheads {
            start_work: vec![start_work; num_locations],
            end_work: vec![end_work; num_locations],
        }
    }

    #[inline]
    pub fn start_work(&self, location_id: LocationIdx) -> Minutes {
        self.start_work[location_id.get()]
    }

    #[inline]
    pub fn end_work(&self, location_id: LocationIdx) -> Minutes {
        self.end_work[location_id.get()]
    }

    pub(crate) fn start_work_table(&self) -> &[Minutes] {
        &self.start_work
    }

    pub(crate) fn end_work_table(&self) -> &[Minutes] {
        &self.end_work
    }
}
