use fxhash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use crate::utils::enumerate_idx::EnumerateIdx;

use super::{
    leg::{Leg, LegIdx, Minutes},
    location::{LocationIdx, ShiftOverheads},
    ride_time_matrix::RideTimeMatrix,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InstanceError {
    #[error("ride time matrix row {row} has {len} entries, expected {expected}")]
    MatrixDimension {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("ride time from {from} to {to} is negative ({minutes})")]
    NegativeRideTime {
        from: usize,
        to: usize,
        minutes: Minutes,
    },

    #[error("{table} overhead table has {len} entries, expected {expected}")]
    OverheadTableSize {
        table: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("{table} overhead of location {location} is negative ({minutes})")]
    NegativeOverhead {
        table: &'static str,
        location: usize,
        minutes: Minutes,
    },

    #[error("leg {leg} references unknown location {location}")]
    UnknownLocation { leg: usize, location: usize },

    #[error("leg {leg} has a negative time")]
    NegativeTime { leg: usize },

    #[error("leg {leg} ends at {end}, before its start at {start}")]
    EndsBeforeStart {
        leg: usize,
        start: Minutes,
        end: Minutes,
    },

    #[error("leg id {0} is used more than once")]
    DuplicateLegId(usize),
}

/// Read-only input of the scheduling problem.
///
/// Legs are sorted by `(start, id)`; the position of a leg in [`Instance::legs`] is its
/// [`LegIdx`] and the column of the leg in assignment matrices.
#[derive(Serialize, Debug, Clone)]
pub struct Instance {
    legs: Vec<Leg>,
    ride_times: RideTimeMatrix,
    overheads: ShiftOverheads,

    #[serde(skip)]
    leg_ids: FxHashMap<usize, LegIdx>,
}

impl Instance {
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    #[inline]
    pub fn leg(&self, leg_id: LegIdx) -> &Leg {
        &self.legs[leg_id]
    }

    pub fn leg_by_id(&self, id: usize) -> Option<LegIdx> {
        self.leg_ids.get(&id).copied()
    }

    pub fn num_legs(&self) -> usize {
        self.legs.len()
    }

    pub fn num_locations(&self) -> usize {
        self.ride_times.num_locations()
    }

    pub fn leg_indices(&self) -> impl DoubleEndedIterator<Item = LegIdx> {
        (0..self.legs.len()).map(LegIdx::new)
    }

    #[inline]
    pub fn ride_time(&self, from: LocationIdx, to: LocationIdx) -> Minutes {
        self.ride_times.ride_time(from, to)
    }

    #[inline]
    pub fn start_work(&self, location_id: LocationIdx) -> Minutes {
        self.overheads.start_work(location_id)
    }

    #[inline]
    pub fn end_work(&self, location_id: LocationIdx) -> Minutes {
        self.overheads.end_work(location_id)
    }
}

#[derive(Default)]
pub struct InstanceBuilder {
    legs: Vec<Leg>,
    ride_times: Option<Vec<Vec<Minutes>>>,
    overheads: Option<ShiftOverheads>,
}

impl InstanceBuilder {
    pub fn add_leg(&mut self, leg: Leg) -> &mut InstanceBuilder {
        self.legs.push(leg);
        self
    }

    pub fn set_legs(&mut self, legs: Vec<Leg>) -> &mut InstanceBuilder {
        self.legs = legs;
        self
    }

    pub fn set_ride_times(&mut self, ride_times: Vec<Vec<Minutes>>) -> &mut InstanceBuilder {
        self.ride_times = Some(ride_times);
        self
    }

    pub fn set_overheads(&mut self, overheads: ShiftOverheads) -> &mut InstanceBuilder {
        self.overheads = Some(overheads);
        self
    }

    pub fn build(self) -> Result<Instance, InstanceError> {
        let rows = self.ride_times.expect("Expected ride time matrix");
        let overheads = self.overheads.expect("Expected shift overheads");
        let num_locations = rows.len();

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != num_locations {
                return Err(InstanceError::MatrixDimension {
                    row: row_index,
                    len: row.len(),
                    expected: num_locations,
                });
            }

            if let Some((column, &minutes)) = row.iter().enumerate().find(|(_, m)| **m < 0) {
                return Err(InstanceError::NegativeRideTime {
                    from: row_index,
                    to: column,
                    minutes,
                });
            }
        }

        for (table, values) in [
            ("start_work", overheads.start_work_table()),
            ("end_work", overheads.end_work_table()),
        ] {
            if values.len() != num_locations {
                return Err(InstanceError::OverheadTableSize {
                    table,
                    len: values.len(),
                    expected: num_locations,
                });
            }

            if let Some((location, &minutes)) = values.iter().enumerate().find(|(_, m)| **m < 0) {
                return Err(InstanceError::NegativeOverhead {
                    table,
                    location,
                    minutes,
                });
            }
        }

        for leg in &self.legs {
            for location in [leg.start_location_id(), leg.end_location_id()] {
                if location.get() >= num_locations {
                    return Err(InstanceError::UnknownLocation {
                        leg: leg.id(),
                        location: location.get(),
                    });
                }
            }

            if leg.start() < 0 || leg.end() < 0 {
                return Err(InstanceError::NegativeTime { leg: leg.id() });
            }

            if leg.end() < leg.start() {
                return Err(InstanceError::EndsBeforeStart {
                    leg: leg.id(),
                    start: leg.start(),
                    end: leg.end(),
                });
            }
        }

        let mut legs = self.legs;
        legs.sort();

        let mut leg_ids = FxHashMap::default();
        for (leg_id, leg) in legs.enumerate_idx::<LegIdx>() {
            if leg_ids.insert(leg.id(), leg_id).is_some() {
                return Err(InstanceError::DuplicateLegId(leg.id()));
            }
        }

        Ok(Instance {
            legs,
            ride_times: RideTimeMatrix::new(rows),
            overheads,
            leg_ids,
        })
    }
}
