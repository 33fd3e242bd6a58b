use serde::Serialize;

use super::{leg::Minutes, location::LocationIdx};

/// Passive ride (dead-head) minutes between locations.
///
/// The matrix uses a flat structure: the entry for a pair of locations is stored at
/// `from * num_locations + to`.
#[derive(Serialize, Debug, Clone, Default)]
pub struct RideTimeMatrix {
    times: Vec<Minutes>,
    num_locations: usize,
}

impl RideTimeMatrix {
    /// Flattens `rows`. Shape and sign are checked by the instance builder.
    pub fn new(rows: Vec<Vec<Minutes>>) -> Self {
        let num_locations = rows.len();
        RideTimeMatrix {
            times: rows.into_iter().flatten().collect(),
            num_locations,
        }
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    /// Ride time from `from` to `to`, zero when both are the same location.
    #[inline(always)]
    pub fn ride_time(&self, from: LocationIdx, to: LocationIdx) -> Minutes {
        if from == to {
            return 0;
        }

        self.times[self.index(from, to)]
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ride_time_lookup() {
        let matrix = RideTimeMatrix::new(vec![vec![0, 12, 30], vec![14, 0, 7], vec![31, 8, 0]]);

        assert_eq!(matrix.num_locations(), 3);
        assert_eq!(matrix.ride_time(LocationIdx::new(0), LocationIdx::new(2)), 30);
        assert_eq!(matrix.ride_time(LocationIdx::new(2), LocationIdx::new(1)), 8);
    }

    #[test]
    fn test_ride_time_same_location_is_zero() {
        let matrix = RideTimeMatrix::new(vec![vec![25, 25], vec![25, 25]]);

        assert_eq!(matrix.ride_time(LocationIdx::new(1), LocationIdx::new(1)), 0);
        assert_eq!(matrix.ride_time(LocationIdx::new(1), LocationIdx::new(0)), 25);
    }
}
