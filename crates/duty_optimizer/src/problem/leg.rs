use std::cmp::Ordering;

use serde::Serialize;

use crate::define_index_newtype;

use super::location::LocationIdx;

/// Time in minutes since the start of the service day.
pub type Minutes = i64;

define_index_newtype!(LegIdx, Leg);
define_index_newtype!(TourId);

/// Atomic duty segment of a vehicle tour.
///
/// Legs are ordered by `(start, id)` and identified by `id` only.
#[derive(Serialize, Debug, Clone)]
pub struct Leg {
    id: usize,
    tour: TourId,
    start: Minutes,
    end: Minutes,
    start_location_id: LocationIdx,
    end_location_id: LocationIdx,
}

impl Leg {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn tour(&self) -> TourId {
        self.tour
    }

    pub fn start(&self) -> Minutes {
        self.start
    }

    pub fn end(&self) -> Minutes {
        self.end
    }

    pub fn start_location_id(&self) -> LocationIdx {
        self.start_location_id
    }

    pub fn end_location_id(&self) -> LocationIdx {
        self.end_location_id
    }

    /// Driving time of the leg.
    #[inline]
    pub fn drive(&self) -> Minutes {
        self.end - self.start
    }
}

impl PartialEq for Leg {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Leg {}

impl Ord for Leg {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Leg {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
pub struct LegBuilder {
    id: Option<usize>,
    tour: Option<TourId>,
    start: Option<Minutes>,
    end: Option<Minutes>,
    start_location_id: Option<LocationIdx>,
    end_location_id: Option<LocationIdx>,
}

impl LegBuilder {
    pub fn set_id(&mut self, id: usize) -> &mut LegBuilder {
        self.id = Some(id);
        self
    }

    pub fn set_tour(&mut self, tour: usize) -> &mut LegBuilder {
        self.tour = Some(TourId::new(tour));
        self
    }

    pub fn set_time(&mut self, start: Minutes, end: Minutes) -> &mut LegBuilder {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn set_start_location_id(&mut self, location_id: usize) -> &mut LegBuilder {
        self.start_location_id = Some(LocationIdx::new(location_id));
        self
    }

    pub fn set_end_location_id(&mut self, location_id: usize) -> &mut LegBuilder {
        self.end_location_id = Some(LocationIdx::new(location_id));
        self
    }

    pub fn build(self) -> Leg {
        let start = self.start.expect("Expected leg start");
        Leg {
            id: self.id.expect("Expected leg id"),
            tour: self.tour.unwrap_or_default(),
            start,
            end: self.end.unwrap_or(start),
            start_location_id: self.start_location_id.unwrap_or_default(),
            end_location_id: self.end_location_id.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(id: usize, start: Minutes, end: Minutes) -> Leg {
        let mut builder = LegBuilder::default();
        builder.set_id(id).set_time(start, end);
        builder.build()
    }

    #[test]
    fn test_leg_drive() {
        assert_eq!(leg(1, 360, 425).drive(), 65);
    }

    #[test]
    fn test_leg_ordering_breaks_ties_by_id() {
        let mut legs = vec![leg(3, 400, 420), leg(2, 400, 410), leg(1, 500, 530)];
        legs.sort();

        assert_eq!(
            legs.iter().map(|leg| leg.id()).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_leg_identity_is_id() {
        assert_eq!(leg(7, 100, 120), leg(7, 300, 330));
        assert_ne!(leg(7, 100, 120), leg(8, 100, 120));
    }
}
