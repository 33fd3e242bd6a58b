use std::sync::Arc;

use crate::{
    problem::{
        duty_problem::DutyProblem,
        instance::InstanceBuilder,
        labor_rules::LaborRules,
        leg::{LegBuilder, LegIdx, Minutes},
        location::ShiftOverheads,
    },
    solver::solution::{employee::EmployeeIdx, solution::Solution},
};

pub const TEST_START_WORK: Minutes = 10;
pub const TEST_END_WORK: Minutes = 10;

pub struct TestLeg {
    pub id: usize,
    pub tour: usize,
    pub start: Minutes,
    pub end: Minutes,
    pub start_location: usize,
    pub end_location: usize,
}

impl TestLeg {
    pub fn new(id: usize, tour: usize, start: Minutes, end: Minutes) -> Self {
        TestLeg {
            id,
            tour,
            start,
            end,
            start_location: 0,
            end_location: 0,
        }
    }

    pub fn with_locations(mut self, start_location: usize, end_location: usize) -> Self {
        self.start_location = start_location;
        self.end_location = end_location;
        self
    }
}

pub fn create_problem_with_ride_times(
    legs: Vec<TestLeg>,
    ride_times: Vec<Vec<Minutes>>,
) -> Arc<DutyProblem> {
    let num_locations = ride_times.len();
    let mut builder = InstanceBuilder::default();

    for leg in legs {
        let mut leg_builder = LegBuilder::default();
        leg_builder
            .set_id(leg.id)
            .set_tour(leg.tour)
            .set_time(leg.start, leg.end)
            .set_start_location_id(leg.start_location)
            .set_end_location_id(leg.end_location);
        builder.add_leg(leg_builder.build());
    }

    builder
        .set_ride_times(ride_times)
        .set_overheads(ShiftOverheads::uniform(
            num_locations,
            TEST_START_WORK,
            TEST_END_WORK,
        ));

    Arc::new(DutyProblem::new(
        builder.build().unwrap(),
        LaborRules::default(),
    ))
}

/// Problem where every location is reachable from every other one without riding.
pub fn create_problem(legs: Vec<TestLeg>) -> Arc<DutyProblem> {
    let num_locations = legs
        .iter()
        .map(|leg| leg.start_location.max(leg.end_location) + 1)
        .max()
        .unwrap_or(1);

    create_problem_with_ride_times(legs, vec![vec![0; num_locations]; num_locations])
}

/// Two tours shuttling between two locations 15 minutes apart.
///
/// Legs alternate between the tours: positions 0, 2, 4, 6 belong to tour 1 and positions
/// 1, 3, 5, 7 to tour 2. Leg ids are the positions plus one.
pub fn create_two_tours_problem() -> Arc<DutyProblem> {
    create_problem_with_ride_times(
        vec![
            TestLeg::new(1, 1, 300, 380).with_locations(0, 1),
            TestLeg::new(2, 2, 320, 400).with_locations(1, 0),
            TestLeg::new(3, 1, 390, 470).with_locations(1, 0),
            TestLeg::new(4, 2, 410, 490).with_locations(0, 1),
            TestLeg::new(5, 1, 520, 600).with_locations(0, 1),
            TestLeg::new(6, 2, 540, 620).with_locations(1, 0),
            TestLeg::new(7, 1, 610, 690).with_locations(1, 0),
            TestLeg::new(8, 2, 630, 710).with_locations(0, 1),
        ],
        vec![vec![0, 15], vec![15, 0]],
    )
}

/// Solution with one employee per entry of `employees`, each holding the given leg positions.
pub fn create_test_solution(problem: Arc<DutyProblem>, employees: Vec<Vec<usize>>) -> Solution {
    let mut solution = Solution::new(problem, employees.len());

    for (employee_id, legs) in employees.into_iter().enumerate() {
        for leg in legs {
            solution.assign_leg(EmployeeIdx::new(employee_id), LegIdx::new(leg));
        }
    }

    solution
}
