use std::sync::Arc;

use fixedbitset::FixedBitSet;
use tracing::{Level, debug, instrument};

use crate::{
    problem::{
        duty_problem::DutyProblem,
        leg::{LegIdx, TourId},
    },
    solver::solution::{employee::EmployeeIdx, solution::Solution},
};

/// Employee with the lowest own objective once `leg_id` is added, lowest id on ties.
///
/// Empty employees only ever follow the non-empty ones, so the scan stops at the first of them.
fn best_employee_for(solution: &Solution, leg_id: LegIdx) -> Option<EmployeeIdx> {
    let problem = solution.problem();
    let mut best: Option<(EmployeeIdx, i64)> = None;

    for employee in solution.employees() {
        let objective = employee.evaluate_with_leg(problem, leg_id).objective();

        if best.is_none_or(|(_, best_objective)| objective < best_objective) {
            best = Some((employee.id(), objective));
        }

        if employee.is_empty() {
            break;
        }
    }

    best.map(|(employee_id, _)| employee_id)
}

fn next_leg_of_tour(
    problem: &DutyProblem,
    unassigned: &FixedBitSet,
    tour: TourId,
) -> Option<LegIdx> {
    unassigned
        .ones()
        .map(LegIdx::new)
        .find(|&leg_id| problem.leg(leg_id).tour() == tour)
}

/// Greedy leg-by-leg assignment.
///
/// The earliest unassigned leg goes to the employee that is the least expensive with it, then the
/// following legs of the same tour are added to that employee for as long as its schedule stays
/// free of hard violations.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn construct_solution(problem: &Arc<DutyProblem>) -> Solution {
    let num_legs = problem.num_legs();
    let mut solution = Solution::new(Arc::clone(problem), num_legs);

    let mut unassigned = FixedBitSet::with_capacity(num_legs);
    unassigned.insert_range(..);

    while let Some(first) = unassigned.ones().next() {
        let leg_id = LegIdx::new(first);
        unassigned.set(first, false);

        let employee_id = best_employee_for(&solution, leg_id)
            .expect("There is one employee per leg, an empty one is always left");
        solution.assign_leg(employee_id, leg_id);

        let tour = problem.leg(leg_id).tour();
        while let Some(next_leg_id) = next_leg_of_tour(problem, &unassigned, tour) {
            let metrics = solution
                .employee(employee_id)
                .evaluate_with_leg(problem, next_leg_id);
            if metrics.score.hard_score != 0 {
                break;
            }

            unassigned.set(next_leg_id.get(), false);
            solution.assign_leg(employee_id, next_leg_id);
        }
    }

    solution.remove_empty_employees();

    debug!(
        employees = solution.num_employees(),
        objective = solution.objective(),
        "Constructed initial solution"
    );

    solution
}
