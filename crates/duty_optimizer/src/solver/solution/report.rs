use serde::Serialize;

use crate::{
    problem::{duty_problem::DutyProblem, labor_rules::LaborRules, leg::Minutes},
    solver::constraints::schedule_constraint::{PenaltyTerm, ScheduleConstraint},
};

use super::employee::Employee;

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeReport {
    pub name: String,
    /// Ids of the assigned legs, in schedule order.
    pub legs: Vec<usize>,
    pub start_shift: Minutes,
    pub end_shift: Minutes,
    pub bus_chain_penalty: Minutes,
    pub driving_time: Minutes,
    pub total_time: Minutes,
    pub tour_change_count: i64,
    pub ride_time: Minutes,
    pub driving_block_penalty: Minutes,
    pub rest_penalty: Minutes,
    pub work_time: Minutes,
    pub split_count: i64,
    pub hard: i64,
    pub soft: i64,
    pub penalties: Vec<PenaltyTerm>,
}

impl EmployeeReport {
    pub(super) fn new(problem: &DutyProblem, employee: &Employee) -> Self {
        let metrics = employee.metrics();
        let rules: &LaborRules = problem.rules();

        EmployeeReport {
            name: employee.name(),
            legs: employee
                .legs()
                .iter()
                .map(|&leg_id| problem.leg(leg_id).id())
                .collect(),
            start_shift: metrics.start_shift,
            end_shift: metrics.end_shift,
            bus_chain_penalty: metrics.bus_chain_penalty,
            driving_time: metrics.driving_time,
            total_time: metrics.total_time,
            tour_change_count: metrics.tour_change_count,
            ride_time: metrics.ride_time,
            driving_block_penalty: metrics.driving_block_penalty,
            rest_penalty: metrics.rest_penalty,
            work_time: metrics.work_time,
            split_count: metrics.split_count,
            hard: metrics.score.hard_score,
            soft: metrics.score.soft_score,
            penalties: ScheduleConstraint::ALL
                .iter()
                .map(|constraint| constraint.penalty_term(metrics, rules))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SolutionReport {
    pub employees: Vec<EmployeeReport>,
    pub hard: i64,
    pub soft: i64,
    pub objective: i64,
}
