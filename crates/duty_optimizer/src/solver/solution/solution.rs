use std::sync::Arc;

use thiserror::Error;

use crate::{
    problem::{duty_problem::DutyProblem, leg::LegIdx},
    solver::score::{Score, ScoreAnalysis},
};

use super::{
    employee::{Employee, EmployeeIdx},
    employee_move::EmployeeMove,
    report::{EmployeeReport, SolutionReport},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolutionMatrixError {
    #[error("row {row} has {len} columns, expected one per leg ({expected})")]
    RowLength {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("cell ({row}, {column}) is {value}, expected 0 or 1")]
    NonBinary { row: usize, column: usize, value: u8 },

    #[error("leg {0} is assigned to more than one employee")]
    AssignedTwice(usize),

    #[error("leg {0} is not assigned to any employee")]
    Unassigned(usize),
}

#[derive(Debug, Clone, Copy)]
struct PendingMove {
    employee_move: EmployeeMove,
    delta: i64,
}

/// Assignment of every leg to an employee, with the aggregate objective kept in sync.
///
/// Outside of an executed move that has not been reverted yet, `objective` is the sum of the
/// employee objectives.
#[derive(Debug, Clone)]
pub struct Solution {
    problem: Arc<DutyProblem>,
    employees: Vec<Employee>,
    objective: i64,
    pending_move: Option<PendingMove>,
}

impl Solution {
    /// Solution with `num_employees` empty employees.
    pub fn new(problem: Arc<DutyProblem>, num_employees: usize) -> Self {
        Solution {
            problem,
            employees: (0..num_employees)
                .map(|id| Employee::empty(EmployeeIdx::new(id)))
                .collect(),
            objective: 0,
            pending_move: None,
        }
    }

    /// Rebuilds a solution from a binary `employees x legs` matrix.
    ///
    /// Columns follow the instance leg order. Empty rows are dropped, the remaining employees
    /// are ordered by their first leg and numbered from zero.
    pub fn from_matrix(
        problem: Arc<DutyProblem>,
        matrix: &[Vec<u8>],
    ) -> Result<Self, SolutionMatrixError> {
        let num_legs = problem.num_legs();
        let mut owners: Vec<Option<usize>> = vec![None; num_legs];

        for (row_index, row) in matrix.iter().enumerate() {
            if row.len() != num_legs {
                return Err(SolutionMatrixError::RowLength {
                    row: row_index,
                    len: row.len(),
                    expected: num_legs,
                });
            }

            for (column, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => {
                        if owners[column].replace(row_index).is_some() {
                            return Err(SolutionMatrixError::AssignedTwice(
                                problem.leg(LegIdx::new(column)).id(),
                            ));
                        }
                    }
                    _ => {
                        return Err(SolutionMatrixError::NonBinary {
                            row: row_index,
                            column,
                            value,
                        });
                    }
                }
            }
        }

        if let Some(column) = owners.iter().position(Option::is_none) {
            return Err(SolutionMatrixError::Unassigned(
                problem.leg(LegIdx::new(column)).id(),
            ));
        }

        let mut solution = Solution::new(problem, matrix.len());
        for (column, owner) in owners.into_iter().enumerate() {
            if let Some(row) = owner {
                solution.employees[row].insert_leg(LegIdx::new(column));
            }
        }

        solution.remove_empty_employees();
        solution
            .employees
            .sort_by_key(|employee| employee.first_leg());
        solution.renumber_employees();
        solution.evaluate();

        Ok(solution)
    }

    /// Binary `employees x legs` matrix, rows by employee id and columns in instance leg order.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.employees
            .iter()
            .map(|employee| {
                let mut row = vec![0; self.problem.num_legs()];
                for &leg_id in employee.legs() {
                    row[leg_id.get()] = 1;
                }
                row
            })
            .collect()
    }

    pub fn problem(&self) -> &DutyProblem {
        &self.problem
    }

    pub fn problem_arc(&self) -> &Arc<DutyProblem> {
        &self.problem
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, employee_id: EmployeeIdx) -> &Employee {
        &self.employees[employee_id]
    }

    pub fn num_employees(&self) -> usize {
        self.employees.len()
    }

    pub fn non_empty_employees_iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees
            .iter()
            .filter(|employee| !employee.is_empty())
    }

    pub fn objective(&self) -> i64 {
        self.objective
    }

    pub fn score(&self) -> Score {
        self.employees.iter().map(Employee::score).sum()
    }

    /// Re-evaluates every employee and returns the objective.
    pub fn evaluate(&mut self) -> i64 {
        let problem = &self.problem;
        self.objective = self
            .employees
            .iter_mut()
            .map(|employee| employee.refresh(problem))
            .sum();
        self.pending_move = None;

        self.objective
    }

    /// Adds `leg_id` to an employee and re-evaluates it.
    pub fn assign_leg(&mut self, employee_id: EmployeeIdx, leg_id: LegIdx) -> i64 {
        let employee = &mut self.employees[employee_id];
        let old_objective = employee.objective();

        employee.insert_leg(leg_id);
        let new_objective = employee.refresh(&self.problem);

        self.objective += new_objective - old_objective;
        self.pending_move = None;

        self.objective
    }

    /// Moves a leg to another employee and returns the new objective.
    ///
    /// The move stays pending until the next move is executed, so that
    /// [`Solution::revert_move`] can undo it without evaluating anything.
    ///
    /// # Panics
    ///
    /// Panics when `from` and `to` are the same employee or when `from` does not own the leg.
    pub fn execute_move(&mut self, employee_move: EmployeeMove) -> i64 {
        let EmployeeMove { from, to, leg } = employee_move;
        assert_ne!(from, to, "Cannot move leg {leg} within {from}");

        self.employees[from].remove_leg(leg);
        self.employees[to].insert_leg(leg);

        let old_objective = self.employees[from].objective() + self.employees[to].objective();
        let new_objective = self.employees[from].evaluate(&self.problem)
            + self.employees[to].evaluate(&self.problem);

        let delta = new_objective - old_objective;
        self.objective += delta;
        self.pending_move = Some(PendingMove {
            employee_move,
            delta,
        });

        self.objective
    }

    /// Undoes the pending move, restoring both employees' previous metrics.
    ///
    /// # Panics
    ///
    /// Panics when `employee_move` is not the pending move.
    pub fn revert_move(&mut self, employee_move: EmployeeMove) -> i64 {
        let pending = match self.pending_move.take() {
            Some(pending) if pending.employee_move == employee_move => pending,
            _ => panic!("Cannot revert {employee_move}, it is not the pending move"),
        };
        let EmployeeMove { from, to, leg } = employee_move;

        self.employees[to].remove_leg(leg);
        self.employees[from].insert_leg(leg);
        self.employees[from].revert();
        self.employees[to].revert();

        self.objective -= pending.delta;
        self.objective
    }

    /// Objective the solution would have after `employee_move`, leaving the solution untouched.
    pub fn evaluate_move(&self, employee_move: EmployeeMove) -> i64 {
        let EmployeeMove { from, to, leg } = employee_move;
        let source = &self.employees[from];
        let target = &self.employees[to];

        self.objective - source.objective() - target.objective()
            + source.evaluate_without_leg(&self.problem, leg).objective()
            + target.evaluate_with_leg(&self.problem, leg).objective()
    }

    /// Drops employees without legs and renumbers the others, keeping their order.
    pub fn remove_empty_employees(&mut self) {
        self.employees.retain(|employee| !employee.is_empty());
        self.renumber_employees();
        self.pending_move = None;
    }

    fn renumber_employees(&mut self) {
        for (index, employee) in self.employees.iter_mut().enumerate() {
            employee.set_id(EmployeeIdx::new(index));
        }
    }

    pub fn report(&self) -> SolutionReport {
        let score = self.score();
        SolutionReport {
            employees: self
                .non_empty_employees_iter()
                .map(|employee| EmployeeReport::new(&self.problem, employee))
                .collect(),
            hard: score.hard_score,
            soft: score.soft_score,
            objective: self.objective,
        }
    }

    pub fn score_analysis(&self) -> ScoreAnalysis {
        let mut analysis = ScoreAnalysis::default();
        for employee in self.non_empty_employees_iter() {
            for term in EmployeeReport::new(&self.problem, employee).penalties {
                analysis.add(term.name, Score::of(term.level, term.weighted()));
            }
        }
        analysis
    }

    /// Same assignment with the same metrics and objective.
    pub fn is_identical(&self, other: &Solution) -> bool {
        self.objective == other.objective
            && self.employees.len() == other.employees.len()
            && self
                .employees
                .iter()
                .zip(&other.employees)
                .all(|(employee, other)| employee.is_identical(other))
    }
}
