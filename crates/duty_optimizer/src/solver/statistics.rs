use jiff::SignedDuration;
use serde::Serialize;

use super::{neighborhood::NeighborhoodScan, solution::employee_move::EmployeeMove};

/// Move applied at one tabu search iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub employee_move: EmployeeMove,
    /// Objective of the current solution after the move.
    pub objective: i64,
    /// Objective of the best solution after the move.
    pub best_objective: i64,
    /// The move was tabu and applied because it improved the best solution.
    pub aspiration: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStatistics {
    pub iterations: Vec<IterationRecord>,
    /// Number of moves evaluated over all neighborhood scans.
    pub evaluations: usize,
    /// Lowest objective among the tabu candidates of all scans.
    pub best_tabu_objective: Option<i64>,
    /// Lowest objective among the admissible candidates of all scans.
    pub best_non_tabu_objective: Option<i64>,
    pub elapsed: SignedDuration,
}

impl SearchStatistics {
    pub fn add_scan(&mut self, scan: &NeighborhoodScan) {
        self.evaluations += scan.evaluations;

        if let Some(candidate) = scan.best_tabu {
            self.best_tabu_objective = Some(
                self.best_tabu_objective
                    .map_or(candidate.objective, |best| best.min(candidate.objective)),
            );
        }

        if let Some(candidate) = scan.best_admissible {
            self.best_non_tabu_objective = Some(
                self.best_non_tabu_objective
                    .map_or(candidate.objective, |best| best.min(candidate.objective)),
            );
        }
    }

    pub fn add_iteration(&mut self, record: IterationRecord) {
        self.iterations.push(record);
    }

    pub fn aspiration_count(&self) -> usize {
        self.iterations
            .iter()
            .filter(|record| record.aspiration)
            .count()
    }

    /// The applied moves, in order.
    pub fn moves(&self) -> impl Iterator<Item = &EmployeeMove> {
        self.iterations.iter().map(|record| &record.employee_move)
    }
}
