use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use tracing::{Level, instrument};

use super::solution::{employee::EmployeeIdx, employee_move::EmployeeMove, solution::Solution};

/// Evaluated move and the objective the solution would have after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub employee_move: EmployeeMove,
    pub objective: i64,
}

/// Best candidates of a neighborhood, split by tabu status.
///
/// Candidates are considered in enumeration order and only a strictly lower objective replaces
/// the current best, so the first of equal candidates wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborhoodScan {
    pub best_admissible: Option<Candidate>,
    pub best_tabu: Option<Candidate>,
    pub evaluations: usize,
}

impl NeighborhoodScan {
    fn consider(&mut self, candidate: Candidate, is_tabu: bool) {
        let slot = if is_tabu {
            &mut self.best_tabu
        } else {
            &mut self.best_admissible
        };

        if slot.is_none_or(|best| candidate.objective < best.objective) {
            *slot = Some(candidate);
        }
    }

    /// Folds the scan of a later part of the enumeration into this one.
    fn merge(mut self, other: NeighborhoodScan) -> Self {
        if let Some(candidate) = other.best_admissible {
            self.consider(candidate, false);
        }
        if let Some(candidate) = other.best_tabu {
            self.consider(candidate, true);
        }
        self.evaluations += other.evaluations;
        self
    }
}

/// Every reassignment of one leg to another employee.
///
/// Moves are enumerated by source employee, then by leg in schedule order, then by target
/// employee. The parallel scan splits the enumeration by source employee and merges the parts
/// back in that order, so both scans select the same candidates.
pub struct Neighborhood<'a> {
    thread_pool: Option<&'a rayon::ThreadPool>,
}

impl<'a> Neighborhood<'a> {
    pub fn new(thread_pool: Option<&'a rayon::ThreadPool>) -> Self {
        Neighborhood { thread_pool }
    }

    #[instrument(skip_all, level = Level::TRACE)]
    pub fn scan<F>(&self, solution: &mut Solution, is_tabu: F) -> NeighborhoodScan
    where
        F: Fn(&EmployeeMove) -> bool + Sync,
    {
        match self.thread_pool {
            Some(thread_pool) => Self::scan_parallel(thread_pool, solution, &is_tabu),
            None => Self::scan_sequential(solution, &is_tabu),
        }
    }

    fn scan_sequential<F>(solution: &mut Solution, is_tabu: &F) -> NeighborhoodScan
    where
        F: Fn(&EmployeeMove) -> bool,
    {
        let mut scan = NeighborhoodScan::default();
        let num_employees = solution.num_employees();

        for source in (0..num_employees).map(EmployeeIdx::new) {
            let legs = solution.employee(source).legs().to_vec();
            for leg in legs {
                for target in (0..num_employees).map(EmployeeIdx::new) {
                    if target == source {
                        continue;
                    }

                    let employee_move = EmployeeMove::new(source, target, leg);
                    let objective = solution.execute_move(employee_move);
                    solution.revert_move(employee_move);

                    scan.evaluations += 1;
                    scan.consider(
                        Candidate {
                            employee_move,
                            objective,
                        },
                        is_tabu(&employee_move),
                    );
                }
            }
        }

        scan
    }

    fn scan_parallel<F>(
        thread_pool: &rayon::ThreadPool,
        solution: &Solution,
        is_tabu: &F,
    ) -> NeighborhoodScan
    where
        F: Fn(&EmployeeMove) -> bool + Sync,
    {
        let num_employees = solution.num_employees();

        let parts = thread_pool.install(|| {
            (0..num_employees)
                .into_par_iter()
                .map(EmployeeIdx::new)
                .map(|source| {
                    let mut scan = NeighborhoodScan::default();
                    for &leg in solution.employee(source).legs() {
                        for target in (0..num_employees).map(EmployeeIdx::new) {
                            if target == source {
                                continue;
                            }

                            let employee_move = EmployeeMove::new(source, target, leg);
                            scan.evaluations += 1;
                            scan.consider(
                                Candidate {
                                    employee_move,
                                    objective: solution.evaluate_move(employee_move),
                                },
                                is_tabu(&employee_move),
                            );
                        }
                    }
                    scan
                })
                .collect::<Vec<_>>()
        });

        parts
            .into_iter()
            .fold(NeighborhoodScan::default(), NeighborhoodScan::merge)
    }
}
