use tracing::{Level, debug, instrument};

use crate::solver::{neighborhood::Neighborhood, solution::solution::Solution};

/// Steepest descent: applies the best reassignment while it strictly lowers the objective.
pub struct BestImprovement<'a> {
    neighborhood: Neighborhood<'a>,
}

impl<'a> BestImprovement<'a> {
    pub fn new(thread_pool: Option<&'a rayon::ThreadPool>) -> Self {
        BestImprovement {
            neighborhood: Neighborhood::new(thread_pool),
        }
    }

    /// Returns the number of applied moves.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn run(&self, solution: &mut Solution, max_iterations: usize) -> usize {
        for iteration in 0..max_iterations {
            let scan = self.neighborhood.scan(solution, |_| false);

            match scan.best_admissible {
                Some(candidate) if candidate.objective < solution.objective() => {
                    solution.execute_move(candidate.employee_move);
                }
                _ => {
                    debug!(iteration, objective = solution.objective(), "Local optimum");
                    return iteration;
                }
            }
        }

        max_iterations
    }
}
