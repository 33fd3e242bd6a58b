use super::{
    score::{Score, ScoreAnalysis},
    solution::solution::Solution,
};

/// Snapshot of a best solution handed to observers.
#[derive(Clone)]
pub struct AcceptedSolution {
    pub solution: Solution,
    pub score: Score,
    pub score_analysis: ScoreAnalysis,
    /// Tabu search iteration that produced the solution, zero for the initial one.
    pub iteration: usize,
}

impl AcceptedSolution {
    pub fn new(solution: Solution, iteration: usize) -> Self {
        AcceptedSolution {
            score: solution.score(),
            score_analysis: solution.score_analysis(),
            solution,
            iteration,
        }
    }

    pub fn is_feasible(&self) -> bool {
        !self.score.is_failure()
    }
}
