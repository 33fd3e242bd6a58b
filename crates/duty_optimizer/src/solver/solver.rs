use std::sync::Arc;

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{problem::duty_problem::DutyProblem, timer_debug};

use super::{
    accepted_solution::AcceptedSolution,
    construction::construct_solution::construct_solution,
    ls::best_improvement::BestImprovement,
    solution::solution::{Solution, SolutionMatrixError},
    solver_params::{SolverParams, Threads},
    statistics::{IterationRecord, SearchStatistics},
    tabu::tabu_search::TabuSearch,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("failed to build the search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid initial solution: {0}")]
    InitialSolution(#[from] SolutionMatrixError),
}

pub struct Solver {
    problem: Arc<DutyProblem>,
    params: SolverParams,
    search: TabuSearch,
    best_solution: RwLock<Option<AcceptedSolution>>,
    statistics: RwLock<Option<SearchStatistics>>,
    status: RwLock<SolverStatus>,
    created_at: Timestamp,
}

impl Solver {
    pub fn new(problem: DutyProblem, params: SolverParams) -> Result<Self, SolverError> {
        let thread_pool = match params.search_threads {
            Threads::Single => None,
            ref threads => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.number_of_threads())
                    .build()?,
            ),
        };

        Ok(Solver {
            problem: Arc::new(problem),
            search: TabuSearch::new(params.max_iterations, params.tabu_length, thread_pool),
            params,
            best_solution: RwLock::new(None),
            statistics: RwLock::new(None),
            status: RwLock::new(SolverStatus::Pending),
            created_at: Timestamp::now(),
        })
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&AcceptedSolution) + Send + Sync + 'static,
    {
        self.search.on_best_solution(callback);
    }

    pub fn on_iteration<F>(&mut self, callback: F)
    where
        F: FnMut(&IterationRecord) + Send + Sync + 'static,
    {
        self.search.on_iteration(callback);
    }

    pub fn problem(&self) -> &Arc<DutyProblem> {
        &self.problem
    }

    fn initial_solution(&self) -> Result<Solution, SolverError> {
        match &self.params.initial_solution {
            Some(matrix) => {
                let solution = Solution::from_matrix(Arc::clone(&self.problem), matrix)?;
                info!(
                    employees = solution.num_employees(),
                    objective = solution.objective(),
                    "Loaded initial solution"
                );
                Ok(solution)
            }
            None => Ok(timer_debug!(
                construct_solution(&self.problem),
                "Construction of {} legs",
                self.problem.num_legs()
            )),
        }
    }

    pub fn solve(&self) -> Result<(), SolverError> {
        *self.status.write() = SolverStatus::Running;

        let initial = match self.initial_solution() {
            Ok(solution) => solution,
            Err(error) => {
                *self.status.write() = SolverStatus::Completed;
                return Err(error);
            }
        };
        *self.best_solution.write() = Some(AcceptedSolution::new(initial.clone(), 0));

        let (mut best, statistics) = self.search.run(initial);
        let last_iteration = statistics.iterations.len();

        if self.params.descent_iterations > 0 {
            let applied = BestImprovement::new(self.search.thread_pool())
                .run(&mut best, self.params.descent_iterations);
            info!(applied, objective = best.objective(), "Descent completed");
        }

        *self.best_solution.write() = Some(AcceptedSolution::new(best, last_iteration));
        *self.statistics.write() = Some(statistics);
        *self.status.write() = SolverStatus::Completed;

        Ok(())
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Best solution so far, updated live while the search runs.
    pub fn current_best_solution(&self) -> Option<MappedRwLockReadGuard<'_, AcceptedSolution>> {
        if *self.status.read() == SolverStatus::Running
            && let Some(solution) = self.search.best_solution()
        {
            return Some(solution);
        }

        RwLockReadGuard::try_map(self.best_solution.read(), |solution| solution.as_ref()).ok()
    }

    pub fn statistics(&self) -> Option<MappedRwLockReadGuard<'_, SearchStatistics>> {
        RwLockReadGuard::try_map(self.statistics.read(), |statistics| statistics.as_ref()).ok()
    }
}
