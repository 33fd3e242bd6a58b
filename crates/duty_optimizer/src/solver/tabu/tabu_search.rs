use std::sync::Arc;

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use tracing::{Level, debug, info, instrument, warn};

use crate::solver::{
    accepted_solution::AcceptedSolution,
    neighborhood::{Candidate, Neighborhood, NeighborhoodScan},
    solution::solution::Solution,
    statistics::{IterationRecord, SearchStatistics},
};

use super::tabu_list::TabuList;

type BestSolutionHandler = Arc<Mutex<dyn FnMut(&AcceptedSolution) + Send + Sync + 'static>>;
type IterationHandler = Arc<Mutex<dyn FnMut(&IterationRecord) + Send + Sync + 'static>>;

/// Tabu search over leg reassignments with aspiration.
///
/// Every iteration applies the best move of the whole neighborhood, even when it makes the
/// solution worse. Giving a leg back to an employee it was recently given to is tabu, unless the
/// move beats both the best solution so far and every admissible move.
pub struct TabuSearch {
    max_iterations: usize,
    tabu_length: usize,
    thread_pool: Option<rayon::ThreadPool>,
    best_solution: Arc<RwLock<Option<AcceptedSolution>>>,
    on_best_solution_handler: Option<BestSolutionHandler>,
    on_iteration_handler: Option<IterationHandler>,
}

impl TabuSearch {
    pub fn new(
        max_iterations: usize,
        tabu_length: usize,
        thread_pool: Option<rayon::ThreadPool>,
    ) -> Self {
        TabuSearch {
            max_iterations,
            tabu_length,
            thread_pool,
            best_solution: Arc::new(RwLock::new(None)),
            on_best_solution_handler: None,
            on_iteration_handler: None,
        }
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&AcceptedSolution) + Send + Sync + 'static,
    {
        self.on_best_solution_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn on_iteration<F>(&mut self, callback: F)
    where
        F: FnMut(&IterationRecord) + Send + Sync + 'static,
    {
        self.on_iteration_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn thread_pool(&self) -> Option<&rayon::ThreadPool> {
        self.thread_pool.as_ref()
    }

    pub fn best_solution(&self) -> Option<MappedRwLockReadGuard<'_, AcceptedSolution>> {
        RwLockReadGuard::try_map(self.best_solution.read(), |solution| solution.as_ref()).ok()
    }

    fn publish_best_solution(&self, solution: &Solution, iteration: usize) {
        let accepted = AcceptedSolution::new(solution.clone(), iteration);
        if let Some(callback) = &self.on_best_solution_handler {
            callback.lock()(&accepted);
        }
        *self.best_solution.write() = Some(accepted);
    }

    /// Move to apply: the best tabu move when it aspires, the best admissible move otherwise.
    fn select(scan: &NeighborhoodScan, best_objective: i64) -> Option<(Candidate, bool)> {
        if let Some(tabu) = scan.best_tabu {
            let aspires = tabu.objective < best_objective
                && scan
                    .best_admissible
                    .is_none_or(|admissible| tabu.objective < admissible.objective);
            if aspires {
                return Some((tabu, true));
            }
        }

        scan.best_admissible.map(|candidate| (candidate, false))
    }

    /// Improves `initial` and returns the best solution found.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn run(&self, initial: Solution) -> (Solution, SearchStatistics) {
        let tabu = TabuList::new(
            initial.num_employees(),
            initial.problem().num_legs(),
            self.tabu_length,
        );
        self.run_with_tabu_list(initial, tabu)
    }

    /// Stops before `max_iterations` when every move is tabu and none of them aspires.
    fn run_with_tabu_list(
        &self,
        initial: Solution,
        mut tabu: TabuList,
    ) -> (Solution, SearchStatistics) {
        let started_at = Timestamp::now();
        let mut statistics = SearchStatistics::default();

        let mut current = initial;
        let mut best = current.clone();
        self.publish_best_solution(&best, 0);

        let neighborhood = Neighborhood::new(self.thread_pool.as_ref());

        debug!(
            employees = current.num_employees(),
            objective = current.objective(),
            tabu_length = self.tabu_length,
            "Start tabu search"
        );

        for iteration in 1..=self.max_iterations {
            let scan = neighborhood.scan(&mut current, |employee_move| {
                tabu.is_tabu(employee_move.to, employee_move.leg, iteration)
            });
            statistics.add_scan(&scan);

            let Some((candidate, aspiration)) = Self::select(&scan, best.objective()) else {
                warn!(iteration, "No admissible move left, stopping the tabu search");
                break;
            };

            let employee_move = candidate.employee_move;
            tabu.mark(employee_move.to, employee_move.leg, iteration);
            let objective = current.execute_move(employee_move);
            debug_assert_eq!(objective, candidate.objective);

            if objective < best.objective() {
                best = current.clone();
                debug!(iteration, objective, aspiration, "New best solution");
                self.publish_best_solution(&best, iteration);
            }

            let record = IterationRecord {
                iteration,
                employee_move,
                objective,
                best_objective: best.objective(),
                aspiration,
            };
            if let Some(callback) = &self.on_iteration_handler {
                callback.lock()(&record);
            }
            statistics.add_iteration(record);
        }

        statistics.elapsed = Timestamp::now().duration_since(started_at);
        info!(
            iterations = statistics.iterations.len(),
            evaluations = statistics.evaluations,
            aspirations = statistics.aspiration_count(),
            objective = best.objective(),
            "Tabu search completed in {:#}",
            statistics.elapsed
        );

        (best, statistics)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::{
        problem::leg::LegIdx,
        solver::{
            construction::construct_solution::construct_solution,
            solution::{employee::EmployeeIdx, employee_move::EmployeeMove},
        },
        test_utils::{self, TestLeg},
    };

    use super::*;

    fn thread_pool(threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_best_objective_never_increases() {
        let problem = test_utils::create_two_tours_problem();
        let initial = test_utils::create_test_solution(
            problem,
            vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7]],
        );
        let initial_objective = initial.objective();

        let (best, statistics) = TabuSearch::new(30, 5, None).run(initial);

        assert!(best.objective() <= initial_objective);
        let mut previous = initial_objective;
        for record in &statistics.iterations {
            assert!(record.best_objective <= previous);
            assert!(record.best_objective <= record.objective);
            previous = record.best_objective;
        }
        assert_eq!(best.objective(), previous);

        let mut evaluated = best.clone();
        assert_eq!(evaluated.evaluate(), best.objective());
    }

    #[test]
    fn test_search_repairs_overlapping_legs() {
        // Every employee starts with two overlapping legs of different tours.
        let problem = test_utils::create_two_tours_problem();
        let initial = test_utils::create_test_solution(
            problem,
            vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7]],
        );
        let initial_score = initial.score();

        let (best, statistics) = TabuSearch::new(20, 4, None).run(initial);

        assert!(best.score().hard_score < initial_score.hard_score);
        assert!(best.objective() < initial_score.total());
        assert!(!statistics.iterations[0].aspiration);
        assert!(statistics.iterations[0].objective < initial_score.total());
    }

    #[test]
    fn test_search_is_deterministic() {
        let problem = test_utils::create_two_tours_problem();
        let initial = test_utils::create_test_solution(
            problem,
            vec![vec![0, 3, 4], vec![1, 2, 7], vec![5, 6]],
        );

        let (first_best, first) = TabuSearch::new(25, 5, None).run(initial.clone());
        let (second_best, second) = TabuSearch::new(25, 5, None).run(initial.clone());
        let (parallel_best, parallel) =
            TabuSearch::new(25, 5, Some(thread_pool(4))).run(initial);

        assert!(first.moves().eq(second.moves()));
        assert!(first.moves().eq(parallel.moves()));
        assert!(first_best.is_identical(&second_best));
        assert!(first_best.is_identical(&parallel_best));
        assert_eq!(first.evaluations, parallel.evaluations);
    }

    #[test]
    fn test_single_employee_stops_early() {
        let problem = test_utils::create_problem(vec![
            TestLeg::new(1, 1, 360, 420),
            TestLeg::new(2, 1, 420, 480),
        ]);
        let initial = construct_solution(&problem);
        assert_eq!(initial.num_employees(), 1);

        let (best, statistics) = TabuSearch::new(10, 3, None).run(initial.clone());

        assert!(statistics.iterations.is_empty());
        assert!(best.is_identical(&initial));
    }

    #[test]
    fn test_handlers_are_called() {
        let problem = test_utils::create_two_tours_problem();
        let initial = test_utils::create_test_solution(
            problem,
            vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7]],
        );
        let iterations = Arc::new(AtomicUsize::new(0));
        let improvements = Arc::new(AtomicUsize::new(0));

        let mut search = TabuSearch::new(12, 3, None);
        let counter = Arc::clone(&iterations);
        search.on_iteration(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        let counter = Arc::clone(&improvements);
        search.on_best_solution(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let (best, statistics) = search.run(initial);

        assert_eq!(iterations.load(Ordering::Relaxed), statistics.iterations.len());
        assert!(improvements.load(Ordering::Relaxed) >= 1);
        assert_eq!(
            search.best_solution().unwrap().solution.objective(),
            best.objective()
        );
    }

    #[test]
    fn test_aspiration_overrides_tabu() {
        // Only moving leg 0 to the second employee removes every overlap.
        let problem = test_utils::create_problem(vec![
            TestLeg::new(1, 1, 300, 380),
            TestLeg::new(2, 2, 300, 500),
            TestLeg::new(3, 3, 450, 520),
        ]);
        let initial = test_utils::create_test_solution(problem, vec![vec![0, 1], vec![2]]);
        let initial_objective = initial.objective();
        assert!(initial.score().hard_score > 0);

        let repair = EmployeeMove::new(EmployeeIdx::new(0), EmployeeIdx::new(1), LegIdx::new(0));
        let mut tabu = TabuList::new(2, 3, 5);
        tabu.mark(repair.to, repair.leg, 0);
        assert!(tabu.is_tabu(repair.to, repair.leg, 1));

        let (best, statistics) = TabuSearch::new(1, 5, None).run_with_tabu_list(initial, tabu);

        assert!(statistics.aspiration_count() >= 1);
        let record = &statistics.iterations[0];
        assert!(record.aspiration);
        assert_eq!(record.employee_move, repair);
        assert!(record.objective < initial_objective);
        assert_eq!(record.best_objective, record.objective);
        assert_eq!(best.score().hard_score, 0);
    }

    #[test]
    fn test_select_keeps_admissible_move_when_tabu_does_not_aspire() {
        let candidate = |leg: usize, objective: i64| Candidate {
            employee_move: EmployeeMove::new(
                EmployeeIdx::new(0),
                EmployeeIdx::new(1),
                LegIdx::new(leg),
            ),
            objective,
        };
        let scan = NeighborhoodScan {
            best_admissible: Some(candidate(0, 120)),
            best_tabu: Some(candidate(1, 90)),
            evaluations: 2,
        };

        // Better than the admissible move but not than the best solution.
        let (selected, aspiration) = TabuSearch::select(&scan, 80).unwrap();
        assert!(!aspiration);
        assert_eq!(selected, candidate(0, 120));

        let (selected, aspiration) = TabuSearch::select(&scan, 100).unwrap();
        assert!(aspiration);
        assert_eq!(selected, candidate(1, 90));

        let all_tabu = NeighborhoodScan {
            best_admissible: None,
            ..scan
        };
        assert!(TabuSearch::select(&all_tabu, 80).is_none());
    }
}
