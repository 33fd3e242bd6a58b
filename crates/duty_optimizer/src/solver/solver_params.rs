#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverParams {
    /// Number of tabu search iterations.
    pub max_iterations: usize,
    /// Iterations during which a leg may not be given back to the same employee.
    pub tabu_length: usize,
    pub search_threads: Threads,
    /// Binary `employees x legs` assignment to start from instead of the construction heuristic.
    pub initial_solution: Option<Vec<Vec<u8>>>,
    /// Best-improvement iterations run on the best solution after the tabu search.
    pub descent_iterations: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl SolverParams {
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    /// Default parameters for `max_iterations`, with a tabu length of `floor(sqrt(max_iterations))`.
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        SolverParams {
            max_iterations,
            tabu_length: default_tabu_length(max_iterations),
            search_threads: Threads::Single,
            initial_solution: None,
            descent_iterations: 0,
        }
    }
}

pub fn default_tabu_length(max_iterations: usize) -> usize {
    max_iterations.isqrt()
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams::with_max_iterations(Self::DEFAULT_MAX_ITERATIONS)
    }
}
