use std::{fs::File, io::BufWriter, path::PathBuf, sync::Arc};

use clap::Args;
use duty_optimizer::{
    parsers::solution_matrix::{read_solution_matrix, write_solution_matrix},
    solver::{
        solver::Solver,
        solver_params::{SolverParams, Threads, default_tabu_length},
    },
};
use indicatif::{ProgressBar, ProgressStyle};
use jiff::Timestamp;
use tracing::info;

use crate::{
    file_utils::{load_problem, write_json},
    labor_rules::LaborRulesArgs,
    parsers, report,
};

#[derive(Args)]
pub struct OptimizeArgs {
    /// Legs file of the dataset; ride times and overheads are read from its `_dist` and `_extra`
    /// siblings
    #[arg(short, long)]
    instance: PathBuf,

    /// Assignment matrix to start from instead of the construction heuristic
    #[arg(long)]
    initial: Option<PathBuf>,

    #[arg(
        short = 'n',
        long,
        default_value_t = SolverParams::DEFAULT_MAX_ITERATIONS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    iterations: usize,

    /// Defaults to the square root of the number of iterations
    #[arg(long)]
    tabu_length: Option<usize>,

    /// Best-improvement iterations run after the tabu search
    #[arg(long, default_value_t = 0)]
    descent: usize,

    /// Threads scanning the neighborhood: a number or `auto`
    #[arg(short, long, value_parser = parsers::parse_threads, default_value = "1")]
    threads: Threads,

    /// Output file for the assignment matrix
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file for the JSON report
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(flatten)]
    rules: LaborRulesArgs,
}

pub fn run(args: OptimizeArgs) -> Result<(), anyhow::Error> {
    let started_at = Timestamp::now();
    let problem = load_problem(&args.instance, (&args.rules).into())?;
    info!(
        legs = problem.num_legs(),
        locations = problem.num_locations(),
        "Loaded {:?}",
        args.instance
    );

    let initial_solution = args.initial.as_ref().map(read_solution_matrix).transpose()?;

    let mut solver = Solver::new(
        problem,
        SolverParams {
            max_iterations: args.iterations,
            tabu_length: args
                .tabu_length
                .unwrap_or_else(|| default_tabu_length(args.iterations)),
            search_threads: args.threads,
            initial_solution,
            descent_iterations: args.descent,
        },
    )?;

    let bar = Arc::new(ProgressBar::new(args.iterations as u64));
    bar.set_style(
        ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} iterations {msg}")?,
    );

    let iteration_bar = Arc::clone(&bar);
    solver.on_iteration(move |record| {
        iteration_bar.set_position(record.iteration as u64);
        iteration_bar.set_message(format!(
            "current = {}, best = {}",
            record.objective, record.best_objective
        ));
    });

    solver.solve()?;
    bar.finish_and_clear();

    let Some(best_solution) = solver.current_best_solution() else {
        info!("No solution found");
        return Ok(());
    };

    let solution = &best_solution.solution;
    report::print_report(&solution.report(), &best_solution.score_analysis);

    if let Some(statistics) = solver.statistics() {
        info!(
            iterations = statistics.iterations.len(),
            evaluations = statistics.evaluations,
            aspirations = statistics.aspiration_count(),
            "Search took {:#}",
            statistics.elapsed
        );
    }

    if let Some(output) = &args.output {
        write_solution_matrix(BufWriter::new(File::create(output)?), &solution.to_matrix())?;
        info!("Assignment matrix written to {:?}", output);
    }

    if let Some(report_path) = &args.report {
        write_json(report_path, &solution.report())?;
        info!("Report written to {:?}", report_path);
    }

    info!(
        "Finished: employees = {}, hard = {}, soft = {}, feasible = {} in {:#}",
        solution.num_employees(),
        best_solution.score.hard_score,
        best_solution.score.soft_score,
        best_solution.is_feasible(),
        Timestamp::now().duration_since(started_at)
    );

    Ok(())
}
