use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Args;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use duty_optimizer::{
    parsers::solution_matrix::write_solution_matrix,
    solver::{
        solver::Solver,
        solver_params::{SolverParams, Threads},
    },
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::{
    file_utils::{dataset_files, load_problem},
    labor_rules::LaborRulesArgs,
    parsers,
};

#[derive(Args)]
pub struct OptimizeDatasetArgs {
    /// A legs file, or a folder searched recursively for legs files
    #[arg(short, long)]
    dataset: PathBuf,

    #[arg(
        short = 'n',
        long,
        default_value_t = SolverParams::DEFAULT_MAX_ITERATIONS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    iterations: usize,

    #[arg(short, long, value_parser = parsers::parse_threads, default_value = "1")]
    threads: Threads,

    /// Output folder for the `<name>_solution.csv` assignment matrices
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    rules: LaborRulesArgs,
}

pub fn run(args: OptimizeDatasetArgs) -> Result<(), anyhow::Error> {
    info!("Optimizing dataset {:?}", args.dataset);
    let paths = if args.dataset.is_file() {
        vec![args.dataset]
    } else {
        dataset_files(&args.dataset)?
    };

    if let Some(output) = &args.output {
        std::fs::create_dir_all(output)?;
    }

    let bar = ProgressBar::new(paths.len() as u64);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let mut summary = Table::new();
    summary
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Dataset",
            "Legs",
            "Employees",
            "Hard",
            "Soft",
            "Objective",
            "Elapsed",
        ]);

    for path in paths {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        bar.set_message(name.clone());

        let problem = match load_problem(&path, (&args.rules).into()) {
            Ok(problem) => problem,
            Err(error) => {
                warn!("Skipping {:?}: {}", path, error);
                bar.inc(1);
                continue;
            }
        };
        let num_legs = problem.num_legs();

        let solver = Solver::new(
            problem,
            SolverParams {
                search_threads: args.threads.clone(),
                ..SolverParams::with_max_iterations(args.iterations)
            },
        )?;
        solver.solve()?;

        if let Some(best_solution) = solver.current_best_solution() {
            let elapsed = solver
                .statistics()
                .map(|statistics| format!("{:#}", statistics.elapsed))
                .unwrap_or_default();

            summary.add_row(vec![
                name.clone(),
                num_legs.to_string(),
                best_solution.solution.num_employees().to_string(),
                best_solution.score.hard_score.to_string(),
                best_solution.score.soft_score.to_string(),
                best_solution.score.total().to_string(),
                elapsed,
            ]);

            if let Some(output) = &args.output {
                let output_path = output.join(format!("{name}_solution.csv"));
                write_solution_matrix(
                    BufWriter::new(File::create(&output_path)?),
                    &best_solution.solution.to_matrix(),
                )?;
            }
        } else {
            info!("No solution found for {}", name);
        }

        bar.inc(1);
    }

    bar.finish_and_clear();
    println!("{summary}");

    Ok(())
}
