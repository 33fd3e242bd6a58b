use std::{path::PathBuf, sync::Arc};

use clap::Args;
use duty_optimizer::{
    parsers::solution_matrix::read_solution_matrix, solver::solution::solution::Solution,
};
use tracing::info;

use crate::{
    file_utils::{load_problem, write_json},
    labor_rules::LaborRulesArgs,
    report,
};

#[derive(Args)]
pub struct EvaluateArgs {
    /// Legs file of the dataset
    #[arg(short, long)]
    instance: PathBuf,

    /// Assignment matrix to evaluate
    #[arg(short, long)]
    solution: PathBuf,

    /// Output file for the JSON report
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(flatten)]
    rules: LaborRulesArgs,
}

pub fn run(args: EvaluateArgs) -> Result<(), anyhow::Error> {
    let problem = Arc::new(load_problem(&args.instance, (&args.rules).into())?);
    let matrix = read_solution_matrix(&args.solution)?;
    let solution = Solution::from_matrix(problem, &matrix)?;

    let solution_report = solution.report();
    report::print_report(&solution_report, &solution.score_analysis());

    if let Some(report_path) = &args.report {
        write_json(report_path, &solution_report)?;
        info!("Report written to {:?}", report_path);
    }

    Ok(())
}
