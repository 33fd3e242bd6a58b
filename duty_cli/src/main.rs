use clap::{Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{
    evaluate::EvaluateArgs, optimize::OptimizeArgs, optimize_dataset::OptimizeDatasetArgs,
};

mod evaluate;
mod file_utils;
mod labor_rules;
mod optimize;
mod optimize_dataset;
mod parsers;
mod report;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Builds duty schedules for a dataset with the tabu search
    #[command(visible_alias = "o")]
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Scores an existing assignment matrix
    #[command(visible_alias = "e")]
    Evaluate {
        #[command(flatten)]
        args: EvaluateArgs,
    },
    /// Optimizes every dataset of a folder and prints a summary
    OptimizeDataset {
        #[command(flatten)]
        args: OptimizeDatasetArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Optimize { args }) => optimize::run(args)?,
        Some(Commands::Evaluate { args }) => evaluate::run(args)?,
        Some(Commands::OptimizeDataset { args }) => optimize_dataset::run(args)?,
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_reject_zero_iterations() {
        assert!(Cli::try_parse_from(["duty", "optimize", "-i", "tiny.csv", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["duty", "optimize", "-i", "tiny.csv", "-n", "5"]).is_ok());

        let dataset = ["duty", "optimize-dataset", "-d", "data", "--iterations", "0"];
        assert!(Cli::try_parse_from(dataset).is_err());
    }

    #[test]
    fn test_labor_rule_flags_on_every_command() {
        for command in [
            vec!["duty", "optimize", "-i", "tiny.csv"],
            vec!["duty", "evaluate", "-i", "tiny.csv", "-s", "tiny_solution.csv"],
            vec!["duty", "optimize-dataset", "-d", "data"],
        ] {
            let args = command.into_iter().chain(["--max-span", "600"]);
            assert!(Cli::try_parse_from(args).is_ok());
        }
    }
}
