use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use duty_optimizer::{
    parsers::{busdriver::BusDriverParser, parser::DatasetParser},
    problem::{duty_problem::DutyProblem, labor_rules::LaborRules},
};
use serde::Serialize;

const COMPANION_SUFFIXES: [&str; 3] = ["_dist", "_extra", "_solution"];

pub fn read_folder(folder_path: &PathBuf) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            files.extend(read_folder(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

/// Legs files of a folder: `.csv` files that are not the ride times, overheads or solution of
/// another dataset.
pub fn dataset_files(folder_path: &PathBuf) -> Result<Vec<PathBuf>, std::io::Error> {
    Ok(read_folder(folder_path)?
        .into_iter()
        .filter(|path| path.extension().is_some_and(|extension| extension == "csv"))
        .filter(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| {
                    !COMPANION_SUFFIXES
                        .iter()
                        .any(|suffix| stem.ends_with(suffix))
                })
        })
        .collect())
}

pub fn load_problem(legs_path: &Path, rules: LaborRules) -> Result<DutyProblem, anyhow::Error> {
    let instance = BusDriverParser.parse(legs_path)?;
    Ok(DutyProblem::new(instance, rules))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), anyhow::Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
