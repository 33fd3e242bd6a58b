use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    parsers::parser::DatasetParser,
    problem::{
        instance::{Instance, InstanceBuilder},
        leg::{Leg, LegBuilder, Minutes},
        location::ShiftOverheads,
    },
};

/// Reads the bus driver scheduling datasets.
///
/// A dataset `<name>` is spread over three CSV files living next to each other: `<name>.csv`
/// with the legs, `<name>_dist.csv` with the ride times and `<name>_extra.csv` with the shift
/// overheads. The parser is given the path of the legs file.
pub struct BusDriverParser;

impl DatasetParser for BusDriverParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<Instance, anyhow::Error> {
        let legs_path = file.as_ref();
        let legs = parse_legs(open(legs_path)?)?;
        let ride_times = parse_ride_times(open(&sibling_path(legs_path, "dist")?)?)?;
        let overheads = parse_overheads(open(&sibling_path(legs_path, "extra")?)?)?;

        let mut builder = InstanceBuilder::default();
        builder
            .set_legs(legs)
            .set_ride_times(ride_times)
            .set_overheads(overheads);

        Ok(builder.build()?)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, anyhow::Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| anyhow::anyhow!("Failed to read {}: {}", path.display(), err))
}

/// `dir/<name>.csv` -> `dir/<name>_<suffix>.csv`
pub fn sibling_path(legs_path: &Path, suffix: &str) -> Result<PathBuf, anyhow::Error> {
    let stem = legs_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid dataset path: {}", legs_path.display()))?;

    Ok(legs_path.with_file_name(format!("{stem}_{suffix}.csv")))
}

/// Row of the legs file. Columns are read by position, whatever the header says.
#[derive(Debug, Deserialize)]
struct LegRecord(f64, f64, f64, f64, f64);

/// Headerless rows of numbers, such as the ride time matrix.
pub(crate) fn read_number_rows<R: Read>(reader: R) -> Result<Vec<Vec<f64>>, anyhow::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = vec![];
    for row in reader.deserialize() {
        rows.push(row?);
    }

    Ok(rows)
}

/// Whole number of minutes, accepting float notation such as `12.0`.
pub fn whole_minutes(value: f64) -> Result<Minutes, anyhow::Error> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(anyhow::anyhow!("Expected a whole number: {}", value));
    }

    Ok(value as Minutes)
}

fn whole_index(value: f64, what: &str, row: usize) -> Result<usize, anyhow::Error> {
    usize::try_from(whole_minutes(value)?)
        .map_err(|_| anyhow::anyhow!("Invalid {} on row {}: {}", what, row, value))
}

/// Parses the legs file: a header row, then `tour,start,end,start_pos,end_pos` rows.
///
/// Leg ids are the 1-based row numbers, header excluded.
pub fn parse_legs<R: Read>(reader: R) -> Result<Vec<Leg>, anyhow::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut legs = Vec::new();
    for (index, record) in reader.deserialize::<LegRecord>().enumerate() {
        let LegRecord(tour, start, end, start_pos, end_pos) = record?;
        let row = index + 1;

        let mut builder = LegBuilder::default();
        builder
            .set_id(row)
            .set_tour(whole_index(tour, "tour", row)?)
            .set_time(whole_minutes(start)?, whole_minutes(end)?)
            .set_start_location_id(whole_index(start_pos, "start position", row)?)
            .set_end_location_id(whole_index(end_pos, "end position", row)?);

        legs.push(builder.build());
    }

    if legs.is_empty() {
        return Err(anyhow::anyhow!("Dataset has no legs"));
    }

    Ok(legs)
}

/// Parses the square matrix of passive ride times. Dimensions are checked by the instance builder.
pub fn parse_ride_times<R: Read>(reader: R) -> Result<Vec<Vec<Minutes>>, anyhow::Error> {
    read_number_rows(reader)?
        .into_iter()
        .map(|row| row.into_iter().map(whole_minutes).collect())
        .collect()
}

/// Parses the overheads file: `start_work` per location on the first row, `end_work` on the
/// second.
pub fn parse_overheads<R: Read>(reader: R) -> Result<ShiftOverheads, anyhow::Error> {
    let mut tables = read_number_rows(reader)?.into_iter().map(|row| {
        row.into_iter()
            .map(whole_minutes)
            .collect::<Result<Vec<_>, _>>()
    });

    let start_work = tables
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing start_work row"))??;
    let end_work = tables
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing end_work row"))??;

    Ok(ShiftOverheads::new(start_work, end_work))
}
