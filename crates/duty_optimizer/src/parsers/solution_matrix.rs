use std::{
    fs::File,
    io::{BufReader, Read, Write},
    path::Path,
};

use super::busdriver::{read_number_rows, whole_minutes};

/// Parses an `employees x legs` assignment matrix written as CSV.
///
/// Cells are only checked to be small whole numbers here; `Solution::from_matrix` checks that the
/// matrix is binary and that every leg is assigned exactly once.
pub fn parse_solution_matrix<R: Read>(reader: R) -> Result<Vec<Vec<u8>>, anyhow::Error> {
    read_number_rows(reader)?
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .into_iter()
                .map(|value| {
                    u8::try_from(whole_minutes(value)?).map_err(|_| {
                        anyhow::anyhow!("Invalid cell on row {}: {}", row + 1, value)
                    })
                })
                .collect()
        })
        .collect()
}

pub fn read_solution_matrix<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u8>>, anyhow::Error> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|err| anyhow::anyhow!("Failed to read {}: {}", path.display(), err))?;
    parse_solution_matrix(BufReader::new(file))
}

pub fn write_solution_matrix<W: Write>(
    writer: W,
    matrix: &[Vec<u8>],
) -> Result<(), anyhow::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for row in matrix {
        writer.write_record(row.iter().map(u8::to_string))?;
    }

    writer.flush()?;
    Ok(())
}
