use crate::core::{Category, FileTally, SeverityCounts};
use crate::utils::error::{Result, TallyError};
use std::io::Read;

/// Reads one delimited file and counts the rows of `column` per normalized label.
pub fn tally_file<R: Read>(file: &str, reader: R, column: &str, delimiter: u8) -> Result<FileTally> {
    let parse_error = |source: csv::Error| TallyError::ParseError {
        file: file.to_string(),
        source,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(parse_error)?;
    if headers.is_empty() {
        return Err(TallyError::EmptyFileError {
            file: file.to_string(),
        });
    }

    let width = headers.len();

    // First matching header wins when a name is repeated.
    let index = headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| TallyError::MissingColumnError {
            file: file.to_string(),
            column: column.to_string(),
        })?;

    tracing::debug!("{}: '{}' is column {}", file, column, index);

    let mut counts = SeverityCounts::default();
    let mut blank_cells = 0;

    for record in csv_reader.records() {
        let record = record.map_err(parse_error)?;
        // Short rows are padded with blanks; long rows cannot be aligned to the header.
        if record.len() > width {
            return Err(TallyError::MalformedRowError {
                file: file.to_string(),
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }
        match record.get(index).and_then(Category::classify) {
            Some(category) => counts.record(category),
            None => blank_cells += 1,
        }
    }

    if blank_cells > 0 {
        tracing::debug!("{}: ignored {} blank '{}' cells", file, blank_cells, column);
    }

    Ok(FileTally {
        file: file.to_string(),
        counts,
        blank_cells,
    })
}
