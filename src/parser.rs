use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::entries::{Entries, Row};
use crate::error::{Id3Error, Result};

/// A loaded table: attribute names plus the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub attribute_names: Vec<String>,
    pub entries: Entries,
}

/// Parse a delimited table whose first column is the class label.
///
/// Lines starting with `#` and blank lines are skipped, fields are trimmed
/// and may be quoted. Without a header, attributes are named `attr{i}`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`Id3Error::InvalidDelimiter`] | `delimiter` is not a single ASCII byte |
/// | [`Id3Error::CsvParse`] | Malformed record, e.g. invalid UTF-8 |
/// | [`Id3Error::MalformedRow`] | Row width differs from the header or first row |
pub fn parse_rows(text: &str, delimiter: char, has_header: bool) -> Result<ParsedTable> {
    parse_reader(text.as_bytes(), delimiter, has_header)
}

/// Read and parse a table from `path`; see [`parse_rows`].
pub fn read_table(path: &Path, delimiter: char, has_header: bool) -> Result<ParsedTable> {
    let file = File::open(path).map_err(|source| Id3Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(file, delimiter, has_header)
}

fn parse_reader<R: Read>(input: R, delimiter: char, has_header: bool) -> Result<ParsedTable> {
    let delimiter_byte = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(Id3Error::InvalidDelimiter { delimiter })?;

    // flexible(true) so ragged rows surface as MalformedRow with a line number
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .has_headers(has_header)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let header: Option<Row> = if has_header {
        let record = rdr.headers().map_err(|source| Id3Error::CsvParse { source })?;
        Some(record.iter().map(str::to_string).collect())
    } else {
        None
    };

    let mut width = header.as_ref().map(Vec::len).filter(|&len| len > 0);
    let mut rows: Vec<Row> = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| Id3Error::CsvParse { source })?;
        match width {
            Some(expected) if record.len() != expected => {
                return Err(Id3Error::MalformedRow {
                    line: record.position().map_or(0, |p| p.line() as usize),
                    expected,
                    got: record.len(),
                });
            }
            Some(_) => {}
            None => width = Some(record.len()),
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    let attribute_names: Vec<String> = match header {
        Some(header) => header.into_iter().skip(1).collect(),
        None => (0..width.unwrap_or(1).saturating_sub(1))
            .map(|id| format!("attr{id}"))
            .collect(),
    };
    debug!(
        "parsed {} rows with {} attributes",
        rows.len(),
        attribute_names.len()
    );
    Ok(ParsedTable {
        attribute_names,
        entries: Entries::new(rows),
    })
}
