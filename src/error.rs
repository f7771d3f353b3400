use std::path::PathBuf;

/// Coarse classification of an [`Id3Error`], for callers that only need to
/// branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidProbabilitySum,
    InvalidEntryCount,
    EmptyDataset,
    NoAttributes,
    AttributeOutOfRange,
    MalformedRow,
    InvalidDelimiter,
    CsvParse,
    ReadInput,
    SerializeTree,
}

/// Errors from entropy computation, split selection and table loading.
#[derive(Debug, thiserror::Error)]
pub enum Id3Error {
    /// Returned when a probability distribution does not sum to 1.
    #[error("sum of all probabilities is not 1, got {sum}")]
    InvalidProbabilitySum {
        /// The actual sum of the distribution.
        sum: f64,
    },

    /// Returned when a partition claims more rows than the whole dataset.
    #[error("partition has {count} entries, more than the total of {total}")]
    InvalidEntryCount {
        /// Row count of the offending partition.
        count: usize,
        /// Declared total row count.
        total: usize,
    },

    /// Returned when a split is requested on a dataset with zero rows.
    #[error("dataset has zero entries")]
    EmptyDataset,

    /// Returned when there is no attribute column to split on.
    #[error("dataset has no attribute columns to split on")]
    NoAttributes,

    /// Returned when a candidate attribute id is outside the table.
    #[error("attribute {attribute_id} is out of range, dataset has {attribute_count} attributes")]
    AttributeOutOfRange {
        attribute_id: usize,
        attribute_count: usize,
    },

    /// Returned when a row has a different number of fields than the first row.
    #[error("line {line} has {got} fields, expected {expected}")]
    MalformedRow {
        /// One-based line number in the input.
        line: usize,
        expected: usize,
        got: usize,
    },

    /// Returned when the field delimiter is not a single ASCII byte.
    #[error("delimiter {delimiter:?} is not a single ASCII character")]
    InvalidDelimiter { delimiter: char },

    /// Returned when the CSV reader encounters a malformed record.
    #[error("malformed delimited input")]
    CsvParse { source: csv::Error },

    #[error("failed to read input from {path}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to convert decision tree to or from JSON")]
    SerializeTree { source: serde_json::Error },
}

impl Id3Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Id3Error::InvalidProbabilitySum { .. } => ErrorKind::InvalidProbabilitySum,
            Id3Error::InvalidEntryCount { .. } => ErrorKind::InvalidEntryCount,
            Id3Error::EmptyDataset => ErrorKind::EmptyDataset,
            Id3Error::NoAttributes => ErrorKind::NoAttributes,
            Id3Error::AttributeOutOfRange { .. } => ErrorKind::AttributeOutOfRange,
            Id3Error::MalformedRow { .. } => ErrorKind::MalformedRow,
            Id3Error::InvalidDelimiter { .. } => ErrorKind::InvalidDelimiter,
            Id3Error::CsvParse { .. } => ErrorKind::CsvParse,
            Id3Error::ReadInput { .. } => ErrorKind::ReadInput,
            Id3Error::SerializeTree { .. } => ErrorKind::SerializeTree,
        }
    }
}

pub type Result<T> = std::result::Result<T, Id3Error>;
