use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeakFileError {
    #[error("peak line {line_number} has {found} fields, expected at least 10")]
    FieldCount { line_number: usize, found: usize },

    #[error("peak line {line_number}: invalid {field}: {value}")]
    InvalidField {
        line_number: usize,
        field: &'static str,
        value: String,
    },

    #[error("0 peaks found in file: {0}")]
    EmptyPeakSet(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
