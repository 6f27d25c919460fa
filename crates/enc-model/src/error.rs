use thiserror::Error;

/// Contract violations raised by the quality engine and the table boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QualityError {
    /// A required column is absent from the input table.
    #[error("required column '{column}' not found in input table")]
    MissingColumn { column: String },

    /// A caller-supplied parameter is outside its domain.
    #[error("invalid {name} {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A cell could not be read as its column's type.
    #[error("invalid value '{value}' in column '{column}' at row {row}: expected {expected}")]
    InvalidValue {
        column: String,
        row: usize,
        expected: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, QualityError>;
