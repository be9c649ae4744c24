use thiserror::Error;

/// Errors raised while building or profiling a dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// The dataset has no columns, or no rows where rows are required.
    #[error("dataset is empty: {reason}")]
    EmptyDataset { reason: &'static str },

    /// A column declared numeric holds a value that does not parse as a number.
    #[error("column {column} is declared numeric but contains non-numeric value {value:?}")]
    MixedTypeColumn { column: String, value: String },

    /// A frequency table was requested on a column the dataset does not have.
    #[error("unknown grouping column: {column}")]
    UnknownGroupingColumn { column: String },

    /// Frequency tables group by one or two columns.
    #[error("frequency tables group by one or two columns, got {count}")]
    InvalidGrouping { count: usize },

    /// A kind was declared for a column the dataset does not have.
    #[error("unknown column: {column}")]
    UnknownColumn { column: String },

    #[error("duplicate column name: {column}")]
    DuplicateColumn { column: String },

    #[error("column name must not be empty")]
    EmptyColumnName,

    #[error("row {row} has {actual} values, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column {column} has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl ProfileError {
    pub fn no_columns() -> Self {
        Self::EmptyDataset {
            reason: "no columns",
        }
    }

    pub fn no_rows() -> Self {
        Self::EmptyDataset { reason: "no rows" }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
