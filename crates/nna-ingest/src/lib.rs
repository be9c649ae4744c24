//! Loading NNA survey files into typed datasets.
//!
//! [`read_csv_dataset`] handles the messy parts of survey exports: unknown
//! separators, label rows above the header, blank or repeated column names,
//! ragged rows and the usual spellings of "missing".

pub mod csv_table;
pub mod header;
pub mod options;
pub mod polars_utils;

pub use csv_table::{build_dataset, detect_separator, read_csv_dataset};
pub use header::{clean_headers, detect_header_row, normalize_header};
pub use options::{DEFAULT_NULL_MARKERS, HeaderMode, IngestOptions, Separator};
pub use polars_utils::{any_to_text, dataset_from_frame};
