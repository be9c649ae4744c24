//! Options for reading survey files.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use nna_model::{ColumnKind, KindPolicy};
use serde::{Deserialize, Serialize};

/// Separators tried by [`Separator::Auto`], in tie-breaking order.
pub const SEPARATOR_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Cell values read as missing.
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A", "-nan", "<NA>",
];

/// Field separator of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// Pick the candidate that appears most often in the first line.
    #[default]
    Auto,
    Byte(u8),
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "auto" => Ok(Self::Auto),
            "tab" | "\\t" | "\t" => Ok(Self::Byte(b'\t')),
            other if other.len() == 1 && other.is_ascii() => Ok(Self::Byte(other.as_bytes()[0])),
            other => Err(format!(
                "invalid separator '{other}': expected 'auto', 'tab', or a single ASCII character"
            )),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Byte(b'\t') => f.write_str("tab"),
            Self::Byte(byte) => write!(f, "{}", char::from(*byte)),
        }
    }
}

/// Where the header row comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// The first non-blank record.
    #[default]
    First,
    /// The last header-like record before the data starts.
    Detect,
}

impl FromStr for HeaderMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "detect" => Ok(Self::Detect),
            other => Err(format!(
                "invalid header mode '{other}': expected 'first' or 'detect'"
            )),
        }
    }
}

/// Options for [`read_csv_dataset`](crate::read_csv_dataset).
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub separator: Separator,
    pub header: HeaderMode,
    pub null_markers: Vec<String>,
    /// Kinds declared by the caller, keyed by normalized column name.
    pub declared_kinds: BTreeMap<String, ColumnKind>,
    /// Fail instead of falling back when a declared kind does not fit.
    pub strict_kinds: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            separator: Separator::Auto,
            header: HeaderMode::First,
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| (*s).to_string()).collect(),
            declared_kinds: BTreeMap::new(),
            strict_kinds: false,
        }
    }
}

impl IngestOptions {
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_header(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }

    pub fn with_kind(mut self, column: impl Into<String>, kind: ColumnKind) -> Self {
        self.declared_kinds.insert(column.into(), kind);
        self
    }

    pub fn with_strict_kinds(mut self, strict: bool) -> Self {
        self.strict_kinds = strict;
        self
    }

    pub fn kind_policy(&self) -> KindPolicy {
        if self.strict_kinds {
            KindPolicy::Strict
        } else {
            KindPolicy::Fallback
        }
    }

    pub(crate) fn is_null_marker(&self, value: &str) -> bool {
        self.null_markers.iter().any(|marker| marker == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_separators() {
        assert_eq!("auto".parse::<Separator>().unwrap(), Separator::Auto);
        assert_eq!(";".parse::<Separator>().unwrap(), Separator::Byte(b';'));
        assert_eq!("tab".parse::<Separator>().unwrap(), Separator::Byte(b'\t'));
        assert!("::".parse::<Separator>().is_err());
        assert_eq!(Separator::Byte(b'\t').to_string(), "tab");
    }

    #[test]
    fn parses_header_modes() {
        assert_eq!("Detect".parse::<HeaderMode>().unwrap(), HeaderMode::Detect);
        assert!("second".parse::<HeaderMode>().is_err());
    }

    #[test]
    fn default_markers_cover_blank_and_na() {
        let options = IngestOptions::default();
        assert!(options.is_null_marker(""));
        assert!(options.is_null_marker("NA"));
        assert!(!options.is_null_marker("0"));
    }
}
