//! TOML configuration for profiling runs.
//!
//! Every field is optional; unset fields keep the built-in defaults and CLI
//! flags override whatever the file sets.
//!
//! ```toml
//! [thresholds]
//! near_constant = 0.9
//! high_missing_pct = 40.0
//!
//! [charts]
//! top_n = 10
//!
//! [ingest]
//! separator = ";"
//! header = "detect"
//!
//! [kinds]
//! folio = "identifier"
//!
//! [[groups]]
//! columns = ["zona", "sexo"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use nna_ingest::HeaderMode;
use nna_model::ColumnKind;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdsSection {
    pub near_constant: Option<f64>,
    pub high_cardinality: Option<f64>,
    pub high_missing_pct: Option<f64>,
    pub decimals: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartsSection {
    pub max_histograms: Option<usize>,
    pub max_boxplots: Option<usize>,
    pub histogram_bins: Option<usize>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestSection {
    pub separator: Option<String>,
    pub header: Option<HeaderMode>,
    pub null_markers: Option<Vec<String>>,
    pub strict_kinds: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSection {
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilerConfig {
    pub thresholds: ThresholdsSection,
    pub charts: ChartsSection,
    pub ingest: IngestSection,
    pub kinds: BTreeMap<String, ColumnKind>,
    pub groups: Vec<GroupSection>,
}

impl ProfilerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parses config text; `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_section() {
        let text = r#"
            [thresholds]
            near_constant = 0.9
            decimals = 1

            [charts]
            top_n = 10

            [ingest]
            separator = ";"
            header = "detect"
            strict_kinds = true

            [kinds]
            folio = "identifier"
            comentario = "free_text"

            [[groups]]
            columns = ["zona"]

            [[groups]]
            columns = ["zona", "sexo"]
        "#;
        let config = ProfilerConfig::parse(text, Path::new("nna.toml")).unwrap();
        assert_eq!(config.thresholds.near_constant, Some(0.9));
        assert_eq!(config.thresholds.decimals, Some(1));
        assert_eq!(config.charts.top_n, Some(10));
        assert_eq!(config.ingest.separator.as_deref(), Some(";"));
        assert_eq!(config.ingest.header, Some(HeaderMode::Detect));
        assert_eq!(config.kinds.get("folio"), Some(&ColumnKind::Identifier));
        assert_eq!(config.kinds.get("comentario"), Some(&ColumnKind::FreeText));
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.groups[1].columns, vec!["zona", "sexo"]);
    }

    #[test]
    fn kinds_accept_the_short_spellings() {
        let text = r#"
            [kinds]
            folio = "id"
            edad = "number"
            zona = "category"
            comentario = "text"
        "#;
        let config = ProfilerConfig::parse(text, Path::new("nna.toml")).unwrap();
        for (column, spelling) in [
            ("folio", "id"),
            ("edad", "number"),
            ("zona", "category"),
            ("comentario", "text"),
        ] {
            assert_eq!(
                config.kinds.get(column).copied(),
                spelling.parse::<ColumnKind>().ok(),
                "{column}"
            );
        }
    }

    #[test]
    fn empty_text_is_default() {
        let config = ProfilerConfig::parse("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, ProfilerConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected_with_path() {
        let error = ProfilerConfig::parse("[thresholds]\nnear = 1.0\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("bad.toml"));
    }
}
