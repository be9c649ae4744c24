//! Run manifest with artifact checksums.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::common::sha256_hex;

pub const MANIFEST_SCHEMA: &str = "nna-profiler/manifest";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    pub bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub schema: String,
    pub schema_version: u32,
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub rows: usize,
    pub columns: usize,
    pub artifacts: Vec<ArtifactEntry>,
}

impl Manifest {
    pub fn new(input: Option<&Path>, rows: usize, columns: usize) -> Self {
        Self {
            schema: MANIFEST_SCHEMA.to_string(),
            schema_version: MANIFEST_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            input: input.map(|path| path.display().to_string()),
            rows,
            columns,
            artifacts: Vec::new(),
        }
    }

    /// Hashes a written artifact and records it.
    pub fn record(&mut self, output_dir: &Path, path: &Path) -> Result<()> {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let relative = path.strip_prefix(output_dir).unwrap_or(path);
        let relative = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        self.artifacts.push(ArtifactEntry {
            path: relative,
            bytes: bytes.len() as u64,
            sha256: sha256_hex(&bytes),
        });
        Ok(())
    }

    pub fn artifact(&self, relative: &str) -> Option<&ArtifactEntry> {
        self.artifacts.iter().find(|entry| entry.path == relative)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
    }

    pub fn paths(&self, output_dir: &Path) -> Vec<PathBuf> {
        self.artifacts
            .iter()
            .map(|entry| output_dir.join(&entry.path))
            .collect()
    }
}
