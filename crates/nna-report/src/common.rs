//! Shared helpers for artifact writing.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::Digest;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Ensure an output subdirectory exists and return its path.
pub fn ensure_output_dir(base_dir: &Path, name: &str) -> Result<PathBuf> {
    let dir = base_dir.join(name);
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// File-name-safe form of a column name.
///
/// Keeps letters, digits, `-`, `_` and `.`; everything else becomes `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        "column".to_string()
    } else {
        stem.to_string()
    }
}

/// File stems already used in one output directory.
///
/// Stems are compared case-insensitively; a repeated stem gets a `_1`, `_2`
/// suffix.
#[derive(Debug, Default)]
pub struct FileStems {
    used: HashSet<String>,
}

impl FileStems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizes `name` and returns a stem not handed out before.
    pub fn claim(&mut self, name: &str) -> String {
        let base = sanitize_file_stem(name);
        let mut stem = base.clone();
        let mut counter = 1usize;
        while !self.used.insert(stem.to_lowercase()) {
            stem = format!("{base}_{counter}");
            counter += 1;
        }
        stem
    }
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map(nna_model::format_number).unwrap_or_default()
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize {}", path.display()))?;
    fs::write(path, format!("{json}\n")).with_context(|| format!("write {}", path.display()))
}
