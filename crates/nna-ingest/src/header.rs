//! Header row detection and column-name cleanup.

use std::collections::BTreeSet;

/// Prefix given to columns without a name.
pub const UNNAMED_PREFIX: &str = "Unnamed";

/// Trims a raw header and replaces spaces with underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().replace(' ', "_")
}

/// Normalizes every header, names blank ones `Unnamed: <idx>` and suffixes
/// repeated names with `.1`, `.2`, ...
pub fn clean_headers(raw: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.iter()
        .enumerate()
        .map(|(idx, header)| {
            let mut name = normalize_header(header);
            if name.is_empty() {
                name = format!("{UNNAMED_PREFIX}: {idx}");
            }
            let mut candidate = name.clone();
            let mut suffix = 1usize;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{name}.{suffix}");
                suffix += 1;
            }
            candidate
        })
        .collect()
}

pub fn is_unnamed(header: &str) -> bool {
    header.starts_with(UNNAMED_PREFIX)
}

/// Shape of one raw record, used to tell header rows from data rows.
#[derive(Debug, Default, Clone, Copy)]
struct RecordShape {
    cells: usize,
    filled: usize,
    numeric: usize,
    alphabetic: usize,
    name_like: usize,
}

impl RecordShape {
    fn of(record: &[String]) -> Self {
        let mut shape = Self {
            cells: record.len(),
            ..Self::default()
        };
        for value in record.iter().map(|cell| cell.trim()).filter(|v| !v.is_empty()) {
            shape.filled += 1;
            if value.parse::<f64>().is_ok() {
                shape.numeric += 1;
            }
            if value.chars().any(char::is_alphabetic) {
                shape.alphabetic += 1;
            }
            if is_name_like(value) {
                shape.name_like += 1;
            }
        }
        shape
    }

    fn share(self, count: usize) -> f64 {
        if self.cells == 0 {
            0.0
        } else {
            count as f64 / self.cells as f64
        }
    }

    fn looks_like_data(self) -> bool {
        self.share(self.numeric) >= 0.2 || self.share(self.cells - self.filled) >= 0.2
    }

    fn looks_like_names(self) -> bool {
        self.share(self.name_like) >= 0.6 && self.share(self.numeric) <= 0.1
    }

    fn looks_like_labels(self) -> bool {
        self.share(self.filled) >= 0.8
            && self.share(self.alphabetic) >= 0.5
            && self.share(self.numeric) <= 0.1
    }
}

/// Short variable-style names such as `edad` or `p12_trabaja`.
fn is_name_like(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_') && chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}

/// Index of the header record among the first few records.
///
/// Survey exports sometimes carry a row of long labels above the row of
/// variable names. The header is the last name-like record before the first
/// data-like record, or failing that the last label-like one.
pub fn detect_header_row(records: &[Vec<String>]) -> usize {
    let shapes: Vec<RecordShape> = records
        .iter()
        .take(5)
        .map(|record| RecordShape::of(record))
        .collect();
    let data_start = shapes
        .iter()
        .position(|shape| shape.looks_like_data())
        .unwrap_or(1)
        .max(1);
    let mut header = 0usize;
    let mut found_names = false;
    for (idx, shape) in shapes.iter().enumerate().take(data_start) {
        if shape.looks_like_names() {
            header = idx;
            found_names = true;
        } else if !found_names && shape.looks_like_labels() {
            header = idx;
        }
    }
    header
}
