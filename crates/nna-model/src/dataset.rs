//! Columnar in-memory survey table.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, format_number, parse_number};
use crate::error::{ProfileError, Result};

/// Kind tag assigned to every column once, when the dataset is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[serde(alias = "number")]
    Numeric,
    #[serde(alias = "category")]
    Categorical,
    #[serde(alias = "id")]
    Identifier,
    #[serde(alias = "text", alias = "free-text")]
    FreeText,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Identifier => "identifier",
            ColumnKind::FreeText => "free_text",
        }
    }

    pub fn is_numeric(self) -> bool {
        self == ColumnKind::Numeric
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColumnKind {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "numeric" | "number" => Ok(ColumnKind::Numeric),
            "categorical" | "category" => Ok(ColumnKind::Categorical),
            "identifier" | "id" => Ok(ColumnKind::Identifier),
            "free_text" | "text" => Ok(ColumnKind::FreeText),
            other => Err(format!("unknown column kind: {other}")),
        }
    }
}

/// A named column with its kind and one cell per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<Cell>,
}

impl Column {
    /// Build a column from raw text values, inferring its kind.
    ///
    /// The column is numeric when every present value parses as a finite
    /// number, otherwise categorical.
    pub fn from_raw(name: impl Into<String>, values: Vec<Option<String>>) -> Result<Self> {
        let name = column_name(name)?;
        let numeric = values
            .iter()
            .flatten()
            .filter(|value| !value.trim().is_empty())
            .all(|value| parse_number(value).is_some());
        let kind = if numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        };
        let cells = values
            .into_iter()
            .map(|value| typed_cell(value, kind))
            .collect();
        Ok(Self { name, kind, cells })
    }

    /// Build a column from already typed cells.
    pub fn with_cells(name: impl Into<String>, kind: ColumnKind, cells: Vec<Cell>) -> Result<Self> {
        let name = column_name(name)?;
        let mut column = Self {
            name,
            kind: ColumnKind::Categorical,
            cells,
        };
        column.set_kind(kind)?;
        Ok(column)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_missing()).count()
    }

    /// Distinct present values, in cell order.
    pub fn distinct_values(&self) -> BTreeSet<&Cell> {
        self.cells.iter().filter(|cell| !cell.is_missing()).collect()
    }

    /// Present numeric values.
    pub fn numbers(&self) -> Vec<f64> {
        self.cells.iter().filter_map(Cell::as_f64).collect()
    }

    /// Counts per value, missing included.
    pub fn value_counts(&self) -> BTreeMap<&Cell, usize> {
        let mut counts = BTreeMap::new();
        for cell in &self.cells {
            *counts.entry(cell).or_insert(0) += 1;
        }
        counts
    }

    /// Re-tag the column, converting its cells to match the new kind.
    ///
    /// Declaring a column numeric fails with [`ProfileError::MixedTypeColumn`]
    /// on the first value that does not parse; the column is left unchanged.
    pub fn set_kind(&mut self, kind: ColumnKind) -> Result<()> {
        if kind.is_numeric() {
            let mut converted = Vec::with_capacity(self.cells.len());
            for cell in &self.cells {
                converted.push(match cell {
                    Cell::Text(text) => match parse_number(text) {
                        Some(value) => Cell::Number(value),
                        None => {
                            return Err(ProfileError::MixedTypeColumn {
                                column: self.name.clone(),
                                value: text.clone(),
                            });
                        }
                    },
                    other => other.clone(),
                });
            }
            self.cells = converted;
        } else {
            for cell in &mut self.cells {
                if let Cell::Number(value) = cell {
                    *cell = Cell::Text(format_number(*value));
                }
            }
        }
        self.kind = kind;
        Ok(())
    }
}

fn column_name(name: impl Into<String>) -> Result<String> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProfileError::EmptyColumnName);
    }
    Ok(trimmed.to_string())
}

fn typed_cell(value: Option<String>, kind: ColumnKind) -> Cell {
    let Some(value) = value else {
        return Cell::Missing;
    };
    if kind.is_numeric() {
        parse_number(&value).map_or(Cell::Missing, Cell::Number)
    } else {
        Cell::text(value)
    }
}

/// Ordered named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Assemble a dataset, checking that names are unique and lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(ProfileError::DuplicateColumn {
                    column: column.name().to_string(),
                });
            }
            if column.len() != row_count {
                return Err(ProfileError::ColumnLengthMismatch {
                    column: column.name().to_string(),
                    expected: row_count,
                    actual: column.len(),
                });
            }
        }
        Ok(Self { columns, row_count })
    }

    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    pub fn columns_of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(move |column| column.kind() == kind)
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|column| &column.cells()[index])
                .collect(),
        )
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.row_count).filter_map(move |index| self.row(index))
    }

    /// Re-tag one column; see [`Column::set_kind`].
    pub fn declare_kind(&mut self, name: &str, kind: ColumnKind) -> Result<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|column| column.name() == name)
            .ok_or_else(|| ProfileError::UnknownColumn {
                column: name.to_string(),
            })?;
        column.set_kind(kind)
    }

    /// Keep only the first `limit` rows.
    pub fn head(&self, limit: usize) -> Self {
        let rows = limit.min(self.row_count);
        let columns = self
            .columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                kind: column.kind,
                cells: column.cells[..rows].to_vec(),
            })
            .collect();
        Self {
            columns,
            row_count: rows,
        }
    }
}

/// How declared kinds that do not fit the data are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindPolicy {
    /// Keep the inferred kind and report the mismatch.
    #[default]
    Fallback,
    /// Fail the build on the first mismatch.
    Strict,
}

/// Row-wise builder over raw text values.
///
/// Declared kinds are applied to the raw text, so identifiers such as `007`
/// keep their original spelling.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    headers: Vec<String>,
    values: Vec<Vec<Option<String>>>,
    declared: BTreeMap<String, ColumnKind>,
    rows: usize,
}

/// Result of [`DatasetBuilder::build`].
#[derive(Debug, Clone)]
pub struct BuiltDataset {
    pub dataset: Dataset,
    /// Declared kinds that were dropped in favour of the inferred kind.
    pub fallbacks: Vec<ProfileError>,
}

impl DatasetBuilder {
    pub fn new(headers: Vec<String>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        let mut names = Vec::with_capacity(headers.len());
        for header in headers {
            let name = column_name(header)?;
            if !seen.insert(name.clone()) {
                return Err(ProfileError::DuplicateColumn { column: name });
            }
            names.push(name);
        }
        let values = vec![Vec::new(); names.len()];
        Ok(Self {
            headers: names,
            values,
            declared: BTreeMap::new(),
            rows: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(ProfileError::RowWidthMismatch {
                row: self.rows,
                expected: self.headers.len(),
                actual: row.len(),
            });
        }
        for (column, value) in self.values.iter_mut().zip(row) {
            column.push(value);
        }
        self.rows += 1;
        Ok(())
    }

    pub fn declare_kind(&mut self, name: impl Into<String>, kind: ColumnKind) -> Result<()> {
        let name = name.into();
        if !self.headers.contains(&name) {
            return Err(ProfileError::UnknownColumn { column: name });
        }
        self.declared.insert(name, kind);
        Ok(())
    }

    pub fn build(self, policy: KindPolicy) -> Result<BuiltDataset> {
        let mut columns = Vec::with_capacity(self.headers.len());
        let mut fallbacks = Vec::new();
        for (name, values) in self.headers.into_iter().zip(self.values) {
            let declared = self.declared.get(&name).copied();
            let column = match declared {
                Some(kind) if !kind.is_numeric() => {
                    let cells = values
                        .into_iter()
                        .map(|value| value.map_or(Cell::Missing, Cell::text))
                        .collect();
                    Column { name, kind, cells }
                }
                Some(kind) => {
                    let mut column = Column::from_raw(name, values)?;
                    if let Err(error) = column.set_kind(kind) {
                        match policy {
                            KindPolicy::Strict => return Err(error),
                            KindPolicy::Fallback => fallbacks.push(error),
                        }
                    }
                    column
                }
                None => Column::from_raw(name, values)?,
            };
            columns.push(column);
        }
        Ok(BuiltDataset {
            dataset: Dataset::new(columns)?,
            fallbacks,
        })
    }
}
