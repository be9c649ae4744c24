//! Adapters from polars frames.

use anyhow::{Context, Result};
use nna_model::{Column, Dataset, format_number};
use polars::prelude::{AnyValue, DataFrame};

/// Text form of a polars value; `None` for nulls and NaN.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(v.to_string()),
        AnyValue::Int16(v) => Some(v.to_string()),
        AnyValue::Int32(v) => Some(v.to_string()),
        AnyValue::Int64(v) => Some(v.to_string()),
        AnyValue::UInt8(v) => Some(v.to_string()),
        AnyValue::UInt16(v) => Some(v.to_string()),
        AnyValue::UInt32(v) => Some(v.to_string()),
        AnyValue::UInt64(v) => Some(v.to_string()),
        AnyValue::Float32(v) => float_text(f64::from(v)),
        AnyValue::Float64(v) => float_text(v),
        AnyValue::Boolean(b) => Some(b.to_string()),
        AnyValue::String(s) => non_blank(s),
        AnyValue::StringOwned(s) => non_blank(s.as_str()),
        other => non_blank(&other.to_string()),
    }
}

fn float_text(value: f64) -> Option<String> {
    value.is_finite().then(|| format_number(value))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Converts every column of `frame`, inferring kinds the same way the CSV
/// loader does.
pub fn dataset_from_frame(frame: &DataFrame) -> Result<Dataset> {
    let height = frame.height();
    let mut columns = Vec::with_capacity(frame.width());
    for column in frame.get_columns() {
        let name = column.name().to_string();
        let mut values = Vec::with_capacity(height);
        for idx in 0..height {
            let value = column
                .get(idx)
                .with_context(|| format!("read row {idx} of column {name}"))?;
            values.push(any_to_text(value));
        }
        columns.push(Column::from_raw(name, values)?);
    }
    Ok(Dataset::new(columns)?)
}

#[cfg(test)]
mod tests {
    use nna_model::{Cell, ColumnKind};
    use polars::prelude::*;

    use super::*;

    #[test]
    fn converts_frame_columns() {
        let frame = df!(
            "zona" => &[Some("urbana"), None, Some("rural")],
            "edad" => &[Some(9i64), Some(12), None],
            "peso" => &[30.5f64, f64::NAN, 41.0],
        )
        .unwrap();
        let data = dataset_from_frame(&frame).unwrap();
        assert_eq!(data.row_count(), 3);
        assert_eq!(data.column("zona").unwrap().kind(), ColumnKind::Categorical);
        assert_eq!(data.column("zona").unwrap().null_count(), 1);
        let edad = data.column("edad").unwrap();
        assert_eq!(edad.kind(), ColumnKind::Numeric);
        assert_eq!(edad.cells()[1], Cell::Number(12.0));
        assert_eq!(data.column("peso").unwrap().null_count(), 1);
    }

    #[test]
    fn text_forms() {
        assert_eq!(any_to_text(AnyValue::Null), None);
        assert_eq!(any_to_text(AnyValue::Float64(2.0)), Some("2".to_string()));
        assert_eq!(any_to_text(AnyValue::String("  ")), None);
        assert_eq!(any_to_text(AnyValue::Boolean(true)), Some("true".to_string()));
    }
}
