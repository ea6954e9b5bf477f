//! Common tabular report shape.
//!
//! Every channel reporter returns its rows in a `ReportFrame`: ordered
//! column names plus rows of JSON values. Normalization consumes a frame and
//! hands back a new one, so callers never observe a half-rewritten report.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{PulseError, PulseResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ReportFrame {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> PulseResult<()> {
        if row.len() != self.columns.len() {
            return Err(PulseError::RowWidth {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Rewrite every column name through `f`.
    pub fn rename_columns(&mut self, f: impl Fn(&str) -> String) {
        for col in &mut self.columns {
            *col = f(col);
        }
    }

    /// Rename a single column.
    pub fn rename_column(&mut self, from: &str, to: &str) -> PulseResult<()> {
        let idx = self
            .column_index(from)
            .ok_or_else(|| PulseError::UnknownColumn(from.to_string()))?;
        self.columns[idx] = to.to_string();
        Ok(())
    }

    /// Remove the named columns from the frame and every row. Names that are
    /// not present are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !names.contains(&c.as_str()))
            .collect();
        let columns = std::mem::take(&mut self.columns);
        self.columns = columns
            .into_iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(c, _)| c)
            .collect();
        for row in &mut self.rows {
            let cells = std::mem::take(row);
            *row = cells
                .into_iter()
                .zip(&keep)
                .filter(|(_, k)| **k)
                .map(|(c, _)| c)
                .collect();
        }
    }

    /// Divide every value in the named column by `divisor`.
    pub fn scale_column(&mut self, name: &str, divisor: f64) -> PulseResult<()> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PulseError::UnknownColumn(name.to_string()))?;
        for (row_idx, row) in self.rows.iter_mut().enumerate() {
            let value = row[idx].as_f64().ok_or_else(|| PulseError::NonNumericCell {
                column: name.to_string(),
                row: row_idx,
            })?;
            row[idx] = Value::from(value / divisor);
        }
        Ok(())
    }

    /// Values of the named column as floats.
    pub fn numeric_column(&self, name: &str) -> PulseResult<Vec<f64>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PulseError::UnknownColumn(name.to_string()))?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                row[idx].as_f64().ok_or_else(|| PulseError::NonNumericCell {
                    column: name.to_string(),
                    row: row_idx,
                })
            })
            .collect()
    }

    /// Append a derived column. One value per existing row.
    pub fn append_column(&mut self, name: &str, values: Vec<Value>) -> PulseResult<()> {
        if values.len() != self.rows.len() {
            return Err(PulseError::ColumnLength {
                expected: self.rows.len(),
                got: values.len(),
            });
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Render the frame as CSV, header row first.
    pub fn to_csv(&self) -> String {
        let mut csv = self.columns.join(",");
        csv.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|v| match v {
                    Value::String(s) => format!("\"{}\"", s.replace('"', "\"\"")),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect();
            csv.push_str(&cells.join(","));
            csv.push('\n');
        }
        csv
    }

    /// Render the frame as a JSON array of column-to-value records.
    pub fn to_json(&self) -> PulseResult<String> {
        let mut records: Vec<HashMap<String, Value>> = Vec::new();
        for row in &self.rows {
            let mut record = HashMap::new();
            for (i, col) in self.columns.iter().enumerate() {
                if let Some(val) = row.get(i) {
                    record.insert(col.clone(), val.clone());
                }
            }
            records.push(record);
        }
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame() -> ReportFrame {
        let mut frame = ReportFrame::new(vec![
            "campaign#id".to_string(),
            "name".to_string(),
            "spend".to_string(),
        ]);
        frame
            .push_row(vec![json!("c-1"), json!("Summer Sale"), json!(3_000_000)])
            .unwrap();
        frame
            .push_row(vec![json!("c-2"), json!("Win-Back"), json!(1_500_000)])
            .unwrap();
        frame
    }

    #[test]
    fn test_push_row_checks_arity() {
        let mut frame = ReportFrame::new(vec!["a".to_string(), "b".to_string()]);
        let err = frame.push_row(vec![json!(1)]).unwrap_err();
        assert!(matches!(err, PulseError::RowWidth { expected: 2, got: 1 }));
    }

    #[test]
    fn test_rename_columns() {
        let mut frame = frame();
        frame.rename_columns(|name| name.replace('#', "_"));
        assert_eq!(frame.columns()[0], "campaign_id");
        frame.rename_column("spend", "cost").unwrap();
        assert!(frame.has_column("cost"));
        assert!(frame.rename_column("missing", "x").is_err());
    }

    #[test]
    fn test_drop_columns_keeps_rows_aligned() {
        let mut frame = frame();
        frame.drop_columns(&["name", "not_present"]);
        assert_eq!(frame.columns(), ["campaign#id", "spend"]);
        assert_eq!(frame.rows()[0], vec![json!("c-1"), json!(3_000_000)]);
    }

    #[test]
    fn test_scale_column() {
        let mut frame = frame();
        frame.scale_column("spend", 1_000_000.0).unwrap();
        assert_eq!(frame.numeric_column("spend").unwrap(), vec![3.0, 1.5]);
        let err = frame.scale_column("name", 2.0).unwrap_err();
        assert!(matches!(err, PulseError::NonNumericCell { .. }));
    }

    #[test]
    fn test_append_column() {
        let mut frame = frame();
        frame
            .append_column("clicks", vec![json!(10), json!(4)])
            .unwrap();
        assert_eq!(frame.numeric_column("clicks").unwrap(), vec![10.0, 4.0]);
        let err = frame.append_column("short", vec![json!(1)]).unwrap_err();
        assert!(matches!(err, PulseError::ColumnLength { expected: 2, got: 1 }));
    }

    #[test]
    fn test_csv_export() {
        let csv = frame().to_csv();
        assert!(csv.starts_with("campaign#id,name,spend\n"));
        assert!(csv.contains("\"Summer Sale\""));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_json_export() {
        let json = frame().to_json().unwrap();
        let parsed: Vec<HashMap<String, Value>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].contains_key("campaign#id"));
    }
}
