//! Labeled tabular data: row labels, column labels and a grid of scalar cells

use crate::error::{Error, Result};
use std::fmt;

/// A scalar table cell
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(n) => write!(f, "{n}"),
            CellValue::Float(x) => {
                let mut buffer = ryu::Buffer::new();
                f.write_str(buffer.format(*x))
            }
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Integer(n.into())
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Integer(n.into())
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Empty, Into::into)
    }
}

/// Check that a grid of `rows` x `columns` labels matches `data`.
///
/// Every data row must be `columns` wide and there must be `rows` of them.
pub fn check_grid<T>(columns: usize, rows: usize, data: &[Vec<T>]) -> Result<()> {
    if let Some(row) = data.iter().find(|r| r.len() != columns) {
        return Err(Error::ShapeMismatch {
            what: "column labels vs data row width",
            expected: columns,
            actual: row.len(),
        });
    }
    if data.len() != rows {
        return Err(Error::ShapeMismatch {
            what: "row labels vs data rows",
            expected: rows,
            actual: data.len(),
        });
    }
    Ok(())
}

/// A table with one label per row and per column
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabeledTable {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    values: Vec<Vec<CellValue>>,
}

impl LabeledTable {
    pub fn new(
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        values: Vec<Vec<CellValue>>,
    ) -> Result<Self> {
        check_grid(column_labels.len(), row_labels.len(), &values)?;
        Ok(Self {
            row_labels,
            column_labels,
            values,
        })
    }

    /// Build from column labels and `(row label, row values)` pairs
    pub fn from_rows<C, L, V, I>(column_labels: &[C], rows: I) -> Result<Self>
    where
        C: ToString,
        L: ToString,
        V: Into<CellValue>,
        I: IntoIterator<Item = (L, Vec<V>)>,
    {
        let mut row_labels = Vec::new();
        let mut values = Vec::new();
        for (label, row) in rows {
            row_labels.push(label.to_string());
            values.push(row.into_iter().map(Into::into).collect());
        }
        let column_labels = column_labels.iter().map(ToString::to_string).collect();
        Self::new(row_labels, column_labels, values)
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn values(&self) -> &[Vec<CellValue>] {
        &self.values
    }

    /// `(rows, columns)` of the data grid, labels excluded
    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.values.get(row)?.get(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::from("dog").to_string(), "dog");
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from(1.0).to_string(), "1.0");
        assert_eq!(CellValue::from(0.25).to_string(), "0.25");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::from(None::<i64>), CellValue::Empty);
    }

    #[test]
    fn test_from_rows() {
        let table = LabeledTable::from_rows(
            &["2022", "2023"],
            vec![("Dogs", vec![10, 12]), ("Cats", vec![8, 9])],
        )
        .unwrap();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.row_labels(), ["Dogs", "Cats"]);
        assert_eq!(table.column_labels(), ["2022", "2023"]);
        assert_eq!(table.get(1, 0), Some(&CellValue::Integer(8)));
        assert_eq!(table.get(2, 0), None);
    }

    #[test]
    fn test_row_width_mismatch() {
        let err = LabeledTable::from_rows(&["a", "b"], vec![("x", vec![1, 2]), ("y", vec![3])])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_row_label_mismatch() {
        let err = LabeledTable::new(
            vec!["x".into()],
            vec!["a".into()],
            vec![vec![1.into()], vec![2.into()]],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "row labels vs data rows: expected 1, got 2"
        );
    }

    #[test]
    fn test_empty_grid_is_valid() {
        assert!(check_grid::<CellValue>(3, 0, &[]).is_ok());
        assert_eq!(LabeledTable::default().shape(), (0, 0));
    }
}
