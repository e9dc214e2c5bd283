use serde::Serialize;

use super::error::ModelError;

/// Name of the conformation-family column appended to every result table.
pub const CONFORMATION_COLUMN: &str = "Conformation";

/// Values held by one table column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnData {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Text(Vec<String>),
}

impl ColumnData {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders a single cell as text, for CSV output and terminal tables.
    pub fn render(&self, row: usize) -> String {
        match self {
            ColumnData::Float(v) => v[row].to_string(),
            ColumnData::Int(v) => v[row].to_string(),
            ColumnData::Text(v) => v[row].clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnData,
}

/// An ordered, column-oriented table of per-conformation results.
///
/// All columns share one length. Long-form (melted) tables repeat the
/// conformation ids once per source column, so the conformation column is
/// always a whole number of cycles over the dataset's ids; see
/// [`DataTable::with_conformations`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn float_column(&self, name: &str) -> Option<&[f64]> {
        match self.column(name)? {
            Column { values: ColumnData::Float(v), .. } => Some(v),
            _ => None,
        }
    }

    pub fn int_column(&self, name: &str) -> Option<&[i64]> {
        match self.column(name)? {
            Column { values: ColumnData::Int(v), .. } => Some(v),
            _ => None,
        }
    }

    pub fn push_float(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), ModelError> {
        self.push_column(name.into(), ColumnData::Float(values))
    }

    pub fn push_int(
        &mut self,
        name: impl Into<String>,
        values: Vec<i64>,
    ) -> Result<(), ModelError> {
        self.push_column(name.into(), ColumnData::Int(values))
    }

    pub fn push_text(
        &mut self,
        name: impl Into<String>,
        values: Vec<String>,
    ) -> Result<(), ModelError> {
        self.push_column(name.into(), ColumnData::Text(values))
    }

    fn push_column(&mut self, name: String, values: ColumnData) -> Result<(), ModelError> {
        if !self.columns.is_empty() && values.len() != self.row_count() {
            return Err(ModelError::ColumnLength {
                column: name,
                expected: self.row_count(),
                actual: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Appends the conformation-id column, cycling `ids` over the rows.
    ///
    /// Plain tables hold one row per conformation and receive `ids` as-is;
    /// melted tables hold a whole number of id cycles. A table with no
    /// columns yet takes one full cycle and its row count. A row count that
    /// is not a multiple of `ids.len()` means the table was not produced
    /// from these conformations and is rejected.
    pub fn with_conformations(mut self, ids: &[i64]) -> Result<Self, ModelError> {
        if ids.is_empty() || self.row_count() % ids.len() != 0 {
            return Err(ModelError::ConformationMismatch {
                rows: self.row_count(),
                ids: ids.len(),
            });
        }
        let rows = if self.columns.is_empty() { ids.len() } else { self.row_count() };
        let cycled: Vec<i64> = ids.iter().copied().cycle().take(rows).collect();
        self.push_column(CONFORMATION_COLUMN.to_string(), ColumnData::Int(cycled))?;
        Ok(self)
    }
}

/// Descriptive statistics for one conformation family.
///
/// `std` is the sample standard deviation (one delta degree of freedom), so
/// a singleton family reports NaN. Quartiles interpolate linearly between
/// order statistics. The `median` duplicates the 50th percentile and is
/// kept as its own column for compatibility with downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyStats {
    #[serde(rename = "Conformation")]
    pub conformation: i64,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub q50: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
    pub median: f64,
}

/// Statistics rows, one per conformation family, in ascending family order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatsTable {
    pub rows: Vec<FamilyStats>,
}

impl StatsTable {
    /// Column headers, in output order.
    pub const COLUMNS: [&'static str; 10] = [
        "Conformation",
        "count",
        "mean",
        "std",
        "min",
        "25%",
        "50%",
        "75%",
        "max",
        "median",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_mismatched_length() {
        let mut table = DataTable::new();
        table.push_float("a", vec![1.0, 2.0]).unwrap();
        let err = table.push_float("b", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ColumnLength { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn conformations_cycle_over_melted_rows() {
        let mut table = DataTable::new();
        table
            .push_float("v", vec![10.0, 20.0, 30.0, 40.0])
            .unwrap();
        let table = table.with_conformations(&[1, 2]).unwrap();
        assert_eq!(
            table.int_column(CONFORMATION_COLUMN).unwrap(),
            &[1, 2, 1, 2]
        );
    }

    #[test]
    fn conformations_on_an_empty_table_take_one_cycle() {
        let table = DataTable::new().with_conformations(&[1, 1, 2]).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.int_column(CONFORMATION_COLUMN).unwrap(), &[1, 1, 2]);
    }

    #[test]
    fn conformations_reject_non_multiple() {
        let mut table = DataTable::new();
        table.push_float("v", vec![1.0, 2.0, 3.0]).unwrap();
        let err = table.with_conformations(&[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ConformationMismatch { rows: 3, ids: 2 }
        ));
    }

    #[test]
    fn typed_column_lookup() {
        let mut table = DataTable::new();
        table.push_float("v", vec![1.5]).unwrap();
        table.push_text("label", vec!["H1".to_string()]).unwrap();
        assert_eq!(table.float_column("v").unwrap(), &[1.5]);
        assert!(table.float_column("label").is_none());
        assert!(table.column("missing").is_none());
        assert_eq!(table.column("label").unwrap().values.render(0), "H1");
    }
}
