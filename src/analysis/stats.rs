//! Per-conformation-family summary statistics.

use std::collections::BTreeMap;

use crate::model::table::{CONFORMATION_COLUMN, DataTable, FamilyStats, StatsTable};

use super::error::Error;

/// Groups `value_column` by the conformation-id column and summarizes each
/// family. An empty table produces an empty statistics table.
pub fn summarize(table: &DataTable, value_column: &str) -> Result<StatsTable, Error> {
    let values = table.float_column(value_column).ok_or_else(|| {
        if table.column(value_column).is_some() {
            Error::ColumnKind(value_column.to_string())
        } else {
            Error::MissingColumn(value_column.to_string())
        }
    })?;
    let ids = table
        .int_column(CONFORMATION_COLUMN)
        .ok_or_else(|| Error::MissingColumn(CONFORMATION_COLUMN.to_string()))?;

    let mut groups: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for (&id, &value) in ids.iter().zip(values) {
        groups.entry(id).or_default().push(value);
    }

    let rows = groups
        .into_iter()
        .map(|(conformation, values)| family_stats(conformation, values))
        .collect();
    Ok(StatsTable { rows })
}

fn family_stats(conformation: i64, mut values: Vec<f64>) -> FamilyStats {
    values.sort_by(f64::total_cmp);
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let squared: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (squared / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };
    FamilyStats {
        conformation,
        count,
        mean,
        std,
        min: values[0],
        q25: percentile(&values, 0.25),
        q50: percentile(&values, 0.50),
        q75: percentile(&values, 0.75),
        max: values[count - 1],
        median: percentile(&values, 0.50),
    }
}

/// Linear-interpolation percentile over sorted values.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ids: Vec<i64>, values: Vec<f64>) -> DataTable {
        let mut table = DataTable::new();
        table.push_float("value", values).unwrap();
        table.push_int(CONFORMATION_COLUMN, ids).unwrap();
        table
    }

    #[test]
    fn single_family_of_three_values() {
        let stats = summarize(&table(vec![1, 1, 1], vec![1.0, 2.0, 3.0]), "value").unwrap();
        assert_eq!(stats.rows.len(), 1);
        let row = &stats.rows[0];
        assert_eq!(row.count, 3);
        assert_eq!(row.mean, 2.0);
        assert_eq!(row.median, 2.0);
        assert_eq!(row.min, 1.0);
        assert_eq!(row.max, 3.0);
        assert_eq!(row.std, 1.0);
        assert_eq!(row.q25, 1.5);
        assert_eq!(row.q50, 2.0);
        assert_eq!(row.q75, 2.5);
        assert_eq!(row.median, row.q50);
    }

    #[test]
    fn families_come_out_in_ascending_order() {
        let stats =
            summarize(&table(vec![2, 1, 2, 1], vec![4.0, 1.0, 6.0, 3.0]), "value").unwrap();
        assert_eq!(stats.rows.len(), 2);
        assert_eq!(stats.rows[0].conformation, 1);
        assert_eq!(stats.rows[0].mean, 2.0);
        assert_eq!(stats.rows[1].conformation, 2);
        assert_eq!(stats.rows[1].mean, 5.0);
    }

    #[test]
    fn singleton_family_has_nan_std() {
        let stats = summarize(&table(vec![1], vec![5.0]), "value").unwrap();
        assert!(stats.rows[0].std.is_nan());
        assert_eq!(stats.rows[0].count, 1);
        assert_eq!(stats.rows[0].median, 5.0);
    }

    #[test]
    fn empty_table_gives_empty_stats() {
        let stats = summarize(&table(Vec::new(), Vec::new()), "value").unwrap();
        assert!(stats.rows.is_empty());
    }

    #[test]
    fn missing_and_mistyped_columns() {
        let t = table(vec![1], vec![5.0]);
        assert!(matches!(
            summarize(&t, "other").unwrap_err(),
            Error::MissingColumn(_)
        ));

        let mut labeled = DataTable::new();
        labeled.push_text("label", vec!["a".to_string()]).unwrap();
        labeled.push_int(CONFORMATION_COLUMN, vec![1]).unwrap();
        assert!(matches!(
            summarize(&labeled, "label").unwrap_err(),
            Error::ColumnKind(_)
        ));
    }
}
