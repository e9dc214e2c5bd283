use std::io::Write;

use serde_json::{Map, Value};

use crate::io::error::Error;
use crate::model::table::{DataTable, StatsTable};

/// Writes a result table as a column-oriented JSON object, one array per
/// column. Non-finite values serialize as `null`.
pub fn write_table<W: Write>(writer: W, table: &DataTable) -> Result<(), Error> {
    let mut object = Map::new();
    for column in table.columns() {
        object.insert(column.name.clone(), serde_json::to_value(&column.values)?);
    }
    serde_json::to_writer_pretty(writer, &Value::Object(object))?;
    Ok(())
}

/// Writes per-family statistics as a JSON array of row objects.
pub fn write_stats<W: Write>(writer: W, stats: &StatsTable) -> Result<(), Error> {
    serde_json::to_writer_pretty(writer, stats)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::FamilyStats;
    use serde_json::json;

    #[test]
    fn tables_become_column_objects() {
        let mut table = DataTable::new();
        table.push_float("Potential energy", vec![0.0, 2.0]).unwrap();
        let table = table.with_conformations(&[1, 2]).unwrap();

        let mut buf = Vec::new();
        write_table(&mut buf, &table).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["Potential energy"], json!([0.0, 2.0]));
        assert_eq!(value["Conformation"], json!([1, 2]));
    }

    #[test]
    fn stats_become_row_objects_with_null_nan() {
        let stats = StatsTable {
            rows: vec![FamilyStats {
                conformation: 2,
                count: 1,
                mean: 5.0,
                std: f64::NAN,
                min: 5.0,
                q25: 5.0,
                q50: 5.0,
                q75: 5.0,
                max: 5.0,
                median: 5.0,
            }],
        };
        let mut buf = Vec::new();
        write_stats(&mut buf, &stats).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["Conformation"], json!(2));
        assert_eq!(value[0]["std"], Value::Null);
        assert_eq!(value[0]["25%"], json!(5.0));
    }
}
