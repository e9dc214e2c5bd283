use std::io::Write;

use crate::io::error::Error;
use crate::model::table::{DataTable, StatsTable};

/// Writes a result table as CSV: one header row of column names, then one
/// record per table row.
pub fn write_table<W: Write>(writer: W, table: &DataTable) -> Result<(), Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
    for row in 0..table.row_count() {
        csv.write_record(table.columns().iter().map(|c| c.values.render(row)))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes per-family statistics as CSV. The header is always present, even
/// for an empty statistics table.
pub fn write_stats<W: Write>(writer: W, stats: &StatsTable) -> Result<(), Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(StatsTable::COLUMNS)?;
    for row in &stats.rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::{CONFORMATION_COLUMN, FamilyStats};

    #[test]
    fn tables_render_with_headers() {
        let mut table = DataTable::new();
        table
            .push_text("atom_labels", vec!["H1".to_string(), "C2".to_string()])
            .unwrap();
        table.push_float("Mulliken charges", vec![0.1, -0.2]).unwrap();
        let table = table.with_conformations(&[1, 1]).unwrap();

        let mut buf = Vec::new();
        write_table(&mut buf, &table).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "atom_labels,Mulliken charges,Conformation\nH1,0.1,1\nC2,-0.2,1\n"
        );
    }

    #[test]
    fn stats_render_the_pandas_header() {
        let stats = StatsTable {
            rows: vec![FamilyStats {
                conformation: 1,
                count: 3,
                mean: 2.0,
                std: 1.0,
                min: 1.0,
                q25: 1.5,
                q50: 2.0,
                q75: 2.5,
                max: 3.0,
                median: 2.0,
            }],
        };
        let mut buf = Vec::new();
        write_stats(&mut buf, &stats).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Conformation,count,mean,std,min,25%,50%,75%,max,median\n\
             1,3,2.0,1.0,1.0,1.5,2.0,2.5,3.0,2.0\n"
        );
    }

    #[test]
    fn empty_stats_still_write_the_header() {
        let mut buf = Vec::new();
        write_stats(&mut buf, &StatsTable::default()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Conformation,count,mean,std,min,25%,50%,75%,max,median\n"
        );
    }

    #[test]
    fn conformation_column_is_last() {
        let table = DataTable::new().with_conformations(&[1, 2]).unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(CONFORMATION_COLUMN));
        assert_eq!(text, "Conformation\n1\n2\n");
    }
}
