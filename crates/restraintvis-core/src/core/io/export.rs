//! Tabular export of extracted restraints.

use crate::core::models::restraint::{RestraintRecord, RestraintRow};
use std::io::Write;

/// Writes one CSV row per record, with a header, in the order given.
pub fn write_restraints_csv<W: Write>(
    records: &[RestraintRecord],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(RestraintRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::restraint::RestraintEndpoint;

    fn record(id: &str, comp: Option<&str>) -> RestraintRecord {
        let endpoint = |asym: &str, seq| RestraintEndpoint {
            entity_id: None,
            asym_id: asym.into(),
            seq_id: seq,
            comp_id: comp.map(Into::into),
            atom_id: "CA".into(),
        };
        RestraintRecord {
            id: Some(id.into()),
            start: endpoint("A", 5),
            end: endpoint("B", 12),
            distance_threshold: 25.0,
            restraint_type: Some("upper bound".into()),
            model_granularity: None,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut out = Vec::new();
        write_restraints_csv(&[record("1", Some("LYS")), record("2", None)], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,entity_id_1,asym_id_1,seq_id_1"));
        assert_eq!(lines[1], "1,,A,5,LYS,CA,,B,12,LYS,CA,,25.0,upper bound");
        assert_eq!(lines[2], "2,,A,5,,CA,,B,12,,CA,,25.0,upper bound");
    }

    #[test]
    fn no_records_writes_nothing() {
        let mut out = Vec::new();
        write_restraints_csv(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
