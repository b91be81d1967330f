use serde::Serialize;
use std::fmt;

/// Atom name used when a restraint leaves the atom unspecified: the alpha carbon.
pub const DEFAULT_ATOM_ID: &str = "CA";

/// One end of a cross-link restraint, addressed by chain (`label_asym_id`) and
/// residue number (`label_seq_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestraintEndpoint {
    pub entity_id: Option<String>,
    pub asym_id: String,
    pub seq_id: i32,
    pub comp_id: Option<String>,
    pub atom_id: String,
}

impl fmt::Display for RestraintEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.comp_id {
            Some(comp) => write!(f, "{}:{}{}:{}", self.asym_id, comp, self.seq_id, self.atom_id),
            None => write!(f, "{}:{}:{}", self.asym_id, self.seq_id, self.atom_id),
        }
    }
}

/// A canonical cross-link restraint. Atom names are never the `.` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestraintRecord {
    pub id: Option<String>,
    pub start: RestraintEndpoint,
    pub end: RestraintEndpoint,
    pub distance_threshold: f64,
    pub restraint_type: Option<String>,
    pub model_granularity: Option<String>,
}

impl RestraintRecord {
    pub fn restraint_type_or_empty(&self) -> &str {
        self.restraint_type.as_deref().unwrap_or("")
    }
}

/// Flat view of a record, one column per field, for tabular export.
#[derive(Debug, Serialize)]
pub struct RestraintRow<'a> {
    pub id: Option<&'a str>,
    pub entity_id_1: Option<&'a str>,
    pub asym_id_1: &'a str,
    pub seq_id_1: i32,
    pub comp_id_1: Option<&'a str>,
    pub atom_id_1: &'a str,
    pub entity_id_2: Option<&'a str>,
    pub asym_id_2: &'a str,
    pub seq_id_2: i32,
    pub comp_id_2: Option<&'a str>,
    pub atom_id_2: &'a str,
    pub model_granularity: Option<&'a str>,
    pub distance_threshold: f64,
    pub restraint_type: Option<&'a str>,
}

impl<'a> From<&'a RestraintRecord> for RestraintRow<'a> {
    fn from(r: &'a RestraintRecord) -> Self {
        Self {
            id: r.id.as_deref(),
            entity_id_1: r.start.entity_id.as_deref(),
            asym_id_1: &r.start.asym_id,
            seq_id_1: r.start.seq_id,
            comp_id_1: r.start.comp_id.as_deref(),
            atom_id_1: &r.start.atom_id,
            entity_id_2: r.end.entity_id.as_deref(),
            asym_id_2: &r.end.asym_id,
            seq_id_2: r.end.seq_id,
            comp_id_2: r.end.comp_id.as_deref(),
            atom_id_2: &r.end.atom_id,
            model_granularity: r.model_granularity.as_deref(),
            distance_threshold: r.distance_threshold,
            restraint_type: r.restraint_type.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(asym: &str, seq: i32, comp: Option<&str>) -> RestraintEndpoint {
        RestraintEndpoint {
            entity_id: Some("1".into()),
            asym_id: asym.into(),
            seq_id: seq,
            comp_id: comp.map(Into::into),
            atom_id: DEFAULT_ATOM_ID.into(),
        }
    }

    #[test]
    fn endpoint_display_includes_residue_name_when_known() {
        assert_eq!(endpoint("A", 5, Some("LYS")).to_string(), "A:LYS5:CA");
        assert_eq!(endpoint("B", 12, None).to_string(), "B:12:CA");
    }

    #[test]
    fn row_flattens_both_endpoints() {
        let record = RestraintRecord {
            id: Some("7".into()),
            start: endpoint("A", 5, Some("LYS")),
            end: endpoint("B", 12, None),
            distance_threshold: 30.0,
            restraint_type: Some("upper bound".into()),
            model_granularity: None,
        };
        let row = RestraintRow::from(&record);
        assert_eq!(row.asym_id_1, "A");
        assert_eq!(row.seq_id_2, 12);
        assert_eq!(row.comp_id_2, None);
        assert_eq!(row.restraint_type, Some("upper bound"));
    }
}
