use crate::core::io::cif::{Container, Table};
use crate::core::models::restraint::{DEFAULT_ATOM_ID, RestraintEndpoint, RestraintRecord};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument, trace};

pub const RESTRAINT_CATEGORY: &str = "ihm_cross_link_restraint";
pub const CHAIN_CATEGORY: &str = "struct_asym";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ExtractError {
    #[error("Required category '{category}' is missing from the structure")]
    MissingCategory { category: &'static str },

    #[error("Malformed restraint at row {row}: field '{field}' {kind}")]
    MalformedRestraint {
        row: usize,
        field: &'static str,
        kind: MalformedKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MalformedKind {
    #[error("is missing")]
    Missing,
    #[error("is not a valid number (value: '{0}')")]
    NotNumeric(String),
}

fn is_absent(value: &str) -> bool {
    matches!(value.trim(), "" | "." | "?")
}

fn optional(table: &Table, row: usize, field: &str) -> Option<String> {
    table
        .get_value(field, row)
        .filter(|v| !is_absent(v))
        .map(|v| v.trim().to_string())
}

fn required<'a>(table: &'a Table, row: usize, field: &'static str) -> Result<&'a str, ExtractError> {
    table
        .get_value(field, row)
        .filter(|v| !is_absent(v))
        .map(str::trim)
        .ok_or(ExtractError::MalformedRestraint {
            row,
            field,
            kind: MalformedKind::Missing,
        })
}

fn required_number<T: FromStr>(
    table: &Table,
    row: usize,
    field: &'static str,
) -> Result<T, ExtractError> {
    let raw = required(table, row, field)?;
    raw.parse().map_err(|_| ExtractError::MalformedRestraint {
        row,
        field,
        kind: MalformedKind::NotNumeric(raw.to_string()),
    })
}

/// Unspecified atoms (`.`, `?` or an absent column) become the alpha carbon.
fn atom_id(table: &Table, row: usize, field: &str) -> String {
    optional(table, row, field).unwrap_or_else(|| DEFAULT_ATOM_ID.to_string())
}

struct EndpointColumns {
    entity_id: &'static str,
    asym_id: &'static str,
    seq_id: &'static str,
    comp_id: &'static str,
    atom_id: &'static str,
}

const START_COLUMNS: EndpointColumns = EndpointColumns {
    entity_id: "entity_id_1",
    asym_id: "asym_id_1",
    seq_id: "seq_id_1",
    comp_id: "comp_id_1",
    atom_id: "atom_id_1",
};

const END_COLUMNS: EndpointColumns = EndpointColumns {
    entity_id: "entity_id_2",
    asym_id: "asym_id_2",
    seq_id: "seq_id_2",
    comp_id: "comp_id_2",
    atom_id: "atom_id_2",
};

fn read_endpoint(
    table: &Table,
    row: usize,
    columns: &EndpointColumns,
) -> Result<RestraintEndpoint, ExtractError> {
    Ok(RestraintEndpoint {
        entity_id: optional(table, row, columns.entity_id),
        asym_id: required(table, row, columns.asym_id)?.to_string(),
        seq_id: required_number(table, row, columns.seq_id)?,
        comp_id: optional(table, row, columns.comp_id),
        atom_id: atom_id(table, row, columns.atom_id),
    })
}

fn read_row(table: &Table, row: usize) -> Result<RestraintRecord, ExtractError> {
    let start = read_endpoint(table, row, &START_COLUMNS)?;
    let end = read_endpoint(table, row, &END_COLUMNS)?;
    let distance_threshold: f64 = required_number(table, row, "distance_threshold")?;
    if !distance_threshold.is_finite() {
        return Err(ExtractError::MalformedRestraint {
            row,
            field: "distance_threshold",
            kind: MalformedKind::NotNumeric(distance_threshold.to_string()),
        });
    }

    Ok(RestraintRecord {
        id: optional(table, row, "id"),
        start,
        end,
        distance_threshold,
        restraint_type: optional(table, row, "restraint_type"),
        model_granularity: optional(table, row, "model_granularity"),
    })
}

/// Converts every row of a cross-link restraint table, in row order.
///
/// Fails on the first malformed row; no row is ever skipped.
pub fn extract_from_table(table: &Table) -> Result<Vec<RestraintRecord>, ExtractError> {
    let records = (0..table.row_count())
        .map(|row| {
            let record = read_row(table, row)?;
            trace!(row, start = %record.start, end = %record.end, "Extracted restraint");
            Ok(record)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

#[instrument(skip_all, fields(block = container.name()))]
pub fn extract_restraints(container: &Container) -> Result<Vec<RestraintRecord>, ExtractError> {
    let table = container
        .get_obj(RESTRAINT_CATEGORY)
        .ok_or(ExtractError::MissingCategory {
            category: RESTRAINT_CATEGORY,
        })?;
    let records = extract_from_table(table)?;
    debug!("Extracted {} cross-link restraints.", records.len());
    Ok(records)
}

/// Chain identifiers from `struct_asym.id`, in table order.
pub fn chain_ids(container: &Container) -> Result<Vec<String>, ExtractError> {
    let missing = ExtractError::MissingCategory {
        category: CHAIN_CATEGORY,
    };
    let table = container.get_obj(CHAIN_CATEGORY).ok_or(missing.clone())?;
    let ids = table.column("id").ok_or(missing)?;
    Ok(ids
        .filter(|id| !is_absent(id))
        .map(|id| id.trim().to_string())
        .collect())
}
