// src/domain/changes.rs

use crate::api::{EditDiff, SearchDefinition};
use crate::domain::mappers::{
    collapse_status, display_column, BRANDS, BRAND_FIELD, CREATION_DATE_FIELD, ID_COLUMN,
    NAME_FIELD, REQUEST_COLUMNS, STATUS_COLUMNS, STATUS_FIELD,
};
use crate::domain::table::{Cell, Row, Snapshot, TableEdits};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

/// Why a set of edits cannot be saved. Shown to the user as a warning.
#[derive(Debug, Error, PartialEq)]
pub enum DiffRejected {
    #[error("Chaque recherche doit avoir un nom avant d'être sauvée.")]
    EmptyName,
    #[error("Marque inconnue : {0}")]
    UnknownBrand(String),
    #[error("Valeur invalide dans la recherche '{name}' : {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Computes the deleted/updated/added triple between the rendered snapshot
/// and the user's edits.
///
/// Nothing is partially applied: any invalid row rejects the whole diff.
/// `today` fills the creation date of added rows left blank.
pub fn compute_diff(
    snapshot: &Snapshot,
    edits: &TableEdits,
    today: NaiveDate,
) -> Result<EditDiff, DiffRejected> {
    // 1. apply cell edits on a working copy
    let mut working = snapshot.rows.clone();
    for (pos, changes) in &edits.edited_rows {
        if let Some(row) = working.get_mut(*pos) {
            row.extend(changes.clone());
        } else {
            warn!(pos, "edit on a row that was never rendered, ignoring");
        }
    }

    let kept = working
        .iter()
        .enumerate()
        .filter(|(pos, _)| !edits.deleted_rows.contains(pos))
        .map(|(_, row)| row);
    if kept.chain(edits.added_rows.iter()).any(has_empty_name) {
        return Err(DiffRejected::EmptyName);
    }

    let mut diff = EditDiff::default();

    for pos in &edits.deleted_rows {
        match snapshot.rows.get(*pos).map(|row| row_id(row)) {
            Some(id) if !id.is_empty() => diff.deleted.push(id.to_string()),
            _ => warn!(pos, "deleted row has no identifier, skipping"),
        }
    }

    for pos in edits.edited_rows.keys() {
        if edits.deleted_rows.contains(pos) {
            continue;
        }
        let Some(row) = working.get(*pos) else {
            continue;
        };
        diff.updated.push(to_definition(remote_row(row)?)?);
    }

    for row in &edits.added_rows {
        let mut fields = remote_row(row)?;
        fields.remove(ID_COLUMN);
        let blank_date = fields
            .get(CREATION_DATE_FIELD)
            .and_then(Value::as_str)
            .map_or(true, |d| d.trim().is_empty());
        if blank_date {
            fields.insert(
                CREATION_DATE_FIELD.to_string(),
                Value::String(today.format("%Y-%m-%d").to_string()),
            );
        }
        diff.added.push(to_definition(fields)?);
    }

    info!(
        deleted = diff.deleted.len(),
        updated = diff.updated.len(),
        added = diff.added.len(),
        "computed requests diff"
    );

    Ok(diff)
}

fn has_empty_name(row: &Row) -> bool {
    row.get(display_column(NAME_FIELD))
        .map_or(true, |cell| cell.text().trim().is_empty())
}

fn row_id(row: &Row) -> &str {
    row.get(ID_COLUMN).map_or("", Cell::text)
}

/// Display row -> remote field map (steps 2 to 4).
fn remote_row(row: &Row) -> Result<Map<String, Value>, DiffRejected> {
    let mut fields = Map::new();

    // 2. condition checkboxes -> comma-joined codes
    let flags = STATUS_COLUMNS
        .pairs()
        .map(|(label, _)| (label, row.get(label).is_some_and(Cell::flag)));
    fields.insert(STATUS_FIELD.to_string(), Value::String(collapse_status(flags)));

    // 3. readable brand -> brand id
    let brand = row
        .get(display_column(BRAND_FIELD))
        .map_or("", Cell::text)
        .trim();
    let brand_id = if brand.is_empty() {
        String::new()
    } else if let Some(id) = BRANDS.to_right(brand) {
        id.to_string()
    } else if brand.chars().all(|c| c.is_ascii_digit()) {
        // raw id kept from a brand missing in the table
        brand.to_string()
    } else {
        return Err(DiffRejected::UnknownBrand(brand.to_string()));
    };
    fields.insert(BRAND_FIELD.to_string(), Value::String(brand_id));

    // 4. display headers -> remote field names
    for (header, cell) in row {
        if header == ID_COLUMN {
            if !cell.text().is_empty() {
                fields.insert(ID_COLUMN.to_string(), Value::String(cell.text().to_string()));
            }
            continue;
        }
        match REQUEST_COLUMNS.to_left(header) {
            Some(BRAND_FIELD) | None => {}
            Some(field) => {
                fields.insert(field.to_string(), Value::String(cell.text().to_string()));
            }
        }
    }

    Ok(fields)
}

fn to_definition(fields: Map<String, Value>) -> Result<SearchDefinition, DiffRejected> {
    let name = fields
        .get(NAME_FIELD)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    serde_json::from_value(Value::Object(fields)).map_err(|e| DiffRejected::InvalidValue {
        name,
        reason: e.to_string(),
    })
}
