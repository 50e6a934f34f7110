// src/domain/table.rs

use crate::api::SearchDefinition;
use crate::domain::mappers::{
    display_column, expand_status, BRANDS, BRAND_FIELD, ID_COLUMN, REQUEST_COLUMNS,
    STATE_FIELD, STATUS_COLUMNS,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{info, warn};

/// One cell of the editable table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Flag(bool),
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            Cell::Flag(_) => "",
        }
    }

    pub fn flag(&self) -> bool {
        matches!(self, Cell::Flag(true))
    }
}

/// A row keyed by column header (plus the hidden id column).
pub type Row = BTreeMap<String, Cell>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    Text,
    Brand,
    State,
    Flag,
}

/// A visible column of the editor, in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub kind: ColumnKind,
}

/// Request columns first, then one checkbox per known condition.
pub fn columns() -> Vec<Column> {
    let text = REQUEST_COLUMNS.pairs().map(|(field, header)| Column {
        header,
        kind: match field {
            BRAND_FIELD => ColumnKind::Brand,
            STATE_FIELD => ColumnKind::State,
            _ => ColumnKind::Text,
        },
    });
    let flags = STATUS_COLUMNS.pairs().map(|(label, _)| Column {
        header: label,
        kind: ColumnKind::Flag,
    });

    text.chain(flags).collect()
}

/// The table as it was last rendered to the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub rows: Vec<Row>,
}

impl Snapshot {
    pub fn from_definitions(definitions: &[SearchDefinition]) -> Self {
        info!(count = definitions.len(), "Formatting requests");
        Self {
            rows: definitions.iter().map(format_definition).collect(),
        }
    }
}

/// Remote record -> display row.
fn format_definition(def: &SearchDefinition) -> Row {
    let mut row = Row::new();

    row.insert(
        ID_COLUMN.to_string(),
        Cell::Text(def.id.clone().unwrap_or_default()),
    );

    let brand = match def.brand_ids.as_deref() {
        None => String::new(),
        Some(id) => match BRANDS.to_left(id) {
            Some(name) => name.to_string(),
            None => {
                warn!(brand_id = id, search = %def.name, "unknown brand id, keeping it raw");
                id.to_string()
            }
        },
    };

    let text = |s: String| Cell::Text(s);
    let number = |n: Option<String>| Cell::Text(n.unwrap_or_default());

    for (field, header) in REQUEST_COLUMNS.pairs() {
        let cell = match field {
            "name" => text(def.name.clone()),
            "creation_date" => text(def.creation_date.clone()),
            "per_page" => number(def.per_page.map(|n| n.to_string())),
            "search_text" => text(def.search_text.clone()),
            BRAND_FIELD => text(brand.clone()),
            "price_from" => number(def.price_from.map(|n| n.to_string())),
            "price_to" => number(def.price_to.map(|n| n.to_string())),
            STATE_FIELD => text(def.state.as_str().to_string()),
            other => {
                warn!(field = other, "no formatter for request field");
                continue;
            }
        };
        row.insert(header.to_string(), cell);
    }

    for (label, on) in expand_status(&def.status_ids) {
        row.insert(label.to_string(), Cell::Flag(on));
    }

    row
}

/// What the user did to the rendered table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableEdits {
    /// Positions in the snapshot.
    pub deleted_rows: BTreeSet<usize>,
    /// Position in the snapshot -> changed cells only.
    pub edited_rows: BTreeMap<usize, Row>,
    pub added_rows: Vec<Row>,
}

impl TableEdits {
    /// Rebuilds the edits from a submitted editor form.
    ///
    /// Fields are named by `cell_field`; unchecked checkboxes are simply
    /// absent, and text fields missing from the form are left unchanged.
    pub fn from_form(snapshot: &Snapshot, pairs: &[(String, String)]) -> Self {
        let form: HashMap<&str, &str> = pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let columns = columns();
        let mut edits = TableEdits::default();

        for (pos, original) in snapshot.rows.iter().enumerate() {
            if form.contains_key(delete_field(pos).as_str()) {
                edits.deleted_rows.insert(pos);
            }

            let mut changed = Row::new();
            for (col, column) in columns.iter().enumerate() {
                let key = cell_field(RowSlot::Existing(pos), col);
                let submitted = match column.kind {
                    ColumnKind::Flag => Cell::Flag(form.contains_key(key.as_str())),
                    _ => match form.get(key.as_str()) {
                        Some(v) => Cell::Text(v.trim().to_string()),
                        None => continue,
                    },
                };

                if original.get(column.header) != Some(&submitted) {
                    changed.insert(column.header.to_string(), submitted);
                }
            }

            if !changed.is_empty() {
                edits.edited_rows.insert(pos, changed);
            }
        }

        let new_slots = pairs
            .iter()
            .filter_map(|(k, _)| new_row_index(k))
            .max()
            .map_or(0, |max| max + 1);

        for slot in 0..new_slots {
            let mut row = Row::new();
            for (col, column) in columns.iter().enumerate() {
                let key = cell_field(RowSlot::New(slot), col);
                let cell = match column.kind {
                    ColumnKind::Flag => Cell::Flag(form.contains_key(key.as_str())),
                    _ => Cell::Text(form.get(key.as_str()).map_or("", |v| v.trim()).to_string()),
                };
                row.insert(column.header.to_string(), cell);
            }

            if !is_blank(&row) {
                edits.added_rows.push(row);
            }
        }

        edits
    }
}

/// A new row nobody typed in: every free-text cell is empty. The state
/// select and the checkboxes always carry a value, so they do not count.
fn is_blank(row: &Row) -> bool {
    let state_header = display_column(STATE_FIELD);
    row.iter()
        .filter(|(header, _)| header.as_str() != state_header)
        .all(|(_, cell)| cell.text().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowSlot {
    Existing(usize),
    New(usize),
}

/// Form field name of a cell: `r{row}:{col}` or `n{slot}:{col}`.
pub fn cell_field(slot: RowSlot, col: usize) -> String {
    match slot {
        RowSlot::Existing(pos) => format!("r{pos}:{col}"),
        RowSlot::New(slot) => format!("n{slot}:{col}"),
    }
}

pub fn delete_field(pos: usize) -> String {
    format!("r{pos}:delete")
}

fn new_row_index(key: &str) -> Option<usize> {
    let (slot, _) = key.strip_prefix('n')?.split_once(':')?;
    slot.parse().ok()
}
