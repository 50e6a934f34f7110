use crate::domain::mappers::{BRANDS, ID_COLUMN};
use crate::domain::table::{cell_field, columns, delete_field, Cell, Column, ColumnKind, RowSlot};
use crate::sessions::EditorSession;
use crate::templates::{alert, desktop_layout, AlertKind};
use maud::{html, Markup};
use std::collections::HashMap;

/// Field name -> value of a form that bounced.
type Submitted<'a> = HashMap<&'a str, &'a str>;

/// Blank rows offered for new searches on each render.
pub const NEW_ROW_SLOTS: usize = 3;

pub fn editor_page(state: &EditorSession) -> Markup {
    let columns = columns();
    let submitted: Option<Submitted> = state.submitted.as_ref().map(|pairs| {
        pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    });
    let submitted = submitted.as_ref();
    let deleted = |pos: usize| {
        submitted.is_some_and(|form| form.contains_key(delete_field(pos).as_str()))
    };

    desktop_layout(
        "Edition requêtes",
        html! {
            h1 { "Edition requêtes" }

            @if let Some(err) = &state.load_error {
                (alert(AlertKind::Error, err))
            }
            @if let Some(warning) = &state.warning {
                (alert(AlertKind::Warning, warning))
            }
            @if let Some(err) = &state.save_error {
                (alert(AlertKind::Error, err))
            }

            @if let Some(snapshot) = &state.snapshot {
                form
                    method="post"
                    action="/requests"
                    oninput="this.querySelector('#save').disabled = false"
                {
                    fieldset disabled[!state.editable] style="border: none; padding: 0; overflow-x: auto;" {
                        table class="editor" {
                            thead {
                                tr {
                                    th { "Supprimer" }
                                    @for column in &columns {
                                        th { (column.header) }
                                    }
                                }
                            }
                            tbody {
                                @for (pos, row) in snapshot.rows.iter().enumerate() {
                                    tr data-id=(row.get(ID_COLUMN).map_or("", Cell::text)) {
                                        td { input type="checkbox" name=(delete_field(pos)) checked[deleted(pos)]; }
                                        @for (col, column) in columns.iter().enumerate() {
                                            td { (cell_input(RowSlot::Existing(pos), col, column, row.get(column.header), submitted)) }
                                        }
                                    }
                                }
                                @for slot in 0..NEW_ROW_SLOTS {
                                    tr class="new-row" {
                                        td { "+" }
                                        @for (col, column) in columns.iter().enumerate() {
                                            td { (cell_input(RowSlot::New(slot), col, column, None, submitted)) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    p {
                        button id="save" type="submit" class="primary" disabled[state.not_modified] {
                            "Sauver les recherches"
                        }
                    }
                }
            }
        },
    )
}

/// Input for one cell. New rows have no value: checkboxes default to
/// checked and the state to "active". After a bounced save the submitted
/// value wins over the loaded one.
fn cell_input(
    slot: RowSlot,
    col: usize,
    column: &Column,
    loaded: Option<&Cell>,
    submitted: Option<&Submitted>,
) -> Markup {
    let name = cell_field(slot, col);
    let shown = match submitted {
        Some(form) if column.kind == ColumnKind::Flag => {
            Some(Cell::Flag(form.contains_key(name.as_str())))
        }
        Some(form) => form
            .get(name.as_str())
            .map(|v| Cell::Text(v.to_string()))
            .or_else(|| loaded.cloned()),
        None => loaded.cloned(),
    };
    let value = shown.as_ref();
    let text = value.map_or("", Cell::text);

    match column.kind {
        ColumnKind::Flag => {
            let checked = value.map_or(true, Cell::flag);
            html! {
                input
                    type="checkbox"
                    name=(name)
                    title="Cocher pour appliquer dans la recherche"
                    checked[checked];
            }
        }
        ColumnKind::Brand => {
            let unknown = !text.is_empty() && BRANDS.to_right(text).is_none();
            html! {
                select name=(name) {
                    option value="" selected[text.is_empty()] { "—" }
                    @for (brand, _) in BRANDS.pairs() {
                        option value=(brand) selected[text == brand] { (brand) }
                    }
                    @if unknown {
                        option value=(text) selected { (text) }
                    }
                }
            }
        }
        ColumnKind::State => {
            let active = text.is_empty() || text == "active";
            html! {
                select name=(name) {
                    option value="active" selected[active] { "active" }
                    option value="inactive" selected[!active] { "inactive" }
                }
            }
        }
        ColumnKind::Text => html! {
            input type="text" name=(name) value=(text);
        },
    }
}
