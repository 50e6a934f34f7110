// src/sessions/context.rs
use crate::api::SearchDefinition;
use crate::domain::search::SearchResults;
use crate::domain::table::Snapshot;
use std::collections::HashMap;

/// Everything one browser session has on screen. Handlers mutate it and the
/// pages are rendered from it alone.
#[derive(Debug, Default)]
pub struct SessionContext {
    pub search: SearchSession,
    pub editor: EditorSession,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(SearchResults),
    /// The run failed or was refused; shown instead of results.
    Message(String),
}

#[derive(Debug, Default)]
pub struct SearchSession {
    /// Active search definitions, reloaded on every page load and search run.
    pub definitions: Option<Vec<SearchDefinition>>,
    pub load_error: Option<String>,
    pub selected: Vec<String>,
    pub outcome: Option<SearchOutcome>,
    /// Listing id -> AutoBuy requested. Survives new search runs.
    pub autobuy: HashMap<String, bool>,
}

impl SearchSession {
    pub fn is_autobuy(&self, listing_id: &str) -> bool {
        self.autobuy.get(listing_id).copied().unwrap_or(false)
    }

    pub fn set_autobuy(&mut self, listing_id: &str) {
        self.autobuy.insert(listing_id.to_string(), true);
    }
}

#[derive(Debug)]
pub struct EditorSession {
    /// Table as last rendered; edits are diffed against it.
    pub snapshot: Option<Snapshot>,
    pub load_error: Option<String>,
    /// Keeps the save button disabled until the form changes.
    pub not_modified: bool,
    pub editable: bool,
    pub warning: Option<String>,
    pub save_error: Option<String>,
    /// Form of a save that did not go through, shown again over the snapshot.
    pub submitted: Option<Vec<(String, String)>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            snapshot: None,
            load_error: None,
            not_modified: true,
            editable: true,
            warning: None,
            save_error: None,
            submitted: None,
        }
    }
}

impl EditorSession {
    /// Back to a fresh page: used on every full load of the editor.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn begin_save(&mut self) {
        self.not_modified = true;
        self.editable = false;
        self.warning = None;
        self.save_error = None;
        self.submitted = None;
    }

    /// The save did not go through; let the user fix their edits and retry.
    pub fn reopen(&mut self, submitted: Vec<(String, String)>) {
        self.not_modified = true;
        self.editable = true;
        self.submitted = Some(submitted);
    }
}
