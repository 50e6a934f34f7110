use crate::domain::changes::compute_diff;
use crate::domain::requests::{get_requests, requests_error_message, save_error_message, Workflow};
use crate::domain::table::{Snapshot, TableEdits};
use crate::errors::ResultResp;
use crate::responses::{html_response, see_other};
use crate::router::AppState;
use crate::sessions::OpenedSession;
use crate::templates::pages::editor_page;
use chrono::Utc;
use tracing::{info, warn};

/// Full load of the editor: always re-fetches the canonical definitions.
pub fn show(state: &AppState, session: &OpenedSession) -> ResultResp {
    let mut ctx = session.lock()?;
    let editor = &mut ctx.editor;
    editor.reset();

    match get_requests(state.api.as_ref(), Workflow::Editor) {
        Ok(definitions) => editor.snapshot = Some(Snapshot::from_definitions(&definitions)),
        Err(e) => editor.load_error = Some(requests_error_message(&e)),
    }

    html_response(editor_page(editor))
}

/// Diffs the submitted table against the rendered one and sends the diff.
///
/// Success redirects to a full reload; a rejected or failed save re-renders
/// the user's edits with the reason and editing enabled again. The snapshot
/// stays the base of the next diff.
pub fn save(state: &AppState, session: &OpenedSession, form: Vec<(String, String)>) -> ResultResp {
    let mut ctx = session.lock()?;

    let Some(snapshot) = ctx.editor.snapshot.clone() else {
        warn!("save requested without a rendered table, reloading");
        return see_other("/requests");
    };

    info!("Saving requests");
    ctx.editor.begin_save();

    let edits = TableEdits::from_form(&snapshot, &form);
    let today = Utc::now().with_timezone(&state.timezone).date_naive();

    let diff = match compute_diff(&snapshot, &edits, today) {
        Ok(diff) => diff,
        Err(rejected) => {
            warn!("requests not saved: {rejected}");
            ctx.editor.warning = Some(rejected.to_string());
            ctx.editor.reopen(form);
            return html_response(editor_page(&ctx.editor));
        }
    };

    if diff.is_empty() {
        info!("nothing to save");
        return see_other("/requests");
    }

    match state.api.update_requests(&diff) {
        Ok(()) => {
            info!("Requests saved");
            see_other("/requests")
        }
        Err(e) => {
            ctx.editor.save_error = Some(save_error_message(&e));
            ctx.editor.reopen(form);
            html_response(editor_page(&ctx.editor))
        }
    }
}
