use crate::api::OperationsApi;
use crate::domain::requests::{get_requests, requests_error_message, Workflow};
use crate::domain::search::get_clothes;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::form_value;
use crate::responses::{html_response, see_other};
use crate::router::AppState;
use crate::sessions::{OpenedSession, SearchOutcome, SearchSession};
use crate::templates::pages::search_page;
use tracing::info;

pub fn show(state: &AppState, session: &OpenedSession) -> ResultResp {
    let mut ctx = session.lock()?;
    load_definitions(state.api.as_ref(), &mut ctx.search);

    html_response(search_page(&ctx.search))
}

/// Runs the selected searches and keeps the outcome for the next render.
/// Names are resolved against the definitions as saved right now.
pub fn run(state: &AppState, session: &OpenedSession, form: Vec<(String, String)>) -> ResultResp {
    let selected: Vec<String> = form
        .into_iter()
        .filter(|(k, _)| k == "search")
        .map(|(_, v)| v)
        .collect();

    let mut ctx = session.lock()?;
    let search = &mut ctx.search;
    search.selected = selected;
    load_definitions(state.api.as_ref(), search);

    let outcome = match &search.definitions {
        None => SearchOutcome::Message(search.load_error.clone().unwrap_or_default()),
        Some(definitions) => {
            match get_clothes(
                state.api.as_ref(),
                definitions,
                &search.selected,
                state.timezone,
            ) {
                Ok(results) => SearchOutcome::Results(results),
                Err(failure) => SearchOutcome::Message(failure.user_message()),
            }
        }
    };
    search.outcome = Some(outcome);

    see_other("/")
}

/// Placeholder: only records that AutoBuy was requested for the listing.
pub fn autobuy(session: &OpenedSession, form: Vec<(String, String)>) -> ResultResp {
    let id = form_value(&form, "id")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ServerError::BadRequest("missing listing id".into()))?;

    session.lock()?.search.set_autobuy(&id);
    info!(listing = %id, "AutoBuy requested");

    see_other("/")
}

/// Replaces the session's definitions with the active ones currently saved.
fn load_definitions(api: &dyn OperationsApi, search: &mut SearchSession) {
    match get_requests(api, Workflow::Search) {
        Ok(definitions) => {
            search.definitions = Some(definitions);
            search.load_error = None;
        }
        Err(e) => {
            search.definitions = None;
            search.load_error = Some(requests_error_message(&e));
        }
    }
}
