use crate::api::OperationsApi;
use crate::errors::{ResultResp, ServerError};
use crate::handlers;
use crate::sessions::{session_cookie, token_from_cookie, SessionStore};
use astra::Request;
use chrono_tz::Tz;
use std::io::Read;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Shared by every worker; per-user state lives in `sessions`.
pub struct AppState {
    pub api: Arc<dyn OperationsApi>,
    pub sessions: SessionStore,
    pub timezone: Tz,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let token = req
        .headers()
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie)
        .map(str::to_owned);

    let now = now_unix();
    let session = state.sessions.open(token.as_deref(), now)?;

    let mut resp = match (method.as_str(), path.as_str()) {
        ("GET", "/") => handlers::search::show(state, &session),
        ("POST", "/search") => handlers::search::run(state, &session, parse_form(req)?),
        ("POST", "/autobuy") => handlers::search::autobuy(&session, parse_form(req)?),

        ("GET", "/requests") => handlers::editor::show(state, &session),
        ("POST", "/requests") => handlers::editor::save(state, &session, parse_form(req)?),

        _ => Err(ServerError::NotFound),
    }?;

    if session.is_new {
        // only sessions whose cookie actually reaches the browser are stored
        state.sessions.keep(&session, now)?;
        let cookie = session_cookie(&session.token)
            .parse()
            .map_err(|_| ServerError::InternalError)?;
        resp.headers_mut().insert("Set-Cookie", cookie);
    }

    Ok(resp)
}

/// Decodes an `application/x-www-form-urlencoded` body.
fn parse_form(req: Request) -> Result<Vec<(String, String)>, ServerError> {
    let mut body = String::new();
    req.into_body()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form: {e}")))?;

    Ok(url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect())
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
