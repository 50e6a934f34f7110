use crate::api::models::SearchState;
use crate::api::{ApiError, EditDiff, OperationsApi, SearchDefinition};
use crate::domain::table::{cell_field, columns, Cell, RowSlot, Snapshot};
use crate::router::AppState;
use crate::sessions::SessionStore;
use astra::{Body, Request, Response};
use http::Method;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};

/// Scripted operations API recording what the dashboard asked for.
pub struct FakeApi {
    pub requests: Result<Vec<SearchDefinition>, ApiError>,
    pub clothes: HashMap<String, Vec<Value>>,
    pub clothes_error: Option<ApiError>,
    pub update_result: Result<(), ApiError>,
    /// Definitions saved by someone else after the test started.
    pub saved_elsewhere: Mutex<Option<Vec<SearchDefinition>>>,

    pub clothes_calls: Mutex<Vec<String>>,
    pub requests_calls: Mutex<usize>,
    pub updates: Mutex<Vec<EditDiff>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            requests: Ok(Vec::new()),
            clothes: HashMap::new(),
            clothes_error: None,
            update_result: Ok(()),
            saved_elsewhere: Mutex::new(None),
            clothes_calls: Mutex::new(Vec::new()),
            requests_calls: Mutex::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }
}

impl OperationsApi for FakeApi {
    fn get_clothes(&self, search: &SearchDefinition) -> Result<Vec<Value>, ApiError> {
        self.clothes_calls.lock().unwrap().push(search.name.clone());
        if let Some(err) = &self.clothes_error {
            return Err(err.clone());
        }
        Ok(self.clothes.get(&search.name).cloned().unwrap_or_default())
    }

    fn get_requests(&self) -> Result<Vec<SearchDefinition>, ApiError> {
        *self.requests_calls.lock().unwrap() += 1;
        match &*self.saved_elsewhere.lock().unwrap() {
            Some(definitions) => Ok(definitions.clone()),
            None => self.requests.clone(),
        }
    }

    fn update_requests(&self, diff: &EditDiff) -> Result<(), ApiError> {
        self.updates.lock().unwrap().push(diff.clone());
        self.update_result.clone()
    }
}

impl FakeApi {
    pub fn save_elsewhere(&self, definitions: Vec<SearchDefinition>) {
        *self.saved_elsewhere.lock().unwrap() = Some(definitions);
    }
}

pub fn app(api: &Arc<FakeApi>) -> AppState {
    AppState {
        api: api.clone(),
        sessions: SessionStore::new(),
        timezone: chrono_tz::Europe::Brussels,
    }
}

pub fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "No requests found".into(),
    }
}

pub fn definition(id: &str, name: &str, state: SearchState) -> SearchDefinition {
    SearchDefinition {
        id: Some(id.to_string()),
        name: name.to_string(),
        creation_date: "2024-01-29".to_string(),
        per_page: Some(20),
        search_text: "veste".to_string(),
        brand_ids: Some("53".to_string()),
        price_from: None,
        price_to: Some(50.0),
        status_ids: "6,3".to_string(),
        state,
    }
}

pub fn item(id: u64, hour: u32) -> Value {
    json!({
        "id": id,
        "title": format!("Item {id}"),
        "brand_title": "Nike",
        "size_title": "M",
        "status": "Bon état",
        "total_item_price": "10.7",
        "price_no_fee": "10.0",
        "service_fee": "0.7",
        "currency": "EUR",
        "view_count": 1,
        "favourite_count": 0,
        "created_at_ts": format!("2024-01-23T{hour:02}:00:00+0100"),
        "photo_url": format!("https://images.example/{id}.jpg"),
        "url": format!("https://www.vinted.fr/items/{id}"),
        "is_photo_suspicious": false
    })
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request {
    let mut builder = http::Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, cookie: Option<&str>, pairs: &[(String, String)]) -> Request {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    let mut builder = http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::from(body.into_bytes())).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

/// `session=...` pair from a response that opened a session.
pub fn cookie_of(resp: &Response) -> String {
    let header = resp
        .headers()
        .get("Set-Cookie")
        .expect("no session cookie set")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

pub fn location_of(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// The editor form exactly as the browser submits it when nothing changed.
pub fn untouched_form(definitions: &[SearchDefinition]) -> Vec<(String, String)> {
    let snapshot = Snapshot::from_definitions(definitions);
    let mut pairs = Vec::new();

    for (pos, row) in snapshot.rows.iter().enumerate() {
        for (col, column) in columns().iter().enumerate() {
            let key = cell_field(RowSlot::Existing(pos), col);
            match &row[column.header] {
                Cell::Flag(true) => pairs.push((key, "on".to_string())),
                Cell::Flag(false) => {}
                Cell::Text(text) => pairs.push((key, text.clone())),
            }
        }
    }

    pairs
}

/// Index of the editor column with this header.
pub fn col(header: &str) -> usize {
    columns()
        .iter()
        .position(|c| c.header == header)
        .unwrap_or_else(|| panic!("no column {header}"))
}
