use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;

// {
//   "data": "<JSON-encoded payload>"          <- get_clothes
//   "data": { "requests": "<JSON-encoded>" }  <- get_requests
// }
//
// Error responses carry { "message": "..." } instead.

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct RequestsPayload {
    pub requests: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageEnvelope {
    #[serde(default)]
    pub message: String,
}

/// The API embeds its payloads as JSON strings; accept inline JSON as well.
pub fn decode_embedded<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    match payload {
        Value::String(encoded) => serde_json::from_str(&encoded),
        other => serde_json::from_value(other),
    }
}

/// One listing exactly as the marketplace returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawListing {
    #[serde(deserialize_with = "text")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub brand_title: String,
    #[serde(default, deserialize_with = "text")]
    pub size_title: String,
    #[serde(default, deserialize_with = "text")]
    pub status: String,

    #[serde(default, deserialize_with = "text")]
    pub total_item_price: String,
    #[serde(default, deserialize_with = "text")]
    pub price_no_fee: String,
    #[serde(default, deserialize_with = "text")]
    pub service_fee: String,
    #[serde(default, deserialize_with = "text")]
    pub currency: String,

    #[serde(default, deserialize_with = "count")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub favourite_count: u64,

    /// ISO-8601 with offset, or the literal "NA" when the item has no photo.
    #[serde(default, deserialize_with = "text")]
    pub created_at_ts: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub url: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_photo_suspicious: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchState {
    #[default]
    Active,
    Inactive,
}

impl SearchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchState::Active => "active",
            SearchState::Inactive => "inactive",
        }
    }
}

impl FromStr for SearchState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(SearchState::Active),
            "inactive" => Ok(SearchState::Inactive),
            other => Err(format!("unknown search state '{other}'")),
        }
    }
}

/// A saved, named query against the listings endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDefinition {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub creation_date: String,
    #[serde(default, deserialize_with = "opt_number")]
    pub per_page: Option<u32>,
    #[serde(default, deserialize_with = "text")]
    pub search_text: String,
    /// Absent and "" both mean "no brand filter"; sent back as "".
    #[serde(
        default,
        deserialize_with = "opt_text",
        serialize_with = "empty_if_none"
    )]
    pub brand_ids: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub price_from: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub price_to: Option<f64>,
    /// Comma-joined condition codes, e.g. "6,3".
    #[serde(default, deserialize_with = "text")]
    pub status_ids: String,
    #[serde(default)]
    pub state: SearchState,
}

impl SearchDefinition {
    pub fn is_active(&self) -> bool {
        self.state == SearchState::Active
    }
}

/// Body of `update_requests`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditDiff {
    pub deleted: Vec<String>,
    pub added: Vec<SearchDefinition>,
    pub updated: Vec<SearchDefinition>,
}

impl EditDiff {
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.added.is_empty() && self.updated.is_empty()
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(d)?))
}

fn opt_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = value_to_text(Value::deserialize(d)?);
    Ok(if s.trim().is_empty() { None } else { Some(s) })
}

fn opt_number<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse().map(Some).map_err(de::Error::custom),
        Value::Number(n) => n.to_string().parse().map(Some).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// Missing counters are zero; numeric strings are accepted.
fn count<'de, D>(d: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_number(d).map(Option::unwrap_or_default)
}

fn flag<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "0" => Ok(false),
            "true" | "1" => Ok(true),
            other => Err(de::Error::custom(format!("expected a boolean, got '{other}'"))),
        },
        other => Err(de::Error::custom(format!("expected a boolean, got {other}"))),
    }
}

fn empty_if_none<S>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(value.as_deref().unwrap_or(""))
}
