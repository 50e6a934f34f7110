// client.rs
use crate::api::models::{
    decode_embedded, DataEnvelope, EditDiff, MessageEnvelope, RequestsPayload, SearchDefinition,
};
use crate::api::ApiError;
use crate::config::{GET_CLOTHES_ROUTE, GET_REQUESTS_ROUTE, UPDATE_REQUESTS_ROUTE};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

const USER_AGENT: &str = concat!("sales-dashboard/", env!("CARGO_PKG_VERSION"));

/// The remote operations service the dashboard talks to.
///
/// Every call is blocking; a handler issues them one after another.
pub trait OperationsApi: Send + Sync {
    /// One page of raw listing records for a search definition.
    fn get_clothes(&self, search: &SearchDefinition) -> Result<Vec<Value>, ApiError>;

    /// Every saved search definition, whatever its state.
    fn get_requests(&self) -> Result<Vec<SearchDefinition>, ApiError>;

    fn update_requests(&self, diff: &EditDiff) -> Result<(), ApiError>;
}

pub struct HttpOperationsApi {
    client: Client,
    base_url: String,
}

impl HttpOperationsApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), route)
    }

    /// Reads the body and turns anything but a 200 into `ApiError::Status`.
    fn read_ok(resp: Response) -> Result<String, ApiError> {
        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        if status.as_u16() != 200 {
            let message = serde_json::from_str::<MessageEnvelope>(&text)
                .ok()
                .map(|m| m.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(text);

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }
}

impl OperationsApi for HttpOperationsApi {
    fn get_clothes(&self, search: &SearchDefinition) -> Result<Vec<Value>, ApiError> {
        debug!(search = %search.name, "requesting clothes");

        let resp = self
            .client
            .get(self.url(GET_CLOTHES_ROUTE))
            .json(search)
            .send()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        let text = Self::read_ok(resp)?;
        let envelope: DataEnvelope<Value> =
            serde_json::from_str(&text).map_err(|e| ApiError::Payload(e.to_string()))?;

        decode_embedded(envelope.data).map_err(|e| ApiError::Payload(e.to_string()))
    }

    fn get_requests(&self) -> Result<Vec<SearchDefinition>, ApiError> {
        info!("Getting requests");

        let resp = self
            .client
            .get(self.url(GET_REQUESTS_ROUTE))
            .send()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        let text = Self::read_ok(resp)?;
        let envelope: DataEnvelope<RequestsPayload> =
            serde_json::from_str(&text).map_err(|e| ApiError::Payload(e.to_string()))?;

        let requests: Vec<SearchDefinition> = decode_embedded(envelope.data.requests)
            .map_err(|e| ApiError::Payload(e.to_string()))?;

        info!(count = requests.len(), "Successfully retrieved requests");
        Ok(requests)
    }

    fn update_requests(&self, diff: &EditDiff) -> Result<(), ApiError> {
        info!(
            deleted = diff.deleted.len(),
            updated = diff.updated.len(),
            added = diff.added.len(),
            "Updating requests"
        );

        let resp = self
            .client
            .post(self.url(UPDATE_REQUESTS_ROUTE))
            .json(diff)
            .send()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        if let Err(e) = Self::read_ok(resp) {
            error!("update_requests rejected: {e}");
            return Err(e);
        }

        Ok(())
    }
}
