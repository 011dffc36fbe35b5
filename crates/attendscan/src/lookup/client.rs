//! Reqwest-backed lookup client.
//!
//! The client owns transport details only: building the query URL, sending
//! one GET, and turning the body into a [`LookupResult`]. It keeps no state
//! between lookups and leaves logging to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{ItemDto, LookupResponseDto};
use super::RecordSource;
use crate::config::Config;
use crate::error::Result;
use crate::record::{LookupResult, ScanCode};

/// Looks up attendee records against one fixed endpoint.
#[derive(Debug, Clone)]
pub struct LookupClient {
    client: Client,
    endpoint: Url,
    action: String,
    code_param: String,
}

impl LookupClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        action: impl Into<String>,
        code_param: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            action: action.into(),
            code_param: code_param.into(),
        })
    }

    /// Build a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the reqwest client
    /// cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.endpoint_url()?,
            config.endpoint.action.as_str(),
            config.endpoint.code_param.as_str(),
            config.timeout(),
        )
    }

    /// The endpoint this client targets.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The full request URL for `code`.
    ///
    /// Query pairs already on the endpoint are kept; `action` and the code
    /// parameter are appended in that order.
    #[must_use]
    pub fn request_url(&self, code: &ScanCode) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", &self.action)
            .append_pair(&self.code_param, code.as_str());
        url
    }
}

#[async_trait]
impl RecordSource for LookupClient {
    async fn lookup(&self, code: &ScanCode) -> LookupResult {
        let response = match self.client.get(self.request_url(code)).send().await {
            Ok(response) => response,
            Err(error) => return map_transport_error(&error),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(error) => return map_transport_error(&error),
        };

        with_status_context(status, parse_response(&body))
    }
}

/// Map a lookup response body to a [`LookupResult`].
///
/// Only the first element of `items` is inspected. An empty `items` array is
/// [`LookupResult::NotFound`]; anything malformed is
/// [`LookupResult::ParseError`].
#[must_use]
pub fn parse_response(body: &[u8]) -> LookupResult {
    let decoded: LookupResponseDto = match serde_json::from_slice(body) {
        Ok(decoded) => decoded,
        Err(error) => {
            return LookupResult::parse_error(format!("invalid lookup JSON payload: {error}"))
        }
    };

    let Some(items) = decoded.items else {
        return LookupResult::parse_error("lookup payload has no `items` key");
    };

    // Codes are assumed unique per attendee; extra matches are not inspected.
    let Some(first) = items.into_iter().next() else {
        return LookupResult::NotFound;
    };

    match ItemDto::from_value(first).and_then(ItemDto::into_record) {
        Ok(record) => LookupResult::Found(record),
        Err(message) => LookupResult::parse_error(message),
    }
}

fn with_status_context(status: StatusCode, result: LookupResult) -> LookupResult {
    match result {
        LookupResult::ParseError { message } if !status.is_success() => {
            LookupResult::parse_error(format!("status {}: {message}", status.as_u16()))
        }
        other => other,
    }
}

fn map_transport_error(error: &reqwest::Error) -> LookupResult {
    if error.is_timeout() {
        LookupResult::transport_error(format!("request timed out: {error}"))
    } else if error.is_connect() {
        LookupResult::transport_error(format!("connection failed: {error}"))
    } else {
        LookupResult::transport_error(error.to_string())
    }
}
