//! Socrata HTTP client for the CDI resource.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::query::SocrataQuery;
use crate::source::{CdiRecord, CdiSource};

/// U.S. Chronic Disease Indicators resource.
pub const CDI_RESOURCE_URL: &str = "https://data.cdc.gov/resource/hksd-2xuw.json";

/// Environment variable holding an optional Socrata app token.
pub const APP_TOKEN_ENV: &str = "SOCRATA_APP_TOKEN";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking client for the CDI resource. One request per query; no paging.
pub struct CdiClient {
    client: Client,
    base_url: String,
    app_token: Option<String>,
}

impl CdiClient {
    /// Create a client, optionally authenticated with an app token.
    pub fn new(app_token: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: CDI_RESOURCE_URL.to_string(),
            app_token,
        })
    }

    /// Create a client using the token from `SOCRATA_APP_TOKEN`, if set.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(APP_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());
        Self::new(token)
    }

    /// Point the client at another resource URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, query: &SocrataQuery) -> Result<Url> {
        Url::parse_with_params(&self.base_url, query.params())
            .map_err(|e| ExtractError::UnexpectedResponse(format!("invalid URL: {e}")))
    }
}

impl CdiSource for CdiClient {
    fn fetch(&self, query: &SocrataQuery) -> Result<Vec<CdiRecord>> {
        let url = self.url(query)?;
        debug!(url = %url, "fetching CDI rows");

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(token) = &self.app_token {
            request = request.header("X-App-Token", token);
        }
        let response = request.send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExtractError::Api { status, message });
        }

        let body: Value = response.json()?;
        records_from_json(body)
    }
}

/// Splits a JSON array of objects into records.
pub fn records_from_json(body: Value) -> Result<Vec<CdiRecord>> {
    let Value::Array(items) = body else {
        return Err(ExtractError::UnexpectedResponse(
            "expected a JSON array".to_string(),
        ));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            other => Err(ExtractError::UnexpectedResponse(format!(
                "expected an object, found {other}"
            ))),
        })
        .collect()
}
