use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{AccountNumber, ScheduleResponse};
use crate::error::FetchError;

pub const DEFAULT_ENDPOINT: &str = "https://svitlo.oe.if.ua/GAVTurnOff/GavGroupByAccountNumber";

const SITE_ORIGIN: &str = "https://svitlo.oe.if.ua";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
/// Error pages are cut to this many characters before they reach the log.
const ERROR_BODY_LIMIT: usize = 200;

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the utility's outage-schedule endpoint.
///
/// The endpoint only answers requests that look like they come from the
/// site's own page, hence the browser headers.
#[derive(Debug, Clone)]
pub struct OutageClient {
    client: Client,
    endpoint: String,
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.9"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
    headers.insert(header::REFERER, HeaderValue::from_static("https://svitlo.oe.if.ua/"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("same-origin"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("cors"));
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("empty"));
    headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
    headers
}

fn form_body(account: &AccountNumber) -> String {
    format!("accountNumber={}&userSearchChoice=pob&address=", account)
}

/// Turns a raw HTTP answer into a parsed response or the matching error.
pub fn decode_response(
    account: &AccountNumber,
    status: StatusCode,
    body: &str,
) -> Result<ScheduleResponse, FetchError> {
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::AccountNotFound(account.clone()));
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            body: truncate_body(body),
        });
    }

    let raw: serde_json::Value = serde_json::from_str(body)?;
    if let Ok(pretty) = serde_json::to_string_pretty(&raw) {
        debug!("Outage API response:\n{}", pretty);
    }
    Ok(serde_json::from_value(raw)?)
}

impl OutageClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(browser_headers())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_schedule(
        &self,
        account: &AccountNumber,
    ) -> Result<ScheduleResponse, FetchError> {
        info!(account = %account, endpoint = %self.endpoint, "Fetching outage schedule");

        let res = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form_body(account))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            warn!(account = %account, status = %status, "Outage API returned error");
        }

        decode_response(account, status, &body)
    }
}
