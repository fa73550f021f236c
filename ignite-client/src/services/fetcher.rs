//! HTTP fetcher for the session search endpoint
//!
//! Issues the single-page POST and hands back raw body bytes; decoding is the
//! orchestrator's job. The request body is the fixed filter shape the search
//! API expects, with only the day and page number varying.

use ignite_common::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;

/// Search endpoint (anonymous, POST only)
pub const SESSIONS_SEARCH_URL: &str =
    "https://msignite.nz/webapi/searchApi/GetAllConfirmedFilteredSessions";

const USER_AGENT: &str = "ignite-schedule/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fixed request body for one page of unfiltered search results
///
/// All filter arrays stay empty; `Dates` carries the single day id. The
/// `EncyrptedMemberId` misspelling is the server's field name, not ours.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchRequest {
    topics: Vec<String>,
    themes: Vec<String>,
    audiences: Vec<String>,
    products: Vec<String>,
    levels: Vec<String>,
    speakers: Vec<String>,
    dates: Vec<i64>,
    search_term: String,
    page_number: i64,
    encyrpted_member_id: String,
    registration_id: String,
}

impl SearchRequest {
    /// Body for one page of one day's sessions. Pages are 1-based.
    pub fn for_page(day_id: i64, page_number: i64) -> Self {
        Self {
            topics: Vec::new(),
            themes: Vec::new(),
            audiences: Vec::new(),
            products: Vec::new(),
            levels: Vec::new(),
            speakers: Vec::new(),
            dates: vec![day_id],
            search_term: String::new(),
            page_number,
            // the server wants this as a string
            registration_id: "0".to_string(),
            encyrpted_member_id: String::new(),
        }
    }
}

/// Seam between the orchestrator and the transport, so tests can substitute
/// a canned fetcher for the live HTTP client.
#[allow(async_fn_in_trait)]
pub trait FetchPage {
    /// Fetch one page of one day's sessions as raw response bytes.
    async fn fetch_page(&self, day_id: i64, page_number: i64) -> Result<Vec<u8>>;
}

/// Live HTTP fetcher against the search API
pub struct SearchApiClient {
    http_client: reqwest::Client,
}

impl SearchApiClient {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self { http_client })
    }
}

impl FetchPage for SearchApiClient {
    async fn fetch_page(&self, day_id: i64, page_number: i64) -> Result<Vec<u8>> {
        tracing::debug!(day_id, page_number, "requesting sessions page");

        let response = self
            .http_client
            .post(SESSIONS_SEARCH_URL)
            .json(&SearchRequest::for_page(day_id, page_number))
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        // the API signals every failure mode as a non-200; only exactly 200
        // carries a session payload
        if status.as_u16() != 200 {
            tracing::warn!(day_id, page_number, status = status.as_u16(), "response was not 200");
            return Err(Error::Api(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        tracing::debug!(day_id, page_number, len = bytes.len(), "fetched sessions page");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_creation_succeeds() {
        assert!(SearchApiClient::new().is_ok());
    }

    #[test]
    fn request_body_matches_wire_contract() {
        let body = serde_json::to_value(SearchRequest::for_page(3, 6)).unwrap();

        assert_eq!(
            body,
            json!({
                "Topics": [],
                "Themes": [],
                "Audiences": [],
                "Products": [],
                "Levels": [],
                "Speakers": [],
                "Dates": [3],
                "SearchTerm": "",
                "PageNumber": 6,
                "EncyrptedMemberId": "",
                "RegistrationId": "0"
            })
        );
    }

    #[test]
    fn request_body_keeps_server_side_misspelling() {
        let body = serde_json::to_value(SearchRequest::for_page(1, 1)).unwrap();
        assert!(body.get("EncyrptedMemberId").is_some());
        assert!(body.get("EncryptedMemberId").is_none());
    }
}
