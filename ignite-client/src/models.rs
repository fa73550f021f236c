//! Session data model and lenient wire decoding
//!
//! The search API's JSON is PascalCase and loosely specified; fields come and
//! go between deployments and occasionally change type. Every record here
//! therefore decodes fail-soft: a missing or mistyped field becomes its
//! documented default (`""` for strings, `0` for ids, empty list, epoch for
//! the start time) instead of an error. Only a payload that is not a JSON
//! object at all is a decode error, surfaced by [`decode_response`].

use chrono::format::{Item, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, Utc};
use ignite_common::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Wire format for `StartDatetime` / `EndDatetime` (no zone, no fraction)
const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static WIRE_DATETIME_ITEMS: OnceLock<Vec<Item<'static>>> = OnceLock::new();

/// Pre-parsed format items, compiled once on first use.
fn wire_datetime_items() -> &'static [Item<'static>] {
    WIRE_DATETIME_ITEMS.get_or_init(|| StrftimeItems::new(WIRE_DATETIME_FORMAT).collect())
}

/// Parse a wire datetime string, `None` on any mismatch.
pub fn parse_wire_datetime(s: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, s, wire_datetime_items().iter()).ok()?;
    parsed.to_naive_datetime_with_offset(0).ok()
}

/// Default for a missing or unparseable start time
pub fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

fn now_naive() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Deserialize a field fail-soft: any type mismatch becomes the default.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn de_start_datetime<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(parse_wire_datetime)
        .unwrap_or_else(epoch))
}

fn de_end_datetime<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(parse_wire_datetime)
        .unwrap_or_else(now_naive))
}

/// Session presenter
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Speaker {
    #[serde(rename = "Id", deserialize_with = "lenient")]
    pub id: String,
    #[serde(rename = "Name", deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "PhotoPath", deserialize_with = "lenient")]
    pub photo_path: String,
    // wire name really is "Twitterusername"
    #[serde(rename = "Twitterusername", deserialize_with = "lenient")]
    pub twitter_username: String,
    #[serde(rename = "Bio", deserialize_with = "lenient")]
    pub bio: String,
}

/// When and where a session runs
///
/// `start_date_time` is always a valid, comparable instant (epoch when the
/// wire value is absent or unparseable), which gives grouping and sorting a
/// total order. `end_date_time` is unused downstream and defaults to "now".
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Schedule {
    #[serde(rename = "StartDatetime", deserialize_with = "de_start_datetime")]
    pub start_date_time: NaiveDateTime,
    #[serde(rename = "EndDatetime", deserialize_with = "de_end_datetime")]
    pub end_date_time: NaiveDateTime,
    #[serde(rename = "Venue", deserialize_with = "lenient")]
    pub venue: String,
    #[serde(rename = "EventSessionRegistrationId", deserialize_with = "lenient")]
    pub event_session_registration_id: i64,
    #[serde(rename = "Status", deserialize_with = "lenient")]
    pub status: String,
    #[serde(rename = "FormattedVenueString", deserialize_with = "lenient")]
    pub formatted_venue_string: String,
    #[serde(rename = "FormattedStartDate", deserialize_with = "lenient")]
    pub formatted_start_date: String,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            start_date_time: epoch(),
            end_date_time: now_naive(),
            venue: String::new(),
            event_session_registration_id: 0,
            status: String::new(),
            formatted_venue_string: String::new(),
            formatted_start_date: String::new(),
        }
    }
}

/// Classification metadata shown on the detail screen
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionDetails {
    #[serde(rename = "Audience", deserialize_with = "lenient")]
    pub audience: String,
    #[serde(rename = "Topic", deserialize_with = "lenient")]
    pub topic: String,
    #[serde(rename = "Theme", deserialize_with = "lenient")]
    pub theme: String,
    #[serde(rename = "Product", deserialize_with = "lenient")]
    pub product: String,
    #[serde(rename = "Level", deserialize_with = "lenient")]
    pub level: String,
}

/// One conference session
///
/// Identity is `session_id`, but uniqueness is not enforced here; the API can
/// repeat a session across pages and aggregation tolerates that.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Session {
    #[serde(rename = "EventSessionId", deserialize_with = "lenient")]
    pub event_session_id: i64,
    #[serde(rename = "EventSessionRegistrationId", deserialize_with = "lenient")]
    pub event_session_registration_id: i64,
    #[serde(rename = "SessionId", deserialize_with = "lenient")]
    pub session_id: i64,
    #[serde(rename = "Name", deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "Speakers", deserialize_with = "lenient")]
    pub speakers: Vec<Speaker>,
    #[serde(rename = "Schedule", deserialize_with = "lenient")]
    pub schedule: Schedule,
    #[serde(rename = "Description", deserialize_with = "lenient")]
    pub description: String,
    #[serde(rename = "Details", deserialize_with = "lenient")]
    pub details: SessionDetails,
    #[serde(rename = "IsCommonSession", deserialize_with = "lenient")]
    pub is_common_session: bool,
}

/// One page of search results, as returned by a single API call
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PagedSessionsResponse {
    #[serde(rename = "PageNumber", deserialize_with = "lenient")]
    pub page_number: i64,
    #[serde(rename = "PagesCount", deserialize_with = "lenient")]
    pub pages_count: i64,
    #[serde(rename = "RegistrationId", deserialize_with = "lenient")]
    pub registration_id: i64,
    #[serde(rename = "Sessions", deserialize_with = "lenient")]
    pub sessions: Vec<Session>,
}

/// Decode a raw response body into a page of sessions.
///
/// Individual fields are lenient (see module docs); only a body that is not
/// a JSON object at all fails, as [`Error::Decode`].
pub fn decode_response(bytes: &[u8]) -> Result<PagedSessionsResponse> {
    serde_json::from_slice(bytes).map_err(|e| Error::Decode(e.to_string()))
}
