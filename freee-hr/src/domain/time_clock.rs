use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kind of attendance event. Tags the API does not document yet are kept as
/// `Other` so they can still be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClockType {
    ClockIn,
    ClockOut,
    BreakBegin,
    BreakEnd,
    Other(String),
}

impl ClockType {
    pub fn as_str(&self) -> &str {
        match self {
            ClockType::ClockIn => "clock_in",
            ClockType::ClockOut => "clock_out",
            ClockType::BreakBegin => "break_begin",
            ClockType::BreakEnd => "break_end",
            ClockType::Other(tag) => tag,
        }
    }
}

impl Default for ClockType {
    fn default() -> Self {
        ClockType::Other("unknown".to_string())
    }
}

impl From<String> for ClockType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "clock_in" => ClockType::ClockIn,
            "clock_out" => ClockType::ClockOut,
            "break_begin" => ClockType::BreakBegin,
            "break_end" => ClockType::BreakEnd,
            _ => ClockType::Other(value),
        }
    }
}

impl From<ClockType> for String {
    fn from(val: ClockType) -> Self {
        match val {
            ClockType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// Body of `POST /employees/{id}/time_clocks`. The server stamps the time
/// itself; only the day is sent.
#[derive(Debug, Clone, Serialize)]
pub struct TimeClockRequest {
    pub company_id: i64,
    #[serde(rename = "type")]
    pub clock_type: ClockType,
    pub base_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeClockResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub datetime: Option<String>,
}

/// One recorded event from `GET /employees/{id}/time_clocks`.
///
/// Both fields are only displayed, so a record with an odd shape still parses:
/// a missing or non-string `type` becomes `unknown` and a non-string
/// `datetime` keeps its JSON text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeClock {
    #[serde(rename = "type", default, deserialize_with = "lenient_clock_type")]
    pub clock_type: ClockType,
    #[serde(default, deserialize_with = "lenient_text")]
    pub datetime: Option<String>,
}

fn lenient_clock_type<'de, D>(deserializer: D) -> Result<ClockType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(tag)) => ClockType::from(tag),
        _ => ClockType::default(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// The time clock listing comes back either as a bare array or wrapped in
/// `{"items": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TimeClockList {
    Bare(Vec<TimeClock>),
    Wrapped {
        #[serde(default)]
        items: Option<Vec<TimeClock>>,
    },
}

impl TimeClockList {
    pub fn into_items(self) -> Vec<TimeClock> {
        match self {
            TimeClockList::Bare(items) => items,
            TimeClockList::Wrapped { items } => items.unwrap_or_default(),
        }
    }
}
