use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Day shown by `status`: an explicit date wins over `--yesterday`.
pub fn target_date(today: NaiveDate, date: Option<NaiveDate>, yesterday: bool) -> NaiveDate {
    match date {
        Some(date) => date,
        None if yesterday => today.checked_sub_days(Days::new(1)).unwrap_or(today),
        None => today,
    }
}

/// ISO 8601 shapes seen besides strict RFC 3339: `T` or space separator,
/// seconds optional, offsets written `+0900` or `+09:00`.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Render a provider timestamp as `HH:MM:SS` in the offset it was given in.
/// Anything unparseable is returned unchanged.
pub fn format_clock_time(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%H:%M:%S").to_string();
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return dt.format("%H:%M:%S").to_string();
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return dt.format("%H:%M:%S").to_string();
    }

    tracing::warn!(timestamp = raw, "could not parse timestamp, showing it as is");
    raw.to_string()
}
