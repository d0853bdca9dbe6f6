use crate::models::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// Matched against text with commas removed and single-spaced.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%B %d %Y %I:%M:%S %p",
    "%B %d %Y %I:%M %p",
    "%B %d %Y %H:%M:%S",
    "%B %d %Y %H:%M",
    "%d %B %Y %I:%M:%S %p",
    "%d %B %Y %I:%M %p",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d %Y", "%d %B %Y", "%m/%d/%Y"];

static RE_WEEKDAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+").unwrap());
static RE_ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").unwrap());
static RE_DASHED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})-([A-Za-z]{3,9})-(\d{4})\b").unwrap());
static RE_SLASHED_ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})\b").unwrap());
static RE_MERIDIEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d)\s*(am|pm)\b").unwrap());
static RE_ZONE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s([A-Z]{2,5})$").unwrap());

/// Reads a unix timestamp given either as a JSON number or a numeric string.
pub fn epoch_seconds(value: &Value) -> AppResult<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| AppError::InvalidTimestamp(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::InvalidTimestamp(s.clone())),
        other => Err(AppError::InvalidTimestamp(other.to_string())),
    }
}

/// Interprets `secs` in the local timezone and renders it without an offset,
/// e.g. `2023-11-14T22:13:20`.
pub fn epoch_to_local_iso(secs: i64) -> AppResult<String> {
    let utc = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AppError::InvalidTimestamp(secs.to_string()))?;
    Ok(utc.with_timezone(&Local).naive_local().format(ISO_FORMAT).to_string())
}

pub fn iso_timestamp(value: &Value) -> AppResult<String> {
    epoch_to_local_iso(epoch_seconds(value)?)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrites a date into the shapes `DATETIME_FORMATS` understands: no weekday,
/// no ordinal suffixes, no commas, no trailing zone name.
fn normalize_date(text: &str) -> String {
    let text = RE_WEEKDAY.replace(text, "");
    let text = RE_ORDINAL.replace_all(&text, "$1");
    let text = RE_DASHED_DATE.replace(&text, "$1 $2 $3");
    let text = RE_SLASHED_ISO.replace(&text, "$1-$2-$3");
    let text = RE_MERIDIEM.replace_all(&text, "$1 $2");
    let mut text = collapse_whitespace(&text.replace(',', " "));

    let zone = RE_ZONE_NAME
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .filter(|zone| !matches!(zone.as_str(), "AM" | "PM"))
        .map(|zone| zone.start());
    if let Some(start) = zone {
        text.truncate(start);
        text = text.trim_end().to_string();
    }
    text
}

/// Best-effort parse of a human-written date. Offsets and zone names are dropped;
/// the wall-clock time is kept as written.
pub fn parse_flexible(text: &str) -> AppResult<NaiveDateTime> {
    let collapsed = collapse_whitespace(text);
    if collapsed.is_empty() {
        return Err(AppError::DateParse(text.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&collapsed) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&collapsed) {
        return Ok(dt.naive_local());
    }

    let normalized = normalize_date(&collapsed);
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    // Read as UTC so the written wall-clock time comes back unchanged.
    dateparser::parse_with_timezone(&normalized, &Utc)
        .map(|dt| dt.naive_utc())
        .map_err(|_| AppError::DateParse(text.to_string()))
}
