//! # Value Formatter
//!
//! Renders a selection of resource fields as an aligned, monospace `name : value` block
//! wrapped in a code fence. Each call site picks its fields through a fixed table,
//! so output order never depends on map iteration order.

use chrono::{DateTime, Utc};
use serde_json::Value;

const FENCE: &str = "```";

/// One displayed field: its label and where it lives in the raw resource.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub path: &'static [&'static str],
}

const fn field(label: &'static str, path: &'static [&'static str]) -> FieldSpec {
    FieldSpec { label, path }
}

/// Compact app summary used by `list apps`.
pub const APP_SHORT_INFO: &[FieldSpec] = &[
    field("name", &["name"]),
    field("git_url", &["git_url"]),
    field("web_url", &["web_url"]),
    field("last_release", &["released_at"]),
];

/// Detailed app view used by `info`.
pub const APP_INFO: &[FieldSpec] = &[
    field("name", &["name"]),
    field("owner", &["owner", "email"]),
    field("region", &["region", "name"]),
    field("stack", &["stack", "name"]),
    field("git_url", &["git_url"]),
    field("web_url", &["web_url"]),
    field("repo_size", &["repo_size"]),
    field("slug_size", &["slug_size"]),
    field("last_release", &["released_at"]),
];

/// Stringifies a JSON value for display; strings lose their quotes, null is empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Picks the fields named by `table` out of `resource`, in table order.
pub fn select_fields(resource: &Value, table: &[FieldSpec]) -> Vec<(&'static str, String)> {
    table
        .iter()
        .map(|spec| {
            let value = spec
                .path
                .iter()
                .try_fold(resource, |current, key| current.get(*key))
                .map(display_value)
                .unwrap_or_default();
            (spec.label, value)
        })
        .collect()
}

/// Pads every name to the longest one and fences the block.
pub fn render_block<S: AsRef<str>>(fields: &[(S, String)]) -> String {
    let width = fields
        .iter()
        .map(|(name, _)| name.as_ref().chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<String> = fields
        .iter()
        .map(|(name, value)| format!("{:<width$} : {}", name.as_ref(), value, width = width))
        .collect();

    format!("{FENCE}\n{}\n{FENCE}", lines.join("\n"))
}

pub fn render_resource(resource: &Value, table: &[FieldSpec]) -> String {
    render_block(&select_fields(resource, table))
}

/// Formats a timestamp as `YYYY/MM/DD HH:mm:ss` in UTC.
pub fn utc_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y/%m/%d %H:%M:%S").to_string()
}

/// Humanized distance between `then` and `now`, e.g. `3 hours ago`.
pub fn time_ago(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *then).num_seconds().max(0);
    let minutes = (seconds as f64 / 60.0).round() as i64;
    let hours = (seconds as f64 / 3600.0).round() as i64;
    let days = (seconds as f64 / 86400.0).round() as i64;
    let months = (days as f64 / 30.4).round() as i64;
    let years = (days as f64 / 365.0).round() as i64;

    if seconds < 45 {
        "a few seconds ago".to_string()
    } else if seconds < 90 {
        "a minute ago".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes ago")
    } else if minutes < 90 {
        "an hour ago".to_string()
    } else if hours < 22 {
        format!("{hours} hours ago")
    } else if hours < 36 {
        "a day ago".to_string()
    } else if days < 26 {
        format!("{days} days ago")
    } else if days < 45 {
        "a month ago".to_string()
    } else if days < 320 {
        format!("{} months ago", months.max(2))
    } else if days < 548 {
        "a year ago".to_string()
    } else {
        format!("{} years ago", years.max(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    #[test]
    fn test_block_is_aligned_and_fenced() {
        let fields = vec![("name", "shield".to_string()), ("last_release", "v3".to_string())];
        assert_eq!(
            render_block(&fields),
            "```\nname         : shield\nlast_release : v3\n```"
        );
    }

    #[test]
    fn test_fields_follow_table_order() {
        let app = json!({
            "released_at": "2014-12-12T02:16:59Z",
            "web_url": "https://shield.herokuapp.com/",
            "name": "shield",
            "git_url": "https://git.heroku.com/shield.git",
        });
        let fields = select_fields(&app, APP_SHORT_INFO);
        let labels: Vec<&str> = fields.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["name", "git_url", "web_url", "last_release"]);
        assert_eq!(fields[3].1, "2014-12-12T02:16:59Z");
    }

    #[test]
    fn test_nested_and_missing_fields() {
        let app = json!({
            "name": "shield",
            "owner": { "email": "nick@shield.com" },
            "region": null,
            "repo_size": 1024,
        });
        let rendered = render_resource(&app, APP_INFO);
        assert!(rendered.contains("owner        : nick@shield.com\n"));
        assert!(rendered.contains("region       : \n"));
        assert!(rendered.contains("repo_size    : 1024\n"));
        assert!(rendered.contains("stack        : \n"));
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2015, 1, 2, 12, 0, 0).unwrap();
        let ago = |d: Duration| time_ago(&(now - d), &now);

        assert_eq!(ago(Duration::seconds(10)), "a few seconds ago");
        assert_eq!(ago(Duration::seconds(60)), "a minute ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::minutes(60)), "an hour ago");
        assert_eq!(ago(Duration::hours(3)), "3 hours ago");
        assert_eq!(ago(Duration::hours(24)), "a day ago");
        assert_eq!(ago(Duration::days(4)), "4 days ago");
        assert_eq!(ago(Duration::days(31)), "a month ago");
        assert_eq!(ago(Duration::days(120)), "4 months ago");
        assert_eq!(ago(Duration::days(400)), "a year ago");
        assert_eq!(ago(Duration::days(1100)), "3 years ago");
    }

    #[test]
    fn test_future_timestamps_clamp_to_now() {
        let now = Utc.with_ymd_and_hms(2015, 1, 2, 12, 0, 0).unwrap();
        assert_eq!(time_ago(&(now + Duration::hours(2)), &now), "a few seconds ago");
    }

    #[test]
    fn test_utc_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2015, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(utc_timestamp(&at), "2015/01/01 12:00:00");
    }
}
