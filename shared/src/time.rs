//! Humanized timestamps for cards and profile rows.

use chrono::{DateTime, Utc};

/// Humanized distance between an RFC 3339 timestamp and now.
///
/// Missing timestamps read as "just now", unparsable ones as
/// "recently", matching what the cards display for fresh or malformed
/// data.
pub fn time_ago(timestamp: Option<&str>) -> String {
    time_ago_at(timestamp, Utc::now())
}

/// Same as [`time_ago`] with an injected clock.
pub fn time_ago_at(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = timestamp else {
        return "just now".to_string();
    };

    let Ok(parsed) = DateTime::parse_from_rfc3339(raw) else {
        return "recently".to_string();
    };

    let elapsed = now.signed_duration_since(parsed.with_timezone(&Utc));
    let secs = elapsed.num_seconds();

    if secs < 60 {
        return "just now".to_string();
    }

    let (value, unit) = if secs < 3600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3600, "hour")
    } else if secs < 2_592_000 {
        (secs / 86_400, "day")
    } else if secs < 31_536_000 {
        (secs / 2_592_000, "month")
    } else {
        (secs / 31_536_000, "year")
    };

    if value == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{value} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn missing_and_malformed_timestamps() {
        assert_eq!(time_ago_at(None, now()), "just now");
        assert_eq!(time_ago_at(Some("not a date"), now()), "recently");
    }

    #[test]
    fn distance_buckets() {
        assert_eq!(time_ago_at(Some("2024-06-01T11:59:30Z"), now()), "just now");
        assert_eq!(
            time_ago_at(Some("2024-06-01T11:55:00Z"), now()),
            "5 minutes ago"
        );
        assert_eq!(time_ago_at(Some("2024-06-01T11:00:00Z"), now()), "1 hour ago");
        assert_eq!(time_ago_at(Some("2024-05-29T12:00:00Z"), now()), "3 days ago");
        assert_eq!(time_ago_at(Some("2024-03-01T12:00:00Z"), now()), "3 months ago");
        assert_eq!(time_ago_at(Some("2022-05-01T12:00:00Z"), now()), "2 years ago");
    }

    #[test]
    fn offset_timestamps_are_normalized() {
        assert_eq!(
            time_ago_at(Some("2024-06-01T13:55:00+02:00"), now()),
            "5 minutes ago"
        );
    }
}
