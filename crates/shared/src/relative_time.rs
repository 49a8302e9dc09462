use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Human-readable distance between two instants, without direction.
/// Thresholds follow the usual "about an hour", "3 days" wording.
pub fn format_distance(seconds: i64) -> String {
    let s = seconds.abs();
    let minutes = (s + 30) / MINUTE;

    if s < 30 {
        "less than a minute".to_string()
    } else if minutes < 2 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if s < 90 * MINUTE {
        "about 1 hour".to_string()
    } else if s < DAY {
        format!("about {} hours", (s + HOUR / 2) / HOUR)
    } else if s < 42 * HOUR {
        "1 day".to_string()
    } else if s < MONTH {
        format!("{} days", (s + DAY / 2) / DAY)
    } else if s < 45 * DAY {
        "about 1 month".to_string()
    } else if s < YEAR {
        format!("{} months", ((s + MONTH / 2) / MONTH).max(2))
    } else {
        let years = s / YEAR;
        if years == 1 {
            "about 1 year".to_string()
        } else {
            format!("about {years} years")
        }
    }
}

/// Describe `then` relative to `now`: "5 minutes ago" or "in 5 minutes".
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then).num_seconds();
    let distance = format_distance(delta);
    if delta >= 0 {
        format!("{distance} ago")
    } else {
        format!("in {distance}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_just_now() {
        assert_eq!(format_relative(now(), now()), "less than a minute ago");
        assert_eq!(
            format_relative(now() - Duration::seconds(29), now()),
            "less than a minute ago"
        );
    }

    #[test]
    fn test_minutes_ago() {
        assert_eq!(
            format_relative(now() - Duration::seconds(60), now()),
            "1 minute ago"
        );
        assert_eq!(
            format_relative(now() - Duration::minutes(5), now()),
            "5 minutes ago"
        );
    }

    #[test]
    fn test_future_is_prefixed_with_in() {
        assert_eq!(
            format_relative(now() + Duration::minutes(5), now()),
            "in 5 minutes"
        );
    }

    #[test]
    fn test_hours() {
        assert_eq!(
            format_relative(now() - Duration::minutes(60), now()),
            "about 1 hour ago"
        );
        assert_eq!(
            format_relative(now() - Duration::hours(3), now()),
            "about 3 hours ago"
        );
    }

    #[test]
    fn test_hour_bucket_boundary() {
        assert_eq!(format_distance(5370), "about 1 hour");
        assert_eq!(format_distance(5399), "about 1 hour");
        assert_eq!(format_distance(5400), "about 2 hours");
        for s in 2670..DAY {
            assert_ne!(format_distance(s), "about 1 hours", "at {s}s");
        }
    }

    #[test]
    fn test_days_months_years() {
        assert_eq!(format_distance(DAY), "1 day");
        assert_eq!(format_distance(3 * DAY), "3 days");
        assert_eq!(format_distance(35 * DAY), "about 1 month");
        assert_eq!(format_distance(100 * DAY), "3 months");
        assert_eq!(format_distance(400 * DAY), "about 1 year");
        assert_eq!(format_distance(3 * YEAR), "about 3 years");
    }
}
