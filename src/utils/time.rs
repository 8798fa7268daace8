use chrono::{DateTime, Datelike, Months, Utc};

use crate::error::{Error, Result};

/// Parse the reference time of a run, given as RFC 3339.
pub fn parse_reference_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| Error::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

/// "N units ago" for the largest non-zero calendar unit between `then` and `now`.
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if then >= now {
        return "just now".to_string();
    }

    let mut months = (now.year() - then.year()) * 12 + now.month() as i32 - then.month() as i32;
    let add = |m: i32| then.checked_add_months(Months::new(m.max(0) as u32));
    while months > 0 && add(months).map_or(true, |t| t > now) {
        months -= 1;
    }
    let anchor = add(months).unwrap_or(then);
    let rest = now.signed_duration_since(anchor);

    let units = [
        (i64::from(months / 12), "year"),
        (i64::from(months % 12), "month"),
        (rest.num_days(), "day"),
        (rest.num_hours() % 24, "hour"),
        (rest.num_minutes() % 60, "minute"),
        (rest.num_seconds() % 60, "second"),
    ];
    match units.iter().find(|(n, _)| *n > 0) {
        Some((1, unit)) => format!("1 {unit} ago"),
        Some((n, unit)) => format!("{n} {unit}s ago"),
        None => "just now".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn picks_the_largest_unit() {
        let now = at(2024, 6, 1, 12);
        assert_eq!(format_relative(at(2024, 5, 30, 10), now), "2 days ago");
        assert_eq!(format_relative(at(2023, 5, 1, 12), now), "1 year ago");
        assert_eq!(format_relative(at(2024, 3, 1, 12), now), "3 months ago");
        assert_eq!(format_relative(at(2024, 6, 1, 11), now), "1 hour ago");
        assert_eq!(format_relative(now - Duration::seconds(42), now), "42 seconds ago");
    }

    #[test]
    fn months_are_calendar_months() {
        assert_eq!(format_relative(at(2024, 3, 31, 0), at(2024, 5, 30, 0)), "1 month ago");
    }

    #[test]
    fn reference_time_is_normalised_to_utc() {
        let t = parse_reference_time("2024-06-01T14:00:00+02:00").unwrap();
        assert_eq!(t, at(2024, 6, 1, 12));
        assert!(matches!(
            parse_reference_time("yesterday"),
            Err(Error::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn future_or_equal_is_just_now() {
        let now = at(2024, 6, 1, 12);
        assert_eq!(format_relative(now, now), "just now");
        assert_eq!(format_relative(now + Duration::hours(1), now), "just now");
    }
}
