//! Calendar-day keys for habit logs.
//!
//! Two date conventions live side by side: display and comparison use the
//! day key of the machine's local timezone, while stored log dates are
//! anchored at UTC midnight of the named day. An instant late in the local
//! evening can therefore fall on a different UTC date than its local key,
//! which is why day comparisons always go through keys rather than raw
//! timestamps.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Day key ("YYYY-MM-DD") of the instant's calendar day in the machine's
/// local timezone
pub fn day_key(instant: DateTime<Utc>) -> String {
    day_key_in(instant, &Local)
}

/// Day key of the instant's calendar day in an explicit timezone
pub fn day_key_in<Tz: TimeZone>(instant: DateTime<Utc>, zone: &Tz) -> String {
    date_to_key(instant.with_timezone(zone).date_naive())
}

/// Whether two instants fall on the same local calendar day
pub fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    day_key(a) == day_key(b)
}

/// Day key of today in the machine's local timezone
pub fn today_key() -> String {
    date_to_key(Local::now().date_naive())
}

/// Format a date as a day key
pub fn date_to_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a strict "YYYY-MM-DD" day key
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    // Reject unpadded variants like "2024-3-10" up front
    if key.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// The canonical stored instant for a day: UTC midnight of that date
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn instant(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_day_key_in_utc() {
        let noon = instant("2024-03-10T12:00:00Z");
        assert_eq!(day_key_in(noon, &Utc), "2024-03-10");
    }

    #[test]
    fn test_day_key_near_midnight_depends_on_zone() {
        // 04:30 UTC is still the previous evening five hours west
        let early = instant("2024-03-11T04:30:00Z");
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(day_key_in(early, &Utc), "2024-03-11");
        assert_eq!(day_key_in(early, &new_york), "2024-03-10");
    }

    #[test]
    fn test_same_day() {
        let noon = instant("2024-03-10T12:00:00Z");

        // Reflexive regardless of the machine's timezone
        assert!(same_day(noon, noon));

        // A full day apart can never land on the same local date
        let next_noon = instant("2024-03-11T12:00:00Z");
        assert!(!same_day(noon, next_noon));
    }

    #[test]
    fn test_parse_day_key() {
        assert_eq!(
            parse_day_key("2024-03-10"),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(
            parse_day_key("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );

        // Invalid formats
        assert!(parse_day_key("2024/03/10").is_none());
        assert!(parse_day_key("not-a-date").is_none());
        assert!(parse_day_key("2024-3-10").is_none());

        // Invalid dates
        assert!(parse_day_key("2024-13-01").is_none());
        assert!(parse_day_key("2023-02-29").is_none());
    }

    #[test]
    fn test_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let midnight = utc_midnight(date);

        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
        assert_eq!(day_key_in(midnight, &Utc), "2024-03-10");
    }

    #[test]
    fn test_key_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_day_key(&date_to_key(date)), Some(date));
    }
}
