//! DateTime utilities.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Get the current UTC time, truncated to microseconds.
///
/// Postgres `timestamptz` keeps microsecond precision, so truncating here
/// makes a record read back from the store equal to the one that was written.
///
/// # Examples
///
/// ```
/// use feedback_desk_common::datetime::now_utc;
///
/// let now = now_utc();
/// assert_eq!(now.timestamp_subsec_nanos() % 1_000, 0);
/// ```
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a DateTime as an RFC 3339 string with microseconds.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use feedback_desk_common::datetime::format_datetime;
///
/// let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(format_datetime(&dt), "2024-01-02T03:04:05.000000Z");
/// ```
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_utc_is_truncated() {
        let now = now_utc();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_now_utc_is_monotonic_enough() {
        let first = now_utc();
        let second = now_utc();
        assert!(second >= first);
    }
}
