use chrono::Datelike;

/// Primary keys of catalog rows (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Row timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A calendar year (vintages and the reference "current year").
pub type Year = i32;

/// Calendar year of a timestamp.
///
/// The engine never reads the wall clock itself; the request or job layer
/// converts its own `now` with this and passes the year down.
pub fn year_of(ts: Timestamp) -> Year {
    ts.year()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn year_of_uses_utc_calendar_year() {
        let ts = chrono::Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(year_of(ts), 2025);
    }
}
