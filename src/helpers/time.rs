use chrono::{Local, NaiveDateTime};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock time in the node's local timezone
///
/// Schedules are written in local time-of-day, so all schedule math runs on
/// naive local timestamps.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2025, 12, 10)
            .unwrap()
            .and_hms_opt(10, 30, 5)
            .unwrap();
        assert_eq!(format_timestamp(&ts), "2025-12-10 10:30:05");
    }
}
