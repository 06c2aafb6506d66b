use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// 解析截止时间
///
/// 支持 RFC 3339、`YYYY-MM-DDTHH:MM[:SS]`（按 UTC 处理）以及 `YYYY-MM-DD`（当天 23:59:59 UTC）。
pub fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)?;
    Some(date.and_time(end_of_day).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_due_date("2026-10-19T10:00:00-06:00").unwrap();
        assert_eq!(dt.hour(), 16);
        assert_eq!(dt.day(), 19);
    }

    #[test]
    fn parses_datetime_local_input() {
        let dt = parse_due_date("2026-10-19T10:30").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 30, 0));
    }

    #[test]
    fn bare_date_means_end_of_day() {
        let dt = parse_due_date("2026-10-19").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (23, 59, 59));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_due_date("").is_none());
        assert!(parse_due_date("tomorrow").is_none());
        assert!(parse_due_date("2026-13-01").is_none());
    }
}
