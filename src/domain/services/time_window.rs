//! `HH:mm` arithmetic. Times are 24-hour, zero padded, and treated as minute
//! offsets from midnight.

use chrono::{Datelike, NaiveDate};
use crate::error::AppError;

pub const MINUTES_PER_DAY: u32 = 1440;

pub fn to_minutes(hhmm: &str) -> Result<u32, AppError> {
    let invalid = || AppError::InvalidFormat(format!("Invalid time '{}', expected HH:mm", hhmm));

    let bytes = hhmm.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    if !bytes.iter().enumerate().all(|(i, b)| i == 2 || b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
    let minutes = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

pub fn from_minutes(minutes: u32) -> Result<String, AppError> {
    if minutes >= MINUTES_PER_DAY {
        return Err(AppError::InvalidFormat(format!("{} minutes is outside a single day", minutes)));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Adds `duration` minutes, wrapping past midnight (`23:30 + 60 = 00:30`).
pub fn add_minutes(hhmm: &str, duration: u32) -> Result<String, AppError> {
    let total = (to_minutes(hhmm)? + duration % MINUTES_PER_DAY) % MINUTES_PER_DAY;
    from_minutes(total)
}

/// True when `start + duration` runs past midnight and `add_minutes` wrapped.
pub fn crosses_midnight(hhmm: &str, duration: u32) -> Result<bool, AppError> {
    Ok(to_minutes(hhmm)?.saturating_add(duration) >= MINUTES_PER_DAY)
}

/// Minutes from `start` to `end`; fails when `end` is not after `start`.
pub fn duration_between(start: &str, end: &str) -> Result<u32, AppError> {
    let (s, e) = (to_minutes(start)?, to_minutes(end)?);
    if e <= s {
        return Err(AppError::Validation(format!("End time {} must be after start time {}", end, start)));
    }
    Ok(e - s)
}

/// Half-open intervals: windows that only touch do not overlap.
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    !(a_end <= b_start || a_start >= b_end)
}

pub fn contains(window_start: u32, window_end: u32, start: u32, end: u32) -> bool {
    start >= window_start && end <= window_end
}

pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidFormat(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// 0 = Sunday .. 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_roundtrip_whole_day() {
        for x in 0..MINUTES_PER_DAY {
            let hhmm = from_minutes(x).unwrap();
            assert_eq!(to_minutes(&hhmm).unwrap(), x);
        }
    }

    #[test]
    fn test_rejects_malformed_times() {
        for bad in ["24:00", "9:00", "09:60", "09-00", "", "ab:cd", "09:000", "+9:00"] {
            assert!(matches!(to_minutes(bad), Err(AppError::InvalidFormat(_))), "accepted {}", bad);
        }
        assert!(matches!(from_minutes(1440), Err(AppError::InvalidFormat(_))));
    }

    #[test]
    fn test_add_minutes() {
        assert_eq!(add_minutes("09:00", 60).unwrap(), "10:00");
        assert_eq!(add_minutes("09:45", 30).unwrap(), "10:15");
    }

    #[test]
    fn test_add_minutes_wraps_past_midnight() {
        assert_eq!(add_minutes("23:30", 60).unwrap(), "00:30");
        assert!(crosses_midnight("23:30", 60).unwrap());
        assert!(!crosses_midnight("22:30", 60).unwrap());
        assert!(crosses_midnight("23:00", 60).unwrap());
        assert!(crosses_midnight("00:01", u32::MAX).unwrap());
    }

    #[test]
    fn test_overlap_is_half_open_and_symmetric() {
        let cases = [
            (540, 600, 600, 660),
            (540, 600, 570, 630),
            (540, 720, 600, 630),
            (0, 30, 60, 90),
            (600, 660, 540, 600),
        ];
        for (a, b, c, d) in cases {
            assert_eq!(overlaps(a, b, c, d), overlaps(c, d, a, b));
        }
        assert!(!overlaps(540, 600, 600, 660));
        assert!(overlaps(540, 600, 570, 630));
        assert!(overlaps(540, 720, 600, 630));
    }

    #[test]
    fn test_contains() {
        assert!(contains(540, 1080, 540, 600));
        assert!(contains(540, 1080, 1020, 1080));
        assert!(!contains(540, 1080, 480, 540));
        assert!(!contains(540, 1080, 1050, 1110));
    }

    #[test]
    fn test_duration_between() {
        assert_eq!(duration_between("09:00", "10:30").unwrap(), 90);
        assert!(matches!(duration_between("10:00", "10:00"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_day_of_week_starts_on_sunday() {
        assert_eq!(day_of_week(parse_date("2024-01-07").unwrap()), 0);
        assert_eq!(day_of_week(parse_date("2024-01-01").unwrap()), 1);
        assert_eq!(day_of_week(parse_date("2024-01-06").unwrap()), 6);
        assert!(matches!(parse_date("2024-13-01"), Err(AppError::InvalidFormat(_))));
    }
}
