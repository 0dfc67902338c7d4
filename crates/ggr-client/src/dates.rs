//! Date range defaults for history queries

use chrono::{Datelike, Duration, Local, Months, NaiveDateTime};

/// Wire format for `start` / `end` parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Optional start/end bounds for a history query
///
/// Missing bounds default to one month before now and one day after now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Both bounds, formatted for the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }

    /// Fill missing bounds relative to the current local time
    pub fn resolve(&self) -> ResolvedRange {
        self.resolve_at(Local::now().naive_local())
    }

    /// Fill missing bounds relative to `now`
    pub fn resolve_at(&self, now: NaiveDateTime) -> ResolvedRange {
        ResolvedRange {
            start: self
                .start
                .clone()
                .unwrap_or_else(|| default_start(now).format(DATE_FORMAT).to_string()),
            end: self
                .end
                .clone()
                .unwrap_or_else(|| default_end(now).format(DATE_FORMAT).to_string()),
        }
    }
}

/// One calendar month before `now`.
///
/// A day past the end of the previous month overflows into the current one,
/// so March 31 becomes March 2 (or 3) rather than the last day of February.
pub fn default_start(now: NaiveDateTime) -> NaiveDateTime {
    let Some(clamped) = now.checked_sub_months(Months::new(1)) else {
        return now;
    };
    let overflow = i64::from(now.day() - clamped.day());
    clamped
        .checked_add_signed(Duration::days(overflow))
        .unwrap_or(clamped)
}

/// One day after `now`
pub fn default_end(now: NaiveDateTime) -> NaiveDateTime {
    now.checked_add_signed(Duration::days(1)).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_default_range() {
        let range = DateRange::default().resolve_at(at("2024-06-15 08:30:00"));
        assert_eq!(range.start, "2024-05-15 08:30:00");
        assert_eq!(range.end, "2024-06-16 08:30:00");
    }

    #[test]
    fn test_month_end_overflows() {
        let range = DateRange::default().resolve_at(at("2024-03-31 23:59:59"));
        assert_eq!(range.start, "2024-03-02 23:59:59");
        assert_eq!(range.end, "2024-04-01 23:59:59");

        assert_eq!(
            default_start(at("2023-03-31 12:00:00")),
            at("2023-03-03 12:00:00")
        );
        assert_eq!(
            default_start(at("2024-05-31 12:00:00")),
            at("2024-05-01 12:00:00")
        );
        assert_eq!(
            default_start(at("2024-01-31 12:00:00")),
            at("2023-12-31 12:00:00")
        );
    }

    #[test]
    fn test_explicit_bounds_kept() {
        let range = DateRange::new(Some("2024-01-01 00:00:00".to_string()), None)
            .resolve_at(at("2024-06-15 08:30:00"));
        assert_eq!(range.start, "2024-01-01 00:00:00");
        assert_eq!(range.end, "2024-06-16 08:30:00");
    }

    #[test]
    fn test_resolve_uses_wire_format() {
        let range = DateRange::default().resolve();
        assert!(NaiveDateTime::parse_from_str(&range.start, DATE_FORMAT).is_ok());
        assert!(NaiveDateTime::parse_from_str(&range.end, DATE_FORMAT).is_ok());
        assert!(range.start < range.end);
    }
}
