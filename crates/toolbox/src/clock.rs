//! Current time at a fixed `UTC±N` hour offset.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::error::{DomainError, DomainResult};

/// Pattern a time-zone label must match (`UTC+9`, `UTC-5`, ...).
pub const TIMEZONE_PATTERN: &str = r"^UTC[+-][0-9]+$";

/// Timestamp layout of the rendered local time.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A whole-hour offset from UTC, parsed from a `UTC±N` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtcOffset {
    label: String,
    hours: i64,
}

impl UtcOffset {
    /// Parse a `UTC±N` label.
    pub fn parse(label: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidTimezone(label.to_string());

        let rest = label.strip_prefix("UTC").ok_or_else(invalid)?;
        let (negative, digits) = if let Some(digits) = rest.strip_prefix('+') {
            (false, digits)
        } else if let Some(digits) = rest.strip_prefix('-') {
            (true, digits)
        } else {
            return Err(invalid());
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let magnitude: i64 = digits.parse().map_err(|_| invalid())?;
        let hours = if negative { -magnitude } else { magnitude };

        Ok(Self {
            label: label.to_string(),
            hours,
        })
    }

    /// The label this offset was parsed from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Signed hour offset.
    pub fn hours(&self) -> i64 {
        self.hours
    }

    /// Wall-clock time at this offset for the UTC instant `now`.
    pub fn local_time(&self, now: DateTime<Utc>) -> DomainResult<NaiveDateTime> {
        TimeDelta::try_hours(self.hours)
            .and_then(|delta| now.naive_utc().checked_add_signed(delta))
            .ok_or_else(|| DomainError::InvalidTimezone(self.label.clone()))
    }

    /// Render `"{label} 시간대의 현재 시각: YYYY-MM-DD HH:MM:SS"` for `now`.
    pub fn describe(&self, now: DateTime<Utc>) -> DomainResult<String> {
        let local = self.local_time(now)?;
        Ok(format!(
            "{} 시간대의 현재 시각: {}",
            self.label,
            local.format(TIMESTAMP_FORMAT)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn positive_offset() {
        let offset = UtcOffset::parse("UTC+9").unwrap();
        assert_eq!(offset.hours(), 9);
        assert_eq!(
            offset.describe(noon()).unwrap(),
            "UTC+9 시간대의 현재 시각: 2024-03-01 21:00:00"
        );
    }

    #[test]
    fn negative_offset_crosses_midnight() {
        let offset = UtcOffset::parse("UTC-13").unwrap();
        assert_eq!(
            offset.describe(noon()).unwrap(),
            "UTC-13 시간대의 현재 시각: 2024-02-29 23:00:00"
        );
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["bogus", "UTC", "UTC9", "UTC+", "UTC+9h", "GMT+9", "UTC+-9"] {
            assert!(
                matches!(UtcOffset::parse(label), Err(DomainError::InvalidTimezone(_))),
                "{label} should be rejected"
            );
        }
    }

    #[test]
    fn unrepresentable_offset_is_domain_error() {
        let offset = UtcOffset::parse("UTC+99999999999").unwrap();
        assert!(offset.local_time(noon()).is_err());
    }
}
