// libs/shared/models/src/time.rs
use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Length of one bookable slot.
pub const SLOT_MINUTES: u16 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeOfDayError {
    #[error("Malformed time of day '{0}', expected HH:MM")]
    Malformed(String),

    #[error("Time of day {hour:02}:{minute:02} is out of range")]
    OutOfRange { hour: u16, minute: u16 },

    #[error("Time of day {0} is not on a half-hour boundary")]
    Unaligned(TimeOfDay),

    #[error("Adding {minutes} minutes to {start} runs past the end of the day")]
    Overflow { start: TimeOfDay, minutes: u16 },
}

/// A wall-clock time of day at minute precision, stored as minutes since midnight.
///
/// Renders and parses as zero-padded `HH:MM`. The value `24:00` is accepted so
/// that a slot ending at midnight can still be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn new(hour: u16, minute: u16) -> Result<Self, TimeOfDayError> {
        let total = u32::from(hour) * u32::from(MINUTES_PER_HOUR) + u32::from(minute);
        if minute >= MINUTES_PER_HOUR || total > u32::from(MINUTES_PER_DAY) {
            return Err(TimeOfDayError::OutOfRange { hour, minute });
        }
        Ok(Self(total as u16))
    }

    /// Builds a value from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, TimeOfDayError> {
        if minutes > MINUTES_PER_DAY {
            return Err(TimeOfDayError::OutOfRange {
                hour: minutes / MINUTES_PER_HOUR,
                minute: minutes % MINUTES_PER_HOUR,
            });
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / MINUTES_PER_HOUR
    }

    pub fn minute(self) -> u16 {
        self.0 % MINUTES_PER_HOUR
    }

    pub fn is_half_hour_aligned(self) -> bool {
        self.0 % SLOT_MINUTES == 0
    }

    /// Minute-of-day addition; the carry into the hour field falls out of the
    /// representation.
    pub fn add_minutes(self, minutes: u16) -> Result<Self, TimeOfDayError> {
        match self.0.checked_add(minutes) {
            Some(total) if total <= MINUTES_PER_DAY => Ok(Self(total)),
            _ => Err(TimeOfDayError::Overflow { start: self, minutes }),
        }
    }

    /// End of the slot starting at `self`. Only half-hour aligned starts are legal.
    pub fn add_thirty_minutes(self) -> Result<Self, TimeOfDayError> {
        if !self.is_half_hour_aligned() {
            return Err(TimeOfDayError::Unaligned(self));
        }
        self.add_minutes(SLOT_MINUTES)
    }

    /// `None` for `24:00`, which chrono cannot represent.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeOfDayError::Malformed(s.to_string());

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(malformed)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hours) || !two_digits(minutes) {
            return Err(malformed());
        }

        let hour: u16 = hours.parse().map_err(|_| malformed())?;
        let minute: u16 = minutes.parse().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        use chrono::Timelike;
        // hour() <= 23 and minute() <= 59 so this always fits inside a day.
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_renders_zero_padded() {
        assert_eq!(t("09:00").to_string(), "09:00");
        assert_eq!(t("17:30").minutes(), 17 * 60 + 30);
        assert_eq!(TimeOfDay::new(9, 5).unwrap().to_string(), "09:05");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_matches!("9:00".parse::<TimeOfDay>(), Err(TimeOfDayError::Malformed(_)));
        assert_matches!("09-00".parse::<TimeOfDay>(), Err(TimeOfDayError::Malformed(_)));
        assert_matches!("ab:cd".parse::<TimeOfDay>(), Err(TimeOfDayError::Malformed(_)));
        assert_matches!("+9:+0".parse::<TimeOfDay>(), Err(TimeOfDayError::Malformed(_)));
        assert_matches!("+9:00".parse::<TimeOfDay>(), Err(TimeOfDayError::Malformed(_)));
        assert_matches!("09:60".parse::<TimeOfDay>(), Err(TimeOfDayError::OutOfRange { .. }));
        assert_matches!("25:00".parse::<TimeOfDay>(), Err(TimeOfDayError::OutOfRange { .. }));
    }

    #[test]
    fn thirty_minutes_carries_into_the_hour() {
        assert_eq!(t("17:30").add_thirty_minutes().unwrap(), t("18:00"));
        assert_eq!(t("09:00").add_thirty_minutes().unwrap(), t("09:30"));
        assert_eq!(t("12:30").add_thirty_minutes().unwrap(), t("13:00"));
    }

    #[test]
    fn thirty_minutes_rejects_unaligned_starts() {
        assert_matches!(t("09:45").add_thirty_minutes(), Err(TimeOfDayError::Unaligned(_)));
    }

    #[test]
    fn end_of_day_is_representable_but_not_exceedable() {
        assert_eq!(t("23:30").add_thirty_minutes().unwrap().to_string(), "24:00");
        assert_matches!(t("24:00").add_thirty_minutes(), Err(TimeOfDayError::Overflow { .. }));
        assert!(t("24:00").to_naive_time().is_none());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&t("14:30")).unwrap();
        assert_eq!(json, "\"14:30\"");
        let back: TimeOfDay = serde_json::from_str("\"08:00\"").unwrap();
        assert_eq!(back, t("08:00"));
        assert!(serde_json::from_str::<TimeOfDay>("\"8am\"").is_err());
        assert!(serde_json::from_str::<TimeOfDay>("\"+9:+0\"").is_err());
    }
}
