use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleError;

/// a validated 24-hour wall clock time. serializes to the canonical
/// zero-padded `HH:MM` form used by the schedule store, and orders
/// chronologically (field order matters for the derived Ord).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<TimeOfDay, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTimeFormat(format!(
                "invalid time values: {hour}:{minute}"
            )));
        }
        Ok(TimeOfDay {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// 12-hour display form, e.g. `8:15 PM`, without a leading zero on the hour.
    pub fn to_12h(&self) -> String {
        let suffix = if self.hour < 12 { "AM" } else { "PM" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute, suffix)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour_str, minute_str) = s
            .split_once(':')
            .ok_or_else(|| ScheduleError::InvalidTimeFormat(s.to_string()))?;
        let hour = hour_str
            .parse::<u32>()
            .map_err(|_| ScheduleError::InvalidTimeFormat(s.to_string()))?;
        let minute = minute_str
            .parse::<u32>()
            .map_err(|_| ScheduleError::InvalidTimeFormat(s.to_string()))?;
        TimeOfDay::new(hour, minute)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeOfDay::from_str(&value)
    }
}

#[cfg(test)]
mod test {
    use super::TimeOfDay;
    use std::str::FromStr;

    #[test]
    fn test_display_is_zero_padded() {
        let t = TimeOfDay::new(5, 0).expect("valid time");
        assert_eq!(t.to_string(), "05:00");
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(12, 60).is_err());
    }

    #[test]
    fn test_parse_round_trip() {
        let t = TimeOfDay::from_str("18:45").expect("valid time");
        assert_eq!(t.to_string(), "18:45");
        assert!(TimeOfDay::from_str("no-colon").is_err());
    }

    #[test]
    fn test_orders_chronologically() {
        let early = TimeOfDay::new(6, 30).expect("valid time");
        let late = TimeOfDay::new(18, 0).expect("valid time");
        assert!(early < late);
    }

    #[test]
    fn test_12h_formatting() {
        assert_eq!(TimeOfDay::new(0, 15).unwrap().to_12h(), "12:15 AM");
        assert_eq!(TimeOfDay::new(9, 5).unwrap().to_12h(), "9:05 AM");
        assert_eq!(TimeOfDay::new(12, 0).unwrap().to_12h(), "12:00 PM");
        assert_eq!(TimeOfDay::new(20, 15).unwrap().to_12h(), "8:15 PM");
    }
}
