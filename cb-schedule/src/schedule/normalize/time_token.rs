use crate::schedule::model::TimeOfDay;
use crate::schedule::ScheduleError;

/// converts a raw, freeform time token into a canonical 24-hour time.
///
/// the token is stripped of all whitespace (OCR cells contain stray
/// newlines) and uppercased. the literal `NOON` maps to 12:00. a token
/// carrying an explicit `AM`/`PM` suffix is converted from 12-hour form;
/// without a suffix the caller-supplied `pm_hint` decides the meridiem.
/// when neither is present the token must already be a valid 24-hour
/// `HH:MM` value and is passed through.
///
/// conversion rule: PM with hour != 12 adds 12; AM with hour == 12
/// becomes hour 0; otherwise the hour is unchanged. values outside
/// 0-23 / 0-59 after conversion fail with `InvalidTimeFormat`.
pub fn normalize_time(raw: &str, pm_hint: Option<bool>) -> Result<TimeOfDay, ScheduleError> {
    let token: String = raw
        .split_whitespace()
        .collect::<String>()
        .to_uppercase();
    if token.is_empty() {
        return Err(ScheduleError::InvalidTimeFormat(String::from(
            "empty time token",
        )));
    }

    if token == "NOON" {
        return TimeOfDay::new(12, 0);
    }

    // an explicit suffix always wins over the caller's hint
    let (body, meridiem) = if let Some(stripped) = token.strip_suffix("PM") {
        (stripped, Some(true))
    } else if let Some(stripped) = token.strip_suffix("AM") {
        (stripped, Some(false))
    } else {
        (token.as_str(), pm_hint)
    };

    let (hour_str, minute_str) = body
        .split_once(':')
        .ok_or_else(|| ScheduleError::InvalidTimeFormat(token.clone()))?;
    let mut hour = hour_str
        .parse::<u32>()
        .map_err(|_| ScheduleError::InvalidTimeFormat(token.clone()))?;
    let minute = minute_str
        .parse::<u32>()
        .map_err(|_| ScheduleError::InvalidTimeFormat(token.clone()))?;

    match meridiem {
        Some(true) if hour != 12 => hour += 12,
        Some(false) if hour == 12 => hour = 0,
        _ => {}
    }

    TimeOfDay::new(hour, minute)
        .map_err(|_| ScheduleError::InvalidTimeFormat(format!("invalid time values: {hour}:{minute}")))
}
