use chrono::{Datelike, NaiveDate};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::schedule::ScheduleError;

/// pattern matching an emphasized "Effective" label at the start of a text node
const EFFECTIVE_LABEL_PATTERN: &str = r"(?i)^\s*effective";
/// pattern capturing the text trailing the label
const EFFECTIVE_TEXT_PATTERN: &str = r"(?i)effective:?\s*(.+)";
/// dash-like code points (hyphen, figure dash, en dash, em dash, horizontal bar)
const DASH_PATTERN: &str = "[\u{2012}\u{2013}\u{2014}\u{2015}-]+";
/// start / end split on the first normalized hyphen
const RANGE_SPLIT_PATTERN: &str = r"(.+?)\s*-\s*(.+)$";

/// date formats the source documents have been observed to use. `%Y`
/// also accepts the truncated years (e.g. "202") that year correction
/// repairs afterwards.
const LOOSE_DATE_FORMATS: [&str; 6] = [
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%m/%d/%Y",
    "%Y-%m-%d",
];

fn build_regex(pattern: &str) -> Result<Regex, ScheduleError> {
    Regex::new(pattern)
        .map_err(|e| ScheduleError::DateRangeUnparseable(format!("internal pattern error: {e}")))
}

/// locates the emphasized "Effective: <start> - <end>" label in a parsed
/// document and returns the normalized validity window.
pub fn extract_effective_range(
    document: &Html,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), ScheduleError> {
    let strong_selector = Selector::parse("strong")
        .map_err(|e| ScheduleError::InvalidSelector(format!("{e}")))?;
    let label_re = build_regex(EFFECTIVE_LABEL_PATTERN)?;
    let text_re = build_regex(EFFECTIVE_TEXT_PATTERN)?;

    let label = document
        .select(&strong_selector)
        .find(|el| label_re.is_match(&el.text().collect::<String>()))
        .ok_or(ScheduleError::EffectiveLabelNotFound)?;

    // the date range lives in the text nodes following the label, so
    // read the label's parent element as a whole
    let parent = label
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or(ScheduleError::EffectiveLabelNotFound)?;
    let full_text = parent
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let range_text = text_re
        .captures(&full_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| ScheduleError::DateRangeUnparseable(full_text.clone()))?;

    parse_effective_text(&range_text, today)
}

/// parses "<start> - <end>" text into a validity window, tolerating any
/// dash variant as the separator and repairing truncated years.
pub fn parse_effective_text(
    range_text: &str,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), ScheduleError> {
    let dash_re = build_regex(DASH_PATTERN)?;
    let split_re = build_regex(RANGE_SPLIT_PATTERN)?;

    let normalized = dash_re.replace_all(range_text, "-");
    let captures = split_re
        .captures(&normalized)
        .ok_or_else(|| ScheduleError::DateRangeUnparseable(range_text.to_string()))?;
    let start_text = captures[1].trim().to_string();
    let end_text = captures[2].trim().to_string();

    let start = parse_loose_date(&start_text)?;
    let end = parse_loose_date(&end_text)?;

    // the start date is always corrected first (no reference); the end
    // date borrows the corrected start's year when its own is implausible
    let start = correct_malformed_year(start, None, today, &start_text)?;
    let end = correct_malformed_year(end, Some(start), today, &end_text)?;

    Ok((start, end))
}

/// permissive date parsing over the formats the source documents use.
pub fn parse_loose_date(text: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = text.trim();
    for format in LOOSE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(ScheduleError::DateRangeUnparseable(trimmed.to_string()))
}

/// repairs truncated or garbled years in parsed dates.
///
/// source documents occasionally truncate 4-digit years ("202" for
/// "2025"). a year within 50 years of `today` is accepted as-is. an
/// implausible year is replaced with the reference date's year when one
/// is supplied, subject to the corrected date not preceding the
/// reference; with no reference the date cannot be trusted at all.
pub fn correct_malformed_year(
    parsed: NaiveDate,
    reference: Option<NaiveDate>,
    today: NaiveDate,
    raw_text: &str,
) -> Result<NaiveDate, ScheduleError> {
    if (parsed.year() - today.year()).abs() <= 50 {
        return Ok(parsed);
    }

    match reference {
        Some(reference) => {
            let corrected = parsed.with_year(reference.year()).ok_or_else(|| {
                ScheduleError::DateRangeUnparseable(format!(
                    "'{raw_text}' has no valid counterpart in year {}",
                    reference.year()
                ))
            })?;
            log::info!(
                "corrected malformed year using reference: '{raw_text}' -> {corrected} (reference year: {})",
                reference.year()
            );
            if corrected >= reference {
                Ok(corrected)
            } else {
                Err(ScheduleError::DateOrderingViolation {
                    end: corrected,
                    start: reference,
                })
            }
        }
        None => Err(ScheduleError::UnresolvableYear {
            raw: raw_text.to_string(),
            parsed,
        }),
    }
}
