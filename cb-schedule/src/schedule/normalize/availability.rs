use crate::schedule::ScheduleError;

/// cell contents that mark a day as served. OCR renders the checkmark
/// glyph inconsistently, so a handful of look-alike characters count.
const AFFIRMATIVE_MARKS: [&str; 6] = ["✓", "√", "v", ">", "<", "→"];

/// converts a raw availability cell into a service flag.
///
/// blank cells are "no service" rather than an error; boolean words and
/// any phrase containing "no service" are matched case-insensitively;
/// a known affirmative mark means the day is served. anything else
/// fails with `UnparseableAvailability` carrying the offending content
/// so the caller can decide whether the row survives.
pub fn classify(raw: &str) -> Result<bool, ScheduleError> {
    let content = raw.trim();
    if content.is_empty() {
        return Ok(false);
    }

    let lowered = content.to_lowercase();
    if lowered == "true" {
        return Ok(true);
    }
    if lowered == "false" {
        return Ok(false);
    }
    if lowered.contains("no service") {
        return Ok(false);
    }
    if AFFIRMATIVE_MARKS.contains(&lowered.as_str()) {
        return Ok(true);
    }

    Err(ScheduleError::UnparseableAvailability(content.to_string()))
}
