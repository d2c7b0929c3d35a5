use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use super::report::{IngestReport, RowOutcome};
use crate::schedule::model::{FerryLeg, Schedule, Weekday};
use crate::schedule::normalize::{classify, normalize_time};
use crate::schedule::ScheduleError;

/// column offset of the first per-weekday availability cell. columns 1
/// and 2 are the two directional departure times; column 0 is a label.
const FIRST_DAY_COLUMN: usize = 3;

/// assembles a schedule from a row-grid table: one row per departure,
/// a time column per direction, then seven per-weekday availability
/// columns (Monday first).
///
/// outbound legs run `origin` -> `destination` at the first time column,
/// return legs the reverse at the second. an unreadable availability
/// cell is logged and treated as "no service that day"; an unreadable
/// time skips the whole row. both outcomes land in the returned report.
pub fn build_grid_schedule(
    table: &[Vec<String>],
    name: &str,
    url: &str,
    start: NaiveDate,
    end: Option<NaiveDate>,
    origin: &str,
    destination: &str,
) -> Result<(Schedule, IngestReport), ScheduleError> {
    if table.is_empty() {
        return Err(ScheduleError::EmptyTable);
    }

    let mut ferries: Vec<FerryLeg> = vec![];
    let mut report = IngestReport::default();

    // the first row is the column header
    for (i, row) in table.iter().enumerate().skip(1) {
        if row.len() < 3 || row[1].trim().is_empty() {
            log::debug!("skipping blank row {i}");
            continue;
        }

        let outbound_time = match normalize_time(&row[1], None) {
            Ok(time) => time,
            Err(e) => {
                log::error!("skipping row {i} (time: '{}'): {e}", row[1]);
                report.record(RowOutcome::Skipped {
                    row: i,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let return_time = match normalize_time(&row[2], None) {
            Ok(time) => time,
            Err(e) => {
                log::error!("skipping row {i} (time: '{}'): {e}", row[2]);
                report.record(RowOutcome::Skipped {
                    row: i,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let byday = classify_day_columns(row, i);

        ferries.push(FerryLeg::new(outbound_time, origin, destination, byday.clone()));
        ferries.push(FerryLeg::new(return_time, destination, origin, byday));
        report.record(RowOutcome::Built { row: i, legs: 2 });
    }

    let schedule = Schedule {
        name: name.to_string(),
        start,
        end,
        url: url.to_string(),
        ferries,
    };
    Ok((schedule, report))
}

/// classifies the seven weekday columns of a row. a cell that fails to
/// classify is recovered as unavailable rather than failing the row.
fn classify_day_columns(row: &[String], row_index: usize) -> BTreeSet<Weekday> {
    let mut byday = BTreeSet::new();
    for (day_index, day) in Weekday::ALL.into_iter().enumerate() {
        let column = day_index + FIRST_DAY_COLUMN;
        let Some(cell) = row.get(column) else {
            continue;
        };
        match classify(cell) {
            Ok(true) => {
                byday.insert(day);
            }
            Ok(false) => {}
            Err(e) => {
                log::warn!(
                    "could not parse service availability in row {row_index}, column {column}: {e}"
                );
            }
        }
    }
    byday
}

/// reads a table grid from a CSV file (the cached output of the external
/// OCR table extraction).
pub fn read_grid(path: &Path) -> Result<Vec<Vec<String>>, ScheduleError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ScheduleError::CsvError(format!("failure reading '{}': {e}", path.display())))?;

    let mut table = vec![];
    for record in reader.records() {
        let record = record.map_err(|e| {
            ScheduleError::CsvError(format!("failure reading '{}': {e}", path.display()))
        })?;
        table.push(record.iter().map(String::from).collect::<Vec<String>>());
    }
    if table.is_empty() {
        return Err(ScheduleError::EmptyTable);
    }
    Ok(table)
}

/// re-exports a raw table grid as normalized CSV: canonical 24-hour
/// times in the direction columns and true/false availability flags,
/// with the header row's embedded newlines collapsed. useful as a
/// reviewed cache between OCR extraction and ingestion.
pub fn export_normalized_grid(table: &[Vec<String>], path: &Path) -> Result<(), ScheduleError> {
    if table.is_empty() {
        return Err(ScheduleError::EmptyTable);
    }

    let file = File::create(path)
        .map_err(|e| ScheduleError::CsvError(format!("failure creating '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    let header: Vec<String> = table[0]
        .iter()
        .map(|cell| cell.replace('\n', " "))
        .collect();
    writer
        .write_record(&header)
        .map_err(|e| ScheduleError::CsvError(format!("{e}")))?;

    for (i, row) in table.iter().enumerate().skip(1) {
        if row.len() < 3 || row[1].trim().is_empty() {
            log::debug!("skipping blank row {i}");
            continue;
        }
        let mut out: Vec<String> = vec![row[0].replace('\n', " ")];
        for cell in &row[1..FIRST_DAY_COLUMN.min(row.len())] {
            out.push(normalize_time(cell, None)?.to_string());
        }
        for cell in row.iter().skip(FIRST_DAY_COLUMN) {
            out.push(classify(cell)?.to_string());
        }
        writer
            .write_record(&out)
            .map_err(|e| ScheduleError::CsvError(format!("{e}")))?;
    }
    writer
        .flush()
        .map_err(|e| ScheduleError::CsvError(format!("{e}")))?;
    Ok(())
}
