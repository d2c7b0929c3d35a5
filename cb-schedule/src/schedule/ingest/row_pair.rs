use std::collections::BTreeSet;

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::schedule::model::{FerryLeg, Schedule, TimeOfDay, Weekday};
use crate::schedule::normalize::{extract_effective_range, normalize_time};
use crate::schedule::ScheduleError;

/// marker suffix on a time token denoting "except Friday" service
const EXCEPT_FRIDAY_MARKER: &str = "XF";

fn selector(css: &str) -> Result<Selector, ScheduleError> {
    Selector::parse(css).map_err(|e| ScheduleError::InvalidSelector(format!("{e}")))
}

/// parses a row-pair schedule page: one table whose rows each carry an
/// outbound and a return departure time, with a marker column that flips
/// the table from AM to PM partway down, and an emphasized
/// "Effective: <start> - <end>" validity label elsewhere on the page.
///
/// outbound legs run `origin` -> `destination`, return legs the reverse.
/// a time token ending in `XF` excludes Friday from the leg's weekdays.
pub fn parse_html_schedule(
    html: &str,
    url: &str,
    origin: &str,
    destination: &str,
    today: NaiveDate,
) -> Result<Schedule, ScheduleError> {
    let document = Html::parse_document(html);

    let tables: Vec<ElementRef> = document.select(&selector("table")?).collect();
    let table = match tables.len() {
        0 => return Err(ScheduleError::NoTableFound),
        1 => tables[0],
        n => return Err(ScheduleError::MultipleTablesFound(n)),
    };

    let marker_selector = selector("td.column-1")?;
    let outbound_selector = selector("td.column-2")?;
    let return_selector = selector("td.column-3")?;

    // the first two rows are column headers
    let rows: Vec<ElementRef> = table.select(&selector("tr")?).skip(2).collect();
    if rows.is_empty() {
        return Err(ScheduleError::EmptyTable);
    }

    let mut is_am = true;
    let mut ferries: Vec<FerryLeg> = vec![];
    for row in rows {
        if let Some(marker) = row.select(&marker_selector).next() {
            if cell_text(marker).trim().eq_ignore_ascii_case("pm") {
                is_am = false;
            }
        }

        let outbound_cell = match row.select(&outbound_selector).next() {
            Some(cell) => cell,
            None => continue,
        };
        let (time, byday) = parse_time_cell(&cell_text(outbound_cell), !is_am)?;
        ferries.push(FerryLeg::new(time, origin, destination, byday));

        let return_cell = match row.select(&return_selector).next() {
            Some(cell) => cell,
            None => continue,
        };
        let (time, byday) = parse_time_cell(&cell_text(return_cell), !is_am)?;
        ferries.push(FerryLeg::new(time, destination, origin, byday));
    }

    let (start, end) = extract_effective_range(&document, today)?;

    Ok(Schedule {
        name: schedule_name_from_url(url),
        start,
        end: Some(end),
        url: url.to_string(),
        ferries,
    })
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>()
}

/// splits a raw time cell into its canonical time and the weekdays it
/// operates: the full week, or the week minus Friday when the cell
/// carries the `XF` marker. the marker is stripped before time parsing.
fn parse_time_cell(
    raw: &str,
    is_pm: bool,
) -> Result<(TimeOfDay, BTreeSet<Weekday>), ScheduleError> {
    let trimmed = raw.trim();
    let (token, except_friday) = match trimmed.strip_suffix(EXCEPT_FRIDAY_MARKER) {
        Some(stripped) => (stripped.trim(), true),
        None => (trimmed, false),
    };
    let byday: BTreeSet<Weekday> = Weekday::ALL
        .into_iter()
        .filter(|d| !(except_friday && *d == Weekday::Fr))
        .collect();
    let time = normalize_time(token, Some(is_pm))?;
    Ok((time, byday))
}

/// derives the schedule's human label from the last path segment of its
/// source url, title-cased ("…/summer/" -> "Summer").
pub fn schedule_name_from_url(url: &str) -> String {
    let segment = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    title_case(segment)
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::{parse_html_schedule, parse_time_cell, schedule_name_from_url};
    use crate::schedule::model::Weekday;
    use crate::schedule::ScheduleError;
    use chrono::NaiveDate;

    const ORIGIN: &str = "Portland";
    const DESTINATION: &str = "Chebeague Island";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn summer_page() -> &'static str {
        r#"<html><body>
        <p><strong>Effective:</strong> June 21, 2025 &#8211; September 1, 2025</p>
        <table>
          <tr><th>AM/PM</th><th>Leave Portland</th><th>Leave Chebeague</th></tr>
          <tr><th></th><th></th><th></th></tr>
          <tr><td class="column-1">AM</td><td class="column-2">5:00</td></tr>
          <tr><td class="column-1">PM</td><td class="column-2">6:00</td></tr>
        </table>
        </body></html>"#
    }

    #[test]
    fn test_scenario_am_pm_flip() {
        let url = "https://www.cascobaylines.com/schedules/chebeague-island-schedule/summer/";
        let schedule = parse_html_schedule(summer_page(), url, ORIGIN, DESTINATION, today())
            .expect("summer page parses");

        assert_eq!(schedule.name, "Summer");
        assert_eq!(schedule.start, NaiveDate::from_ymd_opt(2025, 6, 21).unwrap());
        assert_eq!(schedule.end, Some(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()));
        assert_eq!(schedule.url, url);

        // 5:00 on the AM side, 6:00 after the PM flip
        assert_eq!(schedule.ferries.len(), 2);
        assert_eq!(schedule.ferries[0].time.to_string(), "05:00");
        assert_eq!(schedule.ferries[1].time.to_string(), "18:00");
        for leg in &schedule.ferries {
            assert_eq!(leg.from, ORIGIN);
            assert_eq!(leg.to, DESTINATION);
            assert_eq!(leg.byday.len(), 7);
        }
    }

    #[test]
    fn test_both_directions_built_from_row_pair() {
        let html = r#"<html><body>
        <p><strong>Effective:</strong> June 21, 2025 - September 1, 2025</p>
        <table>
          <tr><th></th></tr>
          <tr><th></th></tr>
          <tr>
            <td class="column-1">AM</td>
            <td class="column-2">6:30</td>
            <td class="column-3">7:15 XF</td>
          </tr>
        </table>
        </body></html>"#;
        let schedule = parse_html_schedule(
            html,
            "https://example.com/schedules/fall",
            ORIGIN,
            DESTINATION,
            today(),
        )
        .expect("page parses");

        assert_eq!(schedule.ferries.len(), 2);
        let outbound = &schedule.ferries[0];
        assert_eq!(outbound.from, ORIGIN);
        assert_eq!(outbound.to, DESTINATION);
        assert_eq!(outbound.time.to_string(), "06:30");
        assert_eq!(outbound.byday.len(), 7);

        // the return cell carries the except-Friday marker
        let ret = &schedule.ferries[1];
        assert_eq!(ret.from, DESTINATION);
        assert_eq!(ret.to, ORIGIN);
        assert_eq!(ret.time.to_string(), "07:15");
        assert_eq!(ret.byday.len(), 6);
        assert!(!ret.byday.contains(&Weekday::Fr));
    }

    #[test]
    fn test_no_table_fails() {
        let html = "<html><body><p>No table here</p></body></html>";
        let result = parse_html_schedule(html, "https://example.com", ORIGIN, DESTINATION, today());
        assert!(matches!(result, Err(ScheduleError::NoTableFound)));
    }

    #[test]
    fn test_multiple_tables_fail() {
        let html = "<html><body><table></table><table></table></body></html>";
        let result = parse_html_schedule(html, "https://example.com", ORIGIN, DESTINATION, today());
        assert!(matches!(result, Err(ScheduleError::MultipleTablesFound(2))));
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let html = r#"<html><body>
        <table><tr><th>a</th></tr><tr><th>b</th></tr></table>
        </body></html>"#;
        let result = parse_html_schedule(html, "https://example.com", ORIGIN, DESTINATION, today());
        assert!(matches!(result, Err(ScheduleError::EmptyTable)));
    }

    #[test]
    fn test_bad_time_token_is_fatal() {
        let html = r#"<html><body>
        <p><strong>Effective:</strong> June 21, 2025 - September 1, 2025</p>
        <table>
          <tr><th></th></tr>
          <tr><th></th></tr>
          <tr><td class="column-1">AM</td><td class="column-2">garbled</td></tr>
        </table>
        </body></html>"#;
        let result = parse_html_schedule(html, "https://example.com", ORIGIN, DESTINATION, today());
        assert!(matches!(result, Err(ScheduleError::InvalidTimeFormat(_))));
    }

    #[test]
    fn test_time_cell_marker_handling() {
        let (time, byday) = parse_time_cell("5:00 XF", false).unwrap();
        assert_eq!(time.to_string(), "05:00");
        assert_eq!(byday.len(), 6);
        assert!(!byday.contains(&Weekday::Fr));

        let (time, byday) = parse_time_cell("12:00", true).unwrap();
        assert_eq!(time.to_string(), "12:00");
        assert_eq!(byday.len(), 7);
    }

    #[test]
    fn test_schedule_name_from_url() {
        assert_eq!(
            schedule_name_from_url("https://example.com/schedules/summer/"),
            "Summer"
        );
        assert_eq!(
            schedule_name_from_url("https://example.com/fall-schedule"),
            "Fall-Schedule"
        );
    }
}
