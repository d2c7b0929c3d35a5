use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use itertools::Itertools;

use super::day::{ferries_for_day, DayFerry, DaySheet};
use crate::schedule::model::ScheduleStore;
use crate::schedule::ScheduleError;

/// renders one day's schedule sheet as a standalone HTML page.
pub fn render_day_page(sheet: &DaySheet, title: &str) -> String {
    let mut rows = String::new();
    for ferry in &sheet.ferries {
        let _ = write!(
            rows,
            "      <tr><td class=\"time\">{}</td><td>{}</td><td>{}</td><td class=\"service\">{}</td></tr>\n",
            ferry.time, ferry.from, ferry.to, ferry.service
        );
    }
    if sheet.ferries.is_empty() {
        rows.push_str("      <tr><td colspan=\"4\">No ferries scheduled</td></tr>\n");
    }

    let links = sheet
        .services
        .iter()
        .map(|s| format!("<a href=\"{}\">{}</a>", s.url, s.name))
        .join(" | ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title} - {date_formatted}</title>
  <link rel="stylesheet" href="/styles.css">
</head>
<body>
  <header class="page-header">
    <h1>{title}</h1>
    <p>{date_formatted} ({timezone})</p>
  </header>
  <main class="schedule-container">
    <table class="ferry-table">
      <tr><th>Time</th><th>From</th><th>To</th><th>Service</th></tr>
{rows}    </table>
  </main>
  <footer class="page-footer">
    <p>{links}</p>
  </footer>
</body>
</html>
"#,
        title = title,
        date_formatted = sheet.date.format("%A, %B %d, %Y"),
        timezone = sheet.timezone,
        rows = rows,
        links = links,
    )
}

/// generates the landing page linking every published day.
fn render_index_page(title: &str, dates: &[NaiveDate]) -> String {
    let links = dates
        .iter()
        .map(|d| {
            format!(
                "      <a href=\"{}/\" class=\"date-link\">{}</a>",
                d.format("%Y-%m-%d"),
                d.format("%a %b %d")
            )
        })
        .join("\n");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <header class="page-header">
    <h1>{title}</h1>
    <p>Select a date to view ferry schedules</p>
  </header>
  <main class="schedule-container">
    <div class="date-grid">
{links}
    </div>
  </main>
</body>
</html>
"#,
    )
}

fn write_page(path: &Path, contents: &str) -> Result<(), ScheduleError> {
    fs::write(path, contents).map_err(|e| {
        ScheduleError::RenderError(format!("failure writing '{}': {e}", path.display()))
    })
}

fn create_dir(path: &Path) -> Result<(), ScheduleError> {
    fs::create_dir_all(path).map_err(|e| {
        ScheduleError::RenderError(format!("failure creating '{}': {e}", path.display()))
    })
}

/// publishes a static multi-day site: one directory per date holding the
/// full day page plus `arrive/` and `depart/` pages filtered against the
/// island location, and an index page linking every date.
#[allow(clippy::too_many_arguments)]
pub fn publish_site(
    store: &ScheduleStore,
    output_dir: &Path,
    start_date: NaiveDate,
    days: u32,
    use_12h: bool,
    styles: Option<&Path>,
    island: &str,
    title: &str,
) -> Result<(), ScheduleError> {
    create_dir(output_dir)?;

    if let Some(css) = styles {
        if css.exists() {
            fs::copy(css, output_dir.join("styles.css")).map_err(|e| {
                ScheduleError::RenderError(format!("failure copying '{}': {e}", css.display()))
            })?;
            log::info!("copied stylesheet: {}", css.display());
        } else {
            log::warn!("stylesheet not found at {}", css.display());
        }
    }

    let mut dates = vec![];
    let mut current = start_date;
    for _ in 0..days {
        dates.push(current);
        let sheet = ferries_for_day(store, current, use_12h);

        let date_dir = output_dir.join(current.format("%Y-%m-%d").to_string());
        create_dir(&date_dir)?;
        write_page(&date_dir.join("index.html"), &render_day_page(&sheet, title))?;

        // arrivals to and departures from the island
        let arrive_dir = date_dir.join("arrive");
        let depart_dir = date_dir.join("depart");
        create_dir(&arrive_dir)?;
        create_dir(&depart_dir)?;

        let arrivals = filter_by_direction(&sheet, |f| f.to == island);
        write_page(
            &arrive_dir.join("index.html"),
            &render_day_page(&arrivals, title),
        )?;
        let departures = filter_by_direction(&sheet, |f| f.from == island);
        write_page(
            &depart_dir.join("index.html"),
            &render_day_page(&departures, title),
        )?;

        log::debug!("generated pages for {current}");
        current = current.succ_opt().ok_or_else(|| {
            ScheduleError::RenderError(format!("date range overflow after {current}"))
        })?;
    }

    write_page(
        &output_dir.join("index.html"),
        &render_index_page(title, &dates),
    )?;

    log::info!("static site published to: {}", output_dir.display());
    Ok(())
}

fn filter_by_direction<F>(sheet: &DaySheet, keep: F) -> DaySheet
where
    F: Fn(&DayFerry) -> bool,
{
    DaySheet {
        date: sheet.date,
        ferries: sheet.ferries.iter().filter(|f| keep(f)).cloned().collect(),
        services: sheet.services.clone(),
        timezone: sheet.timezone.clone(),
    }
}

#[cfg(test)]
mod test {
    use super::{publish_site, render_day_page};
    use crate::schedule::model::{FerryLeg, Schedule, ScheduleStore, TimeOfDay, Weekday};
    use crate::schedule::render::ferries_for_day;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    const ISLAND: &str = "Chebeague Island";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> ScheduleStore {
        let all: BTreeSet<Weekday> = Weekday::ALL.into_iter().collect();
        let legs = vec![
            FerryLeg::new(TimeOfDay::new(5, 0).unwrap(), "Portland", ISLAND, all.clone()),
            FerryLeg::new(TimeOfDay::new(6, 0).unwrap(), ISLAND, "Portland", all),
        ];
        let mut store = ScheduleStore::default();
        store.merge(
            "cbl",
            Schedule {
                name: String::from("Summer"),
                start: date(2025, 6, 21),
                end: Some(date(2025, 9, 1)),
                url: String::from("https://example.com/summer"),
                ferries: legs,
            },
        );
        store
    }

    #[test]
    fn test_day_page_lists_ferries_in_order() {
        let sheet = ferries_for_day(&store(), date(2025, 7, 4), false);
        let html = render_day_page(&sheet, "Ferry Schedule");
        assert!(html.contains("Friday, July 04, 2025"));
        let first = html.find("05:00").unwrap();
        let second = html.find("06:00").unwrap();
        assert!(first < second);
        assert!(html.contains("CBL Summer"));
    }

    #[test]
    fn test_day_page_without_service() {
        let sheet = ferries_for_day(&store(), date(2024, 1, 1), false);
        let html = render_day_page(&sheet, "Ferry Schedule");
        assert!(html.contains("No ferries scheduled"));
    }

    #[test]
    fn test_publish_site_layout() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("site");
        publish_site(
            &store(),
            &out,
            date(2025, 7, 4),
            2,
            false,
            None,
            ISLAND,
            "Ferry Schedule",
        )
        .expect("publish succeeds");

        assert!(out.join("index.html").exists());
        for day in ["2025-07-04", "2025-07-05"] {
            assert!(out.join(day).join("index.html").exists());
            assert!(out.join(day).join("arrive").join("index.html").exists());
            assert!(out.join(day).join("depart").join("index.html").exists());
        }

        // arrivals page only holds legs ending at the island
        let arrivals =
            std::fs::read_to_string(out.join("2025-07-04").join("arrive").join("index.html"))
                .unwrap();
        assert!(arrivals.contains("05:00"));
        assert!(!arrivals.contains("06:00"));
    }
}
