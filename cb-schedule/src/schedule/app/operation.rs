//! ingestion and publishing operations for the ferry schedule store.
//! each subcommand maps to one batch run: scrape or import a source,
//! merge the built schedule into the YAML store, or render the store
//! into static pages.
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{value_parser, Subcommand};

use crate::schedule::ingest::{
    build_grid_schedule, export_normalized_grid, fetch, parse_html_schedule, read_grid,
};
use crate::schedule::model::ScheduleStore;
use crate::schedule::render::{ferries_for_day, publish_site, render_day_page};
use crate::schedule::ScheduleError;

#[derive(Debug, Clone, Subcommand)]
pub enum ScheduleOperation {
    /// scrape an HTML schedule page and merge it into the store
    ScrapeHtml {
        /// source schedule page url
        url: String,
        /// local cache file: read if present, otherwise fetch and write
        #[arg(long)]
        path: Option<PathBuf>,
        /// path of the YAML schedule store
        #[arg(long, default_value_t = String::from("schedule.yaml"))]
        output: String,
        /// service the schedule belongs to
        #[arg(long, default_value_t = String::from("cbl"))]
        service: String,
        /// mainland departure location of the outbound column
        #[arg(long = "from", default_value_t = String::from("Portland"))]
        origin: String,
        /// island arrival location of the outbound column
        #[arg(long = "to", default_value_t = String::from("Chebeague Island"))]
        destination: String,
    },
    /// import an extracted table grid (CSV) and merge it into the store
    ImportGrid {
        /// CSV file holding the extracted table grid
        #[arg(long)]
        csv_input: PathBuf,
        /// optionally re-export the grid with normalized times and flags
        #[arg(long)]
        csv_output: Option<PathBuf>,
        /// first date the schedule is in effect (YYYY-MM-DD)
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        start: NaiveDate,
        /// last date the schedule is in effect (YYYY-MM-DD)
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        end: Option<NaiveDate>,
        /// name of the schedule, e.g. Summer or Winter
        #[arg(long)]
        name: String,
        /// path of the YAML schedule store
        #[arg(long, default_value_t = String::from("schedule.yaml"))]
        output: String,
        /// service the schedule belongs to
        #[arg(long, default_value_t = String::from("ctc"))]
        service: String,
        /// provenance url recorded on the schedule
        #[arg(long, default_value_t = String::from("https://www.ctcferry.org/#schedule"))]
        url: String,
        /// departure location of the first time column
        #[arg(long = "from", default_value_t = String::from("Chebeague Island"))]
        origin: String,
        /// departure location of the second time column
        #[arg(long = "to", default_value_t = String::from("Cousins Island"))]
        destination: String,
    },
    /// render one day's schedule as a standalone HTML page
    RenderDay {
        /// target date (YYYY-MM-DD)
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        date: NaiveDate,
        /// path of the YAML schedule store
        #[arg(long, default_value_t = String::from("schedule.yaml"))]
        schedule: String,
        /// output HTML file path
        #[arg(long)]
        output: PathBuf,
        /// display times in 12-hour format instead of 24-hour
        #[arg(long)]
        use_12h: bool,
        /// page heading
        #[arg(long, default_value_t = String::from("Ferry Schedule"))]
        title: String,
    },
    /// publish a static multi-day schedule site
    Publish {
        /// path of the YAML schedule store
        #[arg(long, default_value_t = String::from("schedule.yaml"))]
        schedule: String,
        /// output directory for the static site
        #[arg(long, default_value_t = String::from("site"))]
        output_dir: String,
        /// first date to generate (YYYY-MM-DD)
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        start_date: NaiveDate,
        /// number of days to generate
        #[arg(long, default_value_t = 30)]
        days: u32,
        /// display times in 12-hour format instead of 24-hour
        #[arg(long)]
        use_12h: bool,
        /// stylesheet copied into the site root
        #[arg(long)]
        styles: Option<PathBuf>,
        /// island location used to split arrivals from departures
        #[arg(long, default_value_t = String::from("Chebeague Island"))]
        island: String,
        /// site heading
        #[arg(long, default_value_t = String::from("Chebeague Island Ferry Schedule"))]
        title: String,
    },
}

impl ScheduleOperation {
    pub fn run(&self) -> Result<(), ScheduleError> {
        match self {
            ScheduleOperation::ScrapeHtml {
                url,
                path,
                output,
                service,
                origin,
                destination,
            } => {
                let html = fetch::load_or_fetch(url, path.as_deref())?;
                let today = Local::now().date_naive();
                let schedule = parse_html_schedule(&html, url, origin, destination, today)?;
                let covers = (schedule.start, schedule.end);

                let output = Path::new(output);
                let mut store = ScheduleStore::load(output)?;
                store.merge(service, schedule);
                store.save(output)?;

                log::info!("successfully scraped and saved schedule to {}", output.display());
                match covers.1 {
                    Some(end) => log::info!("schedule covers {} to {end}", covers.0),
                    None => log::info!("schedule starts {} (open-ended)", covers.0),
                }
                Ok(())
            }
            ScheduleOperation::ImportGrid {
                csv_input,
                csv_output,
                start,
                end,
                name,
                output,
                service,
                url,
                origin,
                destination,
            } => {
                log::info!("reading schedule data from CSV: {}", csv_input.display());
                let table = read_grid(csv_input)?;
                if let Some(csv_output) = csv_output {
                    log::info!("saving normalized data to CSV: {}", csv_output.display());
                    export_normalized_grid(&table, csv_output)?;
                }

                let (schedule, report) =
                    build_grid_schedule(&table, name, url, *start, *end, origin, destination)?;
                for outcome in report.skipped() {
                    log::warn!("{outcome:?}");
                }
                log::info!("{report}");

                let output = Path::new(output);
                let mut store = ScheduleStore::load(output)?;
                store.merge(service, schedule);
                store.save(output)?;
                log::info!("successfully imported schedule '{name}' to {}", output.display());
                Ok(())
            }
            ScheduleOperation::RenderDay {
                date,
                schedule,
                output,
                use_12h,
                title,
            } => {
                let store = ScheduleStore::load_required(Path::new(schedule))?;
                let sheet = ferries_for_day(&store, *date, *use_12h);
                let html = render_day_page(&sheet, title);
                std::fs::write(output, html).map_err(|e| {
                    ScheduleError::RenderError(format!(
                        "failure writing '{}': {e}",
                        output.display()
                    ))
                })?;
                log::info!("generated HTML for {date} -> {}", output.display());
                Ok(())
            }
            ScheduleOperation::Publish {
                schedule,
                output_dir,
                start_date,
                days,
                use_12h,
                styles,
                island,
                title,
            } => {
                let store = ScheduleStore::load_required(Path::new(schedule))?;
                publish_site(
                    &store,
                    Path::new(output_dir),
                    *start_date,
                    *days,
                    *use_12h,
                    styles.as_deref(),
                    island,
                    title,
                )
            }
        }
    }
}
