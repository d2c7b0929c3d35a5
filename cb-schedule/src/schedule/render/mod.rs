mod day;
mod site;

pub use day::{ferries_for_day, find_active_schedule, DayFerry, DaySheet, ServiceLink};
pub use site::{publish_site, render_day_page};
