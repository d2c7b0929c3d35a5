use chrono::NaiveDate;
use itertools::Itertools;

use crate::schedule::model::{Schedule, ScheduleStore, TimeOfDay, Weekday};

/// one ferry leg selected for display on a specific day, tagged with the
/// service it belongs to. `time` is the display string (12h or 24h);
/// `sort_time` keeps the canonical value for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFerry {
    pub service: String,
    pub service_url: String,
    pub time: String,
    pub sort_time: TimeOfDay,
    pub from: String,
    pub to: String,
}

/// link line for one service shown in the page footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLink {
    pub name: String,
    pub url: String,
}

/// everything needed to render one day's page.
#[derive(Debug, Clone)]
pub struct DaySheet {
    pub date: NaiveDate,
    pub ferries: Vec<DayFerry>,
    pub services: Vec<ServiceLink>,
    pub timezone: String,
}

/// the schedule in effect on the target date: the first whose window
/// covers it (an absent end date is open-ended).
pub fn find_active_schedule(schedules: &[Schedule], date: NaiveDate) -> Option<&Schedule> {
    schedules.iter().find(|s| s.covers(date))
}

/// collects all legs running on the target date across every service in
/// the store, sorted by canonical 24-hour time, along with per-service
/// link info and the first service's timezone.
pub fn ferries_for_day(store: &ScheduleStore, date: NaiveDate, use_12h: bool) -> DaySheet {
    let day = Weekday::from_date(date);
    let mut ferries: Vec<DayFerry> = vec![];
    let mut services: Vec<ServiceLink> = vec![];
    let mut timezone: Option<String> = None;

    for (service_name, service) in &store.services {
        if timezone.is_none() {
            timezone = Some(service.tzid.clone());
        }

        let active = find_active_schedule(&service.schedules, date);
        services.push(match active {
            Some(schedule) => ServiceLink {
                name: format!("{} {}", service_name.to_uppercase(), schedule.name),
                url: schedule.url.clone(),
            },
            None => ServiceLink {
                name: service_name.clone(),
                url: String::from("#"),
            },
        });

        let Some(schedule) = active else {
            continue;
        };
        for leg in schedule.ferries.iter().filter(|leg| leg.operates_on(day)) {
            let time = if use_12h {
                leg.time.to_12h()
            } else {
                leg.time.to_string()
            };
            ferries.push(DayFerry {
                service: service_name.clone(),
                service_url: schedule.url.clone(),
                time,
                sort_time: leg.time,
                from: leg.from.clone(),
                to: leg.to.clone(),
            });
        }
    }

    let ferries = ferries
        .into_iter()
        .sorted_by_key(|f| f.sort_time)
        .collect_vec();

    DaySheet {
        date,
        ferries,
        services,
        timezone: timezone.unwrap_or_else(|| String::from("UTC")),
    }
}

#[cfg(test)]
mod test {
    use super::{ferries_for_day, find_active_schedule};
    use crate::schedule::model::{FerryLeg, Schedule, ScheduleStore, TimeOfDay, Weekday};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn all_days() -> BTreeSet<Weekday> {
        Weekday::ALL.into_iter().collect()
    }

    fn schedule(name: &str, start: NaiveDate, end: Option<NaiveDate>, legs: Vec<FerryLeg>) -> Schedule {
        Schedule {
            name: name.to_string(),
            start,
            end,
            url: format!("https://example.com/{}", name.to_lowercase()),
            ferries: legs,
        }
    }

    #[test]
    fn test_active_schedule_selection() {
        let schedules = vec![
            schedule("Summer", date(2025, 6, 21), Some(date(2025, 9, 1)), vec![]),
            schedule("Fall", date(2025, 9, 2), Some(date(2025, 10, 13)), vec![]),
            schedule("Winter", date(2025, 10, 14), None, vec![]),
        ];
        assert_eq!(
            find_active_schedule(&schedules, date(2025, 7, 4)).map(|s| s.name.as_str()),
            Some("Summer")
        );
        assert_eq!(
            find_active_schedule(&schedules, date(2025, 9, 2)).map(|s| s.name.as_str()),
            Some("Fall")
        );
        // open-ended window
        assert_eq!(
            find_active_schedule(&schedules, date(2026, 2, 1)).map(|s| s.name.as_str()),
            Some("Winter")
        );
        assert_eq!(find_active_schedule(&schedules, date(2025, 1, 1)), None);
    }

    #[test]
    fn test_ferries_filtered_by_weekday_and_sorted() {
        let weekdays_only: BTreeSet<Weekday> = Weekday::ALL[..5].iter().copied().collect();
        let legs = vec![
            FerryLeg::new(TimeOfDay::new(18, 0).unwrap(), "A", "B", all_days()),
            FerryLeg::new(TimeOfDay::new(5, 0).unwrap(), "B", "A", all_days()),
            FerryLeg::new(TimeOfDay::new(9, 0).unwrap(), "A", "B", weekdays_only),
        ];
        let mut store = ScheduleStore::default();
        store.merge(
            "cbl",
            schedule("Summer", date(2025, 6, 21), Some(date(2025, 9, 1)), legs),
        );

        // 2025-06-23 is a Monday: all three legs run, in time order
        let sheet = ferries_for_day(&store, date(2025, 6, 23), false);
        let times: Vec<_> = sheet.ferries.iter().map(|f| f.time.as_str()).collect();
        assert_eq!(times, vec!["05:00", "09:00", "18:00"]);

        // 2025-06-21 is a Saturday: the weekday-only leg drops out
        let sheet = ferries_for_day(&store, date(2025, 6, 21), false);
        assert_eq!(sheet.ferries.len(), 2);

        assert_eq!(sheet.timezone, "America/New_York");
        assert_eq!(sheet.services.len(), 1);
        assert_eq!(sheet.services[0].name, "CBL Summer");
    }

    #[test]
    fn test_12h_display_formatting() {
        let legs = vec![FerryLeg::new(
            TimeOfDay::new(20, 15).unwrap(),
            "A",
            "B",
            all_days(),
        )];
        let mut store = ScheduleStore::default();
        store.merge(
            "ctc",
            schedule("Winter", date(2025, 10, 14), None, legs),
        );
        let sheet = ferries_for_day(&store, date(2025, 10, 20), true);
        assert_eq!(sheet.ferries[0].time, "8:15 PM");
    }

    #[test]
    fn test_inactive_service_keeps_placeholder_link() {
        let mut store = ScheduleStore::default();
        store.merge(
            "cbl",
            schedule("Summer", date(2025, 6, 21), Some(date(2025, 9, 1)), vec![]),
        );
        let sheet = ferries_for_day(&store, date(2024, 1, 1), false);
        assert_eq!(sheet.services[0].name, "cbl");
        assert_eq!(sheet.services[0].url, "#");
    }
}
